//! Subset of OpenRTB 2.3 used for outbound auction requests to the SSP.
//!
//! The response side is intentionally not modeled as structs: responses are
//! interpreted from loose JSON so one malformed record cannot poison the
//! rest (see [`crate::response`]).

use serde::{Deserialize, Serialize};

use crate::identity::IdentityAssertion;

/// Outbound OpenRTB 2.3 bid request.
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenRtbRequest {
    /// Auction identifier, shared by every impression in the request.
    pub id: String,
    pub imp: Vec<Imp>,
    pub site: Site,
    pub device: Device,
    pub regs: Regs,
    pub user: User,
}

/// Per-slot impression descriptor.
#[derive(Debug, Serialize, Deserialize)]
pub struct Imp {
    pub id: String,
    pub banner: Banner,
    pub ext: ImpExt,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Banner {
    pub mimes: Vec<String>,
    pub format: Vec<Format>,
    pub tagid: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Format {
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImpExt {
    pub pos: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dfp_ad_unit_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ua: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Regs {
    pub ext: RegsExt,
}

/// Regulatory descriptor derived from the auction context.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegsExt {
    /// US privacy string; empty when the auction carries none.
    pub us_privacy: String,
    /// 1 when GDPR applies to this auction, else 0.
    pub gdpr: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub regs: UserRegs,
    pub ext: UserExt,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegs {
    pub gdpr: UserGdpr,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserGdpr {
    /// Consent string; empty unless GDPR applies.
    pub euconsent: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserExt {
    /// Identity assertions that survived source selection. Always present,
    /// empty when nothing is accepted.
    pub eids: Vec<IdentityAssertion>,
}
