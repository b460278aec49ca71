//! Shared data model for the adapter: ad slots, auction context, transport
//! records, and normalized bid results.

use std::collections::HashMap;

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consent::GdprConsent;
use crate::constants::{HEADER_OPENRTB_VERSION, OPENRTB_VERSION};
use crate::identity::IdentityAssertion;
use crate::openrtb::OpenRtbRequest;
use crate::sizes::SizeList;

/// Media type enumeration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Banner,
    Video,
    Native,
}

/// Publisher-defined placement parameters attached to a slot.
///
/// Both fields are required non-empty; slots failing that check are rejected
/// by the validation entry point before ever reaching the payload builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotParams {
    /// Publisher site identifier within the SSP (the `dcn`).
    pub dcn: String,
    /// Position tag for the placement (e.g. "header").
    pub pos: String,
}

/// One ad placement to bid on. Immutable once constructed by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdSlotRequest {
    /// Stable slot identifier, echoed back as the impression id.
    pub id: String,
    /// Transaction identifier assigned by the auction engine.
    pub transaction_id: String,
    /// Page-level ad-unit code, when the page declares one.
    pub ad_unit_code: Option<String>,
    /// Media types the slot accepts; only banner-capable slots are bid on.
    pub media_types: Vec<MediaType>,
    /// Declared sizes, either a bare `[w, h]` pair or a list of pairs.
    pub sizes: SizeList,
    pub params: SlotParams,
    /// Third-party identity assertions supplied by the identity registry.
    #[serde(default)]
    pub eids: Vec<IdentityAssertion>,
}

/// Context shared across all slots in one auction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionContext {
    pub auction_id: String,
    /// Page URL the auction runs on.
    pub page_url: Option<String>,
    /// Browser user agent, forwarded into the device descriptor.
    pub user_agent: Option<String>,
    /// Resolved GDPR consent state, when the jurisdiction supplies one.
    pub gdpr_consent: Option<GdprConsent>,
    /// US privacy (CCPA) string, when present.
    pub us_privacy: Option<String>,
}

/// Transport options attached to every outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub content_type: String,
    pub custom_headers: HashMap<String, String>,
    /// Whether the transport may send credentials (cookies) with the request.
    pub with_credentials: bool,
}

impl RequestOptions {
    /// Standard options for an SSP auction request.
    #[must_use]
    pub fn new(with_credentials: bool) -> Self {
        let mut custom_headers = HashMap::new();
        custom_headers.insert(
            HEADER_OPENRTB_VERSION.as_str().to_string(),
            OPENRTB_VERSION.to_string(),
        );
        Self {
            content_type: "application/json".to_string(),
            custom_headers,
            with_credentials,
        }
    }
}

/// A transport-ready auction request. Handed to the HTTP collaborator as-is;
/// nothing downstream adds headers or retries.
#[derive(Debug)]
pub struct TransportRequest {
    pub url: String,
    /// Always [`Method::POST`].
    pub method: Method,
    pub body: OpenRtbRequest,
    pub options: RequestOptions,
}

/// Raw auction response as delivered by the transport collaborator.
///
/// `body` is kept as loose JSON: response interpretation must survive
/// arbitrary shape mismatches by returning no bids, never by failing.
#[derive(Debug, Clone, Default)]
pub struct ServerResponse {
    pub body: Option<Value>,
}

/// One normalized bid, in the shape the auction engine consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedBidResult {
    /// Slot this bid is for.
    pub slot_id: String,
    /// Creative markup (HTML).
    pub ad_markup: String,
    /// Effective CPM; the encoded override when the SSP supplies one.
    pub price: f64,
    pub width: u32,
    pub height: u32,
    pub creative_id: String,
    pub currency: String,
    pub deal_id: Option<String>,
    pub net_revenue: bool,
    pub ttl_seconds: u32,
}
