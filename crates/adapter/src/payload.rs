//! Assembly of the canonical auction request shared by all slots in one
//! auction.

use error_stack::Report;

use crate::constants::BANNER_MIMES;
use crate::error::AdapterError;
use crate::identity::select_supported_eids;
use crate::openrtb::{
    Banner, Device, Imp, ImpExt, OpenRtbRequest, Regs, RegsExt, Site, User, UserExt, UserGdpr,
    UserRegs,
};
use crate::sizes::transform_sizes;
use crate::types::{AdSlotRequest, AuctionContext};

/// Builds one canonical auction request carrying an impression descriptor
/// per slot.
///
/// The site id is taken from the FIRST slot's `dcn`, and the identity list
/// from the FIRST slot's assertions; slots within one auction are expected
/// to share those. This mirrors the SSP's established contract and is pinned
/// by tests. Do not generalize it without coordinating a protocol change.
///
/// Slots whose size declaration fails coercion are rejected with a warning
/// and excluded. Returns `None` when no impression survives, so a request
/// without impressions can never be dispatched.
pub fn build_payload(slots: &[&AdSlotRequest], ctx: &AuctionContext) -> Option<OpenRtbRequest> {
    let first = slots.first()?;

    let mut imps = Vec::with_capacity(slots.len());
    for slot in slots {
        match impression(slot) {
            Ok(imp) => imps.push(imp),
            Err(report) => {
                log::warn!("rejecting slot {}: {report:?}", slot.id);
            }
        }
    }
    if imps.is_empty() {
        return None;
    }

    let gdpr_applies = ctx
        .gdpr_consent
        .as_ref()
        .and_then(|c| c.applies)
        .unwrap_or(false);
    let euconsent = if gdpr_applies {
        ctx.gdpr_consent
            .as_ref()
            .and_then(|c| c.consent_string.clone())
            .unwrap_or_default()
    } else {
        String::new()
    };

    Some(OpenRtbRequest {
        id: ctx.auction_id.clone(),
        imp: imps,
        site: Site {
            id: first.params.dcn.clone(),
            page: ctx.page_url.clone(),
        },
        device: Device {
            ua: ctx.user_agent.clone(),
        },
        regs: Regs {
            ext: RegsExt {
                us_privacy: ctx.us_privacy.clone().unwrap_or_default(),
                gdpr: u8::from(gdpr_applies),
            },
        },
        user: User {
            regs: UserRegs {
                gdpr: UserGdpr { euconsent },
            },
            ext: UserExt {
                eids: select_supported_eids(&first.eids),
            },
        },
    })
}

fn impression(slot: &AdSlotRequest) -> Result<Imp, Report<AdapterError>> {
    let format = transform_sizes(&slot.sizes)?;
    Ok(Imp {
        id: slot.id.clone(),
        banner: Banner {
            mimes: BANNER_MIMES.iter().map(|&m| m.to_string()).collect(),
            format,
            tagid: slot.params.pos.clone(),
        },
        ext: ImpExt {
            pos: slot.params.pos.clone(),
            dfp_ad_unit_code: slot.ad_unit_code.clone(),
        },
    })
}
