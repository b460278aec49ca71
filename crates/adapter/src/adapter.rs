//! External entry points the auction engine calls: slot validation, request
//! building with batching, and user-sync collection.

use http::Method;
use serde_json::Value;

use crate::consent::purpose1_consent;
use crate::payload::build_payload;
use crate::settings::AdapterConfig;
use crate::sync::{extract_sync_pixels, SyncInstruction, SyncPermissions};
use crate::types::{
    AdSlotRequest, AuctionContext, MediaType, RequestOptions, ServerResponse, SlotParams,
    TransportRequest,
};

pub use crate::response::interpret_response;

/// Request-batching strategy, selected once per auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// One combined request carrying every eligible slot.
    Single,
    /// One request per eligible slot.
    PerSlot,
}

impl RequestMode {
    /// Resolves the mode from configuration; absent override means per-slot.
    #[must_use]
    pub fn from_config(config: &AdapterConfig) -> Self {
        if config.single_request {
            Self::Single
        } else {
            Self::PerSlot
        }
    }
}

/// Checks that a slot's placement parameters are usable: both the site
/// identifier and the position tag must be non-empty. Never fails loudly;
/// an invalid slot is simply not bid on.
#[must_use]
pub fn is_bid_request_valid(params: &SlotParams) -> bool {
    !params.dcn.is_empty() && !params.pos.is_empty()
}

/// Builds the transport-ready auction request(s) for one auction.
///
/// Slots without banner capability are dropped without error; when nothing
/// is eligible the result is empty, never an error. The consent evaluation
/// runs once and its outcome sets the credentials flag on every emitted
/// request. Configuration must be resolved by the caller before the auction
/// starts and is treated as immutable for its duration.
#[must_use]
pub fn build_requests(
    slots: &[AdSlotRequest],
    ctx: &AuctionContext,
    config: &AdapterConfig,
) -> Vec<TransportRequest> {
    let eligible: Vec<&AdSlotRequest> = slots
        .iter()
        .filter(|slot| slot.media_types.contains(&MediaType::Banner))
        .collect();
    if eligible.is_empty() {
        return Vec::new();
    }

    let options = RequestOptions::new(purpose1_consent(ctx.gdpr_consent.as_ref()));

    let requests: Vec<TransportRequest> = match RequestMode::from_config(config) {
        RequestMode::Single => build_payload(&eligible, ctx)
            .map(|body| TransportRequest {
                url: config.endpoint.clone(),
                method: Method::POST,
                body,
                options: options.clone(),
            })
            .into_iter()
            .collect(),
        RequestMode::PerSlot => eligible
            .iter()
            .filter_map(|slot| build_payload(std::slice::from_ref(slot), ctx))
            .map(|body| TransportRequest {
                url: config.endpoint.clone(),
                method: Method::POST,
                body,
                options: options.clone(),
            })
            .collect(),
    };

    log::debug!(
        "built {} auction request(s) for {} slot(s), endpoint {}",
        requests.len(),
        slots.len(),
        config.endpoint
    );

    requests
}

/// Collects user-sync instructions from prior auction responses, filtered by
/// what the caller currently permits.
///
/// Pixel fragments are taken from each response's top-level `ext.pixels` and
/// from every bid record's `ext.pixels`, in encounter order. Absent or
/// unmatched markup yields an empty list, never an error.
#[must_use]
pub fn get_user_syncs(
    permissions: &SyncPermissions,
    responses: &[ServerResponse],
) -> Vec<SyncInstruction> {
    let mut syncs = Vec::new();
    for response in responses {
        let Some(body) = response.body.as_ref() else {
            continue;
        };
        for fragment in pixel_fragments(body) {
            syncs.extend(extract_sync_pixels(fragment, permissions));
        }
    }
    syncs
}

fn pixel_fragments(body: &Value) -> Vec<&str> {
    let mut fragments = Vec::new();
    if let Some(pixels) = body
        .get("ext")
        .and_then(|ext| ext.get("pixels"))
        .and_then(Value::as_str)
    {
        fragments.push(pixels);
    }
    if let Some(seatbids) = body.get("seatbid").and_then(Value::as_array) {
        for seatbid in seatbids {
            let Some(bids) = seatbid.get("bid").and_then(Value::as_array) else {
                continue;
            };
            for bid in bids {
                if let Some(pixels) = bid
                    .get("ext")
                    .and_then(|ext| ext.get("pixels"))
                    .and_then(Value::as_str)
                {
                    fragments.push(pixels);
                }
            }
        }
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consent::GdprConsent;
    use crate::identity::{IdentityAssertion, Uid};
    use crate::sync::SyncType;
    use crate::test_support::{default_config, default_context, slot};
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn rejects_slots_with_missing_or_empty_placement_params() {
        let invalid = [
            SlotParams {
                dcn: String::new(),
                pos: "header".to_string(),
            },
            SlotParams {
                dcn: "2c9d2b50015a5aa95b70a9b0b5b10012".to_string(),
                pos: String::new(),
            },
            SlotParams {
                dcn: String::new(),
                pos: String::new(),
            },
        ];
        for params in &invalid {
            assert!(!is_bid_request_valid(params));
        }
    }

    #[test]
    fn accepts_slots_with_both_placement_params() {
        let params = SlotParams {
            dcn: "2c9d2b50015a5aa95b70a9b0b5b10012".to_string(),
            pos: "header".to_string(),
        };
        assert!(is_bid_request_valid(&params));
    }

    #[test]
    fn no_slots_produce_no_requests() {
        let requests = build_requests(&[], &default_context(), &default_config());
        assert!(requests.is_empty());
    }

    #[test]
    fn slots_without_banner_capability_are_dropped_silently() {
        let mut video_only = slot("video-slot", "header");
        video_only.media_types = vec![MediaType::Video];

        let requests = build_requests(&[video_only], &default_context(), &default_config());
        assert!(requests.is_empty());
    }

    #[test]
    fn per_slot_mode_emits_one_request_per_eligible_slot() {
        let slots = vec![slot("slot-a", "header"), slot("slot-b", "footer")];

        let requests = build_requests(&slots, &default_context(), &default_config());
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body.imp.len(), 1);
        assert_eq!(requests[0].body.imp[0].id, "slot-a");
        assert_eq!(requests[1].body.imp.len(), 1);
        assert_eq!(requests[1].body.imp[0].id, "slot-b");
    }

    #[test]
    fn single_mode_combines_all_eligible_slots_in_input_order() {
        let mut config = default_config();
        config.single_request = true;
        let slots = vec![slot("slot-a", "header"), slot("slot-b", "footer")];

        let requests = build_requests(&slots, &default_context(), &config);
        assert_eq!(requests.len(), 1);

        let imps = &requests[0].body.imp;
        assert_eq!(imps.len(), 2);
        assert_eq!(imps[0].id, "slot-a");
        assert_eq!(imps[0].ext.pos, "header");
        assert_eq!(imps[1].id, "slot-b");
        assert_eq!(imps[1].ext.pos, "footer");
    }

    #[test]
    fn single_mode_uses_first_slot_site_and_identity() {
        let mut config = default_config();
        config.single_request = true;

        let mut first = slot("slot-a", "header");
        first.params.dcn = "dcn-first".to_string();
        first.eids = vec![IdentityAssertion {
            source: "liveramp.com".to_string(),
            uids: vec![Uid {
                id: "lr-123".to_string(),
                atype: Some(1),
            }],
        }];
        let mut second = slot("slot-b", "footer");
        second.params.dcn = "dcn-second".to_string();
        second.eids = vec![IdentityAssertion {
            source: "verizonmedia.com".to_string(),
            uids: vec![Uid {
                id: "vm-456".to_string(),
                atype: Some(1),
            }],
        }];

        let requests = build_requests(&[first, second], &default_context(), &config);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body.site.id, "dcn-first");
        assert_eq!(requests[0].body.user.ext.eids.len(), 1);
        assert_eq!(requests[0].body.user.ext.eids[0].source, "liveramp.com");
    }

    #[test]
    fn requests_target_the_default_endpoint_with_post() {
        let requests = build_requests(
            &[slot("slot-a", "header")],
            &default_context(),
            &default_config(),
        );
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url, "https://c2shb.ssp.yahoo.com/bidRequest");
    }

    #[test]
    fn endpoint_override_is_honored() {
        let mut config = default_config();
        config.endpoint = "http://foo.bar.baz.com/bidRequest".to_string();

        let requests = build_requests(&[slot("slot-a", "header")], &default_context(), &config);
        assert_eq!(requests[0].url, "http://foo.bar.baz.com/bidRequest");
    }

    #[test]
    fn requests_carry_content_type_and_protocol_version_header() {
        let requests = build_requests(
            &[slot("slot-a", "header")],
            &default_context(),
            &default_config(),
        );
        let options = &requests[0].options;
        assert_eq!(options.content_type, "application/json");
        assert_eq!(
            options.custom_headers.get("x-openrtb-version").map(String::as_str),
            Some("2.3")
        );
        assert!(options.with_credentials);
    }

    #[test]
    fn denied_purpose_one_consent_disables_credentials_on_every_request() {
        let mut ctx = default_context();
        ctx.gdpr_consent = Some(GdprConsent {
            applies: Some(true),
            consent_string: Some("BOtmiBKOtmiBKABABAENAFAAAAACeAAA".to_string()),
            api_version: Some(2),
            purpose_consents: BTreeMap::from([(1, false)]),
        });

        let slots = vec![slot("slot-a", "header"), slot("slot-b", "footer")];
        let requests = build_requests(&slots, &ctx, &default_config());
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| !r.options.with_credentials));
    }

    #[test]
    fn payload_matches_the_ssp_wire_shape() {
        let ctx = default_context();
        let requests = build_requests(&[slot("slot-a", "header")], &ctx, &default_config());
        assert_eq!(requests.len(), 1);

        let body = serde_json::to_value(&requests[0].body).expect("should serialize payload");
        assert_eq!(
            body,
            json!({
                "id": ctx.auction_id,
                "imp": [{
                    "id": "slot-a",
                    "banner": {
                        "mimes": [
                            "text/html",
                            "text/javascript",
                            "application/javascript",
                            "image/jpg"
                        ],
                        "format": [{"w": 300, "h": 250}, {"w": 300, "h": 600}],
                        "tagid": "header"
                    },
                    "ext": {
                        "pos": "header"
                    }
                }],
                "site": {
                    "id": "2c9d2b50015c5ce9db6aeeed8b9500d6",
                    "page": "https://publisher-test.com"
                },
                "device": {
                    "ua": "test-agent"
                },
                "regs": {
                    "ext": {
                        "us_privacy": "",
                        "gdpr": 1
                    }
                },
                "user": {
                    "regs": {
                        "gdpr": {
                            "euconsent": "BOtmiBKOtmiBKABABAENAFAAAAACeAAA"
                        }
                    },
                    "ext": {
                        "eids": []
                    }
                }
            })
        );
    }

    #[test]
    fn us_privacy_string_is_forwarded_when_present() {
        let mut ctx = default_context();
        ctx.us_privacy = Some("1YNN".to_string());

        let requests = build_requests(&[slot("slot-a", "header")], &ctx, &default_config());
        assert_eq!(requests[0].body.regs.ext.us_privacy, "1YNN");
    }

    #[test]
    fn consent_string_is_omitted_when_gdpr_does_not_apply() {
        let mut ctx = default_context();
        ctx.gdpr_consent = Some(GdprConsent {
            applies: Some(false),
            consent_string: Some("BOtmiBKOtmiBKABABAENAFAAAAACeAAA".to_string()),
            ..GdprConsent::default()
        });

        let requests = build_requests(&[slot("slot-a", "header")], &ctx, &default_config());
        assert_eq!(requests[0].body.regs.ext.gdpr, 0);
        assert_eq!(requests[0].body.user.regs.gdpr.euconsent, "");
    }

    #[test]
    fn user_syncs_respect_permission_flags() {
        let response = ServerResponse {
            body: Some(json!({
                "ext": {
                    "pixels": r#"<img src="http://a/x"><iframe src="http://b/y"></iframe>"#
                }
            })),
        };

        let permissions = SyncPermissions {
            images_allowed: true,
            iframes_allowed: false,
        };
        let syncs = get_user_syncs(&permissions, &[response]);
        assert_eq!(syncs.len(), 1);
        assert_eq!(syncs[0].kind, SyncType::Image);
        assert_eq!(syncs[0].url, "http://a/x");
    }

    #[test]
    fn user_syncs_scan_bid_level_pixel_fragments() {
        let response = ServerResponse {
            body: Some(json!({
                "seatbid": [{
                    "bid": [{
                        "impid": "slot-a",
                        "price": 0.5,
                        "adm": "<div></div>",
                        "ext": { "pixels": r#"<img src="http://sync.example/px">"# }
                    }]
                }]
            })),
        };

        let permissions = SyncPermissions {
            images_allowed: true,
            iframes_allowed: true,
        };
        let syncs = get_user_syncs(&permissions, &[response]);
        assert_eq!(syncs.len(), 1);
        assert_eq!(syncs[0].url, "http://sync.example/px");
    }

    #[test]
    fn user_syncs_are_empty_without_responses_or_pixels() {
        let permissions = SyncPermissions {
            images_allowed: true,
            iframes_allowed: true,
        };
        assert!(get_user_syncs(&permissions, &[]).is_empty());
        assert!(get_user_syncs(&permissions, &[ServerResponse::default()]).is_empty());
        assert!(get_user_syncs(
            &permissions,
            &[ServerResponse {
                body: Some(json!({"seatbid": []}))
            }]
        )
        .is_empty());
    }
}
