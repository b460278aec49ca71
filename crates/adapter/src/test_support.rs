//! Shared fixtures for module tests.

use serde_json::json;

use crate::adapter::build_requests;
use crate::consent::GdprConsent;
use crate::settings::AdapterConfig;
use crate::types::{AdSlotRequest, AuctionContext, MediaType, SlotParams, TransportRequest};

pub fn slot(id: &str, pos: &str) -> AdSlotRequest {
    AdSlotRequest {
        id: id.to_string(),
        transaction_id: format!("{id}-txn"),
        ad_unit_code: None,
        media_types: vec![MediaType::Banner],
        sizes: serde_json::from_value(json!([[300, 250], [300, 600]]))
            .expect("should deserialize default sizes"),
        params: SlotParams {
            dcn: "2c9d2b50015c5ce9db6aeeed8b9500d6".to_string(),
            pos: pos.to_string(),
        },
        eids: Vec::new(),
    }
}

pub fn default_context() -> AuctionContext {
    AuctionContext {
        auction_id: "d3e07445-ab06-44c8-a9dd-5ef9af06d2a6".to_string(),
        page_url: Some("https://publisher-test.com".to_string()),
        user_agent: Some("test-agent".to_string()),
        gdpr_consent: Some(GdprConsent {
            applies: Some(true),
            consent_string: Some("BOtmiBKOtmiBKABABAENAFAAAAACeAAA".to_string()),
            ..GdprConsent::default()
        }),
        us_privacy: None,
    }
}

pub fn default_config() -> AdapterConfig {
    AdapterConfig::default()
}

pub fn transport_request(slot_id: &str) -> TransportRequest {
    build_requests(&[slot(slot_id, "header")], &default_context(), &default_config())
        .into_iter()
        .next()
        .expect("should build one transport request")
}
