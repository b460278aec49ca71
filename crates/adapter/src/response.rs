//! Normalization of SSP auction responses.
//!
//! This path feeds a time-budgeted auction: nothing here returns an error.
//! A malformed body degrades to "no bids"; a malformed record within an
//! otherwise valid response is skipped on its own.

use serde_json::Value;

use crate::constants::{BID_RESPONSE_TTL_SECONDS, DEFAULT_CURRENCY};
use crate::types::{NormalizedBidResult, ServerResponse, TransportRequest};

/// Maps a raw auction response into normalized bid results, preserving seat
/// order. Only the first bid record of each seat group is taken; additional
/// bids in the same seat are discarded per the SSP contract.
#[must_use]
pub fn interpret_response(
    response: &ServerResponse,
    request: &TransportRequest,
) -> Vec<NormalizedBidResult> {
    let Some(body) = response.body.as_ref() else {
        return Vec::new();
    };
    let currency = body
        .get("cur")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_CURRENCY);
    let Some(seatbids) = body.get("seatbid").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for seatbid in seatbids {
        let Some(bid) = seatbid
            .get("bid")
            .and_then(Value::as_array)
            .and_then(|bids| bids.first())
        else {
            continue;
        };
        match normalize_bid(bid, request, currency) {
            Some(result) => results.push(result),
            None => log::warn!("skipping malformed bid record: {bid}"),
        }
    }
    results
}

/// Normalizes one raw bid record. Returns `None` when a required field is
/// structurally missing or the effective price violates the non-negative
/// invariant; the caller skips the record without failing the response.
fn normalize_bid(
    bid: &Value,
    request: &TransportRequest,
    currency: &str,
) -> Option<NormalizedBidResult> {
    let slot_id = bid
        .get("impid")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .or_else(|| request.body.imp.first().map(|imp| imp.id.clone()))?;

    let raw_price = bid.get("price").and_then(Value::as_f64)?;
    let price = bid
        .get("ext")
        .and_then(|ext| ext.get("encp"))
        .and_then(Value::as_f64)
        .unwrap_or(raw_price);
    if !price.is_finite() || price < 0.0 {
        return None;
    }

    let ad_markup = bid.get("adm").and_then(Value::as_str)?.to_owned();

    let creative_id = match bid.get("crid") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "0".to_string(),
    };

    Some(NormalizedBidResult {
        slot_id,
        ad_markup,
        price,
        width: bid.get("w").and_then(Value::as_u64).unwrap_or(0) as u32,
        height: bid.get("h").and_then(Value::as_u64).unwrap_or(0) as u32,
        creative_id,
        currency: currency.to_owned(),
        deal_id: bid.get("dealid").and_then(Value::as_str).map(str::to_owned),
        net_revenue: true,
        ttl_seconds: BID_RESPONSE_TTL_SECONDS,
    })
}
