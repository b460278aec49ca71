//! Selection of third-party identity assertions the SSP accepts.

use serde::{Deserialize, Serialize};

use crate::constants::SUPPORTED_EID_SOURCES;

/// One identity assertion (`eid`) from the identity-module registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityAssertion {
    /// Source system that minted the ids (e.g. "liveramp.com").
    pub source: String,
    pub uids: Vec<Uid>,
}

/// An opaque user id within an assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Uid {
    pub id: String,
    /// Agent type per the OpenRTB eids convention, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atype: Option<u32>,
}

/// Filters assertions down to sources the SSP is contracted to accept.
///
/// Order is preserved; non-matching entries are dropped silently; bidding
/// simply proceeds without that signal.
#[must_use]
pub fn select_supported_eids(eids: &[IdentityAssertion]) -> Vec<IdentityAssertion> {
    eids.iter()
        .filter(|eid| SUPPORTED_EID_SOURCES.contains(&eid.source.as_str()))
        .cloned()
        .collect()
}
