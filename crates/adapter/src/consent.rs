//! GDPR consent evaluation gating credentialed transmission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// TCF signal version whose per-purpose grants this adapter understands.
const STRUCTURED_API_VERSION: u32 = 2;

/// Storage/access purpose id in the TCF purpose taxonomy.
const PURPOSE_STORAGE_ACCESS: u32 = 1;

/// Resolved GDPR consent state for one auction, as supplied by the caller's
/// consent-management integration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GdprConsent {
    /// Whether GDPR applies to this auction. Absent is treated as "does not
    /// apply".
    pub applies: Option<bool>,
    /// Raw consent string, forwarded on the wire while GDPR applies.
    pub consent_string: Option<String>,
    /// Consent-signal API version. Only version 2 carries per-purpose grants.
    pub api_version: Option<u32>,
    /// Decoded per-purpose grants from the structured signal.
    #[serde(default)]
    pub purpose_consents: BTreeMap<u32, bool>,
}

/// Decides whether cookie-bearing (credentialed) transmission is permitted.
///
/// Default-allow when no consent object is present or GDPR does not apply.
/// When GDPR applies and the signal is the structured version, credentials
/// require an explicit grant of the storage/access purpose; anything else
/// (missing, false) denies. Older signal versions carry no per-purpose
/// grants and default-allow, a limitation kept as-is.
#[must_use]
pub fn purpose1_consent(consent: Option<&GdprConsent>) -> bool {
    match consent {
        Some(c)
            if c.applies == Some(true) && c.api_version == Some(STRUCTURED_API_VERSION) =>
        {
            c.purpose_consents.get(&PURPOSE_STORAGE_ACCESS) == Some(&true)
        }
        _ => true,
    }
}
