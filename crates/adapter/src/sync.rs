//! Extraction of user-sync pixel instructions from response markup.
//!
//! The SSP returns sync pixels as an opaque HTML fragment. Parsing it with
//! patterns is inherently best-effort; everything lives behind
//! [`extract_sync_pixels`] so the scan can be replaced by a structured
//! parser without touching callers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stage one: isolate each img/iframe tag fragment carrying a quoted `src`.
static PIXEL_TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:img|iframe)[^>]*?src\s*=\s*(?:"[^"]*"|'[^']*')"#)
        .expect("valid pixel tag regex")
});

/// Stage two: tag name and `src` value, extracted independently so extra
/// attributes before `src` don't matter.
static TAG_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:img|iframe)").expect("valid tag name regex"));

static SRC_ATTR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)src\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid src attribute regex")
});

/// Sync pixel delivery mechanism.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncType {
    Image,
    Iframe,
}

/// One user-sync directive for the caller to fire out-of-band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncInstruction {
    #[serde(rename = "type")]
    pub kind: SyncType,
    pub url: String,
}

/// What sync mechanisms the caller currently permits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncPermissions {
    pub images_allowed: bool,
    pub iframes_allowed: bool,
}

impl SyncPermissions {
    fn permits(&self, kind: SyncType) -> bool {
        match kind {
            SyncType::Image => self.images_allowed,
            SyncType::Iframe => self.iframes_allowed,
        }
    }
}

/// Scans a markup fragment for img/iframe sync pixels and emits the
/// permitted ones in encounter order. Absent or unmatched markup yields an
/// empty list, never an error.
#[must_use]
pub fn extract_sync_pixels(fragment: &str, permissions: &SyncPermissions) -> Vec<SyncInstruction> {
    PIXEL_TAG_PATTERN
        .find_iter(fragment)
        .filter_map(|tag| {
            let tag = tag.as_str();
            let name = TAG_NAME_PATTERN.find(tag)?.as_str();
            let src = SRC_ATTR_PATTERN.captures(tag)?;
            let url = src.get(1).or_else(|| src.get(2))?.as_str();

            let kind = if name.eq_ignore_ascii_case("iframe") {
                SyncType::Iframe
            } else {
                SyncType::Image
            };
            permissions.permits(kind).then(|| SyncInstruction {
                kind,
                url: url.to_owned(),
            })
        })
        .collect()
}
