//! Normalization of ad-slot size declarations.
//!
//! Publishers declare sizes either as a bare `[w, h]` pair or as a list of
//! pairs, with coordinates that may arrive as numbers or digit strings. Both
//! shapes normalize to an ordered list of [`Format`] records. A coordinate
//! that cannot be coerced makes the whole slot malformed; callers reject the
//! slot rather than serializing a partial size list.

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::error::AdapterError;
use crate::openrtb::Format;

/// A single size coordinate as declared by the publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Number(f64),
    Text(String),
}

/// A declared `[width, height]` pair.
pub type SizePair = [Dimension; 2];

/// Size declaration shape: one pair, or a list of pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeList {
    Pair(SizePair),
    Many(Vec<SizePair>),
}

impl Dimension {
    fn coerce(&self) -> Result<u32, Report<AdapterError>> {
        match self {
            Dimension::Number(n) if n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX) => {
                Ok(n.trunc() as u32)
            }
            Dimension::Number(n) => Err(Report::new(AdapterError::Size {
                message: format!("coordinate {n} is not a representable integer"),
            })),
            Dimension::Text(s) => s.trim().parse::<u32>().map_err(|_| {
                Report::new(AdapterError::Size {
                    message: format!("coordinate {s:?} is not numeric"),
                })
            }),
        }
    }
}

fn to_format(pair: &SizePair) -> Result<Format, Report<AdapterError>> {
    Ok(Format {
        w: pair[0].coerce()?,
        h: pair[1].coerce()?,
    })
}

/// Converts a size declaration into its canonical `format` list, wrapping a
/// bare pair into a single-element list and mapping a list element-wise.
///
/// # Errors
///
/// Returns [`AdapterError::Size`] when any coordinate cannot be coerced to
/// an integer; the caller must treat the slot as malformed.
pub fn transform_sizes(sizes: &SizeList) -> Result<Vec<Format>, Report<AdapterError>> {
    match sizes {
        SizeList::Pair(pair) => Ok(vec![to_format(pair)?]),
        SizeList::Many(pairs) => pairs.iter().map(to_format).collect(),
    }
}
