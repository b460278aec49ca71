use derive_more::{Display, Error};

/// Errors surfaced by the adapter's cold paths.
///
/// The bidding hot path never propagates these: malformed responses and
/// rejected slots degrade to empty results so a time-budgeted auction is
/// never halted.
#[derive(Debug, Display, Error)]
pub enum AdapterError {
    /// Configuration could not be parsed or failed validation.
    #[display("configuration error: {message}")]
    Config { message: String },

    /// A declared ad-slot size could not be coerced to integer coordinates.
    #[display("malformed size declaration: {message}")]
    Size { message: String },
}
