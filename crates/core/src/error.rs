//! Currency error types.

use thiserror::Error;

/// Currency-related errors.
#[derive(Debug, Error)]
pub enum CurrencyError {
    /// The currency catalog has not been materialized yet.
    #[error("Currency catalog unavailable: definitions have not been loaded")]
    CatalogUnavailable,

    /// Currency code not present in the catalog.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Conversion requested from a currency with a zero exchange value.
    #[error("Invalid conversion rate for {0}: exchange value must be non-zero")]
    InvalidRate(String),

    /// Formatting option outside the supported range.
    #[error("Invalid format option: {0}")]
    InvalidFormatOption(String),

    /// The catalog source failed to produce definitions.
    #[error("Currency source error: {0}")]
    Source(String),
}
