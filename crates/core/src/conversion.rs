//! Rate application and cross-currency conversion.
//!
//! Exchange values are factors relative to the base currency. A zero value
//! means the definition carries no rate: rate application becomes the
//! identity, while direct conversion from such a currency is an error.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::CurrencyError;
use crate::types::CurrencyDefinition;

/// Fixed scale for cross-currency conversion results.
///
/// Conversion always rounds to two places regardless of either currency's
/// configured decimal places. This is an intentional asymmetry with the
/// formatting path.
const CONVERSION_SCALE: u32 = 2;

/// Applies a currency's exchange value to an amount.
///
/// Returns `amount * value`, or `amount / value` when `inverse` is set
/// (base units in, display units out vs. the reverse). A definition without
/// a usable rate leaves the amount unchanged.
#[must_use]
pub fn apply_rate(amount: Decimal, definition: &CurrencyDefinition, inverse: bool) -> Decimal {
    if !definition.has_rate() {
        return amount;
    }

    if inverse {
        amount / definition.value
    } else {
        amount * definition.value
    }
}

/// Converts an amount from one currency's units to another's.
///
/// Computes `amount / from.value * to.value`, rounded half away from zero
/// to two decimal places.
///
/// # Errors
///
/// Returns [`CurrencyError::InvalidRate`] when the source currency has a
/// zero exchange value, which would otherwise divide by zero.
pub fn convert(
    amount: Decimal,
    from: &CurrencyDefinition,
    to: &CurrencyDefinition,
) -> Result<Decimal, CurrencyError> {
    if !from.has_rate() {
        return Err(CurrencyError::InvalidRate(from.code.clone()));
    }

    Ok((amount / from.value * to.value)
        .round_dp_with_strategy(CONVERSION_SCALE, RoundingStrategy::MidpointAwayFromZero))
}
