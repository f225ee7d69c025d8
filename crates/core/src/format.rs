//! Numeric rendering and symbol wrapping.
//!
//! This is the single rendering path behind every display operation:
//! conversion-aware formatting, raw styling, rounded display, and
//! machine-readable normalization all funnel through [`format_number`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::CurrencyError;

/// Placeholder token replaced by the currency symbol in a symbol style
/// template (e.g. `"<sup>%symbol%</sup>"`).
pub const SYMBOL_TOKEN: &str = "%symbol%";

/// Maximum fractional digits supported by [`Decimal`].
const MAX_SCALE: u32 = 28;

/// How a value is rounded before rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Round half away from zero at the requested precision.
    #[default]
    Round,
    /// Round toward negative infinity at the requested granularity.
    Floor,
    /// Round toward positive infinity at the requested granularity.
    #[serde(alias = "ceiling")]
    Ceil,
}

impl RoundingMode {
    const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::Round => RoundingStrategy::MidpointAwayFromZero,
            Self::Floor => RoundingStrategy::ToNegativeInfinity,
            Self::Ceil => RoundingStrategy::ToPositiveInfinity,
        }
    }
}

/// Formats a numeric value as a display string.
///
/// The value is first rounded per `mode` at `precision` digits (defaulting
/// to `decimal_place`), then rendered with exactly `decimal_place`
/// fractional digits, `decimal_point` as the fractional separator, and
/// `thousand_point` inserted every three integer digits. An empty
/// `thousand_point` disables grouping.
///
/// Floor and ceiling operate at the granularity derived from the precision:
/// precision 2 means hundredths, so `ceil(2.341)` at precision 2 is `2.35`.
///
/// # Errors
///
/// Returns [`CurrencyError::InvalidFormatOption`] when `decimal_place` or
/// `precision` exceeds the supported decimal scale.
pub fn format_number(
    value: Decimal,
    decimal_place: u32,
    decimal_point: &str,
    thousand_point: &str,
    precision: Option<u32>,
    mode: RoundingMode,
) -> Result<String, CurrencyError> {
    if decimal_place > MAX_SCALE {
        return Err(CurrencyError::InvalidFormatOption(format!(
            "decimal place {decimal_place} exceeds maximum of {MAX_SCALE}"
        )));
    }
    if let Some(precision) = precision {
        if precision > MAX_SCALE {
            return Err(CurrencyError::InvalidFormatOption(format!(
                "precision {precision} exceeds maximum of {MAX_SCALE}"
            )));
        }
    }

    let rounded = value
        .round_dp_with_strategy(precision.unwrap_or(decimal_place), mode.strategy())
        .round_dp_with_strategy(decimal_place, RoundingStrategy::MidpointAwayFromZero);

    Ok(render(rounded, decimal_place, decimal_point, thousand_point))
}

/// Renders an already-rounded value with fixed fractional digits and
/// separators.
fn render(value: Decimal, decimal_place: u32, decimal_point: &str, thousand_point: &str) -> String {
    let negative = value.is_sign_negative() && !value.is_zero();
    let digits = format!("{:.*}", decimal_place as usize, value.abs());

    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(integer, thousand_point));
    if let Some(fraction) = fraction {
        out.push_str(decimal_point);
        out.push_str(fraction);
    }
    out
}

/// Inserts `thousand_point` every three digits, counting from the right.
fn group_digits(integer: &str, thousand_point: &str) -> String {
    if thousand_point.is_empty() {
        return integer.to_string();
    }

    let digits: Vec<char> = integer.chars().collect();
    let mut out = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(thousand_point);
        }
        out.push(*digit);
    }
    out
}

/// Wraps a rendered number with the currency symbols.
///
/// Each present symbol is substituted into `symbol_style` at the
/// [`SYMBOL_TOKEN`] placeholder; `use_space` inserts a single space between
/// symbol and number. Left and right symbols are independent.
#[must_use]
pub fn wrap_symbols(
    number: &str,
    symbol_left: Option<&str>,
    symbol_right: Option<&str>,
    symbol_style: &str,
    use_space: bool,
) -> String {
    let mut out = String::with_capacity(number.len() + symbol_style.len());

    if let Some(symbol) = symbol_left {
        out.push_str(&symbol_style.replace(SYMBOL_TOKEN, symbol));
        if use_space {
            out.push(' ');
        }
    }

    out.push_str(number);

    if let Some(symbol) = symbol_right {
        if use_space {
            out.push(' ');
        }
        out.push_str(&symbol_style.replace(SYMBOL_TOKEN, symbol));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn plain(value: Decimal, decimal_place: u32) -> String {
        format_number(value, decimal_place, ".", ",", None, RoundingMode::Round)
            .expect("format should succeed")
    }

    #[test]
    fn test_format_pads_fractional_digits() {
        assert_eq!(plain(dec!(100), 2), "100.00");
        assert_eq!(plain(dec!(0.5), 2), "0.50");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(plain(dec!(1234567.891), 2), "1,234,567.89");
        assert_eq!(plain(dec!(1000), 0), "1,000");
        assert_eq!(plain(dec!(999), 0), "999");
    }

    #[test]
    fn test_format_custom_separators() {
        let result = format_number(dec!(1234.56), 2, ",", ".", None, RoundingMode::Round)
            .expect("format should succeed");
        assert_eq!(result, "1.234,56");
    }

    #[test]
    fn test_format_empty_thousand_point_disables_grouping() {
        let result = format_number(dec!(1234567.891), 2, ".", "", None, RoundingMode::Round)
            .expect("format should succeed");
        assert_eq!(result, "1234567.89");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(plain(dec!(2.345), 2), "2.35");
        assert_eq!(plain(dec!(-2.345), 2), "-2.35");
        assert_eq!(plain(dec!(2.5), 0), "3");
    }

    #[test]
    fn test_format_negative_grouping() {
        assert_eq!(plain(dec!(-1234567.891), 2), "-1,234,567.89");
    }

    #[test]
    fn test_format_negative_rounded_to_zero_drops_sign() {
        assert_eq!(plain(dec!(-0.001), 2), "0.00");
    }

    #[rstest]
    #[case(RoundingMode::Ceil, dec!(2.341), "2.35")]
    #[case(RoundingMode::Ceil, dec!(2.35), "2.35")]
    #[case(RoundingMode::Floor, dec!(2.349), "2.34")]
    #[case(RoundingMode::Floor, dec!(-2.341), "-2.35")]
    fn test_floor_ceil_at_hundredths(
        #[case] mode: RoundingMode,
        #[case] value: Decimal,
        #[case] expected: &str,
    ) {
        let result =
            format_number(value, 2, ".", ",", Some(2), mode).expect("format should succeed");
        assert_eq!(result, expected);
    }

    #[test]
    fn test_ceil_precision_coarser_than_decimal_place() {
        // Ceiling at integer granularity, still rendered with 2 digits.
        let result = format_number(dec!(2.01), 2, ".", ",", Some(0), RoundingMode::Ceil)
            .expect("format should succeed");
        assert_eq!(result, "3.00");
    }

    #[test]
    fn test_precision_finer_than_decimal_place_rerounds() {
        // Rounded at 4 digits first, then rendered at 2.
        let result = format_number(dec!(1.23456), 2, ".", ",", Some(4), RoundingMode::Round)
            .expect("format should succeed");
        assert_eq!(result, "1.23");
    }

    #[test]
    fn test_excessive_decimal_place_rejected() {
        let result = format_number(dec!(1), 29, ".", ",", None, RoundingMode::Round);
        assert!(matches!(result, Err(CurrencyError::InvalidFormatOption(_))));

        let result = format_number(dec!(1), 2, ".", ",", Some(29), RoundingMode::Round);
        assert!(matches!(result, Err(CurrencyError::InvalidFormatOption(_))));
    }

    #[test]
    fn test_rounding_mode_deserializes_aliases() {
        assert_eq!(
            serde_json::from_str::<RoundingMode>(r#""ceil""#).expect("should parse"),
            RoundingMode::Ceil
        );
        assert_eq!(
            serde_json::from_str::<RoundingMode>(r#""ceiling""#).expect("should parse"),
            RoundingMode::Ceil
        );
        assert_eq!(
            serde_json::from_str::<RoundingMode>(r#""floor""#).expect("should parse"),
            RoundingMode::Floor
        );
    }

    #[test]
    fn test_wrap_left_symbol() {
        assert_eq!(wrap_symbols("100.00", Some("$"), None, SYMBOL_TOKEN, false), "$100.00");
        assert_eq!(wrap_symbols("100.00", Some("$"), None, SYMBOL_TOKEN, true), "$ 100.00");
    }

    #[test]
    fn test_wrap_right_symbol() {
        assert_eq!(wrap_symbols("100,00", None, Some("€"), SYMBOL_TOKEN, false), "100,00€");
        assert_eq!(wrap_symbols("100,00", None, Some("€"), SYMBOL_TOKEN, true), "100,00 €");
    }

    #[test]
    fn test_wrap_both_symbols_independent() {
        assert_eq!(
            wrap_symbols("1.00", Some("$"), Some("USD"), SYMBOL_TOKEN, true),
            "$ 1.00 USD"
        );
        assert_eq!(wrap_symbols("1.00", None, None, SYMBOL_TOKEN, true), "1.00");
    }

    #[test]
    fn test_wrap_custom_style_template() {
        let result = wrap_symbols("9.99", Some("$"), None, "<sup>%symbol%</sup>", false);
        assert_eq!(result, "<sup>$</sup>9.99");
    }
}
