//! Property-based tests for currency operations.
//!
//! - Conversion round-trip stays within rounding tolerance
//! - Rendered output shape: fractional digits and grouping
//! - Resolution picks the first valid candidate or the default
//! - Rate application with a zero value is the identity

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::CurrencyCatalog;
use crate::conversion::{apply_rate, convert};
use crate::format::{RoundingMode, format_number};
use crate::resolve::resolve;
use crate::types::CurrencyDefinition;

fn definition(code: &str, value: Decimal) -> CurrencyDefinition {
    CurrencyDefinition {
        code: code.to_string(),
        title: code.to_string(),
        symbol_left: None,
        symbol_right: None,
        decimal_place: 2,
        decimal_point: ".".to_string(),
        thousand_point: ",".to_string(),
        value,
    }
}

/// Strategy to generate amounts (-1,000,000.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange values (0.0001 to 10000.0000).
fn exchange_value() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate amounts with sub-cent digits (scale 4).
fn fine_amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000_000i64..10_000_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate rendered decimal places (0 to 6).
fn decimal_places() -> impl Strategy<Value = u32> {
    0u32..=6
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting there and back returns within ±0.01 of the original,
    /// after accounting for the 2-decimal rounding of the first leg.
    #[test]
    fn prop_convert_round_trip(
        amount in amount(),
        from_value in exchange_value(),
        to_value in exchange_value(),
    ) {
        let from = definition("AAA", from_value);
        let to = definition("BBB", to_value);

        let there = convert(amount, &from, &to).expect("non-zero source value");
        let back = convert(there, &to, &from).expect("non-zero source value");

        // The first leg quantizes at 2 decimals; scale the tolerance by
        // the rate ratio that amplifies that quantization on the way back.
        let step = from_value / to_value;
        let tolerance = dec!(0.01) + step * dec!(0.005);
        prop_assert!(
            (back - amount).abs() <= tolerance,
            "round trip drifted: {} -> {} -> {}",
            amount, there, back
        );
    }

    /// Conversion output never carries more than 2 decimal places.
    #[test]
    fn prop_convert_scale_is_at_most_2(
        amount in amount(),
        from_value in exchange_value(),
        to_value in exchange_value(),
    ) {
        let from = definition("AAA", from_value);
        let to = definition("BBB", to_value);

        let result = convert(amount, &from, &to).expect("non-zero source value");
        prop_assert!(result.scale() <= 2, "scale of {} exceeds 2", result);
    }

    /// Rendered output has exactly `decimal_place` fractional digits.
    #[test]
    fn prop_format_fractional_digit_count(
        value in amount(),
        decimal_place in decimal_places(),
    ) {
        let rendered = format_number(value, decimal_place, ".", ",", None, RoundingMode::Round)
            .expect("options are in range");

        match rendered.split_once('.') {
            Some((_, fraction)) => prop_assert_eq!(fraction.len() as u32, decimal_place),
            None => prop_assert_eq!(decimal_place, 0),
        }
    }

    /// Integer digit groups are all 3 long except the leading one (1..=3).
    #[test]
    fn prop_format_grouping(value in amount()) {
        let rendered = format_number(value, 2, ".", ",", None, RoundingMode::Round)
            .expect("options are in range");

        let integer = rendered
            .split_once('.')
            .map_or(rendered.as_str(), |(integer, _)| integer)
            .trim_start_matches('-');
        let groups: Vec<&str> = integer.split(',').collect();

        prop_assert!((1..=3).contains(&groups[0].len()));
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), 3);
        }
    }

    /// Floor never exceeds the exact value; ceiling never undershoots it.
    #[test]
    fn prop_floor_ceil_bracket_value(value in fine_amount()) {
        let floored = format_number(value, 2, ".", "", Some(2), RoundingMode::Floor)
            .expect("options are in range");
        let ceiled = format_number(value, 2, ".", "", Some(2), RoundingMode::Ceil)
            .expect("options are in range");

        let floored: Decimal = floored.parse().expect("plain decimal output");
        let ceiled: Decimal = ceiled.parse().expect("plain decimal output");
        prop_assert!(floored <= value);
        prop_assert!(ceiled >= value);
        prop_assert!(ceiled - floored <= dec!(0.01));
    }

    /// Rate application with a zero value is the identity either way.
    #[test]
    fn prop_zero_value_rate_is_identity(amount in amount(), inverse in any::<bool>()) {
        let unrated = definition("XXX", Decimal::ZERO);
        prop_assert_eq!(apply_rate(amount, &unrated, inverse), amount);
    }

    /// Applying a rate then the inverse rate restores the amount exactly
    /// (no intermediate rounding in rate application).
    #[test]
    fn prop_apply_rate_inverse_round_trip(
        amount in amount(),
        value in exchange_value(),
    ) {
        let currency = definition("AAA", value);
        let applied = apply_rate(amount, &currency, false);
        let restored = apply_rate(applied, &currency, true)
            .round_dp(2);
        prop_assert_eq!(restored, amount.round_dp(2));
    }

    /// The resolver returns a catalog key or the default, never anything
    /// else, and skips empty candidates.
    #[test]
    fn prop_resolve_returns_member_or_default(
        candidates in prop::collection::vec(
            prop::option::of(prop::sample::select(vec!["USD", "EUR", "GBP", ""])),
            0..4,
        ),
    ) {
        let catalog: CurrencyCatalog =
            [definition("USD", Decimal::ONE), definition("EUR", dec!(0.9))]
                .into_iter()
                .collect();

        let refs: Vec<Option<&str>> = candidates.clone();
        let resolved = resolve(refs, &catalog, "USD");

        let first_valid = candidates
            .iter()
            .flatten()
            .find(|code| !code.is_empty() && catalog.has(code));
        match first_valid {
            Some(code) => prop_assert_eq!(resolved, *code),
            None => prop_assert_eq!(resolved, "USD"),
        }
    }
}
