//! Currency definition types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One currency's formatting and conversion attributes.
///
/// Definitions are immutable for the lifetime of a catalog load cycle;
/// refreshing them is an explicit catalog operation, never a side effect of
/// formatting calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDefinition {
    /// Unique currency code (e.g. "USD"). Catalog key.
    pub code: String,
    /// Display name. Not consulted by formatting logic.
    pub title: String,
    /// Symbol rendered before the amount, if any.
    #[serde(default)]
    pub symbol_left: Option<String>,
    /// Symbol rendered after the amount, if any.
    #[serde(default)]
    pub symbol_right: Option<String>,
    /// Fractional digits rendered by default.
    pub decimal_place: u32,
    /// Separator between the integer and fractional parts.
    pub decimal_point: String,
    /// Separator inserted every three integer digits. Empty disables grouping.
    pub thousand_point: String,
    /// Exchange factor relative to the base currency. Zero means the
    /// definition carries no rate and rate application is the identity.
    #[serde(default)]
    pub value: Decimal,
}

impl CurrencyDefinition {
    /// Returns true if this definition carries a usable exchange value.
    #[must_use]
    pub fn has_rate(&self) -> bool {
        !self.value.is_zero()
    }

    /// Returns the left or right symbol. Empty strings count as absent.
    #[must_use]
    pub fn symbol(&self, right: bool) -> Option<&str> {
        let symbol = if right {
            &self.symbol_right
        } else {
            &self.symbol_left
        };
        symbol.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> CurrencyDefinition {
        CurrencyDefinition {
            code: "USD".to_string(),
            title: "US Dollar".to_string(),
            symbol_left: Some("$".to_string()),
            symbol_right: None,
            decimal_place: 2,
            decimal_point: ".".to_string(),
            thousand_point: ",".to_string(),
            value: Decimal::ONE,
        }
    }

    #[test]
    fn test_has_rate() {
        let mut def = usd();
        assert!(def.has_rate());

        def.value = Decimal::ZERO;
        assert!(!def.has_rate());
    }

    #[test]
    fn test_symbol_sides() {
        let def = usd();
        assert_eq!(def.symbol(false), Some("$"));
        assert_eq!(def.symbol(true), None);
    }

    #[test]
    fn test_empty_symbol_counts_as_absent() {
        let mut def = usd();
        def.symbol_left = Some(String::new());
        def.symbol_right = Some("kr".to_string());
        assert_eq!(def.symbol(false), None);
        assert_eq!(def.symbol(true), Some("kr"));
    }

    #[test]
    fn test_deserialize_row_with_defaults() {
        // Rows from a definition table may omit symbols and the exchange
        // value entirely.
        let def: CurrencyDefinition = serde_json::from_str(
            r#"{
                "code": "JPY",
                "title": "Japanese Yen",
                "symbol_left": "¥",
                "decimal_place": 0,
                "decimal_point": ".",
                "thousand_point": ","
            }"#,
        )
        .expect("definition should deserialize");

        assert_eq!(def.code, "JPY");
        assert_eq!(def.symbol(false), Some("¥"));
        assert_eq!(def.symbol(true), None);
        assert_eq!(def.value, Decimal::ZERO);
        assert!(!def.has_rate());
    }

    #[test]
    fn test_value_round_trips_through_serde() {
        let mut def = usd();
        def.value = dec!(0.9173);

        let json = serde_json::to_string(&def).expect("definition should serialize");
        let back: CurrencyDefinition =
            serde_json::from_str(&json).expect("definition should deserialize");
        assert_eq!(back, def);
    }
}
