//! Per-request orchestration over the shared currency catalog.
//!
//! Each unit of work owns its own `CurrencyService`: the catalog is shared
//! read-only through an `Arc`, while the active currency selection is
//! per-instance state resolved once at construction.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::debug;
use valuta_shared::CurrencyConfig;

use crate::catalog::CurrencyCatalog;
use crate::conversion;
use crate::error::CurrencyError;
use crate::format::{self, RoundingMode, SYMBOL_TOKEN};
use crate::resolve::resolve;
use crate::types::CurrencyDefinition;

/// Session and cookie persistence for the active currency selection.
///
/// This trait is implemented by the web layer. The service reads the
/// stored values during resolution and writes a changed selection back;
/// it never decides how the values are transported.
pub trait SelectionStore {
    /// Currency code held in the session, if any.
    fn session(&self) -> Option<String>;

    /// Stores a new session currency code.
    fn set_session(&mut self, code: &str);

    /// Currency code held in the named cookie, if any.
    fn cookie(&self, name: &str) -> Option<String>;

    /// Stores a new cookie currency code with the given lifetime.
    fn set_cookie(&mut self, name: &str, code: &str, ttl: Duration);
}

/// Options for conversion-aware formatting.
#[derive(Debug, Clone)]
pub struct FormatOptions<'a> {
    /// Currency to format in; absent or unknown codes fall back to the
    /// active currency.
    pub currency: Option<&'a str>,
    /// Template the symbol is substituted into.
    pub symbol_style: &'a str,
    /// Divide by the exchange value instead of multiplying.
    pub inverse: bool,
    /// Rounding applied before rendering.
    pub rounding: RoundingMode,
    /// Digits to round at; defaults to the rendered decimal places.
    pub precision: Option<u32>,
    /// Fractional digits to render; defaults to the currency's own.
    pub decimal_place: Option<u32>,
}

impl Default for FormatOptions<'_> {
    fn default() -> Self {
        Self {
            currency: None,
            symbol_style: SYMBOL_TOKEN,
            inverse: false,
            rounding: RoundingMode::Round,
            precision: None,
            decimal_place: None,
        }
    }
}

/// Currency formatting and conversion service.
pub struct CurrencyService<S: SelectionStore> {
    catalog: Arc<CurrencyCatalog>,
    config: CurrencyConfig,
    store: S,
    code: String,
}

impl<S: SelectionStore> CurrencyService<S> {
    /// Creates a service for one unit of work.
    ///
    /// The active currency is resolved from, in priority order: the
    /// explicit `request_code`, the session value, the persisted cookie
    /// value, and finally the configured default. The resolved selection
    /// is written back through the store (guarded by change detection).
    pub fn new(
        catalog: Arc<CurrencyCatalog>,
        config: CurrencyConfig,
        store: S,
        request_code: Option<&str>,
    ) -> Self {
        let session = store.session();
        let cookie = store.cookie(&config.cookie_name);
        let code = resolve(
            [request_code, session.as_deref(), cookie.as_deref()],
            &catalog,
            &config.default_code,
        );

        let mut service = Self {
            catalog,
            config,
            store,
            code: String::new(),
        };
        service.set_currency(&code);
        service
    }

    /// Formats an amount in the given currency, applying its exchange
    /// value first.
    ///
    /// The amount is taken to be in base units; `inverse` flips the rate
    /// for amounts already in the currency's units.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnknownCurrency`] when the fallback active
    /// currency is itself missing from the catalog, or
    /// [`CurrencyError::InvalidFormatOption`] for out-of-range options.
    pub fn format(&self, amount: Decimal, options: &FormatOptions<'_>) -> Result<String, CurrencyError> {
        let definition = self.currency(options.currency)?;
        let converted = conversion::apply_rate(amount, definition, options.inverse);
        self.render(converted, definition, options)
    }

    /// Formats an amount as-is, skipping rate application.
    ///
    /// Same symbol and separator rules as [`CurrencyService::format`], for
    /// amounts already in the target currency's units.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CurrencyService::format`].
    pub fn style(
        &self,
        amount: Decimal,
        currency: Option<&str>,
        decimal_place: Option<u32>,
    ) -> Result<String, CurrencyError> {
        let definition = self.currency(currency)?;
        let options = FormatOptions {
            decimal_place,
            ..FormatOptions::default()
        };
        self.render(amount, definition, &options)
    }

    /// Formats an amount with no fractional digits unless overridden.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CurrencyService::format`].
    pub fn rounded(
        &self,
        amount: Decimal,
        decimal_place: Option<u32>,
        currency: Option<&str>,
    ) -> Result<String, CurrencyError> {
        self.style(amount, currency, Some(decimal_place.unwrap_or(0)))
    }

    /// Converts an amount into the active currency's units and renders it
    /// machine-readable: point separator, no grouping, no symbols.
    ///
    /// Intended for form fields and similar round-trippable output.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CurrencyService::format`].
    pub fn normalize(
        &self,
        amount: Decimal,
        decimal_override: Option<u32>,
    ) -> Result<String, CurrencyError> {
        let definition = self.currency(None)?;
        let converted = conversion::apply_rate(amount, definition, false);
        let decimal_place = decimal_override.unwrap_or(definition.decimal_place);
        format::format_number(converted, decimal_place, ".", "", None, RoundingMode::Round)
    }

    /// Converts an amount between two currencies.
    ///
    /// Unknown codes fall back to the active currency, matching every
    /// other lookup.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::InvalidRate`] when the source currency has
    /// a zero exchange value.
    pub fn convert(
        &self,
        amount: Decimal,
        from_code: &str,
        to_code: &str,
    ) -> Result<Decimal, CurrencyError> {
        let from = self.currency(Some(from_code))?;
        let to = self.currency(Some(to_code))?;
        conversion::convert(amount, from, to)
    }

    /// Left or right symbol of the active currency.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnknownCurrency`] when the active currency
    /// is missing from the catalog.
    pub fn currency_symbol(&self, right: bool) -> Result<Option<&str>, CurrencyError> {
        Ok(self.currency(None)?.symbol(right))
    }

    /// Returns true if the catalog contains the given code.
    #[must_use]
    pub fn has_currency(&self, code: &str) -> bool {
        self.catalog.has(code)
    }

    /// Looks up a definition, falling back to the active currency for
    /// absent or unknown codes.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnknownCurrency`] only when the active
    /// code itself is not in the catalog.
    pub fn currency(&self, code: Option<&str>) -> Result<&CurrencyDefinition, CurrencyError> {
        if let Some(definition) = code.and_then(|code| self.catalog.get(code)) {
            return Ok(definition);
        }
        self.catalog
            .get(&self.code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(self.code.clone()))
    }

    /// The active currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Sets the active currency and persists the selection.
    ///
    /// Session and cookie writes go through the store only when the stored
    /// value differs from the new code.
    pub fn set_currency(&mut self, code: &str) {
        self.code = code.to_string();

        if self.store.session().as_deref() != Some(code) {
            self.store.set_session(code);
            debug!(currency = code, "Session currency updated");
        }

        if self.store.cookie(&self.config.cookie_name).as_deref() != Some(code) {
            let name = self.config.cookie_name.clone();
            self.store.set_cookie(&name, code, self.config.cookie_ttl());
            debug!(currency = code, "Currency cookie updated");
        }
    }

    fn render(
        &self,
        amount: Decimal,
        definition: &CurrencyDefinition,
        options: &FormatOptions<'_>,
    ) -> Result<String, CurrencyError> {
        let decimal_place = options.decimal_place.unwrap_or(definition.decimal_place);
        let number = format::format_number(
            amount,
            decimal_place,
            &definition.decimal_point,
            &definition.thousand_point,
            options.precision,
            options.rounding,
        )?;

        Ok(format::wrap_symbols(
            &number,
            definition.symbol(false),
            definition.symbol(true),
            options.symbol_style,
            self.config.use_space,
        ))
    }
}
