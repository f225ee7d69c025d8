//! Materialized currency catalog and its cache.
//!
//! The catalog is loaded once from an external source, cached, and treated
//! as read-only shared state. Formatting calls never re-query the source;
//! refreshing is an explicit operation that swaps in a fully materialized
//! replacement.

use std::collections::HashMap;
use std::sync::Arc;

use moka::sync::Cache;
use tracing::info;

use crate::error::CurrencyError;
use crate::types::CurrencyDefinition;

/// Cache key for the single materialized catalog entry.
const CATALOG_KEY: &str = "valuta.catalog";

/// In-memory mapping of currency code to definition.
///
/// Immutable once built; every key equals the `code` field of its
/// definition by construction.
#[derive(Debug, Clone, Default)]
pub struct CurrencyCatalog {
    definitions: HashMap<String, CurrencyDefinition>,
}

impl CurrencyCatalog {
    /// Builds a catalog by indexing definitions on their `code` field.
    #[must_use]
    pub fn new(definitions: Vec<CurrencyDefinition>) -> Self {
        definitions.into_iter().collect()
    }

    /// Returns true if the catalog contains the given code.
    #[must_use]
    pub fn has(&self, code: &str) -> bool {
        self.definitions.contains_key(code)
    }

    /// Looks up a definition by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CurrencyDefinition> {
        self.definitions.get(code)
    }

    /// Number of definitions in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if the catalog holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates over all known currency codes.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

impl FromIterator<CurrencyDefinition> for CurrencyCatalog {
    fn from_iter<I: IntoIterator<Item = CurrencyDefinition>>(iter: I) -> Self {
        let definitions = iter
            .into_iter()
            .map(|definition| (definition.code.clone(), definition))
            .collect();
        Self { definitions }
    }
}

/// Source of currency definitions.
///
/// This trait is implemented by the outer layers (database rows, fixture
/// files) to supply the raw definitions the catalog is built from.
pub trait CatalogSource {
    /// Loads all currency definitions from the source.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::Source`] when the definitions cannot be
    /// produced.
    fn load(&self) -> Result<Vec<CurrencyDefinition>, CurrencyError>;
}

/// Forever-cache of the materialized catalog.
///
/// Holds at most one entry. Concurrent readers share the catalog through
/// an `Arc`; a refresh materializes the replacement completely before
/// inserting it, so readers observe either the old catalog or the new one,
/// never a partially populated mapping.
#[derive(Clone)]
pub struct CatalogCache {
    cache: Cache<String, Arc<CurrencyCatalog>>,
}

impl CatalogCache {
    /// Creates an empty catalog cache.
    #[must_use]
    pub fn new() -> Self {
        let cache = Cache::builder().max_capacity(1).build();
        Self { cache }
    }

    /// Returns the materialized catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::CatalogUnavailable`] before the first load.
    pub fn get(&self) -> Result<Arc<CurrencyCatalog>, CurrencyError> {
        self.cache
            .get(CATALOG_KEY)
            .ok_or(CurrencyError::CatalogUnavailable)
    }

    /// Returns the cached catalog, materializing it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::Source`] when the source fails to load.
    pub fn get_or_load<S: CatalogSource>(
        &self,
        source: &S,
    ) -> Result<Arc<CurrencyCatalog>, CurrencyError> {
        if let Some(catalog) = self.cache.get(CATALOG_KEY) {
            return Ok(catalog);
        }
        self.refresh(source)
    }

    /// Reloads the catalog from the source and swaps it in.
    ///
    /// The replacement is fully built before insertion.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::Source`] when the source fails to load; the
    /// previously cached catalog stays in place.
    pub fn refresh<S: CatalogSource>(
        &self,
        source: &S,
    ) -> Result<Arc<CurrencyCatalog>, CurrencyError> {
        let catalog = Arc::new(CurrencyCatalog::new(source.load()?));
        self.cache.insert(CATALOG_KEY.to_string(), Arc::clone(&catalog));
        info!(currencies = catalog.len(), "Currency catalog loaded");
        Ok(catalog)
    }

    /// Drops the cached catalog; the next `get_or_load` reloads it.
    pub fn invalidate(&self) {
        self.cache.invalidate(CATALOG_KEY);
        self.cache.run_pending_tasks();
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}
