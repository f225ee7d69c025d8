//! Active-currency resolution from prioritized candidate sources.

use crate::catalog::CurrencyCatalog;

/// Resolves the active currency code from candidates in priority order.
///
/// Callers supply candidates ordered by priority (explicit request
/// parameter, then session value, then persisted cookie). The first
/// candidate that is present, non-empty, and a catalog key wins; when none
/// qualifies the configured default code is returned. The ordering is a
/// strict contract: it decides which of several conflicting signals wins.
#[must_use]
pub fn resolve<'a, I>(candidates: I, catalog: &CurrencyCatalog, default_code: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|code| !code.is_empty() && catalog.has(code))
        .map_or_else(|| default_code.to_string(), str::to_string)
}
