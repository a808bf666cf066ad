//! Configuration passed explicitly into the allocation pipeline.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::AccountMatch;

/// Set of symbols removed from the cash-excluded view.
///
/// Symbols are stored trimmed and upper-cased; lookups normalize the same
/// way, so `" spaxx** "` and `"SPAXX**"` are the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CashExclusionSet {
    symbols: BTreeSet<String>,
}

impl CashExclusionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from symbols. Blank entries are ignored.
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = symbols
            .into_iter()
            .map(|s| normalize_symbol(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();
        Self { symbols }
    }

    /// Returns true if `symbol` is excluded.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(&normalize_symbol(symbol))
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over the normalized symbols in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

/// Canonical form used for symbol comparisons.
pub(crate) fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

impl From<Vec<String>> for CashExclusionSet {
    fn from(symbols: Vec<String>) -> Self {
        Self::from_symbols(symbols)
    }
}

impl From<CashExclusionSet> for Vec<String> {
    fn from(set: CashExclusionSet) -> Self {
        set.symbols.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CashExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}

/// Configuration for an allocation analysis run.
///
/// Carries only what the pipeline needs; file names and presentation
/// settings stay with the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Symbols removed from the cash-excluded view.
    #[serde(default)]
    pub cash_symbols: CashExclusionSet,

    /// How account selectors are matched.
    #[serde(default)]
    pub account_match: AccountMatch,
}

impl AllocationConfig {
    /// Creates a config with no cash symbols and suffix matching.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cash symbols.
    #[must_use]
    pub fn with_cash_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.cash_symbols = CashExclusionSet::from_symbols(symbols);
        self
    }

    /// Sets the account match policy.
    #[must_use]
    pub fn with_account_match(mut self, policy: AccountMatch) -> Self {
        self.account_match = policy;
        self
    }
}
