//! Exchange rate lookup.
//!
//! Every rate is expressed as units of that currency per one unit of a shared
//! base currency, so `USD: 1.0, EUR: 0.85` reads as "one base unit buys 0.85 EUR".

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Returned by [`RateProvider::get_rate`] when a currency code is unknown.
pub const RATE_NOT_FOUND: f64 = -1.0;

/// Rates used when no table, or an empty one, is supplied.
pub const DEFAULT_RATES: [(&str, f64); 3] = [("USD", 1.0), ("EUR", 0.85), ("UGX", 3700.0)];

/// Mapping from currency code to its rate against the base currency.
///
/// Values are stored exactly as given. A table may hold zero, negative or NaN
/// rates; those are rejected at conversion time, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in fallback table.
    pub fn defaults() -> Self {
        DEFAULT_RATES.into_iter().collect()
    }

    pub fn insert(&mut self, code: impl Into<String>, rate: f64) -> Option<f64> {
        self.rates.insert(code.into(), rate)
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterates over `(code, rate)` pairs ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<HashMap<String, f64>> for RateTable {
    fn from(rates: HashMap<String, f64>) -> Self {
        rates.into_iter().collect()
    }
}

pub trait RateProvider: Send + Sync {
    /// Returns the rate for `code`, or [`RATE_NOT_FOUND`] if there is none.
    fn get_rate(&self, code: &str) -> f64;

    /// Returns the rate for `code` if the provider has one.
    ///
    /// The default maps the [`RATE_NOT_FOUND`] sentinel to `None`, so it cannot
    /// tell an unknown code from one stored as `-1.0`. Providers that can check
    /// presence directly should override it.
    fn lookup(&self, code: &str) -> Option<f64> {
        let rate = self.get_rate(code);
        if rate == RATE_NOT_FOUND {
            None
        } else {
            Some(rate)
        }
    }
}

/// Rate provider backed by a fixed, owned [`RateTable`].
#[derive(Debug, Clone)]
pub struct ExchangeRateProvider {
    rates: RateTable,
    uses_defaults: bool,
}

impl ExchangeRateProvider {
    /// Takes ownership of `rates`. A missing or empty table is replaced by
    /// [`RateTable::defaults`] and a warning is logged.
    pub fn new(rates: Option<RateTable>) -> Self {
        match rates {
            Some(rates) if !rates.is_empty() => {
                debug!(count = rates.len(), "Using supplied exchange rates");
                Self {
                    rates,
                    uses_defaults: false,
                }
            }
            _ => {
                warn!("Using default exchange rates.");
                Self {
                    rates: RateTable::defaults(),
                    uses_defaults: true,
                }
            }
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(None)
    }

    /// Whether construction fell back to the built-in table.
    pub fn uses_defaults(&self) -> bool {
        self.uses_defaults
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }
}

impl Default for ExchangeRateProvider {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RateProvider for ExchangeRateProvider {
    fn get_rate(&self, code: &str) -> f64 {
        self.lookup(code).unwrap_or(RATE_NOT_FOUND)
    }

    fn lookup(&self, code: &str) -> Option<f64> {
        self.rates.get(code)
    }
}
