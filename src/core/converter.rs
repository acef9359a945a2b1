//! Currency conversion over a [`RateProvider`].

use crate::core::ledger::{TransactionLogger, TransactionRecord};
use crate::core::rates::RateProvider;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Amount must be positive.")]
    InvalidAmount,
    /// Either code is unknown or its configured rate is not positive.
    #[error("Invalid currency code.")]
    InvalidCurrency,
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    /// Amount in the destination currency, unrounded.
    pub amount: f64,
    /// Cross rate, destination rate over source rate.
    pub rate: f64,
}

/// Converts amounts between currencies and records each success.
///
/// Holds no state besides its two collaborators, so a single converter can be
/// shared freely across callers.
#[derive(Clone)]
pub struct Converter {
    rates: Arc<dyn RateProvider>,
    logger: Arc<dyn TransactionLogger>,
}

impl Converter {
    pub fn new(rates: Arc<dyn RateProvider>, logger: Arc<dyn TransactionLogger>) -> Self {
        Self { rates, logger }
    }

    /// Converts `amount` of `from` into `to`.
    pub fn convert(&self, from: &str, to: &str, amount: f64) -> Result<f64, ConversionError> {
        self.convert_detailed(from, to, amount).map(|r| r.amount)
    }

    /// Like [`convert`](Self::convert), also returning the cross rate.
    ///
    /// Fails with [`ConversionError::InvalidAmount`] before any rate lookup when
    /// `amount` is not strictly positive, then with
    /// [`ConversionError::InvalidCurrency`] when either rate is not strictly
    /// positive. Exactly one record is logged on success and none on failure.
    pub fn convert_detailed(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<ConversionResult, ConversionError> {
        // NaN fails the comparison as well
        if !(amount > 0.0) {
            debug!(amount, "Rejected non-positive amount");
            return Err(ConversionError::InvalidAmount);
        }

        let from_rate = self.rates.get_rate(from);
        let to_rate = self.rates.get_rate(to);
        if !(from_rate > 0.0) || !(to_rate > 0.0) {
            debug!(from, to, from_rate, to_rate, "Rejected currency pair");
            return Err(ConversionError::InvalidCurrency);
        }

        let converted = (amount / from_rate) * to_rate;
        // Computed separately from the conversion; may differ in the last bit.
        let rate = to_rate / from_rate;
        debug!(from, to, amount, converted, rate, "Converted amount");

        self.logger
            .record(&TransactionRecord::new(from, to, amount, rate));

        Ok(ConversionResult {
            amount: converted,
            rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::MemoryLogger;
    use crate::core::rates::{ExchangeRateProvider, RATE_NOT_FOUND, RateTable};
    use approx::assert_relative_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_rates() -> RateTable {
        [("USD", 1.0), ("EUR", 0.85), ("UGX", 3800.0)]
            .into_iter()
            .collect()
    }

    fn converter_with(rates: Option<RateTable>) -> (Converter, Arc<MemoryLogger>) {
        let logger = Arc::new(MemoryLogger::new());
        let provider = Arc::new(ExchangeRateProvider::new(rates));
        (Converter::new(provider, logger.clone()), logger)
    }

    // Provider that counts lookups, to check nothing is resolved for bad amounts.
    struct CountingProvider {
        inner: ExchangeRateProvider,
        calls: AtomicUsize,
    }

    impl RateProvider for CountingProvider {
        fn get_rate(&self, code: &str) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_rate(code)
        }
    }

    #[test]
    fn test_valid_conversion() {
        let (converter, logger) = converter_with(Some(sample_rates()));

        let result = converter.convert("USD", "EUR", 100.0).unwrap();
        assert_relative_eq!(result, 85.0);
        assert_eq!(format!("{result:.2}"), "85.00");

        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].from, "USD");
        assert_eq!(records[0].to, "EUR");
        assert_eq!(records[0].amount, 100.0);
        assert_relative_eq!(records[0].rate, 0.85);
    }

    #[test]
    fn test_conversion_between_non_base_currencies() {
        let (converter, logger) = converter_with(Some(sample_rates()));

        let result = converter.convert_detailed("EUR", "UGX", 17.0).unwrap();
        assert_relative_eq!(result.amount, (17.0 / 0.85) * 3800.0);
        assert_relative_eq!(result.rate, 3800.0 / 0.85);
        assert_eq!(logger.records()[0].rate, result.rate);
    }

    #[test]
    fn test_same_currency_is_identity() {
        let (converter, _) = converter_with(Some(sample_rates()));
        let result = converter.convert_detailed("UGX", "UGX", 42.5).unwrap();
        assert_relative_eq!(result.amount, 42.5);
        assert_eq!(result.rate, 1.0);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (converter, logger) = converter_with(Some(sample_rates()));

        let err = converter.convert("USD", "EUR", -50.0).unwrap_err();
        assert_eq!(err, ConversionError::InvalidAmount);
        assert_eq!(err.to_string(), "Amount must be positive.");
        assert!(logger.is_empty());
    }

    #[test]
    fn test_zero_and_nan_amounts_rejected() {
        let (converter, logger) = converter_with(Some(sample_rates()));

        assert_eq!(
            converter.convert("USD", "EUR", 0.0),
            Err(ConversionError::InvalidAmount)
        );
        assert_eq!(
            converter.convert("USD", "EUR", f64::NAN),
            Err(ConversionError::InvalidAmount)
        );
        assert!(logger.is_empty());
    }

    #[test]
    fn test_amount_checked_before_currency() {
        let provider = Arc::new(CountingProvider {
            inner: ExchangeRateProvider::new(Some(sample_rates())),
            calls: Default::default(),
        });
        let logger = Arc::new(MemoryLogger::new());
        let converter = Converter::new(provider.clone(), logger.clone());

        assert_eq!(
            converter.convert("XYZ", "ABC", -1.0),
            Err(ConversionError::InvalidAmount)
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(logger.is_empty());
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let (converter, logger) = converter_with(Some(sample_rates()));

        let err = converter.convert("USD", "XYZ", 100.0).unwrap_err();
        assert_eq!(err, ConversionError::InvalidCurrency);
        assert_eq!(err.to_string(), "Invalid currency code.");

        assert_eq!(
            converter.convert("XYZ", "USD", 100.0),
            Err(ConversionError::InvalidCurrency)
        );
        assert!(logger.is_empty());
    }

    #[test]
    fn test_non_positive_stored_rate_is_invalid_currency() {
        let rates: RateTable = [
            ("USD", 1.0),
            ("ZERO", 0.0),
            ("NEG", -2.0),
            ("NAN", f64::NAN),
        ]
        .into_iter()
        .collect();
        let (converter, logger) = converter_with(Some(rates));

        for code in ["ZERO", "NEG", "NAN"] {
            assert_eq!(
                converter.convert("USD", code, 10.0),
                Err(ConversionError::InvalidCurrency),
                "{code}"
            );
            assert_eq!(
                converter.convert(code, "USD", 10.0),
                Err(ConversionError::InvalidCurrency),
                "{code}"
            );
        }
        assert!(logger.is_empty());
    }

    #[test]
    fn test_default_table_conversion() {
        let (converter, logger) = converter_with(None);

        let result = converter.convert("USD", "UGX", 1.0).unwrap();
        assert_relative_eq!(result, 3700.0);
        assert_eq!(format!("{result:.2}"), "3700.00");
        assert_eq!(logger.len(), 1);
        assert_ne!(
            ExchangeRateProvider::with_defaults().get_rate("UGX"),
            RATE_NOT_FOUND
        );
    }

    #[test]
    fn test_property_matches_formula_and_logs_once() {
        let rates: RateTable = [
            ("AAA", 0.37),
            ("BBB", 12.5),
            ("CCC", 1.0e-3),
            ("DDD", 987.65),
        ]
        .into_iter()
        .collect();
        let codes = ["AAA", "BBB", "CCC", "DDD"];
        let amounts = [0.01, 1.0, 33.3, 1.0e6];
        let (converter, logger) = converter_with(Some(rates.clone()));

        let mut expected_records = 0;
        for from in codes {
            for to in codes {
                for amount in amounts {
                    let r_f = rates.get(from).unwrap();
                    let r_t = rates.get(to).unwrap();
                    let result = converter.convert_detailed(from, to, amount).unwrap();
                    expected_records += 1;

                    assert_relative_eq!(result.amount, (amount / r_f) * r_t);
                    assert_eq!(result.rate, r_t / r_f);
                    assert_eq!(logger.len(), expected_records);
                    let last = logger.records().pop().unwrap();
                    assert_eq!(last.rate, r_t / r_f);
                    assert_eq!(last.amount, amount);
                }
            }
        }
    }

    #[test]
    fn test_shared_across_threads() {
        let (converter, logger) = converter_with(Some(sample_rates()));

        std::thread::scope(|s| {
            for _ in 0..4 {
                let converter = converter.clone();
                s.spawn(move || {
                    for _ in 0..25 {
                        converter.convert("USD", "EUR", 10.0).unwrap();
                    }
                });
            }
        });
        assert_eq!(logger.len(), 100);
    }
}
