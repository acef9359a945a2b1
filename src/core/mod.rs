//! Core conversion logic, independent of the command line

pub mod config;
pub mod converter;
pub mod ledger;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use converter::{ConversionError, ConversionResult, Converter};
pub use ledger::{
    ConsoleLogger, MemoryLogger, TRANSACTION_TARGET, TracingLogger, TransactionLogger,
    TransactionRecord,
};
pub use rates::{ExchangeRateProvider, RATE_NOT_FOUND, RateProvider, RateTable};
