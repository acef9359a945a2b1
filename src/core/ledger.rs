//! Recording of completed conversions.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::{info, warn};

/// Tracing target for [`TracingLogger`] events. Subscribers installed by
/// [`init_logging`](crate::core::log::init_logging) always let it through at INFO.
pub const TRANSACTION_TARGET: &str = "fxconv::transactions";

/// A single successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub from: String,
    pub to: String,
    /// Source amount, before conversion.
    pub amount: f64,
    /// Cross rate applied, destination rate over source rate.
    pub rate: f64,
    pub timestamp: DateTime<Local>,
}

impl TransactionRecord {
    pub fn new(from: &str, to: &str, amount: f64, rate: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            rate,
            timestamp: Local::now(),
        }
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction Log - {} -> {} | Amount: {:.2} | Rate: {:.2} | Time: {}",
            self.from,
            self.to,
            self.amount,
            self.rate,
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.f")
        )
    }
}

/// Receives one record per successful conversion.
pub trait TransactionLogger: Send + Sync {
    fn record(&self, record: &TransactionRecord);
}

impl<F> TransactionLogger for F
where
    F: Fn(&TransactionRecord) + Send + Sync,
{
    fn record(&self, record: &TransactionRecord) {
        self(record)
    }
}

/// Writes the human readable log line to a writer, stdout by default.
pub struct ConsoleLogger<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> ConsoleLogger<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> TransactionLogger for ConsoleLogger<W> {
    fn record(&self, record: &TransactionRecord) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{record}") {
            warn!(error = %e, "Failed to write transaction log");
        }
    }
}

/// Emits each record as a structured tracing event on [`TRANSACTION_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TransactionLogger for TracingLogger {
    fn record(&self, record: &TransactionRecord) {
        info!(
            target: TRANSACTION_TARGET,
            from = %record.from,
            to = %record.to,
            amount = record.amount,
            rate = record.rate,
            timestamp = %record.timestamp.to_rfc3339(),
            "Transaction"
        );
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<TransactionRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TransactionRecord> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionLogger for MemoryLogger {
    fn record(&self, record: &TransactionRecord) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
    }
}
