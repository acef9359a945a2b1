pub mod cli;
pub mod core;

use crate::cli::ui::{SharedWriter, Streams};
use crate::core::config::{AppConfig, LogSink};
use crate::core::converter::Converter;
use crate::core::ledger::{ConsoleLogger, TracingLogger, TransactionLogger};
use crate::core::rates::ExchangeRateProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Commands that need a loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Convert {
        from: String,
        to: String,
        amount: f64,
        json: bool,
    },
    Rates,
    Demo,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    run_command_with(command, config_path, Streams::std())
}

/// Runs `command` writing results to `streams.out` and warnings to `streams.err`.
///
/// Console transaction records go to `streams.out`, or to `streams.err` when the
/// result is printed as JSON.
pub fn run_command_with(
    command: AppCommand,
    config_path: Option<&str>,
    mut streams: Streams,
) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert {
            from,
            to,
            amount,
            json,
        } => {
            let provider = rate_provider(&config, &mut streams.err)?;
            // Keep stdout parseable when printing JSON
            let records = if json {
                streams.err.clone()
            } else {
                streams.out.clone()
            };
            let logger = transaction_logger(config.transaction_log, records);
            let converter = Converter::new(provider, logger);
            cli::convert::run(&converter, &from, &to, amount, json, &mut streams.out)
        }
        AppCommand::Rates => {
            let provider = rate_provider(&config, &mut streams.err)?;
            cli::rates::run(provider.rates(), &mut streams.out)?;
            Ok(())
        }
        AppCommand::Demo => {
            let logger = transaction_logger(config.transaction_log, streams.out.clone());
            cli::demo::run(logger, &mut streams.out, &mut streams.err)?;
            Ok(())
        }
    }
}

fn rate_provider(config: &AppConfig, err: &mut SharedWriter) -> Result<Arc<ExchangeRateProvider>> {
    let provider = ExchangeRateProvider::new(config.rates.clone());
    if provider.uses_defaults() {
        cli::ui::print_default_rates_warning(err)?;
    }
    Ok(Arc::new(provider))
}

fn transaction_logger(sink: LogSink, console: SharedWriter) -> Arc<dyn TransactionLogger> {
    match sink {
        LogSink::Console => Arc::new(ConsoleLogger::with_writer(console)),
        LogSink::Tracing => Arc::new(TracingLogger),
    }
}
