use super::ui::{self, StyleType};
use crate::core::converter::{ConversionError, Converter};
use crate::core::ledger::TransactionLogger;
use crate::core::rates::{ExchangeRateProvider, RateTable};
use std::io::{self, Write};
use std::sync::Arc;

/// One walkthrough step and what the converter returned for it.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub title: &'static str,
    pub to: &'static str,
    pub result: Result<f64, ConversionError>,
    /// The step ran against the built-in fallback table.
    pub uses_default_rates: bool,
}

fn demo_rates() -> RateTable {
    [("USD", 1.0), ("EUR", 0.85), ("UGX", 3800.0)]
        .into_iter()
        .collect()
}

/// Runs the four walkthrough conversions: a valid one, a negative amount, an
/// unknown currency and one against the built-in default table.
pub fn run_scenarios(logger: Arc<dyn TransactionLogger>) -> Vec<ScenarioOutcome> {
    let supplied = Converter::new(
        Arc::new(ExchangeRateProvider::new(Some(demo_rates()))),
        Arc::clone(&logger),
    );

    let mut outcomes = vec![
        ScenarioOutcome {
            title: "Valid Transaction",
            to: "EUR",
            result: supplied.convert("USD", "EUR", 100.0),
            uses_default_rates: false,
        },
        ScenarioOutcome {
            title: "Invalid Amount",
            to: "EUR",
            result: supplied.convert("USD", "EUR", -50.0),
            uses_default_rates: false,
        },
        ScenarioOutcome {
            title: "Invalid Currency Code",
            to: "XYZ",
            result: supplied.convert("USD", "XYZ", 100.0),
            uses_default_rates: false,
        },
    ];

    let default_provider = ExchangeRateProvider::with_defaults();
    let uses_default_rates = default_provider.uses_defaults();
    let defaults = Converter::new(Arc::new(default_provider), logger);
    outcomes.push(ScenarioOutcome {
        title: "Default Rates",
        to: "UGX",
        result: defaults.convert("USD", "UGX", 1.0),
        uses_default_rates,
    });

    outcomes
}

/// Runs the walkthrough and prints each outcome to `out`, warnings to `err`.
pub fn run(
    logger: Arc<dyn TransactionLogger>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    for (i, outcome) in run_scenarios(logger).iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(
            out,
            "{}",
            ui::style_text(
                &format!("Test {}: {}", i + 1, outcome.title),
                StyleType::Title
            )
        )?;
        if outcome.uses_default_rates {
            ui::print_default_rates_warning(err)?;
        }
        match &outcome.result {
            Ok(amount) => writeln!(
                out,
                "{} {}",
                ui::style_text("Converted Amount:", StyleType::Label),
                ui::style_text(&ui::format_amount(*amount, outcome.to), StyleType::Value)
            )?,
            Err(e) => writeln!(
                out,
                "{}",
                ui::style_text(&format!("Error: {e}"), StyleType::Error)
            )?,
        }
    }
    Ok(())
}
