use super::ui::{self, StyleType};
use crate::core::converter::Converter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ConvertOutput<'a> {
    from: &'a str,
    to: &'a str,
    amount: f64,
    converted: f64,
    rate: f64,
}

/// Converts a single amount and prints the result.
///
/// Validation failures are returned as errors so the process exits non-zero.
pub fn run(
    converter: &Converter,
    from: &str,
    to: &str,
    amount: f64,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let result = converter.convert_detailed(from, to, amount)?;

    if json {
        let output = ConvertOutput {
            from,
            to,
            amount,
            converted: result.amount,
            rate: result.rate,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(
            out,
            "{} {}",
            ui::style_text("Converted Amount:", StyleType::Label),
            ui::style_text(&ui::format_amount(result.amount, to), StyleType::Value)
        )?;
    }
    Ok(())
}
