use super::ui::{self, StyleType};
use crate::core::rates::RateTable;
use comfy_table::Cell;
use std::io::{self, Write};

/// Prints the active rate table.
pub fn run(rates: &RateTable, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "\n{}",
        ui::style_text("Exchange Rates (per 1 base unit)", StyleType::Title)
    )?;
    writeln!(out, "{}", build_table(rates))?;
    writeln!(
        out,
        "{}",
        ui::style_text(&format!("{} currencies", rates.len()), StyleType::Subtle)
    )
}

fn build_table(rates: &RateTable) -> comfy_table::Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Rate")]);
    for (code, rate) in rates.iter() {
        table.add_row(vec![Cell::new(code), ui::rate_cell(rate)]);
    }
    table
}
