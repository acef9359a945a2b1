use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A cloneable handle to an output stream.
#[derive(Clone)]
pub struct SharedWriter(Arc<Mutex<dyn Write + Send>>);

impl SharedWriter {
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self(Arc::new(Mutex::new(out)))
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut out = self.0.lock().unwrap_or_else(|e| e.into_inner());
        out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut out = self.0.lock().unwrap_or_else(|e| e.into_inner());
        out.flush()
    }
}

/// Where command results and diagnostics are written.
#[derive(Clone)]
pub struct Streams {
    pub out: SharedWriter,
    pub err: SharedWriter,
}

impl Streams {
    pub fn std() -> Self {
        Self {
            out: SharedWriter::stdout(),
            err: SharedWriter::stderr(),
        }
    }
}

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Warning,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right aligned rate cell. Rates that cannot be converted with are shown in red.
pub fn rate_cell(rate: f64) -> Cell {
    let cell = Cell::new(format!("{rate:.4}")).set_alignment(CellAlignment::Right);
    if rate > 0.0 {
        cell
    } else {
        cell.fg(Color::Red)
    }
}

/// Writes the fallback notice, normally to stderr.
pub fn print_default_rates_warning(err: &mut impl Write) -> io::Result<()> {
    writeln!(
        err,
        "{}",
        style_text("Warning: Using default exchange rates.", StyleType::Warning)
    )
}

/// Formats an amount with two decimals followed by its currency code.
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}
