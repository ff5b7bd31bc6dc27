use crate::core::format::format_money;
use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use serde::Serialize;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
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

/// Right-aligned money cell.
pub fn money_cell(currency: &str, amount: f64) -> Cell {
    Cell::new(format_money(currency, amount)).set_alignment(CellAlignment::Right)
}

/// Money cell colored by sign: green for a surplus, red for a shortfall.
pub fn difference_cell(currency: &str, amount: f64) -> Cell {
    let color = if amount >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    money_cell(currency, amount).fg(color)
}

/// Creates a cell whose color signals good (green) or bad (red).
pub fn flag_cell(text: &str, is_bad: bool) -> Cell {
    let color = if is_bad { Color::Red } else { Color::Green };
    Cell::new(text).fg(color)
}

/// Message shown when the model could not be loaded.
pub fn unavailable(what: &str) -> String {
    style_text(
        &format!("{what} not available: no trained model loaded."),
        StyleType::Error,
    )
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}
