//! Report formatting utilities
//!
//! Currency rendering and Markdown table cell helpers shared by the report
//! renderers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Money;

/// How negative amounts are shown in summary lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NegativeStyle {
    /// `-$1,898.00`
    #[default]
    Sign,
    /// `($1,898.00)`
    Parentheses,
}

/// Format a signed amount, e.g. `$3,481.00` or `-$1,898.00`
pub fn format_money(amount: Money, symbol: &str, style: NegativeStyle) -> String {
    if !amount.is_negative() {
        return amount.format_magnitude(symbol);
    }
    match style {
        NegativeStyle::Sign => amount.format_with_symbol(symbol),
        NegativeStyle::Parentheses => format!("({})", amount.format_magnitude(symbol)),
    }
}

/// Format an amount for a table row; rows never carry a sign
pub fn format_row_amount(amount: Money, symbol: &str) -> String {
    amount.format_magnitude(symbol)
}

/// Make text safe to place inside a Markdown table cell
///
/// `|` and `\` are backslash-escaped and line breaks collapse to one space,
/// so a cell can never add a column or end a row.
pub fn escape_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_break = false;
    for ch in text.chars() {
        match ch {
            '\r' | '\n' => {
                if !last_was_break {
                    out.push(' ');
                }
                last_was_break = true;
                continue;
            }
            '|' => out.push_str("\\|"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
        last_was_break = false;
    }

    if out != text {
        debug!(original = %text, escaped = %out, "escaped table cell");
    }
    out
}

/// Render one Markdown table row from already-escaped cells
pub fn table_row(cells: &[&str]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Render the header and separator lines of a Markdown table
pub fn table_header(columns: &[&str]) -> String {
    let separator: Vec<String> = columns
        .iter()
        .map(|c| "-".repeat(c.chars().count() + 2))
        .collect();
    format!("{}\n|{}|", table_row(columns), separator.join("|"))
}
