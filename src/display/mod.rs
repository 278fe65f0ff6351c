//! Display formatting for reports
//!
//! Provides the Markdown renderer for cashflow reports and the currency and
//! table-cell helpers it is built from.

pub mod cashflow;
pub mod report;

pub use cashflow::{format_cashflow_markdown, FormatOptions, MarkdownFormatter};
pub use report::{escape_cell, format_money, NegativeStyle};
