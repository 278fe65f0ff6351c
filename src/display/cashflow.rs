//! Markdown rendering for cashflow reports

use crate::models::{Direction, Transaction};
use crate::reports::{Bucket, CashflowReport};

use super::report::{
    escape_cell, format_money, format_row_amount, table_header, table_row, NegativeStyle,
};

pub const REPORT_TITLE: &str = "# Cashflow Report";
pub const GENERATED_ON_PREFIX: &str = "Generated on:";
pub const TABLE_COLUMNS: [&str; 4] = ["Date", "Account", "Amount", "Description"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Options controlling the rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub currency_symbol: String,
    pub negative_style: NegativeStyle,
    /// Print at most this many rows per section; totals are unaffected
    pub row_limit: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            negative_style: NegativeStyle::Sign,
            row_limit: None,
        }
    }
}

/// Renders a `CashflowReport` as a Markdown document
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    options: FormatOptions,
}

impl MarkdownFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Render the full document
    pub fn render(&self, report: &CashflowReport) -> String {
        let mut output = String::new();

        output.push_str(REPORT_TITLE);
        output.push_str("\n\n");
        output.push_str(&format!(
            "{} {}\n",
            GENERATED_ON_PREFIX,
            report.generated_at.format(TIMESTAMP_FORMAT)
        ));

        self.push_summary(&mut output, report);
        self.push_section(&mut output, Direction::Inflow, &report.inflows);
        self.push_section(&mut output, Direction::Outflow, &report.outflows);

        output
    }

    fn push_summary(&self, output: &mut String, report: &CashflowReport) {
        let summary = &report.summary;
        let money = |amount| {
            format_money(
                amount,
                &self.options.currency_symbol,
                self.options.negative_style,
            )
        };

        output.push_str("\n## Summary\n\n");
        output.push_str(&format!(
            "- **Total Inflows**: {}\n",
            money(summary.total_inflows)
        ));
        output.push_str(&format!(
            "- **Total Outflows**: {}\n",
            money(summary.total_outflows)
        ));
        output.push_str(&format!("- **Net Flow**: {}\n", money(summary.net_flow)));
        output.push_str(&format!(
            "- **Transaction Count**: {}\n",
            summary.transaction_count
        ));
    }

    fn push_section(&self, output: &mut String, direction: Direction, bucket: &Bucket) {
        if bucket.is_empty() {
            return;
        }

        let heading = match direction {
            Direction::Inflow => "## Inflows",
            Direction::Outflow => "## Outflows",
        };
        output.push_str(&format!("\n{}\n\n", heading));
        output.push_str(&table_header(&TABLE_COLUMNS));
        output.push('\n');

        let limit = self.options.row_limit.unwrap_or(usize::MAX);
        for txn in bucket.iter().take(limit) {
            output.push_str(&self.format_row(txn));
            output.push('\n');
        }
    }

    fn format_row(&self, txn: &Transaction) -> String {
        let date = txn.date.format(DATE_FORMAT).to_string();
        let account = escape_cell(&txn.account.to_string());
        let amount = format_row_amount(txn.amount, &self.options.currency_symbol);
        let description = escape_cell(&txn.description);
        table_row(&[&date, &account, &amount, &description])
    }
}

/// Render with default options
pub fn format_cashflow_markdown(report: &CashflowReport) -> String {
    MarkdownFormatter::default().render(report)
}
