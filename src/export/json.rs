//! JSON Export functionality
//!
//! Exports a cashflow report as a versioned JSON document with decimal
//! string amounts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::CashflowResult;
use crate::models::Transaction;
use crate::reports::{Bucket, CashflowReport};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Summary block of the JSON export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryExport {
    pub total_inflows: String,
    pub total_outflows: String,
    pub net_flow: String,
    pub transaction_count: usize,
}

/// One transaction row of the JSON export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowExport {
    pub date: String,
    pub account: String,
    pub amount: String,
    pub description: String,
}

/// Full report export structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowExport {
    /// Schema version for compatibility checking
    pub schema_version: String,
    pub generated_at: NaiveDateTime,
    pub summary: SummaryExport,
    pub inflows: Vec<FlowExport>,
    pub outflows: Vec<FlowExport>,
}

impl CashflowExport {
    pub fn from_report(report: &CashflowReport) -> Self {
        let summary = &report.summary;
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: report.generated_at,
            summary: SummaryExport {
                total_inflows: summary.total_inflows.to_decimal_string(),
                total_outflows: summary.total_outflows.to_decimal_string(),
                net_flow: summary.net_flow.to_decimal_string(),
                transaction_count: summary.transaction_count,
            },
            inflows: flows(&report.inflows),
            outflows: flows(&report.outflows),
        }
    }
}

fn flows(bucket: &Bucket) -> Vec<FlowExport> {
    bucket.iter().map(flow).collect()
}

fn flow(txn: &Transaction) -> FlowExport {
    FlowExport {
        date: txn.date.format("%Y-%m-%d").to_string(),
        account: txn.account.to_string(),
        amount: txn.amount.to_decimal_string(),
        description: txn.description.clone(),
    }
}

/// Export a report as pretty-printed JSON
pub fn export_cashflow_json<W: Write>(report: &CashflowReport, writer: &mut W) -> CashflowResult<()> {
    let export = CashflowExport::from_report(report);
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)?;
    Ok(())
}
