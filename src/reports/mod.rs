//! Reports module
//!
//! Classification of source records and aggregation into cashflow reports.

pub mod cashflow;
pub mod classifier;

pub use cashflow::{Bucket, CashflowReport, CashflowSummary, ReportPeriod};
pub use classifier::{CategoryRules, Classifier};
