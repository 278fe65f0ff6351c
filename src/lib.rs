//! Cashflow report engine
//!
//! Turns a list of dated, labelled money movements into a cashflow report:
//! each record is classified as an inflow or outflow, the two buckets are
//! sorted and totalled, and the result is rendered as a Markdown document.
//!
//! # Architecture
//!
//! - `models`: source records, ledger postings, transactions and money
//! - `reports`: the classifier and the aggregator
//! - `display`: the Markdown formatter
//! - `export`: CSV and JSON exports
//! - `services`: source import and the report pipeline
//! - `config`: paths and user settings
//! - `cli`: command handlers for the `cashflow` binary
//! - `error`: custom error types
//!
//! # Example
//!
//! ```
//! use cashflow::display::format_cashflow_markdown;
//! use cashflow::models::{EntryKind, Money, SourceRecord};
//! use cashflow::reports::{CashflowReport, Classifier};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
//! let records = vec![
//!     SourceRecord::new(date, "Salary", Money::from_cents(250_000), "Pay")
//!         .with_entry(EntryKind::Credit),
//! ];
//! let transactions = Classifier::default().classify_all(&records)?;
//! let report = CashflowReport::generate(transactions, date.and_hms_opt(9, 0, 0).unwrap())?;
//! let doc = format_cashflow_markdown(&report);
//! assert!(doc.contains("- **Total Inflows**: $2,500.00"));
//! # Ok::<(), cashflow::CashflowError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{CashflowError, CashflowResult};
