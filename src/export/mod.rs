//! Export module
//!
//! Writes generated cashflow reports in machine-readable formats:
//! - CSV: one row per transaction plus a summary block
//! - JSON: versioned document with decimal string amounts
//!
//! The Markdown document lives in `display`.

pub mod csv;
pub mod json;

pub use self::csv::export_cashflow_csv;
pub use self::json::{export_cashflow_json, CashflowExport, EXPORT_SCHEMA_VERSION};
