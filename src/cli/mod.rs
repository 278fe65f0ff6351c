//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod report;

pub use report::{handle_report_command, OutputFormat, ReportArgs};
