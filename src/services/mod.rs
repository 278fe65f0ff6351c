//! Service layer
//!
//! Collaborators around the engine: reading transaction sources and running
//! the report pipeline with explicit settings.

pub mod import;
pub mod report;

pub use import::{ImportService, InputFormat};
pub use report::ReportService;
