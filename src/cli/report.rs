//! CLI command for cashflow reports
//!
//! Loads a transaction source, generates the report and writes it to
//! stdout or a file in the requested format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, ValueEnum};

use crate::config::Settings;
use crate::error::{CashflowError, CashflowResult};
use crate::export::{export_cashflow_csv, export_cashflow_json};
use crate::reports::ReportPeriod;
use crate::services::{ImportService, InputFormat, ReportService};

/// Output document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Csv,
    Json,
}

/// Arguments for `cashflow report`
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Transaction source file
    pub input: PathBuf,

    /// Input format (guessed from the file extension when omitted)
    #[arg(short, long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Show at most N rows per section
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Handle the report command
pub fn handle_report_command(settings: &Settings, args: ReportArgs) -> CashflowResult<()> {
    let period = ReportPeriod::new(
        parse_date_arg("start", args.start.as_deref())?,
        parse_date_arg("end", args.end.as_deref())?,
    );
    if let (Some(start), Some(end)) = (period.start_date, period.end_date) {
        if start > end {
            return Err(CashflowError::Validation(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }
    }

    let mut settings = settings.clone();
    if args.limit.is_some() {
        settings.row_limit = args.limit;
    }

    let input_format = args
        .input_format
        .unwrap_or_else(|| InputFormat::from_path(&args.input));
    let records = ImportService::new(settings.input_date_format.clone())
        .load_file(&args.input, input_format)?;

    let service = ReportService::new(&settings);
    let report = service.generate(&records, period)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CashflowError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&service, &report, args.format, &mut writer)?;
            writer.flush()?;
            println!("Cashflow report exported to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_report(&service, &report, args.format, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    service: &ReportService,
    report: &crate::reports::CashflowReport,
    format: OutputFormat,
    writer: &mut W,
) -> CashflowResult<()> {
    match format {
        OutputFormat::Markdown => writer
            .write_all(service.render(report).as_bytes())
            .map_err(|e| CashflowError::Export(e.to_string())),
        OutputFormat::Csv => export_cashflow_csv(report, writer),
        OutputFormat::Json => export_cashflow_json(report, writer),
    }
}

fn parse_date_arg(name: &str, value: Option<&str>) -> CashflowResult<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                CashflowError::Validation(format!(
                    "Invalid {} date format: {}. Use YYYY-MM-DD",
                    name, s
                ))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(parse_date_arg("start", None).unwrap(), None);
        assert_eq!(
            parse_date_arg("start", Some("2025-01-31")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        let err = parse_date_arg("end", Some("31/01/2025")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Invalid end date format: 31/01/2025. Use YYYY-MM-DD"
        );
    }
}
