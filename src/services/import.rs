//! Import service
//!
//! Reads transaction sources (CSV files, JSON record arrays, JSON ledger
//! postings) into `SourceRecord`s. Field-level problems are recorded on the
//! record rather than raised here, so the classifier can reject the run
//! with the offending record's position.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{CashflowError, CashflowResult};
use crate::models::{Direction, EntryKind, LedgerEntry, Money, SourceRecord};

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Header-mapped CSV
    Csv,
    /// JSON array of records
    Json,
    /// JSON array of ledger postings
    Ledger,
}

impl InputFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// A CSV row as written by the source; every cell optional
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    account: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    entry: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Parses raw rows into source records
#[derive(Debug, Clone)]
pub struct ImportService {
    date_format: String,
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new("%Y-%m-%d")
    }
}

impl ImportService {
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// Load records from a file in the given format
    pub fn load_file(&self, path: &Path, format: InputFormat) -> CashflowResult<Vec<SourceRecord>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CashflowError::Import(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), ?format, "loading transaction source");
        self.parse(&content, format)
    }

    pub fn parse(&self, content: &str, format: InputFormat) -> CashflowResult<Vec<SourceRecord>> {
        match format {
            InputFormat::Csv => self.parse_csv(content.as_bytes()),
            InputFormat::Json => self.parse_json(content),
            InputFormat::Ledger => parse_ledger_json(content),
        }
    }

    /// Parse a CSV source with a header row
    ///
    /// Recognised columns: `date`, `account`, `amount`, `description`,
    /// `direction`, `entry`, `category`. Unknown columns are ignored.
    pub fn parse_csv<R: Read>(&self, reader: R) -> CashflowResult<Vec<SourceRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<CsvRow>() {
            let row = row?;
            let mut record = self.base_record(
                row.date,
                row.account,
                row.description,
                row.direction,
                row.entry,
                row.category,
            );
            if let Some(raw) = non_blank(row.amount) {
                parse_amount_into(&mut record, &raw);
            }
            records.push(record);
        }

        debug!(count = records.len(), "parsed CSV records");
        Ok(records)
    }

    /// Parse a JSON array of records
    ///
    /// Only the top-level array shape is a hard error. Each element is read
    /// field by field, so a wrongly typed field becomes a parse error on
    /// that record instead of failing the whole file.
    pub fn parse_json(&self, content: &str) -> CashflowResult<Vec<SourceRecord>> {
        let rows: Vec<Value> = serde_json::from_str(content)?;

        let records: Vec<SourceRecord> = rows
            .into_iter()
            .map(|row| match row {
                Value::Object(fields) => self.json_record(&fields),
                other => SourceRecord {
                    parse_errors: vec![format!("record must be a JSON object, got {}", other)],
                    ..SourceRecord::default()
                },
            })
            .collect();

        debug!(count = records.len(), "parsed JSON records");
        Ok(records)
    }

    fn json_record(&self, fields: &Map<String, Value>) -> SourceRecord {
        let mut errors = Vec::new();
        let mut text = |name: &str| match fields.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(value)) => Some(value.clone()),
            Some(other) => {
                errors.push(format!("{} must be a string, got {}", name, other));
                None
            }
        };

        let date = text("date");
        let account = text("account");
        let description = text("description");
        let direction = text("direction");
        let entry = text("entry");
        let category = text("category");

        let mut record =
            self.base_record(date, account, description, direction, entry, category);
        record.parse_errors.extend(errors);

        match fields.get("amount") {
            None | Some(Value::Null) => {}
            Some(Value::String(raw)) => parse_amount_into(&mut record, raw),
            Some(Value::Number(n)) => parse_amount_into(&mut record, &n.to_string()),
            Some(other) => record
                .parse_errors
                .push(format!("amount must be a number or string, got {}", other)),
        }
        record
    }

    fn base_record(
        &self,
        date: Option<String>,
        account: Option<String>,
        description: Option<String>,
        direction: Option<String>,
        entry: Option<String>,
        category: Option<String>,
    ) -> SourceRecord {
        let mut record = SourceRecord {
            account: non_blank(account),
            description: description.unwrap_or_default(),
            category: non_blank(category),
            ..SourceRecord::default()
        };

        if let Some(raw) = non_blank(date) {
            match NaiveDate::parse_from_str(&raw, &self.date_format) {
                Ok(date) => record.date = Some(date),
                Err(_) => record
                    .parse_errors
                    .push(format!("unparseable date '{}'", raw)),
            }
        }

        if let Some(raw) = non_blank(direction) {
            match raw.parse::<Direction>() {
                Ok(direction) => record.direction = Some(direction),
                Err(e) => record.parse_errors.push(e),
            }
        }

        if let Some(raw) = non_blank(entry) {
            match raw.parse::<EntryKind>() {
                Ok(entry) => record.entry = Some(entry),
                Err(e) => record.parse_errors.push(e),
            }
        }

        record
    }
}

/// Parse a JSON array of ledger postings and collapse each to one record
///
/// A posting that does not deserialize keeps its position as a record
/// carrying the parse error.
pub fn parse_ledger_json(content: &str) -> CashflowResult<Vec<SourceRecord>> {
    let postings: Vec<Value> = serde_json::from_str(content)?;

    let records: Vec<SourceRecord> = postings
        .into_iter()
        .map(|posting| {
            let description = posting
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            match serde_json::from_value::<LedgerEntry>(posting) {
                Ok(entry) => entry.to_source_record(),
                Err(e) => SourceRecord {
                    description,
                    parse_errors: vec![format!("invalid ledger posting: {}", e)],
                    ..SourceRecord::default()
                },
            }
        })
        .collect();

    debug!(count = records.len(), "parsed ledger postings");
    Ok(records)
}

fn parse_amount_into(record: &mut SourceRecord, raw: &str) {
    match Money::parse(raw) {
        Ok(amount) => record.amount = Some(amount),
        Err(e) => record.parse_errors.push(e.to_string()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
