//! Source records
//!
//! The raw, unvalidated shape a transaction source hands to the engine.
//! Every field may be missing; the classifier decides whether a record is
//! usable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::transaction::Direction;

/// Credit/debit semantic attached to a row by its source system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money received
    Credit,
    /// Money paid out
    Debit,
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" | "cr" | "c" => Ok(Self::Credit),
            "debit" | "dr" | "d" => Ok(Self::Debit),
            other => Err(format!("unknown entry kind '{}'", other)),
        }
    }
}

/// An input row before classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub account: Option<String>,

    #[serde(default)]
    pub amount: Option<Money>,

    #[serde(default)]
    pub description: String,

    /// Explicit direction tag, wins over everything else
    #[serde(default)]
    pub direction: Option<Direction>,

    /// Credit/debit semantic
    #[serde(default)]
    pub entry: Option<EntryKind>,

    /// Upstream category label, e.g. "Unknown Transfer"
    #[serde(default)]
    pub category: Option<String>,

    /// Field-level parse failures collected by an import adapter
    #[serde(skip)]
    pub parse_errors: Vec<String>,
}

impl SourceRecord {
    /// Create a record with the mandatory fields populated
    pub fn new(
        date: NaiveDate,
        account: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: Some(date),
            account: Some(account.into()),
            amount: Some(amount),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_entry(mut self, entry: EntryKind) -> Self {
        self.entry = Some(entry);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl fmt::Display for SourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "<missing>".into());
        let amount = self
            .amount
            .map(|a| a.to_decimal_string())
            .unwrap_or_else(|| "<missing>".into());
        write!(
            f,
            "date={} account={} amount={} description={:?}",
            date,
            self.account.as_deref().unwrap_or("<missing>"),
            amount,
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_from_str() {
        assert_eq!("CR".parse::<EntryKind>().unwrap(), EntryKind::Credit);
        assert_eq!("debit".parse::<EntryKind>().unwrap(), EntryKind::Debit);
        assert!("transfer".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_display_marks_missing_fields() {
        let record = SourceRecord {
            account: Some("Rent".into()),
            description: "January".into(),
            ..SourceRecord::default()
        };
        assert_eq!(
            record.to_string(),
            "date=<missing> account=Rent amount=<missing> description=\"January\""
        );
    }

    #[test]
    fn test_json_defaults() {
        let record: SourceRecord =
            serde_json::from_str(r#"{"date":"2025-01-05","amount":1250,"account":"Salary"}"#)
                .unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 1, 5));
        assert_eq!(record.amount, Some(Money::from_cents(1250)));
        assert!(record.direction.is_none());
        assert!(record.description.is_empty());
    }
}
