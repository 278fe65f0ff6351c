//! Transaction classifier
//!
//! Validates source records and resolves each one to exactly one direction.
//! Direction is decided here once; later stages only read it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{CashflowError, CashflowResult};
use crate::models::{AccountLabel, Direction, EntryKind, SourceRecord, Transaction};

/// Category → direction lookup supplied by the caller
///
/// Used only when a record carries neither an explicit direction nor a
/// credit/debit entry. Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct CategoryRules {
    rules: BTreeMap<String, Direction>,
}

impl CategoryRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the direction for a category
    pub fn with_rule(mut self, category: &str, direction: Direction) -> Self {
        self.insert(category, direction);
        self
    }

    pub fn insert(&mut self, category: &str, direction: Direction) {
        self.rules.insert(normalize(category), direction);
    }

    pub fn lookup(&self, category: &str) -> Option<Direction> {
        self.rules.get(&normalize(category)).copied()
    }
}

impl<'a> FromIterator<(&'a String, &'a Direction)> for CategoryRules {
    fn from_iter<I: IntoIterator<Item = (&'a String, &'a Direction)>>(iter: I) -> Self {
        let mut rules = Self::new();
        for (category, direction) in iter {
            rules.insert(category, *direction);
        }
        rules
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Assigns directions to source records
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: CategoryRules,
}

impl Classifier {
    pub fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }

    /// Resolve the direction of a record
    ///
    /// Explicit tag, then credit/debit entry, then category rule, then
    /// Outflow. The amount is never consulted.
    pub fn direction_for(&self, record: &SourceRecord) -> Direction {
        if let Some(direction) = record.direction {
            return direction;
        }
        if let Some(entry) = record.entry {
            return match entry {
                EntryKind::Credit => Direction::Inflow,
                EntryKind::Debit => Direction::Outflow,
            };
        }
        if let Some(direction) = record
            .category
            .as_deref()
            .and_then(|category| self.rules.lookup(category))
        {
            return direction;
        }

        debug!(record = %record, "no direction hint, defaulting to outflow");
        Direction::Outflow
    }

    /// Validate and classify a single record at input position `index`
    pub fn classify(&self, index: usize, record: &SourceRecord) -> CashflowResult<Transaction> {
        let malformed = |reason: String| CashflowError::malformed(index, reason, record.to_string());

        if let Some(first) = record.parse_errors.first() {
            return Err(malformed(first.clone()));
        }

        let date = record
            .date
            .ok_or_else(|| malformed("missing date".to_string()))?;

        let amount = record
            .amount
            .ok_or_else(|| malformed("missing amount".to_string()))?;
        if amount.is_negative() {
            return Err(malformed(format!(
                "negative amount {}",
                amount.to_decimal_string()
            )));
        }

        let raw_account = record
            .account
            .as_deref()
            .ok_or_else(|| malformed("missing account".to_string()))?;
        let account = AccountLabel::parse(raw_account).map_err(malformed)?;

        Ok(Transaction {
            date,
            account,
            amount,
            description: record.description.clone(),
            direction: self.direction_for(record),
        })
    }

    /// Classify every record, failing on the first malformed one
    pub fn classify_all(&self, records: &[SourceRecord]) -> CashflowResult<Vec<Transaction>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.classify(index, record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, UNKNOWN_TRANSFER};
    use chrono::NaiveDate;

    fn record(account: &str, cents: i64) -> SourceRecord {
        SourceRecord::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            account,
            Money::from_cents(cents),
            "test",
        )
    }

    #[test]
    fn test_explicit_direction_wins() {
        let classifier = Classifier::default();
        let rec = record("Refund", 1_000)
            .with_direction(Direction::Inflow)
            .with_entry(EntryKind::Debit);
        assert_eq!(classifier.direction_for(&rec), Direction::Inflow);
    }

    #[test]
    fn test_entry_kind_decides() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.direction_for(&record("Salary", 100).with_entry(EntryKind::Credit)),
            Direction::Inflow
        );
        assert_eq!(
            classifier.direction_for(&record("Rent", 100).with_entry(EntryKind::Debit)),
            Direction::Outflow
        );
    }

    #[test]
    fn test_category_rule_applies() {
        let rules = CategoryRules::new().with_rule("Interest", Direction::Inflow);
        let classifier = Classifier::new(rules);
        let rec = record("Savings", 250).with_category("interest");
        assert_eq!(classifier.direction_for(&rec), Direction::Inflow);
    }

    #[test]
    fn test_unknown_category_falls_back_to_outflow() {
        let classifier = Classifier::default();
        let rec = record("Mystery", 250).with_category("Never Seen");
        assert_eq!(classifier.direction_for(&rec), Direction::Outflow);
    }

    #[test]
    fn test_zero_amount_keeps_category_direction() {
        let rules = CategoryRules::new().with_rule(UNKNOWN_TRANSFER, Direction::Outflow);
        let classifier = Classifier::new(rules);
        let txn = classifier
            .classify(0, &record(UNKNOWN_TRANSFER, 0).with_category(UNKNOWN_TRANSFER))
            .unwrap();
        assert_eq!(txn.direction, Direction::Outflow);
        assert!(txn.amount.is_zero());

        let credited = classifier
            .classify(1, &record("Adjustment", 0).with_entry(EntryKind::Credit))
            .unwrap();
        assert_eq!(credited.direction, Direction::Inflow);
    }

    #[test]
    fn test_missing_date_is_malformed() {
        let classifier = Classifier::default();
        let mut rec = record("Rent", 80_000);
        rec.date = None;
        let err = classifier.classify(4, &rec).unwrap_err();
        match err {
            CashflowError::MalformedTransaction { index, reason, record } => {
                assert_eq!(index, 4);
                assert_eq!(reason, "missing date");
                assert!(record.contains("account=Rent"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_and_missing_amount_are_malformed() {
        let classifier = Classifier::default();
        assert!(classifier
            .classify(0, &record("Rent", -100))
            .unwrap_err()
            .is_malformed());

        let mut rec = record("Rent", 100);
        rec.amount = None;
        assert!(classifier.classify(0, &rec).unwrap_err().is_malformed());
    }

    #[test]
    fn test_bad_account_is_malformed() {
        let classifier = Classifier::default();
        assert!(classifier
            .classify(0, &record("Transfer: Checking", 100))
            .unwrap_err()
            .is_malformed());

        let mut rec = record("x", 100);
        rec.account = None;
        assert!(classifier.classify(0, &rec).unwrap_err().is_malformed());
    }

    #[test]
    fn test_parse_errors_are_malformed() {
        let classifier = Classifier::default();
        let mut rec = record("Rent", 100);
        rec.parse_errors.push("unparseable date '2025-13-40'".into());
        let err = classifier.classify(2, &rec).unwrap_err();
        assert!(err.to_string().contains("unparseable date"));
    }

    #[test]
    fn test_classify_all_rejects_whole_batch() {
        let classifier = Classifier::default();
        let mut bad = record("Rent", 100);
        bad.date = None;
        let records = vec![record("Salary", 100), bad, record("Food", 100)];
        let err = classifier.classify_all(&records).unwrap_err();
        assert!(matches!(
            err,
            CashflowError::MalformedTransaction { index: 1, .. }
        ));
    }
}
