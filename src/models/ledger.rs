//! Ledger postings
//!
//! Some transaction sources store multi-split postings instead of single
//! rows. A posting collapses into exactly one `SourceRecord`; no mirror leg
//! is produced for transfers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::record::{EntryKind, SourceRecord};

/// Category attached to postings that cannot be attributed to any account
pub const UNKNOWN_TRANSFER: &str = "Unknown Transfer";

/// Kind of ledger account a split posts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
}

/// One leg of a posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSplit {
    pub account: String,
    pub kind: AccountKind,
    /// Signed amount as posted
    pub amount: Money,
}

impl LedgerSplit {
    pub fn new(account: impl Into<String>, kind: AccountKind, amount: Money) -> Self {
        Self {
            account: account.into(),
            kind,
            amount,
        }
    }
}

/// A dated posting with one or more splits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Absent dates are carried through and rejected by the classifier
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    pub splits: Vec<LedgerSplit>,
}

impl LedgerEntry {
    /// Collapse this posting into a single report row
    ///
    /// Income splits win, then expense splits, then the largest non-asset
    /// split; a pure asset movement becomes a `Transfer:` row. Amounts that
    /// do not fit in `Money` are left unset and recorded as parse errors.
    pub fn to_source_record(&self) -> SourceRecord {
        let mut record = SourceRecord {
            date: self.date,
            description: self.description.clone(),
            ..SourceRecord::default()
        };

        match self.attribute() {
            Ok(Attribution {
                account,
                amount,
                entry,
            }) => {
                record.account = Some(account);
                record.amount = Some(amount);
                record.entry = entry;
                if entry.is_none() {
                    record.category = Some(UNKNOWN_TRANSFER.to_string());
                }
            }
            Err(reason) => record.parse_errors.push(reason),
        }
        record
    }

    fn attribute(&self) -> Result<Attribution, String> {
        if let Some(found) = self.sum_of(AccountKind::Income, EntryKind::Credit)? {
            return Ok(found);
        }
        if let Some(found) = self.sum_of(AccountKind::Expense, EntryKind::Debit)? {
            return Ok(found);
        }

        let largest_non_asset = self
            .splits
            .iter()
            .filter(|s| s.kind != AccountKind::Asset)
            .max_by_key(|s| s.amount.cents().unsigned_abs());
        if let Some(split) = largest_non_asset {
            let entry = if split.amount.is_positive() {
                EntryKind::Credit
            } else {
                EntryKind::Debit
            };
            return Ok(Attribution {
                account: split.account.clone(),
                amount: magnitude(split)?,
                entry: Some(entry),
            });
        }

        if self.splits.len() >= 2 {
            let from = self.splits.iter().min_by_key(|s| s.amount);
            let to = self.splits.iter().max_by_key(|s| s.amount);
            if let (Some(from), Some(to)) = (from, to) {
                let amount = magnitude(from)?;
                let entry = if amount.is_zero() {
                    EntryKind::Debit
                } else {
                    EntryKind::Credit
                };
                return Ok(Attribution {
                    account: format!("Transfer: {} → {}", from.account, to.account),
                    amount,
                    entry: Some(entry),
                });
            }
        }

        Ok(Attribution {
            account: UNKNOWN_TRANSFER.to_string(),
            amount: Money::zero(),
            entry: None,
        })
    }

    /// Total magnitude of all splits of `kind`, labelled with the last such
    /// account as the posting's main account
    fn sum_of(&self, kind: AccountKind, entry: EntryKind) -> Result<Option<Attribution>, String> {
        let matching: Vec<&LedgerSplit> = self.splits.iter().filter(|s| s.kind == kind).collect();
        let Some(last) = matching.last() else {
            return Ok(None);
        };

        let magnitudes = matching
            .iter()
            .map(|split| magnitude(split))
            .collect::<Result<Vec<_>, _>>()?;
        let total = Money::checked_sum(magnitudes)
            .ok_or_else(|| format!("{:?} splits overflow the amount range", kind))?;
        if total.is_zero() {
            return Ok(None);
        }

        Ok(Some(Attribution {
            account: last.account.clone(),
            amount: total,
            entry: Some(entry),
        }))
    }
}

/// Account, magnitude and entry semantic chosen for a posting
struct Attribution {
    account: String,
    amount: Money,
    entry: Option<EntryKind>,
}

fn magnitude(split: &LedgerSplit) -> Result<Money, String> {
    split
        .amount
        .checked_abs()
        .ok_or_else(|| format!("split amount for {} is out of range", split.account))
}
