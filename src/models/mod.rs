//! Core data models for the cashflow report engine
//!
//! Raw source records, ledger postings, classified transactions and the
//! money type they all share.

pub mod ledger;
pub mod money;
pub mod record;
pub mod transaction;

pub use ledger::{AccountKind, LedgerEntry, LedgerSplit, UNKNOWN_TRANSFER};
pub use money::{Money, MoneyParseError};
pub use record::{EntryKind, SourceRecord};
pub use transaction::{AccountLabel, Direction, Transaction};
