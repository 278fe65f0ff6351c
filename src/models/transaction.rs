//! Transaction model
//!
//! A classified, validated money movement: one row of a cashflow report.
//! Transfers stay a single row; their account label names both sides.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Prefix that marks an account label as a transfer
pub const TRANSFER_PREFIX: &str = "Transfer:";

/// Arrow rendered between the two sides of a transfer label
pub const TRANSFER_ARROW: &str = "→";

/// Which bucket a transaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inflow,
    Outflow,
}

impl Direction {
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Inflow)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inflow => write!(f, "Inflow"),
            Self::Outflow => write!(f, "Outflow"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inflow" | "in" => Ok(Self::Inflow),
            "outflow" | "out" => Ok(Self::Outflow),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}

/// A parsed account label
///
/// Plain labels are kept verbatim. Labels of the form
/// `Transfer: <Source> → <Destination>` are split into their two sides;
/// `->` is accepted in place of the arrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountLabel {
    Plain(String),
    Transfer { source: String, destination: String },
}

impl AccountLabel {
    /// Parse a raw account label
    pub fn parse(raw: &str) -> Result<Self, String> {
        let label = raw.trim();
        if label.is_empty() {
            return Err("account label is empty".to_string());
        }

        let Some(rest) = label.strip_prefix(TRANSFER_PREFIX) else {
            return Ok(Self::Plain(label.to_string()));
        };

        let (source, destination) = rest
            .split_once(TRANSFER_ARROW)
            .or_else(|| rest.split_once("->"))
            .ok_or_else(|| format!("transfer label '{}' has no source/destination arrow", label))?;

        let source = source.trim();
        let destination = destination.trim();
        if source.is_empty() || destination.is_empty() {
            return Err(format!(
                "transfer label '{}' is missing a source or destination",
                label
            ));
        }

        Ok(Self::Transfer {
            source: source.to_string(),
            destination: destination.to_string(),
        })
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer { .. })
    }
}

impl fmt::Display for AccountLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(name) => f.write_str(name),
            Self::Transfer {
                source,
                destination,
            } => write!(
                f,
                "{} {} {} {}",
                TRANSFER_PREFIX, source, TRANSFER_ARROW, destination
            ),
        }
    }
}

impl Serialize for AccountLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A classified transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Calendar date of the movement
    pub date: NaiveDate,

    /// Account label (possibly a transfer)
    pub account: AccountLabel,

    /// Non-negative magnitude
    pub amount: Money,

    /// Free-text description
    pub description: String,

    /// Resolved direction
    pub direction: Direction,
}

impl Transaction {
    pub fn is_transfer(&self) -> bool {
        self.account.is_transfer()
    }
}
