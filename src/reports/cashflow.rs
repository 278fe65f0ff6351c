//! Cashflow Report
//!
//! Splits classified transactions into inflow and outflow buckets and
//! derives the summary totals from the bucket contents.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{CashflowError, CashflowResult};
use crate::models::{Money, Transaction};

/// Transactions sharing one direction, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Bucket {
    transactions: Vec<Transaction>,
}

impl Bucket {
    /// Build a bucket, sorting by date descending
    ///
    /// `sort_by` is stable, so same-date rows keep their input order.
    pub fn from_transactions(mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of member amounts, `None` if it overflows
    pub fn total(&self) -> Option<Money> {
        Money::checked_sum(self.transactions.iter().map(|t| t.amount))
    }
}

/// Summary totals for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CashflowSummary {
    pub total_inflows: Money,
    pub total_outflows: Money,
    /// Inflows minus outflows; may be negative
    pub net_flow: Money,
    pub transaction_count: usize,
}

impl CashflowSummary {
    fn from_buckets(inflows: &Bucket, outflows: &Bucket) -> CashflowResult<Self> {
        let overflow = |what: &str| CashflowError::AmountOverflow(what.to_string());

        let total_inflows = inflows.total().ok_or_else(|| overflow("total inflows"))?;
        let total_outflows = outflows.total().ok_or_else(|| overflow("total outflows"))?;
        let net_flow = total_inflows
            .checked_sub(total_outflows)
            .ok_or_else(|| overflow("net flow"))?;

        Ok(Self {
            total_inflows,
            total_outflows,
            net_flow,
            transaction_count: inflows.len() + outflows.len(),
        })
    }
}

/// Inclusive date range used to narrow a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportPeriod {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Check if a date falls inside the period
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }

    pub fn is_unbounded(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Cashflow Report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashflowReport {
    /// Local wall-clock time of generation, second precision
    pub generated_at: NaiveDateTime,
    pub summary: CashflowSummary,
    pub inflows: Bucket,
    pub outflows: Bucket,
}

impl CashflowReport {
    /// Aggregate classified transactions into a report
    ///
    /// Fails with `AmountOverflow` when a total does not fit in `Money`.
    pub fn generate(
        transactions: Vec<Transaction>,
        generated_at: NaiveDateTime,
    ) -> CashflowResult<Self> {
        let (inflows, outflows): (Vec<_>, Vec<_>) = transactions
            .into_iter()
            .partition(|t| t.direction.is_inflow());

        let inflows = Bucket::from_transactions(inflows);
        let outflows = Bucket::from_transactions(outflows);
        let summary = CashflowSummary::from_buckets(&inflows, &outflows)?;

        Ok(Self {
            generated_at,
            summary,
            inflows,
            outflows,
        })
    }

    /// Aggregate only the transactions dated inside `period`
    pub fn generate_for_period(
        transactions: Vec<Transaction>,
        period: ReportPeriod,
        generated_at: NaiveDateTime,
    ) -> CashflowResult<Self> {
        let in_period = transactions
            .into_iter()
            .filter(|t| period.contains(t.date))
            .collect();
        Self::generate(in_period, generated_at)
    }
}
