//! CSV Export functionality
//!
//! Writes a cashflow report as one row per transaction followed by a
//! summary block.

use std::io::Write;

use crate::error::{CashflowError, CashflowResult};
use crate::models::Transaction;
use crate::reports::CashflowReport;

const HEADER: [&str; 5] = ["Type", "Date", "Account", "Amount", "Description"];

/// Export a report to CSV
pub fn export_cashflow_csv<W: Write>(report: &CashflowReport, writer: W) -> CashflowResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    csv_writer.write_record(HEADER).map_err(export_err)?;

    for txn in report.inflows.iter().chain(report.outflows.iter()) {
        csv_writer.write_record(transaction_row(txn)).map_err(export_err)?;
    }

    let summary = &report.summary;
    csv_writer.write_record([""; 5]).map_err(export_err)?;
    csv_writer
        .write_record(["Summary", "", "", "", ""])
        .map_err(export_err)?;
    for (label, value) in [
        ("Total Inflows", summary.total_inflows.to_decimal_string()),
        ("Total Outflows", summary.total_outflows.to_decimal_string()),
        ("Net Flow", summary.net_flow.to_decimal_string()),
        ("Transaction Count", summary.transaction_count.to_string()),
    ] {
        csv_writer
            .write_record([label, "", "", value.as_str(), ""])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| CashflowError::Export(e.to_string()))?;
    Ok(())
}

fn transaction_row(txn: &Transaction) -> [String; 5] {
    [
        txn.direction.to_string(),
        txn.date.format("%Y-%m-%d").to_string(),
        txn.account.to_string(),
        txn.amount.to_decimal_string(),
        txn.description.clone(),
    ]
}

fn export_err(err: csv::Error) -> CashflowError {
    CashflowError::Export(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountLabel, Direction, Money};
    use chrono::NaiveDate;

    fn txn(day: u32, account: &str, cents: i64, desc: &str, direction: Direction) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            account: AccountLabel::Plain(account.into()),
            amount: Money::from_cents(cents),
            description: desc.into(),
            direction,
        }
    }

    #[test]
    fn test_export_cashflow_csv() {
        let report = CashflowReport::generate(
            vec![
                txn(2, "Rent", 80_000, "January, rent", Direction::Outflow),
                txn(1, "Salary", 250_000, "Pay", Direction::Inflow),
            ],
            NaiveDate::from_ymd_opt(2025, 2, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
        .unwrap();

        let mut buffer = Vec::new();
        export_cashflow_csv(&report, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let expected = "\
Type,Date,Account,Amount,Description
Inflow,2025-01-01,Salary,2500.00,Pay
Outflow,2025-01-02,Rent,800.00,\"January, rent\"
,,,,
Summary,,,,
Total Inflows,,,2500.00,
Total Outflows,,,800.00,
Net Flow,,,1700.00,
Transaction Count,,,2,
";
        assert_eq!(output, expected);
    }
}
