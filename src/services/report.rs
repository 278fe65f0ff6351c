//! Report service
//!
//! Runs the classify → filter → aggregate → render pipeline with explicit
//! settings. Each call is independent; the service holds no mutable state.

use chrono::{Local, NaiveDateTime, Timelike};
use tracing::{debug, info};

use crate::config::Settings;
use crate::display::MarkdownFormatter;
use crate::error::CashflowResult;
use crate::models::SourceRecord;
use crate::reports::{CashflowReport, Classifier, ReportPeriod};

/// Generates cashflow reports from source records
#[derive(Debug, Clone)]
pub struct ReportService {
    classifier: Classifier,
    formatter: MarkdownFormatter,
}

impl ReportService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            classifier: Classifier::new(settings.category_rules()),
            formatter: MarkdownFormatter::new(settings.format_options()),
        }
    }

    /// Build a report stamped with the current local time
    pub fn generate(
        &self,
        records: &[SourceRecord],
        period: ReportPeriod,
    ) -> CashflowResult<CashflowReport> {
        self.generate_at(records, period, local_now())
    }

    /// Build a report with a caller-supplied generation timestamp
    ///
    /// Every record is validated, including those outside `period`; one
    /// malformed record fails the whole call.
    pub fn generate_at(
        &self,
        records: &[SourceRecord],
        period: ReportPeriod,
        generated_at: NaiveDateTime,
    ) -> CashflowResult<CashflowReport> {
        let transactions = self.classifier.classify_all(records)?;
        if !period.is_unbounded() {
            debug!(start = ?period.start_date, end = ?period.end_date, "restricting report period");
        }
        let report = CashflowReport::generate_for_period(transactions, period, generated_at)?;

        info!(
            records = records.len(),
            inflows = report.inflows.len(),
            outflows = report.outflows.len(),
            net_flow = %report.summary.net_flow,
            "generated cashflow report"
        );
        Ok(report)
    }

    /// Render a report as Markdown
    pub fn render(&self, report: &CashflowReport) -> String {
        self.formatter.render(report)
    }

    /// Generate and render in one step
    pub fn generate_markdown(
        &self,
        records: &[SourceRecord],
        period: ReportPeriod,
    ) -> CashflowResult<String> {
        let report = self.generate(records, period)?;
        Ok(self.render(&report))
    }
}

/// Local wall-clock time truncated to whole seconds
pub fn local_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, EntryKind, Money, UNKNOWN_TRANSFER};
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn records() -> Vec<SourceRecord> {
        vec![
            SourceRecord::new(date(31), "Salary", Money::from_cents(250_000), "Pay")
                .with_entry(EntryKind::Credit),
            SourceRecord::new(date(3), "Rent", Money::from_cents(80_000), "Flat")
                .with_entry(EntryKind::Debit),
            SourceRecord::new(date(20), UNKNOWN_TRANSFER, Money::zero(), "")
                .with_category(UNKNOWN_TRANSFER),
        ]
    }

    #[test]
    fn test_generate_at_uses_settings_rules() {
        let service = ReportService::new(&Settings::default());
        let stamp = date(31).and_hms_opt(23, 59, 59).unwrap();
        let report = service
            .generate_at(&records(), ReportPeriod::default(), stamp)
            .unwrap();

        assert_eq!(report.generated_at, stamp);
        assert_eq!(report.summary.total_inflows, Money::from_cents(250_000));
        assert_eq!(report.summary.total_outflows, Money::from_cents(80_000));
        assert_eq!(report.summary.transaction_count, 3);
        assert_eq!(report.outflows.transactions()[0].account.to_string(), UNKNOWN_TRANSFER);
        assert_eq!(report.outflows.transactions()[0].direction, Direction::Outflow);
    }

    #[test]
    fn test_malformed_record_outside_period_still_fails() {
        let service = ReportService::new(&Settings::default());
        let mut input = records();
        input.push(SourceRecord {
            date: Some(date(1)),
            account: Some("Rent".into()),
            amount: None,
            ..SourceRecord::default()
        });
        let period = ReportPeriod::new(Some(date(15)), None);
        let err = service.generate(&input, period).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_local_now_has_second_precision() {
        assert_eq!(local_now().nanosecond(), 0);
    }

    #[test]
    fn test_generate_markdown() {
        let service = ReportService::new(&Settings::default());
        let doc = service
            .generate_markdown(&records(), ReportPeriod::default())
            .unwrap();
        assert!(doc.starts_with("# Cashflow Report\n\nGenerated on: "));
        assert!(doc.contains("- **Net Flow**: $1,700.00"));
    }
}
