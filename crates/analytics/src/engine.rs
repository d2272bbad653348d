use crate::error::AnalyticsError;
use crate::periods::{same_day_last_year, DateWindow};
use crate::ranking::{top_customers, top_days};
use crate::report::{AnalyticsReport, Metric};
use chrono::NaiveDate;
use configuration::AnalyticsSettings;
use core_types::Ledger;

/// A stateless calculator for the dashboard's period comparisons.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    top_n: usize,
    generic_customer_marker: String,
}

impl AnalyticsEngine {
    pub fn new(settings: &AnalyticsSettings) -> Self {
        Self {
            top_n: settings.top_n,
            generic_customer_marker: settings.generic_customer_marker.clone(),
        }
    }

    /// The main entry point for calculating the dashboard metrics.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The normalised sales ledger.
    /// * `reference_date` - The day playing the role of "today".
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AnalyticsReport`, or `AnalyticsError` when the
    /// reference date sits at the edge of the representable calendar.
    pub fn analyze(
        &self,
        ledger: &Ledger,
        reference_date: NaiveDate,
    ) -> Result<AnalyticsReport, AnalyticsError> {
        let today = DateWindow::single(reference_date);

        // --- Day level ---
        let yesterday = reference_date.pred_opt().ok_or_else(|| {
            AnalyticsError::DateOutOfRange(format!("day before {reference_date}"))
        })?;
        let last_year_day = same_day_last_year(reference_date)?;
        let last_year_next_day = last_year_day.succ_opt().ok_or_else(|| {
            AnalyticsError::DateOutOfRange(format!("day after {last_year_day}"))
        })?;

        // --- Month level ---
        let month_to_date = DateWindow::month_to_date(reference_date);
        let prior_month = DateWindow::prior_month_to_date(reference_date)?;
        let last_year_month = DateWindow::last_year_month_to_date(reference_date)?;

        let report = AnalyticsReport {
            reference_date,
            day_over_day: Metric::compare(
                "day_over_day",
                ledger,
                today,
                DateWindow::single(yesterday),
            ),
            same_day_last_year: Metric::compare(
                "same_day_last_year",
                ledger,
                today,
                DateWindow::single(last_year_day),
            ),
            day_after_last_year: Metric::compare(
                "day_after_last_year",
                ledger,
                today,
                DateWindow::single(last_year_next_day),
            ),
            month_over_month: Metric::compare("month_over_month", ledger, month_to_date, prior_month),
            year_over_year: Metric::compare("year_over_year", ledger, month_to_date, last_year_month),
            top_days: top_days(ledger, month_to_date, self.top_n),
            top_customers: top_customers(
                ledger,
                month_to_date,
                self.top_n,
                &self.generic_customer_marker,
            ),
        };

        tracing::debug!(
            reference_date = %reference_date,
            rows = ledger.len(),
            month_total = %report.month_over_month.current,
            "Computed dashboard analytics."
        );

        Ok(report)
    }
}
