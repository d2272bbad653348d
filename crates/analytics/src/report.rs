use crate::change::percent_change;
use crate::periods::DateWindow;
use crate::ranking::RankedEntry;
use chrono::NaiveDate;
use core_types::Ledger;
use rust_decimal::Decimal;
use serde::Serialize;

/// A current-vs-comparison total over two date windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub current_window: DateWindow,
    pub comparison_window: DateWindow,
    pub current: Decimal,
    pub comparison: Decimal,
    /// `None` when both totals are zero.
    pub percent_change: Option<Decimal>,
}

impl Metric {
    /// Sums `ledger` over both windows and compares the totals.
    pub fn compare(
        label: &'static str,
        ledger: &Ledger,
        current_window: DateWindow,
        comparison_window: DateWindow,
    ) -> Self {
        let current = ledger.sum_where(|row| current_window.contains(row.issue_date));
        let comparison = ledger.sum_where(|row| comparison_window.contains(row.issue_date));

        Self {
            label,
            current_window,
            comparison_window,
            current,
            comparison,
            percent_change: percent_change(current, comparison),
        }
    }
}

/// Everything the dashboard shows for one reference date.
///
/// This struct is the output of the `AnalyticsEngine`; it holds raw decimals
/// and leaves display formatting to the presentation layer, except for the
/// ranked entries, which carry their formatted amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsReport {
    pub reference_date: NaiveDate,

    // I. Day level
    pub day_over_day: Metric,
    pub same_day_last_year: Metric,
    /// Against the day after last year's date, which tends to share today's weekday.
    pub day_after_last_year: Metric,

    // II. Month level
    pub month_over_month: Metric,
    pub year_over_year: Metric,

    // III. Rankings over the current month-to-date
    pub top_days: Vec<RankedEntry<NaiveDate>>,
    pub top_customers: Vec<RankedEntry<String>>,
}
