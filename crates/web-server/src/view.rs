//! The flat, display-ready record handed to renderers.

use analytics::{AnalyticsReport, DateWindow, Metric, RankedEntry};
use chrono::NaiveDate;
use core_types::{format_brl, format_display_date, format_display_range, format_iso_date};
use ledger_loader::LoaderError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Shown instead of the underlying error when the sheet could not be read.
pub const SOURCE_UNAVAILABLE_MESSAGE: &str =
    "Could not load the sales sheet right now. Please try again shortly.";

/// What a dashboard request produces: the full view, or an error bundle that
/// still echoes the reference date so the caller can retry with context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardPayload {
    Ok(DashboardView),
    Error(ErrorBundle),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBundle {
    pub error: String,
    /// `YYYY-MM-DD`
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// `YYYY-MM-DD`, suitable for a date input.
    pub reference: String,
    pub today: String,
    pub yesterday: String,
    pub last_year_day: String,
    pub last_year_next_day: String,
    pub month_start: String,

    pub day_over_day: MetricView,
    pub same_day_last_year: MetricView,
    pub day_after_last_year: MetricView,
    pub month_over_month: MetricView,
    pub year_over_year: MetricView,

    pub top_days: Vec<RankedRow>,
    pub top_customers: Vec<RankedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricView {
    pub current_period: String,
    pub comparison_period: String,
    pub current: String,
    pub comparison: String,
    /// Rounded to one decimal; `None` when both totals are zero.
    pub percent_change: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    pub label: String,
    pub amount: String,
}

impl DashboardPayload {
    /// The error bundle for a ledger that failed to load.
    ///
    /// Schema errors are shown verbatim; they name the missing column and the
    /// columns present, which is what the sheet owner needs to fix it.
    pub fn load_failure(err: &LoaderError, reference_date: NaiveDate) -> Self {
        let error = if err.is_schema_error() {
            err.to_string()
        } else {
            SOURCE_UNAVAILABLE_MESSAGE.to_string()
        };
        DashboardPayload::Error(ErrorBundle {
            error,
            reference: format_iso_date(reference_date),
        })
    }

    pub fn reference(&self) -> &str {
        match self {
            DashboardPayload::Ok(view) => &view.reference,
            DashboardPayload::Error(bundle) => &bundle.reference,
        }
    }
}

impl DashboardView {
    pub fn from_report(report: &AnalyticsReport) -> Self {
        Self {
            reference: format_iso_date(report.reference_date),
            today: format_display_date(report.day_over_day.current_window.start),
            yesterday: format_display_date(report.day_over_day.comparison_window.start),
            last_year_day: format_display_date(report.same_day_last_year.comparison_window.start),
            last_year_next_day: format_display_date(
                report.day_after_last_year.comparison_window.start,
            ),
            month_start: format_display_date(report.month_over_month.current_window.start),
            day_over_day: MetricView::from(&report.day_over_day),
            same_day_last_year: MetricView::from(&report.same_day_last_year),
            day_after_last_year: MetricView::from(&report.day_after_last_year),
            month_over_month: MetricView::from(&report.month_over_month),
            year_over_year: MetricView::from(&report.year_over_year),
            top_days: report
                .top_days
                .iter()
                .map(|entry| RankedRow::from_entry(entry, |d| format_display_date(*d)))
                .collect(),
            top_customers: report
                .top_customers
                .iter()
                .map(|entry| RankedRow::from_entry(entry, String::clone))
                .collect(),
        }
    }
}

impl From<&Metric> for MetricView {
    fn from(metric: &Metric) -> Self {
        Self {
            current_period: format_window(&metric.current_window),
            comparison_period: format_window(&metric.comparison_window),
            current: format_brl(metric.current),
            comparison: format_brl(metric.comparison),
            percent_change: metric.percent_change.and_then(percent_to_f64),
        }
    }
}

impl RankedRow {
    fn from_entry<K>(entry: &RankedEntry<K>, label: impl Fn(&K) -> String) -> Self {
        Self {
            label: label(&entry.key),
            amount: entry.formatted.clone(),
        }
    }
}

fn format_window(window: &DateWindow) -> String {
    format_display_range(window.start, window.end)
}

fn percent_to_f64(value: Decimal) -> Option<f64> {
    value.round_dp(1).to_f64()
}

/// `+12,3%` / `-4,0%` / `n/a`, with the same decimal comma as the money format.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{pct:+.1}%").replace('.', ","),
        None => "n/a".to_string(),
    }
}
