//! Calendar windows for the period comparisons.
//!
//! Month arithmetic only ever produces the first day of a month, so there is
//! no "Jan 31 minus one month" case to get wrong. Window ends are reached by
//! adding whole days to a month start.

use crate::error::AnalyticsError;
use chrono::{Datelike, Days, Duration, NaiveDate};
use serde::Serialize;

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `[first of reference's month, reference]`.
    pub fn month_to_date(reference: NaiveDate) -> Self {
        Self::new(month_start(reference), reference)
    }

    /// The same number of days from the start of the previous month.
    ///
    /// The window keeps the ordinal span of the current month-to-date, so for a
    /// reference on the 31st after a 28-day February it runs into early March.
    pub fn prior_month_to_date(reference: NaiveDate) -> Result<Self, AnalyticsError> {
        let start = shift_month_start(reference, -1)?;
        Self::spanning_like(start, reference)
    }

    /// The same number of days from the start of this month one year earlier.
    pub fn last_year_month_to_date(reference: NaiveDate) -> Result<Self, AnalyticsError> {
        let start = shift_month_start(reference, -12)?;
        Self::spanning_like(start, reference)
    }

    /// A window from `start` covering as many days as `[month_start(reference), reference]`.
    fn spanning_like(start: NaiveDate, reference: NaiveDate) -> Result<Self, AnalyticsError> {
        let end = start
            .checked_add_days(Days::new(u64::from(reference.day0())))
            .ok_or_else(|| {
                AnalyticsError::DateOutOfRange(format!(
                    "{} + {} days",
                    start,
                    reference.day0()
                ))
            })?;
        Ok(Self::new(start, end))
    }
}

/// The first day of `date`'s month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// The first day of the month `months` away from `date`'s month.
///
/// Works on year and month only, rolling the year over in either direction.
pub fn shift_month_start(date: NaiveDate, months: i32) -> Result<NaiveDate, AnalyticsError> {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        AnalyticsError::DateOutOfRange(format!("{date} shifted by {months} months"))
    })
}

/// The same calendar day one year earlier; Feb 29 falls back to Feb 28.
pub fn same_day_last_year(date: NaiveDate) -> Result<NaiveDate, AnalyticsError> {
    let year = date.year() - 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
        .ok_or_else(|| AnalyticsError::DateOutOfRange(format!("{date} minus one year")))
}
