use crate::error::CoreError;
use chrono::NaiveDate;

/// The only accepted shape for a caller-supplied reference date.
pub const REFERENCE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-first format used wherever a date is shown to a person.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a reference date in strict `YYYY-MM-DD` form.
///
/// Surrounding whitespace is ignored; anything else that does not parse is a
/// `CoreError::InvalidReferenceDate` carrying the offending input.
pub fn parse_reference_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), REFERENCE_DATE_FORMAT).map_err(|e| {
        CoreError::InvalidReferenceDate {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(REFERENCE_DATE_FORMAT).to_string()
}

/// `DD/MM/YYYY - DD/MM/YYYY`, collapsed to a single date when both ends match.
pub fn format_display_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        format_display_date(start)
    } else {
        format!("{} - {}", format_display_date(start), format_display_date(end))
    }
}
