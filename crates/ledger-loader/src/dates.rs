use chrono::NaiveDate;

/// Parses an invoice issue date leniently.
///
/// Accepts `DD/MM/YYYY` (also with `-` or `.` separators and two-digit years),
/// ISO `YYYY-MM-DD`, and either form followed by a time of day, which is
/// ignored. Day-first wins whenever it names a real date; month-first is only
/// tried when it does not, so `05/03/2024` is the 5th of March and
/// `12/25/2024` is Christmas.
pub fn parse_issue_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split([' ', 'T']).next()?;

    let parts: Vec<&str> = date_part.split(['/', '-', '.']).collect();
    if parts.len() != 3 {
        return None;
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let first: u32 = parts[0].parse().ok()?;
    let second: u32 = parts[1].parse().ok()?;

    if parts[0].len() == 4 {
        let third: u32 = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(first as i32, second, third);
    }

    let year = expand_year(parts[2])?;
    NaiveDate::from_ymd_opt(year, second, first)
        .or_else(|| NaiveDate::from_ymd_opt(year, first, second))
}

/// Four-digit years pass through; two-digit years pivot like `strptime`'s `%y`
/// (00-68 → 2000s, 69-99 → 1900s).
fn expand_year(text: &str) -> Option<i32> {
    let value: i32 = text.parse().ok()?;
    match text.len() {
        4 => Some(value),
        2 if value <= 68 => Some(2000 + value),
        2 => Some(1900 + value),
        _ => None,
    }
}
