//! Fields computed from free-text spreadsheet cells.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Age in whole years on `today` for a `"<day> <Mon> <year>"` birth date.
///
/// Returns `None` for anything that is not exactly three tokens with a known
/// month abbreviation and a real calendar date.
pub fn compute_age(dob: &str, today: NaiveDate) -> Option<i32> {
    let birth = parse_birth_date(dob)?;

    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    Some(age)
}

fn parse_birth_date(dob: &str) -> Option<NaiveDate> {
    // Runs of spaces count as one separator, so "1  Jan 1990" still parses.
    let parts: Vec<&str> = dob.split_whitespace().collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day = u32::try_from(parse_leading_int(day)?).ok()?;
    let month = month.to_lowercase();
    let month = MONTHS.iter().position(|name| *name == month)? as u32 + 1;
    let year = i32::try_from(parse_leading_int(year)?).ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Largest integer appearing in a salary text such as `"$800-$1000"`, or 0.
pub fn extract_salary_ceiling(text: &str) -> u64 {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u64>().unwrap_or(u64::MAX))
        .max()
        .unwrap_or(0)
}

/// Integer prefix of a cell after trimming: optional sign followed by digits.
/// `"155.5"` reads as 155; text without a leading number reads as `None`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
