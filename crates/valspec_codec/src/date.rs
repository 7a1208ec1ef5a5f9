//! Date and date-time recognition.
//!
//! Date fields keep their text; this module only decides whether a token
//! names a point in time. Calendar dates and date-times are interchangeable
//! here: a date-time is a valid `Date` and a bare date is a valid
//! `DateTime`. A `DateTime` token may also carry a leading `%` marker.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Marker prefix accepted on date-time tokens.
pub const DATE_TIME_MARKER: char = '%';

/// Parses a date or date-time, ignoring surrounding whitespace.
///
/// Bare dates resolve to midnight. Date-times with an offset resolve to UTC.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    parse_calendar_date(text)
        .map(|date| date.and_time(NaiveTime::MIN))
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .or_else(|_| DateTime::parse_from_rfc2822(text))
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Returns true if `text` is acceptable in a `Date` or `StrictDate` field.
#[must_use]
pub fn is_date(text: &str) -> bool {
    parse_date(text).is_some()
}

/// Parses a calendar date without a time part, ignoring surrounding
/// whitespace.
#[must_use]
pub fn parse_strict_date(text: &str) -> Option<NaiveDate> {
    parse_calendar_date(text.trim())
}

/// Returns true if `text` is a calendar date without a time part.
#[must_use]
pub fn is_strict_date(text: &str) -> bool {
    parse_strict_date(text).is_some()
}

/// Returns true if `text` is acceptable in a `DateTime` field.
#[must_use]
pub fn is_date_time(text: &str) -> bool {
    let text = text.trim();
    is_date(text)
        || text
            .strip_prefix(DATE_TIME_MARKER)
            .is_some_and(is_date)
}

fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| parse_partial_date(text))
}

/// `2024` and `2024-03` name the first day of the year or month.
fn parse_partial_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('-');
    let year = parts.next().filter(|y| y.len() == 4)?;
    let month = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(year) || month.is_some_and(|m| m.len() != 2 || !all_digits(m)) {
        return None;
    }

    let year = year.parse().ok()?;
    let month = month.map_or(Some(1), |m| m.parse().ok())?;
    NaiveDate::from_ymd_opt(year, month, 1)
}
