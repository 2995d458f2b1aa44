//! Date helpers shared by prompts, fallbacks and the history base.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Parses an ISO-8601 date as sent by the browser.
///
/// Accepts RFC 3339 datetimes (the calendar date as written, offset ignored),
/// naive datetimes and plain `YYYY-MM-DD` dates.
pub fn parse_request_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Full English month name, e.g. "July".
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// "1st", "2nd", "3rd", "4th" … with the 11th–13th exception.
pub fn day_ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

/// "July 20th"
pub fn long_date(date: NaiveDate) -> String {
    format!("{} {}", month_name(date), day_ordinal(date.day()))
}
