//! Human-readable rendering of date/time values.

use chrono::NaiveTime;
use cms_fields_domain::DateTimeInputType;

/// Render `HH:mm[:ss[.SSS]]` on a 12-hour clock, e.g. `14:30` → `02:30 PM`.
///
/// Values are read as UTC wall-clock time. Input that is not a time is
/// returned unchanged.
#[must_use]
pub fn format_time(value: &str) -> String {
    let trimmed = value.trim();
    ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .map_or_else(|| value.to_owned(), |time| time.format("%I:%M %p").to_string())
}

/// Render an ISO-shaped value for display.
///
/// Dates are returned as-is, times go through [`format_time`], and
/// date-times become `"<date>, <12-hour time>"`. A date-time without a `T`
/// separator is returned unchanged.
#[must_use]
pub fn get_formatted_date_time(input_type: DateTimeInputType, value: &str) -> String {
    match input_type {
        DateTimeInputType::Date => value.to_owned(),
        DateTimeInputType::Time => format_time(value),
        DateTimeInputType::DateTimeLocal => match value.split_once('T') {
            Some((date, time)) => format!("{date}, {}", format_time(time)),
            None => value.to_owned(),
        },
    }
}
