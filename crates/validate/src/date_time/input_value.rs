//! Conversion of stored date/time values into native input shape.

use super::config::{DateTimeConfig, parse_date_time_config, render_native, with_year_sign};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use cms_fields_domain::{DateTimeField, DateTimeInputType};

const DATE_IN: &str = "%Y-%m-%d";

const AWARE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const NAIVE_TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// A Day.js format string translated for `chrono`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronoFormat {
    /// `strftime`-style pattern.
    pub pattern: String,
    /// Contains a UTC offset token.
    pub has_offset: bool,
}

/// Translate Day.js tokens (`YYYY-MM-DD HH:mm`, `[at]` literals, ...) to `chrono`.
#[must_use]
pub fn translate_day_js_format(format: &str) -> ChronoFormat {
    const TOKENS: [(&str, &str); 23] = [
        ("YYYY", "%Y"),
        ("MMMM", "%B"),
        ("dddd", "%A"),
        ("SSS", "%3f"),
        ("MMM", "%b"),
        ("ddd", "%a"),
        ("YY", "%y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("hh", "%I"),
        ("mm", "%M"),
        ("ss", "%S"),
        ("ZZ", "%z"),
        ("M", "%m"),
        ("D", "%d"),
        ("H", "%H"),
        ("h", "%I"),
        ("m", "%M"),
        ("s", "%S"),
        ("A", "%p"),
        ("a", "%p"),
        ("Z", "%:z"),
    ];

    let mut pattern = String::with_capacity(format.len() * 2);
    let mut has_offset = false;
    let mut rest = format;

    'outer: while let Some(first) = rest.chars().next() {
        if first == '[' {
            let literal_end = rest.find(']').unwrap_or(rest.len());
            let literal = rest.get(1..literal_end).unwrap_or_default();
            push_literal(&mut pattern, literal);
            rest = rest.get(literal_end + 1..).unwrap_or_default();
            continue;
        }

        for (token, replacement) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                has_offset |= token.starts_with('Z');
                pattern.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }

        push_literal(&mut pattern, &first.to_string());
        rest = rest.get(first.len_utf8()..).unwrap_or_default();
    }

    ChronoFormat {
        pattern,
        has_offset,
    }
}

fn push_literal(pattern: &mut String, literal: &str) {
    for c in literal.chars() {
        if c == '%' {
            pattern.push_str("%%");
        } else {
            pattern.push(c);
        }
    }
}

/// Convert a stored value into the native shape of the field's input kind.
///
/// Custom `format` values are parsed with that format, ISO values may carry
/// seconds, milliseconds, or an offset. Instants are shown in UTC when the
/// picker works in UTC and in the host zone otherwise. Returns `None` when the
/// value cannot be read.
#[must_use]
pub fn get_input_value(value: &str, field: &DateTimeField) -> Option<String> {
    let config = parse_date_time_config(field);
    input_wall_clock(value, field, &config)
        .map(|wall_clock| render_native(wall_clock, config.input_type))
}

/// Wall-clock reading of a stored value, cut to the precision of the input kind.
pub(super) fn input_wall_clock(
    value: &str,
    field: &DateTimeField,
    config: &DateTimeConfig,
) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let stamp = match field.format.as_deref().filter(|format| !format.is_empty()) {
        Some(format) => parse_custom(value, &translate_day_js_format(format), config.input_type),
        None => parse_iso(value, config.input_type),
    }?;
    native_precision(stamp.wall_clock(config.utc), config.input_type)
}

fn native_precision(value: NaiveDateTime, input_type: DateTimeInputType) -> Option<NaiveDateTime> {
    match input_type {
        DateTimeInputType::Date => value.date().and_hms_opt(0, 0, 0),
        DateTimeInputType::Time => NaiveTime::from_hms_opt(value.hour(), value.minute(), 0)
            .map(|time| NaiveDate::MIN.and_time(time)),
        DateTimeInputType::DateTimeLocal => value.date().and_hms_opt(value.hour(), value.minute(), 0),
    }
}

/// A parsed stored value: wall-clock or an instant with a known offset.
enum Stamp {
    Naive(NaiveDateTime),
    Instant(DateTime<FixedOffset>),
}

impl Stamp {
    fn wall_clock(&self, utc: bool) -> NaiveDateTime {
        match self {
            Self::Naive(naive) => *naive,
            Self::Instant(instant) if utc => instant.naive_utc(),
            Self::Instant(instant) => instant.with_timezone(&Local).naive_local(),
        }
    }
}

fn parse_custom(value: &str, format: &ChronoFormat, input_type: DateTimeInputType) -> Option<Stamp> {
    let pattern = format.pattern.as_str();
    if format.has_offset {
        return DateTime::parse_from_str(value, pattern).ok().map(Stamp::Instant);
    }

    match input_type {
        DateTimeInputType::Date => NaiveDate::parse_from_str(value, pattern)
            .ok()
            .and_then(start_of_day)
            .map(Stamp::Naive),
        DateTimeInputType::Time => NaiveTime::parse_from_str(value, pattern)
            .ok()
            .map(|time| Stamp::Naive(NaiveDate::MIN.and_time(time))),
        DateTimeInputType::DateTimeLocal => NaiveDateTime::parse_from_str(value, pattern)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(value, pattern)
                    .ok()
                    .and_then(start_of_day)
            })
            .map(Stamp::Naive),
    }
}

fn start_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

fn parse_iso(value: &str, input_type: DateTimeInputType) -> Option<Stamp> {
    let signed = with_year_sign(value);
    let value = signed.as_ref();
    let with_offset = value
        .strip_suffix(|c: char| c == 'Z' || c == 'z')
        .map_or_else(|| value.to_owned(), |head| format!("{head}+00:00"));
    if let Some(instant) = AWARE_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&with_offset, format).ok())
    {
        return Some(Stamp::Instant(instant));
    }

    let naive_date_time = || {
        NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    };
    let naive_date = || NaiveDate::parse_from_str(value, DATE_IN).ok();

    let naive = match input_type {
        DateTimeInputType::Date => {
            naive_date().and_then(start_of_day).or_else(naive_date_time)
        },
        DateTimeInputType::Time => NAIVE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
            .map(|time| NaiveDate::MIN.and_time(time))
            .or_else(naive_date_time),
        DateTimeInputType::DateTimeLocal => {
            naive_date_time().or_else(|| naive_date().and_then(start_of_day))
        },
    };

    naive.map(Stamp::Naive)
}
