//! Resolution of a date/time field's native input kind and bounds.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use cms_fields_domain::{BoundValue, DateTimeField, DateTimeInputType, DateTimeKind};
use std::borrow::Cow;

/// Far-future maximum for date inputs; keeps six-digit years out.
pub const DEFAULT_MAX_DATE: &str = "9999-12-31";

/// Far-future maximum for date-and-time inputs.
pub const DEFAULT_MAX_DATE_TIME: &str = "9999-12-31T23:59";

/// Effective configuration of a date/time field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeConfig {
    /// Native input kind.
    pub input_type: DateTimeInputType,
    /// Minimum in native shape; dropped when it does not parse.
    pub min: Option<String>,
    /// Maximum in native shape, defaulted for date and date-time kinds.
    /// A configured maximum that does not parse falls back to the default.
    pub max: Option<String>,
    /// Whether values are picked and compared in UTC.
    pub utc: bool,
}

/// Resolve the native input kind and normalized bounds of `field`.
///
/// The legacy `time_format: false` switch means date only and
/// `date_format: false` means time only; an explicit `type` wins.
#[must_use]
pub fn parse_date_time_config(field: &DateTimeField) -> DateTimeConfig {
    let input_type = resolve_input_type(field);

    let min = normalize_bound(field.min.as_ref(), input_type);
    let max = normalize_bound(field.max.as_ref(), input_type).or_else(|| match input_type {
        DateTimeInputType::Date => Some(DEFAULT_MAX_DATE.to_owned()),
        DateTimeInputType::DateTimeLocal => Some(DEFAULT_MAX_DATE_TIME.to_owned()),
        DateTimeInputType::Time => None,
    });

    DateTimeConfig {
        input_type,
        min,
        max,
        utc: field.picker_utc,
    }
}

fn resolve_input_type(field: &DateTimeField) -> DateTimeInputType {
    match field.kind {
        Some(DateTimeKind::Date) => DateTimeInputType::Date,
        Some(DateTimeKind::Time) => DateTimeInputType::Time,
        Some(DateTimeKind::DateTime) => DateTimeInputType::DateTimeLocal,
        None => {
            let date_disabled = field
                .date_format
                .as_ref()
                .is_some_and(|setting| setting.is_disabled());
            let time_disabled = field
                .time_format
                .as_ref()
                .is_some_and(|setting| setting.is_disabled());

            if time_disabled {
                DateTimeInputType::Date
            } else if date_disabled {
                DateTimeInputType::Time
            } else {
                DateTimeInputType::DateTimeLocal
            }
        },
    }
}

/// Character width of the native value shape for four-digit years.
#[must_use]
pub const fn native_width(input_type: DateTimeInputType) -> usize {
    match input_type {
        DateTimeInputType::Date => 10,
        DateTimeInputType::Time => 5,
        DateTimeInputType::DateTimeLocal => 16,
    }
}

/// `chrono` pattern of the native value shape.
#[must_use]
pub const fn native_pattern(input_type: DateTimeInputType) -> &'static str {
    match input_type {
        DateTimeInputType::Date => "%Y-%m-%d",
        DateTimeInputType::Time => "%H:%M",
        DateTimeInputType::DateTimeLocal => "%Y-%m-%dT%H:%M",
    }
}

/// Render a wall-clock value in native shape. Years past 9999 are written
/// unsigned, as a native control does.
#[must_use]
pub fn render_native(value: NaiveDateTime, input_type: DateTimeInputType) -> String {
    let rendered = value.format(native_pattern(input_type)).to_string();
    match rendered.strip_prefix('+') {
        Some(unsigned) => unsigned.to_owned(),
        None => rendered,
    }
}

/// Parse text that is exactly in native shape (`2023-06-15`, `08:30`,
/// `2023-06-15T08:30`). Time values land on [`NaiveDate::MIN`].
///
/// Loose spellings such as `2023-6-1` are rejected.
#[must_use]
pub fn parse_native(text: &str, input_type: DateTimeInputType) -> Option<NaiveDateTime> {
    let signed = with_year_sign(text);
    let pattern = native_pattern(input_type);
    let parsed = match input_type {
        DateTimeInputType::Date => NaiveDate::parse_from_str(&signed, pattern)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0)),
        DateTimeInputType::Time => NaiveTime::parse_from_str(text, pattern)
            .ok()
            .map(|time| NaiveDate::MIN.and_time(time)),
        DateTimeInputType::DateTimeLocal => NaiveDateTime::parse_from_str(&signed, pattern).ok(),
    }?;
    (render_native(parsed, input_type) == text).then_some(parsed)
}

/// `chrono` only reads years past 9999 with an explicit `+`.
pub(super) fn with_year_sign(text: &str) -> Cow<'_, str> {
    if leading_digits(text) > 4 {
        Cow::Owned(format!("+{text}"))
    } else {
        Cow::Borrowed(text)
    }
}

fn leading_digits(text: &str) -> usize {
    text.bytes().take_while(u8::is_ascii_digit).count()
}

fn normalize_bound(bound: Option<&BoundValue>, input_type: DateTimeInputType) -> Option<String> {
    let text = bound.and_then(BoundValue::as_text)?.trim();
    let width = match input_type {
        DateTimeInputType::Time => native_width(input_type),
        DateTimeInputType::Date | DateTimeInputType::DateTimeLocal => {
            native_width(input_type) + leading_digits(text).saturating_sub(4)
        },
    };
    let native: String = text.chars().take(width).collect();
    parse_native(&native, input_type).map(|_| native)
}
