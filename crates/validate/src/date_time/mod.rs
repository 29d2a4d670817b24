//! Date/time field validation.
//!
//! Bounds and values are compared as parsed wall-clock readings at the
//! precision of the native input, so years past 9999 still order correctly.

mod config;
mod format;
mod input_value;

pub use config::{
    DEFAULT_MAX_DATE, DEFAULT_MAX_DATE_TIME, DateTimeConfig, parse_date_time_config, parse_native,
};
pub use format::{format_time, get_formatted_date_time};
pub use input_value::{ChronoFormat, get_input_value, translate_day_js_format};

use crate::constraint::range_violation;
use input_value::input_wall_clock;
use cms_fields_domain::{DateTimeField, DateTimeFieldDetail, DateTimeValidity};
use serde::Serialize;

/// Result of [`validate_date_time_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateTimeFieldValidation {
    /// Violated constraints.
    pub validity: DateTimeValidity,
    /// Configured bounds.
    pub detail: DateTimeFieldDetail,
}

/// Validate a stored date/time value against the field's bounds.
///
/// Empty values and values that cannot be converted are never out of range.
#[must_use]
pub fn validate_date_time_field(field: &DateTimeField, value: Option<&str>) -> DateTimeFieldValidation {
    let config = parse_date_time_config(field);
    let min = config
        .min
        .as_deref()
        .and_then(|min| parse_native(min, config.input_type));
    let max = config
        .max
        .as_deref()
        .and_then(|max| parse_native(max, config.input_type));
    let has_min = min.is_some();
    let has_max = max.is_some();

    let (range_underflow, range_overflow) = value
        .filter(|value| !value.is_empty() && (has_min || has_max))
        .and_then(|value| input_wall_clock(value, field, &config))
        .map_or((false, false), |input| {
            range_violation(&input, min.as_ref(), max.as_ref())
        });

    DateTimeFieldValidation {
        validity: DateTimeValidity {
            range_underflow,
            range_overflow,
        },
        detail: DateTimeFieldDetail {
            has_min,
            has_max,
            invalid: range_underflow || range_overflow,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_fields_domain::{BoundValue, DateTimeKind, FieldBase, FieldName, RequiredSetting};

    fn field(
        kind: Option<DateTimeKind>,
        min: Option<&str>,
        max: Option<&str>,
    ) -> Result<DateTimeField, Box<dyn std::error::Error>> {
        Ok(DateTimeField {
            base: FieldBase {
                name: FieldName::parse("when")?,
                label: None,
                required: RequiredSetting::default(),
            },
            kind,
            date_format: None,
            time_format: None,
            format: None,
            picker_utc: true,
            min: min.map(|min| BoundValue::Text(min.to_owned())),
            max: max.map(|max| BoundValue::Text(max.to_owned())),
        })
    }

    #[test]
    fn time_without_bounds_is_always_valid() -> Result<(), Box<dyn std::error::Error>> {
        let field = field(Some(DateTimeKind::Time), None, None)?;
        for value in [Some("12:30"), Some(""), None] {
            let result = validate_date_time_field(&field, value);
            assert_eq!(result.validity, DateTimeValidity::default());
            assert!(!result.detail.has_min && !result.detail.has_max);
        }
        Ok(())
    }

    #[test]
    fn utc_instants_respect_inclusive_bounds() -> Result<(), Box<dyn std::error::Error>> {
        let at_min = field(None, Some("2023-06-15T10:30"), Some("2023-12-31T23:59"))?;
        let result = validate_date_time_field(&at_min, Some("2023-06-15T10:30:00.000Z"));
        assert!(!result.detail.invalid);

        let at_max = field(None, Some("2023-01-01T00:00"), Some("2023-06-15T10:30"))?;
        let result = validate_date_time_field(&at_max, Some("2023-06-15T10:30:00.000Z"));
        assert!(!result.detail.invalid);

        let below = field(None, Some("2023-06-01T00:00"), Some("2023-12-31T23:59"))?;
        let result = validate_date_time_field(&below, Some("2023-01-01T10:30:00.000Z"));
        assert!(result.validity.range_underflow);
        assert!(!result.validity.range_overflow);
        Ok(())
    }

    #[test]
    fn date_fields_report_the_default_max() -> Result<(), Box<dyn std::error::Error>> {
        let field = field(Some(DateTimeKind::Date), Some("2023-01-01"), None)?;
        let result = validate_date_time_field(&field, Some("2022-12-01"));
        assert!(result.detail.has_min);
        assert!(result.detail.has_max);
        assert!(result.validity.range_underflow);
        Ok(())
    }

    #[test]
    fn unparseable_value_skips_the_check() -> Result<(), Box<dyn std::error::Error>> {
        let field = field(Some(DateTimeKind::Time), Some("08:00"), None)?;
        let result = validate_date_time_field(&field, Some("not-a-valid-time"));
        assert!(result.detail.has_min);
        assert!(!result.detail.invalid);

        let result = validate_date_time_field(&field, Some("06:00"));
        assert!(result.validity.range_underflow);
        Ok(())
    }

    #[test]
    fn years_past_9999_overflow_the_default_max() -> Result<(), Box<dyn std::error::Error>> {
        let date = field(Some(DateTimeKind::Date), None, None)?;
        for value in ["10000-01-01", "+10000-01-01", "200000-06-30"] {
            let result = validate_date_time_field(&date, Some(value));
            assert!(result.validity.range_overflow, "{value} should overflow");
        }
        assert!(!validate_date_time_field(&date, Some("9999-12-31")).detail.invalid);

        let date_time = field(None, None, None)?;
        let result = validate_date_time_field(&date_time, Some("+123456-01-01T10:00"));
        assert!(result.validity.range_overflow);
        let result = validate_date_time_field(&date_time, Some("123456-01-01T10:00:00.000Z"));
        assert!(result.validity.range_overflow);
        Ok(())
    }

    #[test]
    fn malformed_bounds_do_not_apply() -> Result<(), Box<dyn std::error::Error>> {
        for min in ["2023-6-1", "yesterday", "2023-13-01"] {
            let date = field(Some(DateTimeKind::Date), Some(min), None)?;
            let result = validate_date_time_field(&date, Some("2023-06-15"));
            assert!(!result.detail.has_min, "{min} should be ignored");
            assert!(!result.validity.range_underflow);
        }

        let time = field(Some(DateTimeKind::Time), Some("2023-01-01T08:00"), None)?;
        let result = validate_date_time_field(&time, Some("09:30"));
        assert!(!result.detail.has_min);
        assert!(!result.detail.invalid);

        let date_time = field(None, None, Some("soon"))?;
        let result = validate_date_time_field(&date_time, Some("2023-06-15T10:00"));
        assert!(result.detail.has_max);
        assert!(!result.detail.invalid);
        Ok(())
    }

    #[test]
    fn seconds_are_ignored_for_time_comparison() -> Result<(), Box<dyn std::error::Error>> {
        let field = field(Some(DateTimeKind::Time), Some("08:00"), Some("18:00"))?;
        let result = validate_date_time_field(&field, Some("12:30:00"));
        assert!(!result.detail.invalid);
        let result = validate_date_time_field(&field, Some("20:00"));
        assert!(result.validity.range_overflow);
        Ok(())
    }
}
