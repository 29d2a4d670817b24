//! Per-widget dispatch with a uniform result shape.

use crate::{validate_date_time_field, validate_number_field, validate_string_field};
use cms_fields_domain::{
    DateTimeFieldDetail, FieldConfig, FieldValue, LocaleCode, StringFieldDetail, ValidityState,
};
use cms_fields_ports::RequiredFieldPort;
use cms_fields_shared::Result;
use serde::Serialize;

/// Kind-specific UI detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldDetail {
    /// String or text field.
    String(StringFieldDetail),
    /// Date/time field.
    DateTime(DateTimeFieldDetail),
}

/// Result of [`validate_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldValidation {
    /// All validity flags; the ones a widget never reports stay `false`.
    pub validity: ValidityState,
    /// Detail for widgets that produce one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<FieldDetail>,
}

impl FieldValidation {
    /// Returns true when no constraint is violated.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.validity.is_valid()
    }
}

/// Validate one locale's value of one field with the validator for its widget.
///
/// Non-text values given to string and date/time fields are validated through
/// their text rendition.
pub fn validate_field(
    field: &FieldConfig,
    locale: &LocaleCode,
    value: Option<&FieldValue>,
    required: &dyn RequiredFieldPort,
) -> Result<FieldValidation> {
    let text = value.map(FieldValue::to_text);
    let text = text.as_deref();

    let validation = match field {
        FieldConfig::String(string) => {
            let result = validate_string_field(string, text);
            FieldValidation {
                validity: result.validity.into(),
                detail: Some(FieldDetail::String(result.detail)),
            }
        },
        FieldConfig::Text(text_field) => {
            let result = validate_string_field(text_field, text);
            FieldValidation {
                validity: result.validity.into(),
                detail: Some(FieldDetail::String(result.detail)),
            }
        },
        FieldConfig::Number(number) => {
            let result = validate_number_field(number, locale, value, required)?;
            FieldValidation {
                validity: result.validity.into(),
                detail: None,
            }
        },
        FieldConfig::DateTime(date_time) => {
            let result = validate_date_time_field(date_time, text);
            FieldValidation {
                validity: result.validity.into(),
                detail: Some(FieldDetail::DateTime(result.detail)),
            }
        },
    };

    Ok(validation)
}
