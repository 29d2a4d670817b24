//! Field configuration as declared in a collection schema.
//!
//! Bounds are kept in their raw form: a misconfigured bound (wrong type,
//! fractional length, inverted range) loads fine and is later treated as
//! "constraint not applicable" by the validators.

use crate::{FieldName, LocaleCode};
use serde::{Deserialize, Serialize};

/// A raw bound value as written in the schema: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundValue {
    /// Numeric bound.
    Number(f64),
    /// String-encoded bound.
    Text(String),
}

impl BoundValue {
    /// Returns the bound when it is a finite number.
    #[must_use]
    pub const fn as_finite_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    /// Returns the bound when it is an integral number.
    #[must_use]
    pub fn as_integer(&self) -> Option<f64> {
        self.as_finite_number().filter(|value| value.fract() == 0.0)
    }

    /// Returns the bound when it is a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) => None,
        }
    }
}

/// Whether a field must be filled: a flag, or the list of locales requiring it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredSetting {
    /// Applies to every locale.
    Flag(bool),
    /// Required only for the listed locales.
    Locales(Vec<LocaleCode>),
}

impl Default for RequiredSetting {
    fn default() -> Self {
        Self::Flag(true)
    }
}

/// Sub-kind of a single-line string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringType {
    /// Free text, no format check.
    #[default]
    Text,
    /// E-mail address.
    Email,
    /// Absolute URL.
    Url,
}

/// Numeric encoding accepted by a number field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberValueType {
    /// Integer.
    #[default]
    #[serde(rename = "int")]
    Int,
    /// Floating point.
    #[serde(rename = "float")]
    Float,
    /// Integer, or its string representation.
    #[serde(rename = "int/string")]
    IntOrString,
    /// Float, or its string representation.
    #[serde(rename = "float/string")]
    FloatOrString,
}

impl NumberValueType {
    /// Returns true when a missing value must be reported as a type mismatch.
    #[must_use]
    pub const fn is_strictly_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

/// Sub-kind of a date/time field as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeKind {
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time.
    #[serde(rename = "datetime")]
    DateTime,
}

/// Legacy `date_format` / `time_format` setting: `false` disables that half.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyFormatSetting {
    /// Enabled or disabled.
    Enabled(bool),
    /// Display pattern (unused for validation).
    Pattern(String),
}

impl LegacyFormatSetting {
    /// Returns true when the setting is literally `false`.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Enabled(false))
    }
}

/// Attributes shared by every widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBase {
    /// Field name, unique within a collection.
    pub name: FieldName,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Required-ness.
    #[serde(default)]
    pub required: RequiredSetting,
}

/// Single-line string field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringField {
    /// Common attributes.
    #[serde(flatten)]
    pub base: FieldBase,
    /// Format sub-kind.
    #[serde(default, rename = "type")]
    pub string_type: StringType,
    /// Prefix shown before the value and stripped before format checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Suffix shown after the value and stripped before format checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Minimum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minlength: Option<BoundValue>,
    /// Maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<BoundValue>,
}

/// Multi-line text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    /// Common attributes.
    #[serde(flatten)]
    pub base: FieldBase,
    /// Minimum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minlength: Option<BoundValue>,
    /// Maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<BoundValue>,
}

/// Number field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberField {
    /// Common attributes.
    #[serde(flatten)]
    pub base: FieldBase,
    /// Accepted encoding.
    #[serde(default)]
    pub value_type: NumberValueType,
    /// Inclusive minimum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<BoundValue>,
    /// Inclusive maximum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<BoundValue>,
    /// Step hint for the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// Date/time field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeField {
    /// Common attributes.
    #[serde(flatten)]
    pub base: FieldBase,
    /// Sub-kind; `datetime` when unset.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<DateTimeKind>,
    /// Legacy date switch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<LegacyFormatSetting>,
    /// Legacy time switch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<LegacyFormatSetting>,
    /// Storage format using Day.js tokens; ISO 8601 when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Whether the picker works in UTC rather than the local zone.
    #[serde(default)]
    pub picker_utc: bool,
    /// Inclusive minimum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<BoundValue>,
    /// Inclusive maximum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<BoundValue>,
}

/// Configuration of one content field, discriminated by `widget`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "lowercase")]
pub enum FieldConfig {
    /// Single-line string.
    String(StringField),
    /// Multi-line text.
    Text(TextField),
    /// Number.
    Number(NumberField),
    /// Date and/or time.
    #[serde(rename = "datetime")]
    DateTime(DateTimeField),
}

impl FieldConfig {
    /// Common attributes.
    #[must_use]
    pub const fn base(&self) -> &FieldBase {
        match self {
            Self::String(field) => &field.base,
            Self::Text(field) => &field.base,
            Self::Number(field) => &field.base,
            Self::DateTime(field) => &field.base,
        }
    }

    /// Field name.
    #[must_use]
    pub const fn name(&self) -> &FieldName {
        &self.base().name
    }

    /// Required-ness setting.
    #[must_use]
    pub const fn required(&self) -> &RequiredSetting {
        &self.base().required
    }

    /// Widget discriminator as written in the schema.
    #[must_use]
    pub const fn widget(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::DateTime(_) => "datetime",
        }
    }
}
