//! String and text field validation.

use crate::constraint::LengthBounds;
use cms_fields_domain::{StringField, StringFieldDetail, StringType, StringValidity, TextField};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Valid e-mail address as accepted by `<input type="email">`.
static EMAIL_PATTERN: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
});

/// A field validated by [`validate_string_field`].
#[derive(Debug, Clone, Copy)]
pub enum StringFieldRef<'a> {
    /// Single-line string; format checks apply.
    String(&'a StringField),
    /// Multi-line text; only length checks apply.
    Text(&'a TextField),
}

impl<'a> From<&'a StringField> for StringFieldRef<'a> {
    fn from(field: &'a StringField) -> Self {
        Self::String(field)
    }
}

impl<'a> From<&'a TextField> for StringFieldRef<'a> {
    fn from(field: &'a TextField) -> Self {
        Self::Text(field)
    }
}

/// Result of [`validate_string_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StringFieldValidation {
    /// Violated constraints.
    pub validity: StringValidity,
    /// Character count and configured bounds.
    pub detail: StringFieldDetail,
}

/// Validate a string or text value against its length bounds and format.
///
/// `count` is taken from the whole trimmed value; the prefix and suffix are
/// only removed for the format check.
pub fn validate_string_field<'a>(
    field: impl Into<StringFieldRef<'a>>,
    value: Option<&str>,
) -> StringFieldValidation {
    let field = field.into();
    let (minlength, maxlength) = match field {
        StringFieldRef::String(field) => (field.minlength.as_ref(), field.maxlength.as_ref()),
        StringFieldRef::Text(field) => (field.minlength.as_ref(), field.maxlength.as_ref()),
    };

    let bounds = LengthBounds::resolve(minlength, maxlength);
    let value = value.filter(|value| !value.is_empty());
    let count = value.map_or(0, |value| trim_text(value).chars().count());
    let too_short = bounds.too_short(count);
    let too_long = bounds.too_long(count);

    let type_mismatch = match (field, value) {
        (StringFieldRef::String(field), Some(value)) => has_type_mismatch(field, value),
        _ => false,
    };

    StringFieldValidation {
        validity: StringValidity {
            too_short,
            too_long,
            type_mismatch,
        },
        detail: StringFieldDetail {
            count,
            has_min: bounds.min.is_some(),
            has_max: bounds.max.is_some(),
            invalid: too_short || too_long || type_mismatch,
        },
    }
}

fn has_type_mismatch(field: &StringField, value: &str) -> bool {
    let stripped = strip_affixes(value, field.prefix.as_deref(), field.suffix.as_deref());

    match field.string_type {
        StringType::Text => false,
        StringType::Url => !is_valid_url(stripped),
        StringType::Email => !is_valid_email(stripped) || !domain_has_dot(stripped),
    }
}

fn strip_affixes<'v>(value: &'v str, prefix: Option<&str>, suffix: Option<&str>) -> &'v str {
    let mut stripped = value;
    if let Some(prefix) = prefix.filter(|prefix| !prefix.is_empty()) {
        stripped = stripped.strip_prefix(prefix).unwrap_or(stripped);
    }
    if let Some(suffix) = suffix.filter(|suffix| !suffix.is_empty()) {
        stripped = stripped.strip_suffix(suffix).unwrap_or(stripped);
    }
    stripped
}

/// Text-value trim: Unicode white space and the byte-order mark, but not NEL.
fn trim_text(value: &str) -> &str {
    value.trim_matches(|c: char| c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}'))
}

/// Form controls strip line breaks and surrounding whitespace before checking.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r'))
        .collect::<String>()
        .trim_matches(|c: char| c.is_ascii_whitespace())
        .to_owned()
}

fn is_valid_email(value: &str) -> bool {
    let value = sanitize(value);
    if value.is_empty() {
        return true;
    }
    EMAIL_PATTERN
        .as_ref()
        .is_ok_and(|pattern| pattern.is_match(&value))
}

/// `me@example` passes the form-control pattern but is not a deliverable address.
fn domain_has_dot(value: &str) -> bool {
    value
        .split('@')
        .nth(1)
        .is_some_and(|domain| domain.contains('.'))
}

fn is_valid_url(value: &str) -> bool {
    let value = sanitize(value);
    value.is_empty() || url::Url::parse(&value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_fields_domain::{BoundValue, FieldBase, FieldName, RequiredSetting};

    fn string_field(string_type: StringType) -> Result<StringField, Box<dyn std::error::Error>> {
        Ok(StringField {
            base: FieldBase {
                name: FieldName::parse("title")?,
                label: None,
                required: RequiredSetting::default(),
            },
            string_type,
            prefix: None,
            suffix: None,
            minlength: None,
            maxlength: None,
        })
    }

    #[test]
    fn count_uses_trimmed_code_points() -> Result<(), Box<dyn std::error::Error>> {
        let field = string_field(StringType::Text)?;
        let result = validate_string_field(&field, Some("  héllo 👋  "));
        assert_eq!(result.detail.count, 7);
        assert!(!result.detail.invalid);

        let result = validate_string_field(&field, None);
        assert_eq!(result.detail.count, 0);
        Ok(())
    }

    #[test]
    fn count_trims_byte_order_mark_but_not_nel() -> Result<(), Box<dyn std::error::Error>> {
        let field = string_field(StringType::Text)?;
        let result = validate_string_field(&field, Some("\u{FEFF}abc\u{3000}"));
        assert_eq!(result.detail.count, 3);

        let result = validate_string_field(&field, Some("abc\u{85}"));
        assert_eq!(result.detail.count, 4);
        Ok(())
    }

    #[test]
    fn length_bounds_flag_short_and_long_values() -> Result<(), Box<dyn std::error::Error>> {
        let mut field = string_field(StringType::Text)?;
        field.minlength = Some(BoundValue::Number(3.0));
        field.maxlength = Some(BoundValue::Number(5.0));

        let short = validate_string_field(&field, Some("ab"));
        assert!(short.validity.too_short);
        assert!(short.detail.has_min && short.detail.has_max);

        let long = validate_string_field(&field, Some("abcdef"));
        assert!(long.validity.too_long);
        assert!(!long.validity.too_short);

        let exact = validate_string_field(&field, Some("abcde"));
        assert!(!exact.detail.invalid);
        Ok(())
    }

    #[test]
    fn email_requires_a_dotted_domain() -> Result<(), Box<dyn std::error::Error>> {
        let field = string_field(StringType::Email)?;
        assert!(validate_string_field(&field, Some("user@example")).validity.type_mismatch);
        assert!(
            !validate_string_field(&field, Some("user@mail.example.com"))
                .validity
                .type_mismatch
        );
        assert!(validate_string_field(&field, Some("not an email")).validity.type_mismatch);
        Ok(())
    }

    #[test]
    fn prefix_and_suffix_are_stripped_for_format_only() -> Result<(), Box<dyn std::error::Error>> {
        let mut field = string_field(StringType::Email)?;
        field.prefix = Some("Contact: ".to_owned());
        field.suffix = Some(" (work)".to_owned());

        let value = "Contact: user@example.com (work)";
        let result = validate_string_field(&field, Some(value));
        assert!(!result.validity.type_mismatch);
        assert_eq!(result.detail.count, value.chars().count());
        Ok(())
    }

    #[test]
    fn url_must_be_absolute() -> Result<(), Box<dyn std::error::Error>> {
        let field = string_field(StringType::Url)?;
        assert!(!validate_string_field(&field, Some("https://example.com/a?b=c")).validity.type_mismatch);
        assert!(validate_string_field(&field, Some("/relative/path")).validity.type_mismatch);
        assert!(validate_string_field(&field, Some("example.com")).validity.type_mismatch);
        Ok(())
    }

    #[test]
    fn text_fields_skip_format_checks() -> Result<(), Box<dyn std::error::Error>> {
        let field = TextField {
            base: FieldBase {
                name: FieldName::parse("body")?,
                label: None,
                required: RequiredSetting::default(),
            },
            minlength: None,
            maxlength: Some(BoundValue::Number(3.0)),
        };
        let result = validate_string_field(&field, Some("user@example"));
        assert!(!result.validity.type_mismatch);
        assert!(result.validity.too_long);
        Ok(())
    }

    #[test]
    fn empty_value_skips_format_check() -> Result<(), Box<dyn std::error::Error>> {
        let field = string_field(StringType::Email)?;
        let result = validate_string_field(&field, Some(""));
        assert!(!result.detail.invalid);
        Ok(())
    }
}
