//! Required-ness read from the field configuration.

use cms_fields_domain::{FieldBase, LocaleCode, RequiredSetting};
use cms_fields_ports::RequiredFieldPort;
use cms_fields_shared::Result;

/// Reads `required` from the field: a flag applies to every locale, a locale
/// list requires the field only in the listed locales.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredRequirement;

impl RequiredFieldPort for ConfiguredRequirement {
    fn is_field_required(&self, field: &FieldBase, locale: &LocaleCode) -> Result<bool> {
        Ok(match &field.required {
            RequiredSetting::Flag(required) => *required,
            RequiredSetting::Locales(locales) => locales.contains(locale),
        })
    }
}
