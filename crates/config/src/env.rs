//! Environment variable parsing and merging.
//!
//! Env values are parsed strictly: a variable that is present must be
//! non-empty and well-formed, otherwise loading fails with a typed
//! `EnvParseError` instead of silently falling back to the file value.

use crate::{LogFilterLevel, RuntimeSettings};
use cms_fields_domain::LocaleCode;
use cms_fields_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;

/// Env var: locale used when a command does not name one.
pub const ENV_DEFAULT_LOCALE: &str = "CMSF_DEFAULT_LOCALE";
/// Env var: diagnostics verbosity (`trace`, `debug`, `info`, `warn`, `error`).
pub const ENV_LOG_LEVEL: &str = "CMSF_LOG_LEVEL";

const ENV_VARS: [&str; 2] = [ENV_DEFAULT_LOCALE, ENV_LOG_LEVEL];

/// Settings overrides read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsEnv {
    /// Override for the default locale.
    pub default_locale: Option<LocaleCode>,
    /// Override for the log level.
    pub log_level: Option<LogFilterLevel>,
}

impl SettingsEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let default_locale = parse_optional_trimmed(map, ENV_DEFAULT_LOCALE)?
            .map(|value| {
                LocaleCode::parse(value).map_err(|_| EnvParseError::EmptyValue {
                    var: ENV_DEFAULT_LOCALE,
                })
            })
            .transpose()?;

        let log_level = parse_optional_trimmed(map, ENV_LOG_LEVEL)?
            .map(|value| {
                value
                    .parse::<LogFilterLevel>()
                    .map_err(|_| EnvParseError::InvalidEnum {
                        var: ENV_LOG_LEVEL,
                        value: value.to_owned(),
                    })
            })
            .transpose()?;

        Ok(Self {
            default_locale,
            log_level,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = ENV_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| ((*name).to_owned(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.default_locale.is_none() && self.log_level.is_none()
    }
}

/// Apply env overrides on top of resolved settings (env wins).
#[must_use]
pub fn apply_env_overrides(mut settings: RuntimeSettings, env: &SettingsEnv) -> RuntimeSettings {
    if let Some(locale) = &env.default_locale {
        settings.default_locale = locale.clone();
    }
    if let Some(level) = env.log_level {
        settings.log_level = level;
    }
    settings
}

fn parse_optional_trimmed<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<&'a str>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed))
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    #[error("{var} has an unsupported value")]
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn absent_vars_leave_settings_alone() -> Result<(), EnvParseError> {
        let parsed = SettingsEnv::from_map(&env(&[("UNRELATED", "x")]))?;
        assert!(parsed.is_empty());
        let settings = apply_env_overrides(RuntimeSettings::default(), &parsed);
        assert_eq!(settings, RuntimeSettings::default());
        Ok(())
    }

    #[test]
    fn values_are_trimmed_and_typed() -> Result<(), EnvParseError> {
        let parsed = SettingsEnv::from_map(&env(&[
            (ENV_DEFAULT_LOCALE, " fr "),
            (ENV_LOG_LEVEL, "DEBUG"),
        ]))?;
        let settings = apply_env_overrides(RuntimeSettings::default(), &parsed);
        assert_eq!(settings.default_locale.as_str(), "fr");
        assert_eq!(settings.log_level, LogFilterLevel::Debug);
        Ok(())
    }

    #[test]
    fn blank_and_unknown_values_fail() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            SettingsEnv::from_map(&env(&[(ENV_DEFAULT_LOCALE, "  ")])),
            Err(EnvParseError::EmptyValue {
                var: ENV_DEFAULT_LOCALE
            })
        );

        let error = SettingsEnv::from_map(&env(&[(ENV_LOG_LEVEL, "verbose")]));
        let Err(error) = error else {
            return Err("expected an invalid log level error".into());
        };
        let envelope = ErrorEnvelope::from(error);
        assert_eq!(envelope.code, ErrorCode::new("config", "invalid_env_enum"));
        assert_eq!(
            envelope.metadata.get("env_var").map(String::as_str),
            Some(ENV_LOG_LEVEL)
        );
        assert_eq!(envelope.message, "CMSF_LOG_LEVEL has an unsupported value");
        Ok(())
    }
}
