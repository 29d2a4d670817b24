//! Schema file types, defaults, validation, and normalization.
//!
//! A schema file lists the collections of the site and the fields of each
//! collection. Deserialization is strict about the envelope (unknown top-level
//! keys are rejected) but lenient about field options the validators do not
//! read, so real CMS configuration files load unchanged.

use cms_fields_domain::{FieldConfig, FieldName, LocaleCode, RequiredSetting};
use cms_fields_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Current supported schema file version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Top-level schema file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SchemaConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Runtime settings stored alongside the schema.
    pub settings: SettingsConfig,
    /// Collections with their fields.
    pub collections: Vec<CollectionConfig>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            settings: SettingsConfig::default(),
            collections: Vec::new(),
        }
    }
}

/// Settings section of the schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SettingsConfig {
    /// Locales entries are written in. Empty means single-locale content.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locales: Vec<LocaleCode>,
    /// Locale validated when none is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<LocaleCode>,
    /// Diagnostics verbosity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogFilterLevel>,
}

/// A collection of entries sharing one field list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Unique collection name.
    pub name: String,
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Field definitions, in editor order.
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl CollectionConfig {
    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|field| field.name().as_str() == name)
    }
}

/// Verbosity accepted by the `log_level` setting and `CMSF_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFilterLevel {
    /// Everything.
    Trace,
    /// Diagnostics.
    Debug,
    /// Lifecycle events.
    #[default]
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures only.
    Error,
}

impl LogFilterLevel {
    /// Directive understood by `tracing` filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogFilterLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LogFilterLevel {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("unsupported log level: {input}")),
        }
    }
}

/// Effective runtime settings after defaults, file values, and env overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// Locale used when a command does not name one.
    pub default_locale: LocaleCode,
    /// Diagnostics verbosity.
    pub log_level: LogFilterLevel,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            default_locale: LocaleCode::default_locale(),
            log_level: LogFilterLevel::default(),
        }
    }
}

impl RuntimeSettings {
    /// Resolve settings from the schema file over the defaults.
    #[must_use]
    pub fn from_config(settings: &SettingsConfig) -> Self {
        let default_locale = settings
            .default_locale
            .clone()
            .or_else(|| settings.locales.first().cloned())
            .unwrap_or_else(LocaleCode::default_locale);

        Self {
            default_locale,
            log_level: settings.log_level.unwrap_or_default(),
        }
    }
}

impl SchemaConfig {
    /// Validate and normalize the schema.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedSchemaConfig, SchemaError> {
        self.validate_version()?;
        self.validate_locales()?;

        let mut names = BTreeSet::new();
        for (index, collection) in self.collections.iter_mut().enumerate() {
            let trimmed = collection.name.trim();
            if trimmed.is_empty() {
                return Err(SchemaError::EmptyCollectionName { index });
            }
            if trimmed.len() != collection.name.len() {
                collection.name = trimmed.to_owned();
            }
            if !names.insert(collection.name.clone()) {
                return Err(SchemaError::DuplicateCollection {
                    name: collection.name.clone(),
                });
            }
            validate_fields(collection, &self.settings.locales)?;
        }

        let settings = RuntimeSettings::from_config(&self.settings);
        Ok(ValidatedSchemaConfig {
            raw: self,
            settings,
        })
    }

    const fn validate_version(&self) -> Result<(), SchemaError> {
        if self.version != CURRENT_SCHEMA_VERSION {
            return Err(SchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    fn validate_locales(&self) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for locale in &self.settings.locales {
            if !seen.insert(locale) {
                return Err(SchemaError::DuplicateLocale {
                    locale: locale.clone(),
                });
            }
        }

        match &self.settings.default_locale {
            Some(default_locale) if !seen.is_empty() && !seen.contains(default_locale) => {
                Err(SchemaError::UnknownDefaultLocale {
                    locale: default_locale.clone(),
                })
            },
            _ => Ok(()),
        }
    }
}

fn validate_fields(collection: &CollectionConfig, locales: &[LocaleCode]) -> Result<(), SchemaError> {
    let mut names: BTreeSet<&FieldName> = BTreeSet::new();
    for field in &collection.fields {
        if !names.insert(field.name()) {
            return Err(SchemaError::DuplicateField {
                collection: collection.name.clone(),
                field: field.name().clone(),
            });
        }

        // Locale-scoped requirements can only be checked against a declared list.
        let RequiredSetting::Locales(required) = field.required() else {
            continue;
        };
        if locales.is_empty() {
            continue;
        }
        if let Some(unknown) = required.iter().find(|locale| !locales.contains(locale)) {
            return Err(SchemaError::UnknownRequiredLocale {
                collection: collection.name.clone(),
                field: field.name().clone(),
                locale: unknown.clone(),
            });
        }
    }
    Ok(())
}

/// Validated schema with resolved runtime settings.
#[derive(Debug, Clone)]
pub struct ValidatedSchemaConfig {
    raw: SchemaConfig,
    settings: RuntimeSettings,
}

impl ValidatedSchemaConfig {
    /// Settings resolved from the file over the defaults.
    #[must_use]
    pub const fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    /// Replace the resolved settings (used when applying env overrides).
    #[must_use]
    pub fn with_settings(mut self, settings: RuntimeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Look up a collection by name.
    #[must_use]
    pub fn collection(&self, name: &str) -> Option<&CollectionConfig> {
        self.raw
            .collections
            .iter()
            .find(|collection| collection.name == name.trim())
    }

    /// Locales declared by the schema, or the default locale alone.
    #[must_use]
    pub fn locales(&self) -> Vec<LocaleCode> {
        if self.raw.settings.locales.is_empty() {
            vec![self.settings.default_locale.clone()]
        } else {
            self.raw.settings.locales.clone()
        }
    }

    /// Borrow the raw schema.
    #[must_use]
    pub const fn as_ref(&self) -> &SchemaConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw schema.
    #[must_use]
    pub fn into_inner(self) -> SchemaConfig {
        self.raw
    }
}

impl AsRef<SchemaConfig> for ValidatedSchemaConfig {
    fn as_ref(&self) -> &SchemaConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedSchemaConfig {
    type Target = SchemaConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Schema validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A locale is listed twice in `settings.locales`.
    DuplicateLocale {
        /// Repeated locale.
        locale: LocaleCode,
    },
    /// `settings.default_locale` is not one of `settings.locales`.
    UnknownDefaultLocale {
        /// Configured default.
        locale: LocaleCode,
    },
    /// A collection name is blank.
    EmptyCollectionName {
        /// Position in the `collections` list.
        index: usize,
    },
    /// Two collections share a name.
    DuplicateCollection {
        /// Repeated name.
        name: String,
    },
    /// Two fields of one collection share a name.
    DuplicateField {
        /// Collection name.
        collection: String,
        /// Repeated field name.
        field: FieldName,
    },
    /// A field requires a locale that the schema does not declare.
    UnknownRequiredLocale {
        /// Collection name.
        collection: String,
        /// Field name.
        field: FieldName,
        /// Undeclared locale.
        locale: LocaleCode,
    },
}

impl SchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::DuplicateLocale { .. } => ErrorCode::new("config", "duplicate_locale"),
            Self::UnknownDefaultLocale { .. } | Self::UnknownRequiredLocale { .. } => {
                ErrorCode::new("config", "unknown_locale")
            },
            Self::EmptyCollectionName { .. } => ErrorCode::new("config", "empty_collection_name"),
            Self::DuplicateCollection { .. } => ErrorCode::new("config", "duplicate_collection"),
            Self::DuplicateField { .. } => ErrorCode::new("config", "duplicate_field"),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported schema version: {found} (supported: {supported})"
            ),
            Self::DuplicateLocale { locale } => {
                write!(formatter, "locale listed more than once: {locale}")
            },
            Self::UnknownDefaultLocale { locale } => {
                write!(formatter, "default locale is not a declared locale: {locale}")
            },
            Self::EmptyCollectionName { index } => {
                write!(formatter, "collection #{index} must have a non-empty name")
            },
            Self::DuplicateCollection { name } => {
                write!(formatter, "collection defined more than once: {name}")
            },
            Self::DuplicateField { collection, field } => write!(
                formatter,
                "field defined more than once in collection {collection}: {field}"
            ),
            Self::UnknownRequiredLocale {
                collection,
                field,
                locale,
            } => write!(
                formatter,
                "field {collection}.{field} requires undeclared locale: {locale}"
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<SchemaError> for ErrorEnvelope {
    fn from(error: SchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            SchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            SchemaError::DuplicateLocale { locale } | SchemaError::UnknownDefaultLocale { locale } => {
                envelope.with_metadata("locale", String::from(locale))
            },
            SchemaError::EmptyCollectionName { index } => {
                envelope.with_metadata("index", index.to_string())
            },
            SchemaError::DuplicateCollection { name } => envelope.with_metadata("collection", name),
            SchemaError::DuplicateField { collection, field } => envelope
                .with_metadata("collection", collection)
                .with_metadata("field", String::from(field)),
            SchemaError::UnknownRequiredLocale {
                collection,
                field,
                locale,
            } => envelope
                .with_metadata("collection", collection)
                .with_metadata("field", String::from(field))
                .with_metadata("locale", String::from(locale)),
        }
    }
}
