//! Domain primitives with validated constructors.

use cms_fields_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation failures for domain primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// `LocaleCode` is empty after trimming.
    InvalidLocaleCode {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// `EntryId` is empty after trimming.
    InvalidEntryId {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
    /// `FieldName` is empty after trimming.
    InvalidFieldName {
        /// Length of the raw input before trimming.
        input_length: usize,
    },
}

impl PrimitiveError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidLocaleCode { .. } => ErrorCode::new("domain", "invalid_locale_code"),
            Self::InvalidEntryId { .. } => ErrorCode::new("domain", "invalid_entry_id"),
            Self::InvalidFieldName { .. } => ErrorCode::new("domain", "invalid_field_name"),
        }
    }
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocaleCode { .. } => formatter.write_str("LocaleCode must be non-empty"),
            Self::InvalidEntryId { .. } => formatter.write_str("EntryId must be non-empty"),
            Self::InvalidFieldName { .. } => formatter.write_str("FieldName must be non-empty"),
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            PrimitiveError::InvalidLocaleCode { input_length }
            | PrimitiveError::InvalidEntryId { input_length }
            | PrimitiveError::InvalidFieldName { input_length } => {
                envelope.with_metadata("input_length", input_length.to_string())
            },
        }
    }
}

macro_rules! string_primitive {
    ($(#[$meta:meta])* $name:ident, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Box<str>);

        impl $name {
            #[doc = concat!("Parse a `", stringify!($name), "` from user input.")]
            pub fn parse(input: impl AsRef<str>) -> Result<Self, PrimitiveError> {
                let raw = input.as_ref();
                let Some(trimmed) = trimmed_non_empty(raw) else {
                    return Err(PrimitiveError::$variant {
                        input_length: raw.len(),
                    });
                };

                Ok(Self(trimmed.to_owned().into_boxed_str()))
            }

            /// Access the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> Box<str> {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $name {
            type Error = PrimitiveError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.into_inner().into_string()
            }
        }
    };
}

string_primitive!(
    /// Locale code of one entry variant (e.g. `en`, `pt-BR`).
    LocaleCode,
    InvalidLocaleCode
);

string_primitive!(
    /// Identifier of a content entry in the editor.
    EntryId,
    InvalidEntryId
);

string_primitive!(
    /// Name of a field within a collection.
    FieldName,
    InvalidFieldName
);

impl LocaleCode {
    /// Locale key used when an entry has no i18n configuration.
    pub const DEFAULT: &'static str = "_default";

    /// The locale used for entries without i18n configuration.
    #[must_use]
    pub fn default_locale() -> Self {
        Self(Box::from(Self::DEFAULT))
    }
}

fn trimmed_non_empty(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
