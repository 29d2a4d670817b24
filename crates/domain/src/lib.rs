//! # cms-fields-domain
//!
//! Domain model for content-field validation in a git-backed CMS editor.
//!
//! - **Primitives** - `LocaleCode`, `EntryId`, `FieldName`
//! - **Fields** - `FieldConfig` and its per-widget variants
//! - **Values** - `FieldValue`
//! - **Validity** - validity flags and UI detail records
//! - **Editor** - entries, assets, file changes, and toast state
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use cms_fields_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod editor;
pub mod fields;
pub mod primitives;
pub mod validity;
pub mod value;

pub use editor::{
    Asset, CommitType, Entry, EntryLocale, FileChange, FileChangeAction, ToastState,
};
pub use fields::{
    BoundValue, DateTimeField, DateTimeKind, FieldBase, FieldConfig, LegacyFormatSetting,
    NumberField, NumberValueType, RequiredSetting, StringField, StringType, TextField,
};
pub use primitives::{EntryId, FieldName, LocaleCode, PrimitiveError};
pub use validity::{
    DateTimeFieldDetail, DateTimeInputType, DateTimeValidity, NumberValidity, StringFieldDetail,
    StringValidity, ValidityState,
};
pub use value::FieldValue;

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
