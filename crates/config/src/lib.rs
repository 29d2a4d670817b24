//! # cms-fields-config
//!
//! Schema file loading, validation, and runtime settings for the CLI.
//! This crate depends on `domain` and `shared` only.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Environment variable parsing and merging.
pub mod env;
/// Schema loading helpers (file + env).
pub mod load;
/// Schema file types and validation.
pub mod schema;

pub use env::{ENV_DEFAULT_LOCALE, ENV_LOG_LEVEL, EnvParseError, SettingsEnv, apply_env_overrides};
pub use load::{
    load_schema_from_path, load_schema_std_env, parse_schema_json, to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_SCHEMA_VERSION, CollectionConfig, LogFilterLevel, RuntimeSettings, SchemaConfig,
    SchemaError, SettingsConfig, ValidatedSchemaConfig,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
