//! Schema loading helpers (file + env).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{SchemaConfig, SettingsEnv, ValidatedSchemaConfig, apply_env_overrides};
use cms_fields_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaFormat {
    Json,
    Toml,
    Yaml,
}

/// Load and validate a schema file, then apply env overrides to its settings.
///
/// Precedence (highest wins):
/// - env overrides (`SettingsEnv`)
/// - `settings` section of the file
/// - defaults (`RuntimeSettings::default()`)
pub fn load_schema_from_path(
    path: &Path,
    env: &SettingsEnv,
) -> Result<ValidatedSchemaConfig, ErrorEnvelope> {
    let text = read_schema_file(path)?;
    let format = detect_schema_format(path)?;
    let schema = parse_schema_unvalidated(&text, format)?;
    let validated = schema.validate_and_normalize()?;

    let settings = apply_env_overrides(validated.settings().clone(), env);
    Ok(validated.with_settings(settings))
}

/// Load a schema file using overrides from the process environment.
pub fn load_schema_std_env(path: &Path) -> Result<ValidatedSchemaConfig, ErrorEnvelope> {
    let env = SettingsEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_schema_from_path(path, &env)
}

/// Parse and validate a schema from JSON text.
pub fn parse_schema_json(input: &str) -> Result<ValidatedSchemaConfig, ErrorEnvelope> {
    let schema = parse_schema_unvalidated(input, SchemaFormat::Json)?;
    Ok(schema.validate_and_normalize()?)
}

/// Serialize the schema as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(schema: &SchemaConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(schema).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize schema: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the schema as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(schema: &SchemaConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(schema).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize schema TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn parse_schema_unvalidated(input: &str, format: SchemaFormat) -> Result<SchemaConfig, ErrorEnvelope> {
    match format {
        SchemaFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid schema JSON: {error}"),
            )
            .with_metadata("source", "schema")
        }),
        SchemaFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid schema TOML: {error}"),
            )
            .with_metadata("source", "schema")
        }),
        SchemaFormat::Yaml => serde_yaml_ng::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_yaml"),
                format!("invalid schema YAML: {error}"),
            )
            .with_metadata("source", "schema")
        }),
    }
}

fn read_schema_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "schema_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "schema_file_permission_denied")
            },
            _ => ErrorCode::new("config", "schema_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read schema file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_schema_format(path: &Path) -> Result<SchemaFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(SchemaFormat::Json),
        Some("toml") => Ok(SchemaFormat::Toml),
        Some("yml" | "yaml") => Ok(SchemaFormat::Yaml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported schema format; use .json, .toml, or .yaml",
        )
        .with_metadata("extension", other.to_string())),
    }
}
