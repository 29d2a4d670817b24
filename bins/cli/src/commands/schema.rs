//! Schema check/show command handlers.

use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, ndjson_summary, pretty_json};
use crate::{CliOutput, format_error_output, log_info};
use clap::ValueEnum;
use cms_fields_config::{ValidatedSchemaConfig, load_schema_std_env, to_pretty_json, to_pretty_toml};
use std::fmt::Write as _;
use std::path::Path;

/// Document format printed by `schema show` in text mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SchemaShowFormat {
    /// Pretty JSON.
    #[default]
    Json,
    /// Pretty TOML.
    Toml,
}

/// Load and validate a schema file, reporting a summary.
pub fn run_schema_check(mode: OutputMode, path: &Path) -> Result<CliOutput, CliError> {
    let schema = match load_schema_std_env(path) {
        Ok(schema) => schema,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "schema check completed", mode.no_progress);

    let summary = schema_summary(&schema, path);
    let stdout = if mode.is_ndjson() {
        ndjson_summary("ok", "schema", Some(summary))
    } else if mode.is_json() {
        pretty_json(&serde_json::json!({ "status": "ok", "schema": summary }))?
    } else {
        let mut out = format!(
            "status: ok\npath: {}\nversion: {}\ndefaultLocale: {}\nlocales: {}\n",
            path.to_string_lossy(),
            schema.version,
            schema.settings().default_locale,
            join_locales(&schema),
        );
        for collection in &schema.collections {
            let _ = writeln!(
                out,
                "collection: {} ({} fields)",
                collection.name,
                collection.fields.len()
            );
        }
        out
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::Ok,
    })
}

/// Print the normalized schema.
pub fn run_schema_show(
    mode: OutputMode,
    path: &Path,
    format: SchemaShowFormat,
) -> Result<CliOutput, CliError> {
    let schema = match load_schema_std_env(path) {
        Ok(schema) => schema,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let stdout = if mode.is_ndjson() || mode.is_json() {
        let document = serde_json::to_value(schema.as_ref())?;
        if mode.is_ndjson() {
            ndjson_summary("ok", "schema", Some(serde_json::json!({ "schema": document })))
        } else {
            pretty_json(&serde_json::json!({ "status": "ok", "schema": document }))?
        }
    } else {
        let rendered = match format {
            SchemaShowFormat::Json => to_pretty_json(schema.as_ref()),
            SchemaShowFormat::Toml => to_pretty_toml(schema.as_ref()),
        };
        match rendered {
            Ok(document) => document,
            Err(error) => return Ok(format_error_output(mode, &error)),
        }
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn schema_summary(schema: &ValidatedSchemaConfig, path: &Path) -> serde_json::Value {
    let collections: Vec<serde_json::Value> = schema
        .collections
        .iter()
        .map(|collection| {
            serde_json::json!({
                "name": collection.name,
                "fields": collection.fields.iter().map(|field| field.name().as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "path": path.to_string_lossy(),
        "version": schema.version,
        "defaultLocale": schema.settings().default_locale.as_str(),
        "locales": schema.locales().iter().map(|locale| locale.as_str().to_owned()).collect::<Vec<_>>(),
        "collections": collections,
    })
}

fn join_locales(schema: &ValidatedSchemaConfig) -> String {
    schema
        .locales()
        .iter()
        .map(|locale| locale.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
