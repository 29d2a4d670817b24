//! Entry and single-field validation command handlers.

use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, json_line, ndjson_summary, pretty_json};
use crate::{CliOutput, format_error_output, log_info};
use cms_fields_adapters::{JsonLogger, StderrLogSink};
use cms_fields_app::{
    LocaleValues, ValidateEntryDeps, ValidateEntryInput, ValidateEntryOutput, validate_entry,
};
use cms_fields_config::{
    LogFilterLevel, RuntimeSettings, SettingsEnv, ValidatedSchemaConfig, apply_env_overrides,
    load_schema_std_env,
};
use cms_fields_domain::{FieldConfig, FieldName, FieldValue, LocaleCode, ValidityState};
use cms_fields_ports::{LogLevel, LoggerPort};
use cms_fields_shared::{ErrorCode, ErrorEnvelope, RequestContext};
use cms_fields_validate::{ConfiguredRequirement, FieldValidation, validate_field};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// Arguments of the `validate` command.
#[derive(Debug, Clone, Copy)]
pub struct ValidateCommandInput<'a> {
    pub schema: &'a Path,
    pub collection: &'a str,
    pub entry: &'a Path,
    pub locales: &'a [String],
}

/// Validate an entry file against a collection of a schema.
pub fn run_validate(
    mode: OutputMode,
    input: ValidateCommandInput<'_>,
) -> Result<CliOutput, CliError> {
    match validate_entry_file(mode, input) {
        Ok(output) => format_entry_output(mode, input.collection, &output),
        Err(error) => Ok(format_error_output(mode, &error)),
    }
}

fn validate_entry_file(
    mode: OutputMode,
    input: ValidateCommandInput<'_>,
) -> Result<ValidateEntryOutput, ErrorEnvelope> {
    let schema = load_schema_std_env(input.schema)?;
    let collection = schema.collection(input.collection).ok_or_else(|| {
        ErrorEnvelope::expected(
            ErrorCode::new("cli", "unknown_collection"),
            "collection is not defined by the schema",
        )
        .with_metadata("collection", input.collection.to_owned())
    })?;

    let locales = if input.locales.is_empty() {
        schema.locales()
    } else {
        input
            .locales
            .iter()
            .map(LocaleCode::parse)
            .collect::<Result<Vec<_>, _>>()?
    };

    let text = read_input_file(input.entry, "entry")?;
    let document: Value = serde_json::from_str(&text).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("cli", "invalid_entry_json"),
            format!("invalid entry JSON: {error}"),
        )
        .with_metadata("path", input.entry.to_string_lossy().to_string())
    })?;
    let content = entry_content(&schema, document)?;

    let deps = ValidateEntryDeps {
        required: Arc::new(ConfiguredRequirement),
        logger: entry_logger(mode, schema.settings().log_level),
    };
    let use_case_input = ValidateEntryInput {
        collection: collection.name.as_str().into(),
        fields: collection.fields.clone(),
        locales,
        content,
    };
    validate_entry(&RequestContext::new_request(), &deps, &use_case_input)
}

/// Use-case events go to stderr as JSON lines for agent consumers only.
fn entry_logger(mode: OutputMode, level: LogFilterLevel) -> Option<Arc<dyn LoggerPort>> {
    if !mode.is_ndjson() {
        return None;
    }
    let min_level = level.as_str().parse().unwrap_or(LogLevel::Info);
    let logger = JsonLogger::new(Arc::new(StderrLogSink)).with_min_level(min_level);
    Some(Arc::new(logger))
}

/// Entry files map locale codes to field values. A schema without declared
/// locales takes a flat field map for its default locale instead.
fn entry_content(
    schema: &ValidatedSchemaConfig,
    document: Value,
) -> Result<BTreeMap<LocaleCode, LocaleValues>, ErrorEnvelope> {
    let Value::Object(object) = document else {
        return Err(invalid_entry_shape("entry must be a JSON object"));
    };

    if schema.as_ref().settings.locales.is_empty() {
        let values = locale_values(object)?;
        return Ok(BTreeMap::from([(
            schema.settings().default_locale.clone(),
            values,
        )]));
    }

    let mut content = BTreeMap::new();
    for (locale, values) in object {
        let Value::Object(values) = values else {
            return Err(invalid_entry_shape("locale content must be a JSON object")
                .with_metadata("locale", locale));
        };
        content.insert(LocaleCode::parse(&locale)?, locale_values(values)?);
    }
    Ok(content)
}

fn locale_values(object: serde_json::Map<String, Value>) -> Result<LocaleValues, ErrorEnvelope> {
    let mut values = LocaleValues::new();
    for (name, value) in object {
        let Ok(value) = field_value(value) else {
            // Lists and objects belong to widgets without validators.
            continue;
        };
        values.insert(FieldName::parse(&name)?, value);
    }
    Ok(values)
}

/// Convert a JSON value to a candidate field value; `null` means absent.
fn field_value(value: Value) -> Result<Option<FieldValue>, Value> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(FieldValue::Bool(flag))),
        Value::Number(number) => number
            .as_f64()
            .map(|number| Some(FieldValue::Number(number)))
            .ok_or(Value::Number(number)),
        Value::String(text) => Ok(Some(FieldValue::Text(text))),
        other @ (Value::Array(_) | Value::Object(_)) => Err(other),
    }
}

fn invalid_entry_shape(message: &str) -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::new("cli", "invalid_entry_shape"), message)
}

fn format_entry_output(
    mode: OutputMode,
    collection: &str,
    output: &ValidateEntryOutput,
) -> Result<CliOutput, CliError> {
    let status = status_name(output.valid);
    let failures = output.failures();

    let mut stderr = String::new();
    log_info(&mut stderr, "entry validation completed", mode.no_progress);

    let stdout = if mode.is_ndjson() {
        let mut out = String::new();
        for (locale, fields) in &output.locales {
            for (field, result) in fields {
                out.push_str(&json_line(&serde_json::json!({
                    "type": "field",
                    "locale": locale,
                    "field": field,
                    "valid": result.is_valid(),
                    "violations": violations(&result.validity),
                    "result": result,
                }))?);
            }
        }
        out.push_str(&ndjson_summary(
            status,
            "validate",
            Some(serde_json::json!({
                "collection": collection,
                "valid": output.valid,
                "failureCount": failures.len(),
            })),
        ));
        out
    } else if mode.is_json() {
        pretty_json(&serde_json::json!({
            "status": status,
            "collection": collection,
            "valid": output.valid,
            "locales": output.locales,
        }))?
    } else {
        let mut out = format!(
            "status: {status}\ncollection: {collection}\nlocales: {}\nfailures: {}\n",
            output
                .locales
                .keys()
                .map(LocaleCode::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            failures.len(),
        );
        for (locale, field) in failures {
            let flags = output
                .locales
                .get(locale)
                .and_then(|fields| fields.get(field))
                .map(|result| violations(&result.validity).join(", "))
                .unwrap_or_default();
            let _ = writeln!(out, "  {locale}.{field}: {flags}");
        }
        out
    };

    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: if output.valid {
            ExitCode::Ok
        } else {
            ExitCode::ValidationFailed
        },
    })
}

/// Validate one value against one field configuration given as JSON.
pub fn run_validate_field(
    mode: OutputMode,
    field_json: &str,
    value_json: Option<&str>,
    locale: Option<&str>,
) -> Result<CliOutput, CliError> {
    match validate_single_field(field_json, value_json, locale) {
        Ok((field, locale, result)) => format_field_output(mode, &field, &locale, &result),
        Err(error) => Ok(format_error_output(mode, &error)),
    }
}

fn validate_single_field(
    field_json: &str,
    value_json: Option<&str>,
    locale: Option<&str>,
) -> Result<(FieldConfig, LocaleCode, FieldValidation), ErrorEnvelope> {
    let field: FieldConfig = serde_json::from_str(field_json).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("cli", "invalid_field_json"),
            format!("invalid field JSON: {error}"),
        )
    })?;

    let value = match value_json {
        None => None,
        Some(raw) => {
            let parsed: Value = serde_json::from_str(raw).map_err(|error| {
                ErrorEnvelope::expected(
                    ErrorCode::new("cli", "invalid_value_json"),
                    format!("invalid value JSON: {error}"),
                )
            })?;
            field_value(parsed).map_err(|_| {
                ErrorEnvelope::expected(
                    ErrorCode::new("cli", "invalid_value_json"),
                    "value must be a string, number, boolean, or null",
                )
            })?
        },
    };

    let locale = match locale {
        Some(locale) => LocaleCode::parse(locale)?,
        None => default_locale()?,
    };

    let result = validate_field(&field, &locale, value.as_ref(), &ConfiguredRequirement)?;
    Ok((field, locale, result))
}

fn default_locale() -> Result<LocaleCode, ErrorEnvelope> {
    let env = SettingsEnv::from_std_env()?;
    Ok(apply_env_overrides(RuntimeSettings::default(), &env).default_locale)
}

fn format_field_output(
    mode: OutputMode,
    field: &FieldConfig,
    locale: &LocaleCode,
    result: &FieldValidation,
) -> Result<CliOutput, CliError> {
    let valid = result.is_valid();
    let status = status_name(valid);
    let payload = serde_json::json!({
        "field": field.name(),
        "widget": field.widget(),
        "locale": locale,
        "valid": valid,
        "violations": violations(&result.validity),
        "result": result,
    });

    let stdout = if mode.is_ndjson() {
        ndjson_summary(status, "validateField", Some(payload))
    } else if mode.is_json() {
        let mut document = serde_json::json!({ "status": status });
        if let (Value::Object(document), Value::Object(payload)) = (&mut document, payload) {
            document.extend(payload);
        }
        pretty_json(&document)?
    } else {
        let mut out = format!(
            "status: {status}\nfield: {}\nwidget: {}\nlocale: {locale}\nviolations: {}\n",
            field.name(),
            field.widget(),
            violations(&result.validity).join(", "),
        );
        if let Some(detail) = result.detail.as_ref() {
            let _ = writeln!(out, "detail: {}", serde_json::to_string(detail)?);
        }
        out
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: if valid {
            ExitCode::Ok
        } else {
            ExitCode::ValidationFailed
        },
    })
}

const fn status_name(valid: bool) -> &'static str {
    if valid { "ok" } else { "invalid" }
}

/// Names of the violated flags, in declaration order.
fn violations(validity: &ValidityState) -> Vec<&'static str> {
    [
        (validity.range_underflow, "rangeUnderflow"),
        (validity.range_overflow, "rangeOverflow"),
        (validity.too_short, "tooShort"),
        (validity.too_long, "tooLong"),
        (validity.type_mismatch, "typeMismatch"),
    ]
    .into_iter()
    .filter_map(|(flag, name)| flag.then_some(name))
    .collect()
}

fn read_input_file(path: &Path, what: &str) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => format!("{what}_file_not_found"),
            std::io::ErrorKind::PermissionDenied => format!("{what}_file_permission_denied"),
            _ => format!("{what}_file_io"),
        };
        ErrorEnvelope::expected(
            ErrorCode::new("cli", code),
            format!("failed to read {what} file: {error}"),
        )
        .with_metadata("path", path.to_string_lossy().to_string())
    })
}
