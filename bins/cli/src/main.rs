//! `cmsf`: validate CMS schemas, entries, and field values from the shell.

mod commands;
mod error;
mod format;

use crate::commands::format_datetime::parse_input_type;
use crate::commands::{
    SchemaShowFormat, ValidateCommandInput, run_format_datetime, run_info, run_schema_check,
    run_schema_show, run_validate, run_validate_field,
};
use crate::error::{CliError, ExitCode, envelope_exit_code};
use crate::format::{OutputArgs, OutputMode, json_line, pretty_json};
use clap::{Parser, Subcommand};
use cms_fields_config::{LogFilterLevel, RuntimeSettings, SettingsEnv, apply_env_overrides};
use cms_fields_domain::DateTimeInputType;
use cms_fields_shared::ErrorEnvelope;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cmsf", version, about = "Content field validation for a git-backed CMS")]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show build and version details.
    Info,
    /// Schema file commands.
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
    /// Validate an entry file against a collection.
    Validate {
        /// Schema file (.json, .toml, .yaml).
        #[arg(long)]
        schema: PathBuf,
        /// Collection name.
        #[arg(long)]
        collection: String,
        /// Entry content as JSON.
        #[arg(long)]
        entry: PathBuf,
        /// Locales to validate (repeatable). Defaults to every schema locale.
        #[arg(long = "locale")]
        locales: Vec<String>,
    },
    /// Validate one value against one field configuration.
    ValidateField {
        /// Field configuration as JSON.
        #[arg(long)]
        field_json: String,
        /// Candidate value as JSON; omitted means no value.
        #[arg(long)]
        value_json: Option<String>,
        /// Locale used for required-ness checks.
        #[arg(long)]
        locale: Option<String>,
    },
    /// Render a stored date/time value for display.
    FormatDatetime {
        /// Input type: date, time, or datetime-local.
        #[arg(long = "type", value_parser = parse_input_type)]
        input_type: DateTimeInputType,
        /// Stored value.
        #[arg(long)]
        value: String,
    },
}

#[derive(Debug, Subcommand)]
enum SchemaCommands {
    /// Load and validate a schema file.
    Check {
        /// Schema file path.
        #[arg(long)]
        path: PathBuf,
    },
    /// Print the normalized schema.
    Show {
        /// Schema file path.
        #[arg(long)]
        path: PathBuf,
        /// Document format for text output.
        #[arg(long, value_enum, default_value_t = SchemaShowFormat::Json)]
        format: SchemaShowFormat,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);
    init_tracing(mode);

    match run(&cli.command, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `CMSF_LOG_LEVEL`.
fn init_tracing(mode: OutputMode) {
    let level = SettingsEnv::from_std_env().map_or(LogFilterLevel::default(), |env| {
        apply_env_overrides(RuntimeSettings::default(), &env).log_level
    });
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,cms_fields={level},cmsf={level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);
    let _ = if mode.is_ndjson() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn run(command: &Commands, mode: OutputMode) -> Result<CliOutput, CliError> {
    tracing::debug!(command = command_name(command), "running command");
    match command {
        Commands::Info => run_info(mode),
        Commands::Schema { command } => match command {
            SchemaCommands::Check { path } => run_schema_check(mode, path),
            SchemaCommands::Show { path, format } => run_schema_show(mode, path, *format),
        },
        Commands::Validate {
            schema,
            collection,
            entry,
            locales,
        } => run_validate(
            mode,
            ValidateCommandInput {
                schema,
                collection,
                entry,
                locales,
            },
        ),
        Commands::ValidateField {
            field_json,
            value_json,
            locale,
        } => run_validate_field(mode, field_json, value_json.as_deref(), locale.as_deref()),
        Commands::FormatDatetime { input_type, value } => {
            run_format_datetime(mode, *input_type, value)
        },
    }
}

const fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Info => "info",
        Commands::Schema {
            command: SchemaCommands::Check { .. },
        } => "schema check",
        Commands::Schema {
            command: SchemaCommands::Show { .. },
        } => "schema show",
        Commands::Validate { .. } => "validate",
        Commands::ValidateField { .. } => "validate-field",
        Commands::FormatDatetime { .. } => "format-datetime",
    }
}

/// Render an error envelope in the selected format with its exit code.
pub(crate) fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> CliOutput {
    tracing::debug!(code = %error.code, kind = %error.kind, "command failed");

    let mut stderr = String::new();
    log_info(&mut stderr, "command failed", mode.no_progress);

    let stdout = if mode.is_ndjson() {
        json_line(&serde_json::json!({
            "type": "error",
            "status": "error",
            "error": error,
        }))
        .unwrap_or_else(|_| INTERNAL_ERROR_JSON.to_owned())
    } else if mode.is_json() {
        // This is a CLI boundary, so JSON serialization errors are internal.
        pretty_json(&serde_json::json!({
            "status": "error",
            "error": error,
        }))
        .unwrap_or_else(|_| INTERNAL_ERROR_JSON.to_owned())
    } else {
        format_error_text(error)
    };

    CliOutput {
        stdout,
        stderr,
        exit_code: envelope_exit_code(error),
    }
}

const INTERNAL_ERROR_JSON: &str =
    "{\"status\":\"error\",\"error\":{\"kind\":\"invariant\",\"message\":\"internal error\"}}\n";

fn format_error_text(error: &ErrorEnvelope) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    let _ = writeln!(out, "code: {}", error.code);
    let _ = writeln!(out, "message: {}", error.message);
    let _ = writeln!(out, "kind: {}", error.kind);

    if !error.metadata.is_empty() {
        out.push_str("meta:\n");
        for (key, value) in &error.metadata {
            let _ = writeln!(out, "  {key}: {value}");
        }
    }
    out
}

pub(crate) fn log_info(stderr: &mut String, message: &str, no_progress: bool) {
    if no_progress {
        return;
    }
    stderr.push_str("info: ");
    stderr.push_str(message);
    stderr.push('\n');
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
