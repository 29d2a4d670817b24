//! Output format helpers for CLI commands.

use clap::{Args, ValueEnum};
use serde_json::Value;

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text output.
    Text,
    /// Machine-friendly JSON output.
    Json,
    /// Line-delimited JSON (NDJSON) output.
    Ndjson,
}

/// Output-related CLI flags.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses.
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
    /// Emit machine-friendly defaults (NDJSON output, no progress lines).
    #[arg(long, global = true)]
    pub agent: bool,
    /// Suppress progress output on stderr.
    #[arg(long, global = true)]
    pub no_progress: bool,
}

/// Output mode derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub format: OutputFormat,
    pub no_progress: bool,
}

impl OutputMode {
    /// Build output mode from CLI flags.
    #[must_use]
    pub const fn from_args(args: &OutputArgs) -> Self {
        let format = match (args.output, args.agent) {
            (Some(value), _) => value,
            (None, true) => OutputFormat::Ndjson,
            (None, false) => OutputFormat::Text,
        };

        Self {
            format,
            no_progress: args.agent || args.no_progress,
        }
    }

    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    #[must_use]
    pub const fn is_ndjson(self) -> bool {
        matches!(self.format, OutputFormat::Ndjson)
    }
}

/// Pretty JSON document with a trailing newline.
pub fn pretty_json(payload: &Value) -> Result<String, serde_json::Error> {
    let mut output = serde_json::to_string_pretty(payload)?;
    output.push('\n');
    Ok(output)
}

/// One NDJSON line.
pub fn json_line(payload: &Value) -> Result<String, serde_json::Error> {
    let mut output = serde_json::to_string(payload)?;
    output.push('\n');
    Ok(output)
}

/// Summary line closing an NDJSON stream; `extra` object keys are merged in.
pub fn ndjson_summary(status: &str, kind: &str, extra: Option<Value>) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert("type".to_owned(), Value::String("summary".to_owned()));
    payload.insert("status".to_owned(), Value::String(status.to_owned()));
    payload.insert("kind".to_owned(), Value::String(kind.to_owned()));
    if let Some(Value::Object(map)) = extra {
        payload.extend(map);
    }
    json_line(&Value::Object(payload)).unwrap_or_else(|_| {
        "{\"type\":\"summary\",\"status\":\"error\",\"kind\":\"internal\"}\n".to_owned()
    })
}
