//! Format-datetime command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, ndjson_summary, pretty_json};
use cms_fields_domain::DateTimeInputType;
use cms_fields_validate::get_formatted_date_time;

/// Render a stored date/time value the way the editor displays it.
pub fn run_format_datetime(
    mode: OutputMode,
    input_type: DateTimeInputType,
    value: &str,
) -> Result<CliOutput, CliError> {
    let formatted = get_formatted_date_time(input_type, value);
    let payload = serde_json::json!({
        "type": input_type,
        "value": value,
        "formatted": formatted,
    });

    let stdout = if mode.is_ndjson() {
        ndjson_summary("ok", "formatDatetime", Some(payload))
    } else if mode.is_json() {
        pretty_json(&serde_json::json!({ "status": "ok", "result": payload }))?
    } else {
        format!("{formatted}\n")
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

/// Clap value parser for `--type`.
pub fn parse_input_type(value: &str) -> Result<DateTimeInputType, String> {
    value.parse()
}
