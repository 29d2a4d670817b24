//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, ndjson_summary, pretty_json};
use cms_fields_app::app_crate_version;
use cms_fields_config::{CURRENT_SCHEMA_VERSION, config_crate_version};
use cms_fields_validate::validate_crate_version;

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_ndjson() {
        ndjson_summary("ok", "info", Some(build_payload()))
    } else if mode.is_json() {
        pretty_json(&serde_json::json!({
            "status": "ok",
            "build": build_payload(),
        }))?
    } else {
        format!(
            "status: ok\nname: {}\nversion: {}\nvalidate: {}\nconfig: {}\napp: {}\nschemaVersion: {}\n",
            env!("CARGO_BIN_NAME"),
            env!("CARGO_PKG_VERSION"),
            validate_crate_version(),
            config_crate_version(),
            app_crate_version(),
            CURRENT_SCHEMA_VERSION,
        )
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn build_payload() -> serde_json::Value {
    serde_json::json!({
        "name": env!("CARGO_BIN_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "validateVersion": validate_crate_version(),
        "configVersion": config_crate_version(),
        "appVersion": app_crate_version(),
        "schemaVersion": CURRENT_SCHEMA_VERSION,
    })
}
