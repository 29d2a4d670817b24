//! CLI integration tests.

use std::path::Path;
use std::process::Command;

const SCHEMA: &str = r#"{
  "version": 1,
  "settings": { "locales": ["en", "fr"] },
  "collections": [
    {
      "name": "posts",
      "fields": [
        { "widget": "string", "name": "title", "minlength": 3, "maxlength": 20 },
        { "widget": "number", "name": "rating", "min": 1, "max": 5 },
        { "widget": "datetime", "name": "published", "type": "date", "required": ["en"] }
      ]
    }
  ]
}
"#;

fn run_cli(args: &[&str]) -> std::io::Result<std::process::Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cmsf"));
    command.args(args);
    scrub_scoped_env(&mut command);
    command.output()
}

fn scrub_scoped_env(command: &mut Command) {
    for (key, _) in std::env::vars() {
        if key.starts_with("CMSF_") || key == "RUST_LOG" {
            command.env_remove(key);
        }
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> std::io::Result<String> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path.to_string_lossy().into_owned())
}

#[test]
fn cli_version_runs() -> std::io::Result<()> {
    let output = run_cli(&["--version"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "--version failed: {stderr}");
    assert!(stdout.starts_with("cmsf "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[test]
fn cli_info_json_runs() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&["info", "--output", "json"])?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["status"], "ok");
    assert_eq!(value["build"]["name"], "cmsf");
    assert_eq!(value["build"]["schemaVersion"], 1);
    Ok(())
}

#[test]
fn cli_schema_check_summarizes_collections() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let schema = write_file(dir.path(), "cms.json", SCHEMA)?;

    let output = run_cli(&["schema", "check", "--path", &schema, "--no-progress"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "schema check failed: {stderr}");
    assert!(stdout.contains("status: ok"));
    assert!(stdout.contains("locales: en, fr"));
    assert!(stdout.contains("collection: posts (3 fields)"));
    assert!(stderr.is_empty());
    Ok(())
}

#[test]
fn cli_schema_show_renders_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let schema = write_file(dir.path(), "cms.json", SCHEMA)?;

    let output = run_cli(&["schema", "show", "--path", &schema, "--format", "toml"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("[[collections]]"));
    assert!(stdout.contains("name = \"posts\""));
    Ok(())
}

#[test]
fn cli_schema_check_missing_file_is_io() -> std::io::Result<()> {
    let output = run_cli(&["schema", "check", "--path", "/nonexistent/cms.json"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(3));
    assert!(stdout.contains("code: config:schema_file_not_found"));
    Ok(())
}

#[test]
fn cli_schema_check_rejects_duplicate_collections() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let schema = write_file(
        dir.path(),
        "cms.json",
        r#"{"version":1,"collections":[{"name":"posts","fields":[]},{"name":"posts","fields":[]}]}"#,
    )?;

    let output = run_cli(&["schema", "check", "--path", &schema, "--output", "json"])?;
    assert_eq!(output.status.code(), Some(2));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"]["code"], "duplicate_collection");
    Ok(())
}

#[test]
fn cli_validate_passes_a_valid_entry() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let schema = write_file(dir.path(), "cms.json", SCHEMA)?;
    let entry = write_file(
        dir.path(),
        "entry.json",
        r#"{
          "en": { "title": "Hello world", "rating": 4, "published": "2024-03-01" },
          "fr": { "title": "Bonjour", "rating": 5 }
        }"#,
    )?;

    let output = run_cli(&[
        "validate",
        "--schema",
        &schema,
        "--collection",
        "posts",
        "--entry",
        &entry,
    ])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "validate failed: {stdout}{stderr}");
    assert!(stdout.contains("status: ok"));
    assert!(stdout.contains("failures: 0"));
    Ok(())
}

#[test]
fn cli_validate_reports_failures_with_exit_code_four() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let schema = write_file(dir.path(), "cms.json", SCHEMA)?;
    let entry = write_file(
        dir.path(),
        "entry.json",
        r#"{ "en": { "title": "Hi", "rating": 9, "published": "2024-03-01" } }"#,
    )?;

    let output = run_cli(&[
        "validate",
        "--schema",
        &schema,
        "--collection",
        "posts",
        "--entry",
        &entry,
        "--locale",
        "en",
        "--agent",
    ])?;
    assert_eq!(output.status.code(), Some(4));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    let Some(summary) = lines.last() else {
        return Err("expected ndjson output".into());
    };
    assert_eq!(summary["type"], "summary");
    assert_eq!(summary["status"], "invalid");
    assert_eq!(summary["failureCount"], 2);

    let title = lines
        .iter()
        .find(|line| line["field"] == "title")
        .ok_or("missing title line")?;
    assert_eq!(title["violations"], serde_json::json!(["tooShort"]));
    let rating = lines
        .iter()
        .find(|line| line["field"] == "rating")
        .ok_or("missing rating line")?;
    assert_eq!(rating["violations"], serde_json::json!(["rangeOverflow"]));
    Ok(())
}

#[test]
fn cli_validate_unknown_collection_is_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let schema = write_file(dir.path(), "cms.json", SCHEMA)?;
    let entry = write_file(dir.path(), "entry.json", "{}")?;

    let output = run_cli(&[
        "validate",
        "--schema",
        &schema,
        "--collection",
        "pages",
        "--entry",
        &entry,
    ])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("code: cli:unknown_collection"));
    Ok(())
}

#[test]
fn cli_validate_field_uses_env_default_locale() -> Result<(), Box<dyn std::error::Error>> {
    let field = r#"{"widget":"number","name":"n","value_type":"int","required":["fr"]}"#;

    let missing_in_fr = Command::new(env!("CARGO_BIN_EXE_cmsf"))
        .args(["validate-field", "--field-json", field, "--output", "json"])
        .env_remove("RUST_LOG")
        .env("CMSF_DEFAULT_LOCALE", "fr")
        .output()?;
    assert_eq!(missing_in_fr.status.code(), Some(4));
    let value: serde_json::Value = serde_json::from_slice(&missing_in_fr.stdout)?;
    assert_eq!(value["locale"], "fr");
    assert_eq!(value["violations"], serde_json::json!(["typeMismatch"]));

    let missing_in_en = run_cli(&["validate-field", "--field-json", field, "--locale", "en"])?;
    assert!(missing_in_en.status.success());
    Ok(())
}

#[test]
fn cli_validate_field_rejects_empty_env_locale() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_cmsf"))
        .args([
            "validate-field",
            "--field-json",
            r#"{"widget":"string","name":"title"}"#,
            "--value-json",
            r#""x""#,
        ])
        .env("CMSF_DEFAULT_LOCALE", " ")
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("code: config:empty_env_var"));
    Ok(())
}

#[test]
fn cli_format_datetime_runs() -> std::io::Result<()> {
    let output = run_cli(&[
        "format-datetime",
        "--type",
        "datetime-local",
        "--value",
        "2023-06-15T14:30",
    ])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout, "2023-06-15, 02:30 PM\n");
    Ok(())
}

#[test]
fn cli_format_datetime_rejects_unknown_type() -> std::io::Result<()> {
    let output = run_cli(&["format-datetime", "--type", "week", "--value", "2023-W01"])?;
    assert!(!output.status.success());
    Ok(())
}
