//! CLI end-to-end smoke tests: schema in YAML, entry validation, stable output.

use std::io;
use std::path::Path;
use std::process::Command;

const SCHEMA_YAML: &str = "\
version: 1
settings:
  locales: [en, de]
  default_locale: en
collections:
  - name: events
    label: Events
    fields:
      - widget: string
        name: contact
        type: email
        required: [en]
      - widget: datetime
        name: starts
        type: datetime
        picker_utc: true
        min: \"2024-01-01T00:00\"
        max: \"2024-12-31T23:59\"
";

fn run_json(args: &[&str]) -> io::Result<(Option<i32>, String)> {
    let output = Command::new(env!("CARGO_BIN_EXE_cmsf"))
        .args(args)
        .args(["--output", "json"])
        .env_remove("RUST_LOG")
        .env_remove("CMSF_DEFAULT_LOCALE")
        .env("CMSF_LOG_LEVEL", "error")
        .output()?;
    Ok((
        output.status.code(),
        String::from_utf8_lossy(&output.stdout).to_string(),
    ))
}

fn write(dir: &Path, name: &str, contents: &str) -> io::Result<String> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path.to_string_lossy().into_owned())
}

#[test]
fn yaml_schema_drives_entry_validation() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let schema = write(dir.path(), "cms.yaml", SCHEMA_YAML)?;
    let entry = write(
        dir.path(),
        "event.json",
        r#"{
          "en": { "contact": "team@example", "starts": "2025-02-01T10:00:00.000Z" },
          "de": { "contact": "team@example.org", "starts": "2024-06-01T10:00:00.000Z" }
        }"#,
    )?;

    let (code, stdout) = run_json(&[
        "validate",
        "--schema",
        &schema,
        "--collection",
        "events",
        "--entry",
        &entry,
    ])?;
    assert_eq!(code, Some(4));

    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["status"], "invalid");
    assert_eq!(value["locales"]["en"]["contact"]["validity"]["typeMismatch"], true);
    assert_eq!(value["locales"]["en"]["starts"]["validity"]["rangeOverflow"], true);
    assert_eq!(value["locales"]["de"]["contact"]["validity"]["typeMismatch"], false);
    assert_eq!(value["locales"]["de"]["starts"]["validity"]["rangeOverflow"], false);
    Ok(())
}

#[test]
fn schema_show_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let schema = write(dir.path(), "cms.yml", SCHEMA_YAML)?;

    let (first_code, first) = run_json(&["schema", "show", "--path", &schema])?;
    let (_, second) = run_json(&["schema", "show", "--path", &schema])?;

    assert_eq!(first_code, Some(0));
    assert_eq!(first, second, "schema show output should be deterministic");

    let value: serde_json::Value = serde_json::from_str(&first)?;
    assert_eq!(value["schema"]["collections"][0]["name"], "events");
    assert_eq!(value["schema"]["settings"]["default_locale"], "en");
    Ok(())
}
