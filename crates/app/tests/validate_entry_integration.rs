//! Integration tests for the validate-entry use case.

use cms_fields_adapters::{BufferLogSink, JsonLogger};
use cms_fields_app::{LocaleValues, ValidateEntryDeps, ValidateEntryInput, validate_entry};
use cms_fields_domain::{FieldConfig, FieldName, FieldValue, LocaleCode};
use cms_fields_ports::LogLevel;
use cms_fields_shared::{ErrorEnvelope, RequestContext};
use cms_fields_testkit::errors::requirement_error;
use cms_fields_testkit::in_memory::{FixedRequirement, MemoryLogger};
use cms_fields_validate::ConfiguredRequirement;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

fn fields() -> Result<Vec<FieldConfig>, serde_json::Error> {
    serde_json::from_str(
        r#"[
            {"widget":"string","name":"title","minlength":3,"maxlength":20},
            {"widget":"string","name":"contact","type":"email","required":false},
            {"widget":"number","name":"rating","value_type":"int","min":1,"max":5,"required":["en"]},
            {"widget":"datetime","name":"date","type":"date","min":"2020-01-01"}
        ]"#,
    )
}

fn locale(code: &str) -> Result<LocaleCode, ErrorEnvelope> {
    LocaleCode::parse(code).map_err(ErrorEnvelope::from)
}

fn values(pairs: &[(&str, Option<FieldValue>)]) -> Result<LocaleValues, ErrorEnvelope> {
    pairs
        .iter()
        .map(|(name, value)| Ok((FieldName::parse(name).map_err(ErrorEnvelope::from)?, value.clone())))
        .collect()
}

#[test]
fn reports_per_locale_results() -> Result<(), Box<dyn Error>> {
    let logger = Arc::new(MemoryLogger::default());
    let deps = ValidateEntryDeps {
        required: Arc::new(ConfiguredRequirement),
        logger: Some(logger.clone()),
    };
    let content = BTreeMap::from([
        (
            locale("en")?,
            values(&[
                ("title", Some("Hello world".into())),
                ("contact", Some("team@example.com".into())),
                ("rating", Some(FieldValue::Number(4.0))),
                ("date", Some("2023-06-15".into())),
            ])?,
        ),
        (
            locale("fr")?,
            values(&[
                ("title", Some("Yo".into())),
                ("contact", Some("nobody@localhost".into())),
                ("date", Some("2019-12-31".into())),
            ])?,
        ),
    ]);
    let input = ValidateEntryInput {
        collection: "posts".into(),
        fields: fields()?,
        locales: vec![locale("en")?, locale("fr")?],
        content,
    };

    let ctx = RequestContext::new_request();
    let output = validate_entry(&ctx, &deps, &input)?;
    assert!(!output.valid);

    let en = output.locales.get(&locale("en")?).ok_or("en results missing")?;
    assert!(en.values().all(|result| result.is_valid()));

    let failures: Vec<(String, String)> = output
        .failures()
        .into_iter()
        .map(|(locale, field)| (locale.to_string(), field.to_string()))
        .collect();
    assert_eq!(
        failures,
        vec![
            ("fr".to_owned(), "contact".to_owned()),
            ("fr".to_owned(), "date".to_owned()),
            ("fr".to_owned(), "title".to_owned()),
        ]
    );

    let completed = logger
        .find("cms.validateEntry.completed", LogLevel::Info)
        .and_then(|event| event.fields)
        .ok_or("completion event missing")?;
    assert_eq!(completed.get("failureCount"), Some(&serde_json::json!(3)));
    assert_eq!(
        completed.get("correlationId"),
        Some(&serde_json::json!(ctx.correlation_id().as_str()))
    );
    Ok(())
}

#[test]
fn missing_locale_content_validates_as_empty() -> Result<(), Box<dyn Error>> {
    let deps = ValidateEntryDeps {
        required: Arc::new(ConfiguredRequirement),
        logger: None,
    };
    let input = ValidateEntryInput {
        collection: "posts".into(),
        fields: fields()?,
        locales: vec![locale("en")?, locale("de")?],
        content: BTreeMap::new(),
    };

    let output = validate_entry(&RequestContext::new_request(), &deps, &input)?;
    let rating = |code: &str| -> Result<bool, Box<dyn Error>> {
        let results = output.locales.get(&locale(code)?).ok_or("locale missing")?;
        let field = FieldName::parse("rating")?;
        Ok(results.get(&field).ok_or("rating missing")?.validity.type_mismatch)
    };
    // The int rating is required in `en` only.
    assert!(rating("en")?);
    assert!(!rating("de")?);
    Ok(())
}

#[test]
fn requirement_errors_propagate() -> Result<(), Box<dyn Error>> {
    let deps = ValidateEntryDeps {
        required: Arc::new(FixedRequirement::Failing(requirement_error())),
        logger: None,
    };
    let input = ValidateEntryInput {
        collection: "posts".into(),
        fields: fields()?,
        locales: vec![locale("en")?],
        content: BTreeMap::new(),
    };

    let result = validate_entry(&RequestContext::new_request(), &deps, &input);
    assert_eq!(result.err(), Some(requirement_error()));
    Ok(())
}

#[test]
fn completion_is_logged_as_json() -> Result<(), Box<dyn Error>> {
    let sink = Arc::new(BufferLogSink::default());
    let deps = ValidateEntryDeps {
        required: Arc::new(FixedRequirement::Always(false)),
        logger: Some(Arc::new(JsonLogger::new(sink.clone()))),
    };
    let input = ValidateEntryInput {
        collection: "posts".into(),
        fields: fields()?,
        locales: vec![locale("en")?],
        content: BTreeMap::new(),
    };

    let output = validate_entry(&RequestContext::new_request(), &deps, &input)?;
    assert!(output.valid);

    let lines = sink.take();
    let line: serde_json::Value = serde_json::from_str(lines.first().ok_or("no log line")?)?;
    assert_eq!(line["event"], "cms.validateEntry.completed");
    assert_eq!(line["fields"]["valid"], true);
    Ok(())
}
