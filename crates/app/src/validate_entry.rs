//! Validate every field of an entry in every requested locale.

use cms_fields_domain::{FieldConfig, FieldName, FieldValue, LocaleCode};
use cms_fields_ports::{LogFields, LoggerPort, RequiredFieldPort};
use cms_fields_shared::{RequestContext, Result};
use cms_fields_validate::{FieldValidation, validate_field};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Field values of one locale; `None` marks an explicit `null`.
pub type LocaleValues = BTreeMap<FieldName, Option<FieldValue>>;

/// Input payload for validating an entry.
#[derive(Debug, Clone)]
pub struct ValidateEntryInput {
    /// Collection name, for logs.
    pub collection: Box<str>,
    /// Fields of the collection.
    pub fields: Vec<FieldConfig>,
    /// Locales to validate. Locales without content validate as empty.
    pub locales: Vec<LocaleCode>,
    /// Content per locale.
    pub content: BTreeMap<LocaleCode, LocaleValues>,
}

/// Dependencies required by validate-entry.
#[derive(Clone)]
pub struct ValidateEntryDeps {
    /// Required-ness predicate.
    pub required: Arc<dyn RequiredFieldPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Validation results per locale and field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateEntryOutput {
    /// True when no field reports a violated constraint.
    pub valid: bool,
    /// Results keyed by locale, then field name.
    pub locales: BTreeMap<LocaleCode, BTreeMap<FieldName, FieldValidation>>,
}

impl ValidateEntryOutput {
    /// `(locale, field)` pairs with at least one violated constraint.
    #[must_use]
    pub fn failures(&self) -> Vec<(&LocaleCode, &FieldName)> {
        self.locales
            .iter()
            .flat_map(|(locale, fields)| {
                fields
                    .iter()
                    .filter(|(_, result)| !result.is_valid())
                    .map(move |(field, _)| (locale, field))
            })
            .collect()
    }
}

/// Run the field validators over the entry.
#[tracing::instrument(
    name = "cms.validate_entry",
    skip_all,
    fields(collection = %input.collection, locales = input.locales.len())
)]
pub fn validate_entry(
    ctx: &RequestContext,
    deps: &ValidateEntryDeps,
    input: &ValidateEntryInput,
) -> Result<ValidateEntryOutput> {
    let empty = LocaleValues::new();
    let mut locales = BTreeMap::new();

    for locale in &input.locales {
        ctx.ensure_not_cancelled("validate_entry.locale")?;
        let values = input.content.get(locale).unwrap_or(&empty);

        let mut results = BTreeMap::new();
        for field in &input.fields {
            let value = values.get(field.name()).and_then(Option::as_ref);
            let result = validate_field(field, locale, value, deps.required.as_ref())?;
            results.insert(field.name().clone(), result);
        }
        locales.insert(locale.clone(), results);
    }

    let output = ValidateEntryOutput {
        valid: locales
            .values()
            .all(|fields| fields.values().all(FieldValidation::is_valid)),
        locales,
    };

    if let Some(logger) = deps.logger.as_ref() {
        logger.info(
            "cms.validateEntry.completed",
            "Validate entry completed",
            Some(log_fields_completed(ctx, input, &output)),
        );
    }
    Ok(output)
}

fn log_fields_completed(
    ctx: &RequestContext,
    input: &ValidateEntryInput,
    output: &ValidateEntryOutput,
) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert("correlationId".into(), Value::from(ctx.correlation_id().as_str()));
    fields.insert("collection".into(), Value::from(&*input.collection));
    fields.insert("localeCount".into(), Value::from(input.locales.len()));
    fields.insert("fieldCount".into(), Value::from(input.fields.len()));
    fields.insert("valid".into(), Value::from(output.valid));
    fields.insert("failureCount".into(), Value::from(output.failures().len()));
    fields
}
