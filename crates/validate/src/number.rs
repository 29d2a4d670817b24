//! Number field validation.

use crate::constraint::{above, below, value_to_number};
use cms_fields_domain::{BoundValue, FieldValue, LocaleCode, NumberField, NumberValidity};
use cms_fields_ports::RequiredFieldPort;
use cms_fields_shared::Result;
use serde::Serialize;

/// Result of [`validate_number_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberFieldValidation {
    /// Violated constraints.
    pub validity: NumberValidity,
}

/// Validate a number value against its range and required-ness.
///
/// Underflow wins over overflow. Text values are coerced first; text that is
/// not numeric fails both comparisons. The required-ness predicate is only
/// consulted for strictly numeric fields and its errors are returned as-is.
pub fn validate_number_field(
    field: &NumberField,
    locale: &LocaleCode,
    value: Option<&FieldValue>,
    required: &dyn RequiredFieldPort,
) -> Result<NumberFieldValidation> {
    let min = field.min.as_ref().and_then(BoundValue::as_finite_number);
    let max = field.max.as_ref().and_then(BoundValue::as_finite_number);
    let number = value.map(value_to_number);

    let range_underflow = match (min, number) {
        (Some(min), Some(number)) => below(number, min),
        _ => false,
    };
    let range_overflow = !range_underflow
        && match (max, number) {
            (Some(max), Some(number)) => above(number, max),
            _ => false,
        };

    let type_mismatch = field.value_type.is_strictly_numeric()
        && required.is_field_required(&field.base, locale)?
        && value.is_none();

    Ok(NumberFieldValidation {
        validity: NumberValidity {
            range_underflow,
            range_overflow,
            type_mismatch,
        },
    })
}
