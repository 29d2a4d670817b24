//! Required-ness boundary contract.

use cms_fields_domain::{FieldBase, LocaleCode};
use cms_fields_shared::Result;

/// Decides whether a field must be filled for a given locale.
///
/// Errors are not handled by the validators; they reach the caller unchanged.
pub trait RequiredFieldPort: Send + Sync {
    /// Returns true when `field` is required in `locale`.
    fn is_field_required(&self, field: &FieldBase, locale: &LocaleCode) -> Result<bool>;
}
