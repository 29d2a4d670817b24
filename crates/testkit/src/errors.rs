//! Error fixtures shared by the use-case tests.

use cms_fields_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// A cancellation error fixture.
pub fn cancelled_error() -> ErrorEnvelope {
    ErrorEnvelope::cancelled("cancelled")
}

/// A retriable backend failure, as a git host outage would surface.
pub fn save_failed_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::new("backend", "save_failed"),
        "failed to save changes",
        ErrorClass::Retriable,
    )
}

/// A required-ness lookup failure.
pub fn requirement_error() -> ErrorEnvelope {
    ErrorEnvelope::invariant(
        ErrorCode::new("validate", "required_lookup"),
        "required-ness lookup failed",
    )
}
