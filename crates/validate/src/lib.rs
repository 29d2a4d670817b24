//! # cms-fields-validate
//!
//! Field validators for the entry editor: string/text, number, and
//! date/time. Each validator is a pure function of the field configuration
//! and one locale's candidate value, returning native-style validity flags
//! plus detail used for UI hints.
//!
//! Malformed bounds or unreadable values never raise: the affected
//! constraint is simply reported as not violated. The only error path is the
//! required-ness predicate consulted by the number validator.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod constraint;
pub mod date_time;
pub mod dispatch;
pub mod number;
pub mod requirement;
pub mod string;

pub use date_time::{
    DEFAULT_MAX_DATE, DEFAULT_MAX_DATE_TIME, DateTimeConfig, DateTimeFieldValidation,
    format_time, get_formatted_date_time, get_input_value, parse_date_time_config,
    validate_date_time_field,
};
pub use dispatch::{FieldDetail, FieldValidation, validate_field};
pub use number::{NumberFieldValidation, validate_number_field};
pub use requirement::ConfiguredRequirement;
pub use string::{StringFieldRef, StringFieldValidation, validate_string_field};

/// Returns the validate crate version.
#[must_use]
pub const fn validate_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
