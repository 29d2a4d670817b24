//! CLI command handlers.

pub mod format_datetime;
pub mod info;
pub mod schema;
pub mod validate;

pub use format_datetime::run_format_datetime;
pub use info::run_info;
pub use schema::{SchemaShowFormat, run_schema_check, run_schema_show};
pub use validate::{ValidateCommandInput, run_validate, run_validate_field};
