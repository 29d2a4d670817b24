//! # cms-fields-app
//!
//! Application use cases of the entry editor: validating entries against
//! their collection's fields, and deleting entries with their files.
//! This crate depends on `ports`, `validate`, `domain`, and `shared`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod delete_entries;
pub mod state;
pub mod validate_entry;

pub use delete_entries::{
    DeleteEntriesDeps, DeleteEntriesInput, DeleteEntriesOutput, delete_entries,
    plan_entry_deletion,
};
pub use state::EditorState;
pub use validate_entry::{
    LocaleValues, ValidateEntryDeps, ValidateEntryInput, ValidateEntryOutput, validate_entry,
};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
