//! # cms-fields-ports
//!
//! Port traits for the cms-fields hexagonal architecture.
//!
//! This crate defines the interfaces between the validators/use cases and
//! their collaborators (required-ness rules, the content backend, logging).
//! It depends only on `domain` and `shared`.

use std::future::Future;
use std::pin::Pin;

/// Boxed future used by port traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod changes;
pub mod logger;
pub mod requirement;

pub use changes::*;
pub use logger::*;
pub use requirement::*;

// Re-export selected domain types used in port signatures, so adapter crates
// can implement ports without directly depending on `cms-fields-domain`.
pub use cms_fields_domain::{CommitType, FieldBase, FileChange, LocaleCode};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports_only_reach_domain_and_shared() {
        let manifest = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let internal: Vec<&str> = manifest
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_suffix(".workspace = true"))
            .filter(|name| name.starts_with("cms-fields-"))
            .collect();
        assert_eq!(internal, ["cms-fields-domain", "cms-fields-shared"]);
    }

    #[test]
    fn ports_crate_version_is_set() {
        assert!(!ports_crate_version().is_empty());
    }
}
