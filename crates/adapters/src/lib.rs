//! # cms-fields-adapters
//!
//! Adapter implementations for ports. Today that is structured logging:
//! a JSON-lines `LoggerPort` and the sinks it writes to.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod log_sink;
pub mod logger;

pub use log_sink::{BufferLogSink, LogSink, StderrLogSink};
pub use logger::JsonLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_fields_ports::ports_crate_version;

    #[test]
    fn adapters_crate_compiles() {
        assert!(!adapters_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
    }
}
