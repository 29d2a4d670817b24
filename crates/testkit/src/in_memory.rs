//! In-memory implementations of the port contracts.
//!
//! These implementations are intended for:
//! - Unit/integration tests of the use cases
//! - Deterministic contract tests for the ports layer

use cms_fields_ports::{
    BoxFuture, FieldBase, LocaleCode, LogEvent, LogFields, LogLevel, LoggerPort,
    RequiredFieldPort, SaveChangesPort, SaveChangesRequest,
};
use cms_fields_shared::{ErrorEnvelope, RequestContext, Result};
use std::sync::{Arc, Mutex, PoisonError};

/// A no-op logger implementation.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _event: LogEvent) {}

    fn child(&self, _fields: LogFields) -> Box<dyn LoggerPort> {
        Box::new(Self)
    }
}

/// Logger that captures every event, with child fields merged in.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    events: Arc<Mutex<Vec<LogEvent>>>,
    base_fields: LogFields,
}

impl MemoryLogger {
    /// Snapshot of the captured events.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Names of the captured events, in emission order.
    pub fn event_names(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| event.event.into_string())
            .collect()
    }

    /// First captured event with the given name and level.
    pub fn find(&self, name: &str, level: LogLevel) -> Option<LogEvent> {
        self.events()
            .into_iter()
            .find(|event| &*event.event == name && event.level == level)
    }
}

impl LoggerPort for MemoryLogger {
    fn log(&self, mut event: LogEvent) {
        if !self.base_fields.is_empty() {
            let mut fields = self.base_fields.clone();
            fields.extend(event.fields.take().unwrap_or_default());
            event.fields = Some(fields);
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut base_fields = self.base_fields.clone();
        base_fields.extend(fields);
        Box::new(Self {
            events: Arc::clone(&self.events),
            base_fields,
        })
    }
}

/// Save port that accepts and records every request.
#[derive(Debug, Clone, Default)]
pub struct RecordingSaveChanges {
    requests: Arc<tokio::sync::Mutex<Vec<SaveChangesRequest>>>,
}

impl RecordingSaveChanges {
    /// Requests received so far.
    pub async fn requests(&self) -> Vec<SaveChangesRequest> {
        self.requests.lock().await.clone()
    }
}

impl SaveChangesPort for RecordingSaveChanges {
    fn save_changes(
        &self,
        ctx: &RequestContext,
        request: SaveChangesRequest,
    ) -> BoxFuture<'_, Result<()>> {
        let ctx = ctx.clone();
        Box::pin(async move {
            ctx.ensure_not_cancelled("save_changes")?;
            self.requests.lock().await.push(request);
            Ok(())
        })
    }
}

/// Save port that always fails with a configured error.
#[derive(Debug, Clone)]
pub struct FailingSaveChanges {
    error: ErrorEnvelope,
}

impl FailingSaveChanges {
    /// Fail every save with `error`.
    #[must_use]
    pub const fn new(error: ErrorEnvelope) -> Self {
        Self { error }
    }
}

impl SaveChangesPort for FailingSaveChanges {
    fn save_changes(
        &self,
        _ctx: &RequestContext,
        _request: SaveChangesRequest,
    ) -> BoxFuture<'_, Result<()>> {
        let error = self.error.clone();
        Box::pin(async move { Err(error) })
    }
}

/// Required-ness predicate with a fixed answer.
#[derive(Debug, Clone)]
pub enum FixedRequirement {
    /// Every field is (or is not) required, in every locale.
    Always(bool),
    /// Every lookup fails with the given error.
    Failing(ErrorEnvelope),
}

impl RequiredFieldPort for FixedRequirement {
    fn is_field_required(&self, _field: &FieldBase, _locale: &LocaleCode) -> Result<bool> {
        match self {
            Self::Always(required) => Ok(*required),
            Self::Failing(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::save_failed_error;
    use cms_fields_ports::{CommitType, FileChange};
    use serde_json::json;

    fn request() -> SaveChangesRequest {
        SaveChangesRequest {
            changes: vec![FileChange::delete_asset("static/a.png")],
            commit_type: CommitType::Delete,
            collection: Some("posts".into()),
        }
    }

    #[tokio::test]
    async fn recording_save_keeps_requests() -> Result<()> {
        let save = RecordingSaveChanges::default();
        let ctx = RequestContext::new_request();
        save.save_changes(&ctx, request()).await?;
        save.save_changes(&ctx, request()).await?;
        assert_eq!(save.requests().await.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn recording_save_honours_cancellation() {
        let save = RecordingSaveChanges::default();
        let ctx = RequestContext::new_request();
        ctx.cancel();
        let result = save.save_changes(&ctx, request()).await;
        assert!(result.is_err_and(|error| error.is_cancelled()));
        assert!(save.requests().await.is_empty());
    }

    #[tokio::test]
    async fn failing_save_returns_its_error() {
        let save = FailingSaveChanges::new(save_failed_error());
        let result = save
            .save_changes(&RequestContext::new_request(), request())
            .await;
        assert_eq!(result, Err(save_failed_error()));
    }

    #[test]
    fn memory_logger_merges_child_fields() {
        let logger = MemoryLogger::default();
        let child = logger.child(LogFields::from([(Box::from("collection"), json!("posts"))]));
        child.info("cms.test", "hello", None);

        let event = logger.find("cms.test", LogLevel::Info);
        let fields = event.and_then(|event| event.fields).unwrap_or_default();
        assert_eq!(fields.get("collection"), Some(&json!("posts")));
        assert_eq!(logger.event_names(), vec!["cms.test".to_owned()]);
    }
}
