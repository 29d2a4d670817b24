//! Delete entries (and optionally their assets) in one commit.

use crate::EditorState;
use cms_fields_domain::{CommitType, Entry, EntryId, FileChange, ToastState};
use cms_fields_ports::{LogFields, LoggerPort, SaveChangesPort, SaveChangesRequest};
use cms_fields_shared::{ErrorEnvelope, RequestContext, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

/// Input payload for deleting entries.
#[derive(Debug, Clone, Default)]
pub struct DeleteEntriesInput {
    /// Entries to delete.
    pub ids: Vec<EntryId>,
    /// Asset files to delete along with the entries.
    pub asset_paths: Vec<Box<str>>,
    /// Collection the entries belong to, when one is selected.
    pub collection: Option<Box<str>>,
}

/// Dependencies required by delete-entries.
#[derive(Clone)]
pub struct DeleteEntriesDeps {
    /// Content backend.
    pub save_changes: Arc<dyn SaveChangesPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Outcome of a committed deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteEntriesOutput {
    /// Changes that were committed.
    pub changes: Vec<FileChange>,
    /// Entries removed from the editor state.
    pub removed_entries: usize,
    /// Assets removed from the editor state.
    pub removed_assets: usize,
}

/// Build the change set deleting `ids` and `asset_paths`.
///
/// Every locale file of each known entry gets one delete change; unknown ids
/// are skipped. Locales sharing a file (single-file i18n) yield one change for
/// that path, keeping the first occurrence. Asset deletions follow, in input
/// order.
#[must_use]
pub fn plan_entry_deletion(
    entries: &[Entry],
    ids: &[EntryId],
    asset_paths: &[Box<str>],
) -> Vec<FileChange> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut changes: Vec<FileChange> = ids
        .iter()
        .filter_map(|id| entries.iter().find(|entry| &entry.id == id))
        .flat_map(|entry| {
            entry
                .locales
                .values()
                .map(move |locale| (&*entry.slug, &*locale.path))
        })
        .filter(|(_, path)| seen.insert(*path))
        .map(|(slug, path)| FileChange::delete_entry_file(slug, path))
        .collect();

    changes.extend(asset_paths.iter().map(|path| FileChange::delete_asset(path)));
    changes
}

/// Commit the deletion, then update the editor state.
///
/// The state is only touched after the backend accepted the commit: on error
/// the entries, assets, and toast stay as they were.
#[tracing::instrument(
    name = "cms.delete_entries",
    skip_all,
    fields(entries = input.ids.len(), assets = input.asset_paths.len())
)]
pub async fn delete_entries(
    ctx: &RequestContext,
    deps: &DeleteEntriesDeps,
    state: &mut EditorState,
    input: DeleteEntriesInput,
) -> Result<DeleteEntriesOutput> {
    let started_at = Instant::now();
    if let Some(logger) = deps.logger.as_ref() {
        logger.info(
            "cms.deleteEntries.start",
            "Delete entries started",
            Some(log_fields_start(ctx, &input)),
        );
    }

    let changes = plan_entry_deletion(&state.entries, &input.ids, &input.asset_paths);
    let result = commit(ctx, deps, &input, changes.clone()).await;

    if let Err(error) = result {
        if let Some(logger) = deps.logger.as_ref() {
            let event = if error.is_cancelled() {
                "cms.deleteEntries.aborted"
            } else {
                "cms.deleteEntries.failed"
            };
            logger.error_with(
                event,
                "Delete entries failed",
                Some(log_fields_done(ctx, &input, changes.len(), started_at)),
                error_to_value(&error),
            );
        }
        return Err(error);
    }

    let removed_entries = state.remove_entries(&input.ids);
    state.set_toast(ToastState::deleted(input.ids.len()));
    let removed_assets = if input.asset_paths.is_empty() {
        0
    } else {
        state.remove_assets(&input.asset_paths)
    };

    if let Some(logger) = deps.logger.as_ref() {
        logger.info(
            "cms.deleteEntries.completed",
            "Delete entries completed",
            Some(log_fields_done(ctx, &input, changes.len(), started_at)),
        );
    }

    Ok(DeleteEntriesOutput {
        changes,
        removed_entries,
        removed_assets,
    })
}

async fn commit(
    ctx: &RequestContext,
    deps: &DeleteEntriesDeps,
    input: &DeleteEntriesInput,
    changes: Vec<FileChange>,
) -> Result<()> {
    ctx.ensure_not_cancelled("delete_entries.save")?;
    tracing::debug!(changes = changes.len(), "committing deletion");
    deps.save_changes
        .save_changes(
            ctx,
            SaveChangesRequest {
                changes,
                commit_type: CommitType::Delete,
                collection: input.collection.clone(),
            },
        )
        .await
}

fn duration_ms(started_at: Instant) -> u64 {
    u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn log_fields_start(ctx: &RequestContext, input: &DeleteEntriesInput) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert("correlationId".into(), Value::from(ctx.correlation_id().as_str()));
    fields.insert("entryCount".into(), Value::from(input.ids.len()));
    fields.insert("assetCount".into(), Value::from(input.asset_paths.len()));
    if let Some(collection) = input.collection.as_deref() {
        fields.insert("collection".into(), Value::from(collection));
    }
    fields
}

fn log_fields_done(
    ctx: &RequestContext,
    input: &DeleteEntriesInput,
    change_count: usize,
    started_at: Instant,
) -> LogFields {
    let mut fields = log_fields_start(ctx, input);
    fields.insert("changeCount".into(), Value::from(change_count));
    fields.insert("durationMs".into(), Value::from(duration_ms(started_at)));
    fields
}

pub(crate) fn error_to_value(error: &ErrorEnvelope) -> Value {
    serde_json::to_value(error).unwrap_or_else(|_| Value::String(error.to_string()))
}
