//! Change-set commit boundary contract.

use crate::BoxFuture;
use cms_fields_domain::{CommitType, FileChange};
use cms_fields_shared::{RequestContext, Result};

/// A batch of file changes committed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveChangesRequest {
    /// File operations, in commit order.
    pub changes: Vec<FileChange>,
    /// Commit category.
    pub commit_type: CommitType,
    /// Collection the changes belong to, when one is selected.
    pub collection: Option<Box<str>>,
}

/// Boundary contract for committing change sets to the content backend.
pub trait SaveChangesPort: Send + Sync {
    /// Commit the request's changes.
    fn save_changes(
        &self,
        ctx: &RequestContext,
        request: SaveChangesRequest,
    ) -> BoxFuture<'_, Result<()>>;
}
