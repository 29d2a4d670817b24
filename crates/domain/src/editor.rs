//! Editor data touched by the entry deletion flow.

use crate::{EntryId, LocaleCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File backing one locale of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLocale {
    /// Repository-relative file path.
    pub path: Box<str>,
}

/// A content entry loaded in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry identifier.
    pub id: EntryId,
    /// Entry slug.
    pub slug: Box<str>,
    /// Locale variants; several locales may share a file (single-file i18n).
    pub locales: BTreeMap<LocaleCode, EntryLocale>,
}

/// A media asset known to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Repository-relative file path.
    pub path: Box<str>,
}

/// Kind of file operation in a change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileChangeAction {
    /// Remove the file.
    Delete,
}

/// One file operation to commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Operation.
    pub action: FileChangeAction,
    /// Slug of the owning entry; absent for assets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<Box<str>>,
    /// Repository-relative file path.
    pub path: Box<str>,
}

impl FileChange {
    /// Delete a file owned by an entry.
    #[must_use]
    pub fn delete_entry_file(slug: &str, path: &str) -> Self {
        Self {
            action: FileChangeAction::Delete,
            slug: Some(slug.into()),
            path: path.into(),
        }
    }

    /// Delete an asset file.
    #[must_use]
    pub fn delete_asset(path: &str) -> Self {
        Self {
            action: FileChangeAction::Delete,
            slug: None,
            path: path.into(),
        }
    }
}

/// Commit message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    /// Entries and/or assets were deleted.
    Delete,
}

/// Content-update notification shown after a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastState {
    /// Entries were saved.
    pub saved: bool,
    /// Changes were published.
    pub published: bool,
    /// Entries were deleted.
    pub deleted: bool,
    /// Number of affected entries.
    pub count: usize,
}

impl ToastState {
    /// Resting state: nothing to announce.
    pub const DEFAULT: Self = Self {
        saved: false,
        published: false,
        deleted: false,
        count: 1,
    };

    /// Notification for `count` deleted entries.
    #[must_use]
    pub const fn deleted(count: usize) -> Self {
        Self {
            deleted: true,
            count,
            ..Self::DEFAULT
        }
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::DEFAULT
    }
}
