//! Editor state touched by the use cases.

use cms_fields_domain::{Asset, Entry, EntryId, ToastState};

/// Entries, assets, and the content-update notification of one editor session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Every entry loaded in the editor.
    pub entries: Vec<Entry>,
    /// Every asset loaded in the editor.
    pub assets: Vec<Asset>,
    /// Notification shown after the last content update.
    pub toast: ToastState,
}

impl EditorState {
    /// Create a state holding the given entries and assets.
    #[must_use]
    pub fn new(entries: Vec<Entry>, assets: Vec<Asset>) -> Self {
        Self {
            entries,
            assets,
            toast: ToastState::DEFAULT,
        }
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Drop every entry whose id is listed. Returns how many were removed.
    pub fn remove_entries(&mut self, ids: &[EntryId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !ids.contains(&entry.id));
        before - self.entries.len()
    }

    /// Drop every asset whose path is listed. Returns how many were removed.
    pub fn remove_assets<P: AsRef<str>>(&mut self, paths: &[P]) -> usize {
        let before = self.assets.len();
        self.assets
            .retain(|asset| !paths.iter().any(|path| path.as_ref() == &*asset.path));
        before - self.assets.len()
    }

    /// Replace the content-update notification.
    pub const fn set_toast(&mut self, toast: ToastState) {
        self.toast = toast;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_fields_domain::EntryLocale;
    use std::collections::BTreeMap;

    fn entry(id: &str) -> Result<Entry, Box<dyn std::error::Error>> {
        Ok(Entry {
            id: EntryId::parse(id)?,
            slug: id.into(),
            locales: BTreeMap::from([(
                cms_fields_domain::LocaleCode::parse("en")?,
                EntryLocale {
                    path: format!("content/{id}.md").into(),
                },
            )]),
        })
    }

    #[test]
    fn removes_only_listed_items() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = EditorState::new(
            vec![entry("a")?, entry("b")?, entry("c")?],
            vec![Asset { path: "img/a.png".into() }, Asset { path: "img/b.png".into() }],
        );

        assert_eq!(state.remove_entries(&[EntryId::parse("b")?, EntryId::parse("zz")?]), 1);
        assert!(state.entry(&EntryId::parse("b")?).is_none());
        assert_eq!(state.entries.len(), 2);

        assert_eq!(state.remove_assets(&["img/a.png"]), 1);
        assert_eq!(state.assets, vec![Asset { path: "img/b.png".into() }]);
        Ok(())
    }

    #[test]
    fn toast_starts_at_rest() {
        let mut state = EditorState::default();
        assert_eq!(state.toast, ToastState::DEFAULT);
        state.set_toast(ToastState::deleted(2));
        assert!(state.toast.deleted);
        assert_eq!(state.toast.count, 2);
    }
}
