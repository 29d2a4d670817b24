//! Builders for editor data used across tests.

use cms_fields_domain::{Asset, Entry, EntryId, EntryLocale, LocaleCode};
use std::collections::BTreeMap;

/// Build an entry whose locales map to the given file paths.
///
/// Panics on blank ids or locales; fixtures are literals.
pub fn entry(id: &str, slug: &str, locales: &[(&str, &str)]) -> Entry {
    let locales: BTreeMap<LocaleCode, EntryLocale> = locales
        .iter()
        .map(|(locale, path)| {
            (
                LocaleCode::parse(locale).expect("fixture locale"),
                EntryLocale {
                    path: (*path).into(),
                },
            )
        })
        .collect();

    Entry {
        id: EntryId::parse(id).expect("fixture entry id"),
        slug: slug.into(),
        locales,
    }
}

/// Build an asset at `path`.
pub fn asset(path: &str) -> Asset {
    Asset { path: path.into() }
}

/// Parse an entry id literal.
pub fn entry_id(id: &str) -> EntryId {
    EntryId::parse(id).expect("fixture entry id")
}
