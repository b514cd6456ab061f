use ho_core::merge::EntryDraft;

use serde::Deserialize;

/// Body of `POST /api/v1/entries`.
///
/// One endpoint serves both create and update: a payload carrying `id`
/// updates that entry, a payload without one creates a fresh entry.
#[derive(Debug, Deserialize)]
pub struct SaveEntryRequest {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(flatten)]
    pub draft: EntryDraft,
}
