//! Merges against the snapshots a note carries about itself.
//!
//! A note keeps two possible merge bases: the UI shadow, checkpointed when the
//! editor last synced with the store, and the last version acknowledged by
//! the server. These helpers pick the right one for the two situations a
//! client runs into.

use tracing::debug;

use notesync_types::{Note, RemoteData};

use crate::config::SelectionFrom;
use crate::error::MergeResult;
use crate::merge::three_way_merge;

/// Which stored snapshot to use as merge base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeBase {
    /// The note's own `shadow`.
    UiShadow,
    /// The snapshot in `remote_data`.
    LastServerVersion,
}

impl MergeBase {
    pub fn resolve(self, note: &Note) -> Option<&Note> {
        match self {
            Self::UiShadow => note.ui_shadow(),
            Self::LastServerVersion => note.last_server_version(),
        }
    }
}

/// Fold a server response into the local note.
///
/// The local note is the primary and the server snapshot the secondary,
/// both measured against the last version the server acknowledged. A note
/// that was never synced has no such version, so the server snapshot itself
/// serves as base. The result points at `update` as its new remote data.
pub fn merge_server_update(
    local: &Note,
    update: &RemoteData,
    selection_from: SelectionFrom,
) -> MergeResult<Note> {
    let server = update.last_server_version.as_ref();
    let base = match MergeBase::LastServerVersion.resolve(local) {
        Some(base) => base,
        None => {
            debug!(note = %local.id, "no server version yet, using server snapshot as base");
            server
        }
    };
    let mut merged = three_way_merge(base, local, server, selection_from)?;
    merged.remote_data = Some(update.clone());
    Ok(merged)
}

/// Reconcile an editor's `edited` copy with the store's `current` note.
///
/// The editor's UI shadow is the base and the edited copy wins ties. Without
/// a shadow there is nothing to measure against and `edited` is returned.
pub fn merge_ui_edit(
    current: &Note,
    edited: &Note,
    selection_from: SelectionFrom,
) -> MergeResult<Note> {
    match MergeBase::UiShadow.resolve(edited) {
        Some(base) => three_way_merge(base, edited, current, selection_from),
        None => {
            debug!(note = %edited.id, "edited note has no UI shadow, keeping edit");
            Ok(edited.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use notesync_types::{Color, Document, Paragraph};

    fn note(text: &str) -> Note {
        Note::new(
            "n",
            Document::rich_text(vec![Paragraph::new("p", text).into()]),
            Utc.timestamp_millis_opt(0).unwrap(),
        )
    }

    fn remote(snapshot: Note, key: &str) -> RemoteData {
        RemoteData {
            id: "srv-1".into(),
            change_key: key.into(),
            last_server_version: Box::new(snapshot),
        }
    }

    #[test]
    fn server_update_merges_against_last_server_version() {
        let mut local = note("hello world");
        local.remote_data = Some(remote(note("hello"), "k1"));
        let update = remote(note("Hello").with_color(Color::Blue), "k2");

        let merged = merge_server_update(&local, &update, SelectionFrom::Primary).unwrap();
        assert_eq!(merged.document.plain_text(), "Hello world");
        assert_eq!(merged.color, Color::Blue);
        assert_eq!(merged.remote_data.map(|r| r.change_key), Some("k2".to_string()));
    }

    #[test]
    fn never_synced_note_uses_server_snapshot_as_base() {
        let local = note("draft");
        let update = remote(note("server"), "k1");
        let merged = merge_server_update(&local, &update, SelectionFrom::Primary).unwrap();
        assert_eq!(merged.document.plain_text(), "draft");
        assert!(merged.remote_data.is_some());
    }

    #[test]
    fn ui_edit_against_shadow() {
        let mut edited = note("ab").as_own_shadow();
        edited.document = note("abc").document;
        let current = note("Xab");

        let merged = merge_ui_edit(&current, &edited, SelectionFrom::Primary).unwrap();
        assert_eq!(merged.document.plain_text(), "Xabc");
    }

    #[test]
    fn ui_edit_without_shadow_is_kept() {
        let edited = note("mine");
        let merged = merge_ui_edit(&note("theirs"), &edited, SelectionFrom::Primary).unwrap();
        assert_eq!(merged, edited);
    }

    #[test]
    fn merge_base_resolution() {
        let n = note("x");
        assert!(MergeBase::UiShadow.resolve(&n).is_none());
        assert!(MergeBase::UiShadow.resolve(&n.as_own_shadow()).is_some());
        assert!(MergeBase::LastServerVersion.resolve(&n).is_none());
    }
}
