//! Media list diff: id-keyed, one update diff per changed field.

use std::collections::BTreeMap;

use notesync_types::{Media, MediaId};

use crate::model::Diff;

fn diff_fields(base: &Media, target: &Media) -> Vec<Diff> {
    let id = &target.id;
    let mut diffs = Vec::new();

    if base.remote_id != target.remote_id {
        diffs.push(Diff::MediaUpdateRemoteId {
            media_id: id.clone(),
            remote_id: target.remote_id.clone(),
        });
    }
    if base.local_url != target.local_url {
        diffs.push(Diff::MediaUpdateLocalUrl {
            media_id: id.clone(),
            local_url: target.local_url.clone(),
        });
    }
    if base.mime_type != target.mime_type {
        diffs.push(Diff::MediaUpdateMimeType {
            media_id: id.clone(),
            mime_type: target.mime_type.clone(),
        });
    }
    if base.alt_text != target.alt_text {
        diffs.push(Diff::MediaUpdateAltText {
            media_id: id.clone(),
            alt_text: target.alt_text.clone(),
        });
    }
    if base.dimensions != target.dimensions {
        diffs.push(Diff::MediaUpdateDimensions {
            media_id: id.clone(),
            dimensions: target.dimensions,
        });
    }
    if base.last_modified != target.last_modified {
        diffs.push(Diff::MediaUpdateLastModified {
            media_id: id.clone(),
            last_modified: target.last_modified,
        });
    }
    diffs
}

/// Diff two media lists by id.
///
/// Deletions come first in base order, then insertions and field updates in
/// target order.
pub fn diff_media(base: &[Media], target: &[Media]) -> Vec<Diff> {
    let base_by_id: BTreeMap<&MediaId, &Media> = base.iter().map(|m| (&m.id, m)).collect();
    let target_by_id: BTreeMap<&MediaId, &Media> = target.iter().map(|m| (&m.id, m)).collect();
    let mut diffs = Vec::new();

    for media in base {
        if !target_by_id.contains_key(&media.id) {
            diffs.push(Diff::MediaDeletion {
                media_id: media.id.clone(),
            });
        }
    }

    for (index, media) in target.iter().enumerate() {
        match base_by_id.get(&media.id) {
            Some(base_media) => diffs.extend(diff_fields(base_media, media)),
            None => diffs.push(Diff::MediaInsertion {
                media: media.clone(),
                index,
            }),
        }
    }

    diffs
}
