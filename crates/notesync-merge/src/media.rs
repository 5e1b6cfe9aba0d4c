//! Merge of note-level attachments.

use std::collections::BTreeMap;

use tracing::trace;

use notesync_types::{Media, MediaId};

use crate::config::SelectionFrom;
use crate::index::DiffIndex;
use crate::order;

/// Merge both sides' media diffs into `base`.
///
/// Deletion follows the block rule: the preferred side's deletion always
/// applies, the other side's only when the preferred side did not touch the
/// attachment. Each field of a surviving attachment takes the preferred
/// side's new value, else the other side's, else the base value.
pub fn merge_media(
    base: &[Media],
    primary: &DiffIndex,
    secondary: &DiffIndex,
    prefer: SelectionFrom,
) -> Vec<Media> {
    let preferred = prefer.pick(primary, secondary);
    let other = prefer.pick(secondary, primary);

    let survivors: Vec<(MediaId, Option<Media>)> = base
        .iter()
        .map(|media| {
            let id = &media.id;
            let deleted = preferred.media_deletions.contains(id)
                || (other.media_deletions.contains(id) && !preferred.modifies_media(id));
            if deleted {
                trace!(media = %id, "media deleted");
                (id.clone(), None)
            } else {
                (id.clone(), Some(merge_fields(media, preferred, other)))
            }
        })
        .collect();

    let base_ids: Vec<MediaId> = base.iter().map(|m| m.id.clone()).collect();
    let insertions = order::combine(
        side_insertions(&base_ids, preferred),
        side_insertions(&base_ids, other),
        media_id,
    );
    order::interleave(survivors, insertions)
}

fn side_insertions(base_ids: &[MediaId], index: &DiffIndex) -> Vec<(Option<MediaId>, Media)> {
    order::anchored(base_ids, &index.media_deletions, &index.media_insertions, media_id)
}

fn media_id(media: &Media) -> &MediaId {
    &media.id
}

fn merge_fields(base: &Media, preferred: &DiffIndex, other: &DiffIndex) -> Media {
    let id = &base.id;
    Media {
        id: id.clone(),
        remote_id: pick(&preferred.media_remote_ids, &other.media_remote_ids, id, &base.remote_id),
        local_url: pick(&preferred.media_local_urls, &other.media_local_urls, id, &base.local_url),
        mime_type: pick(&preferred.media_mime_types, &other.media_mime_types, id, &base.mime_type),
        alt_text: pick(&preferred.media_alt_texts, &other.media_alt_texts, id, &base.alt_text),
        dimensions: pick(
            &preferred.media_dimensions,
            &other.media_dimensions,
            id,
            &base.dimensions,
        ),
        last_modified: pick(
            &preferred.media_last_modified,
            &other.media_last_modified,
            id,
            &base.last_modified,
        ),
    }
}

fn pick<T: Clone>(
    preferred: &BTreeMap<MediaId, T>,
    other: &BTreeMap<MediaId, T>,
    id: &MediaId,
    current: &T,
) -> T {
    preferred.get(id).or_else(|| other.get(id)).unwrap_or(current).clone()
}
