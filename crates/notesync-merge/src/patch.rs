//! Final patch pass over a merged note.

use tracing::trace;

use notesync_diff::Diff;
use notesync_types::Note;

use crate::selection;

/// Apply note-level diffs to `note`.
///
/// Only color changes and block replacements are acted on; everything else
/// has already been folded in by the document and media merges. A
/// replacement for a block that is not in the document is skipped. The
/// selection is pulled back inside the document afterwards, since a
/// replacement may shorten a block.
pub fn apply_patch(note: &mut Note, diffs: &[Diff]) {
    for diff in diffs {
        match diff {
            Diff::ColorUpdate { color } => note.color = *color,
            Diff::BlockUpdate { block } => {
                match note.document.blocks.iter_mut().find(|b| b.id() == block.id()) {
                    Some(slot) => *slot = block.clone(),
                    None => trace!(block = %block.id(), "skipping replacement of missing block"),
                }
            }
            _ => {}
        }
    }
    note.document.selection = selection::clamp(note.document.selection, &note.document.blocks);
}
