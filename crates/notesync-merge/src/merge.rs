use tracing::{debug, trace};

use notesync_diff::{diff, sorted, Diff};
use notesync_types::Note;

use crate::config::{MergeConfig, SelectionFrom};
use crate::document::merge_document;
use crate::error::MergeResult;
use crate::guard::{can_three_way_merge, note_with_new_type};
use crate::index::{merge_diffs, DiffIndex};
use crate::ink::merge_ink;
use crate::media::merge_media;
use crate::metadata::merge_metadata;
use crate::patch::apply_patch;
use crate::selection::AnchoredSelection;

// ---------------------------------------------------------------------------
// Merger
// ---------------------------------------------------------------------------

/// Three-way merge driven by a [`MergeConfig`].
#[derive(Clone, Debug, Default)]
pub struct Merger {
    config: MergeConfig,
}

impl Merger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// The current configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Reconcile `primary` and `secondary`, which both descend from `base`.
    ///
    /// The pipeline:
    ///
    /// 1. Rendered-ink notes are not mergeable: the primary is returned as is.
    ///    Live-ink notes go through the stroke merge.
    /// 2. If either side changed the document kind, that side's snapshot is
    ///    returned as its own shadow.
    /// 3. Both sides are diffed against the base and the diffs sorted.
    /// 4. The document, media and metadata are merged, with collisions
    ///    resolved for the side named by `selection_from`.
    /// 5. Color changes and block replacements are patched on top.
    ///
    /// Fails only if a snapshot contains duplicate ids.
    pub fn merge(&self, base: &Note, primary: &Note, secondary: &Note) -> MergeResult<Note> {
        let sides = [base, primary, secondary];
        if sides.iter().all(|n| n.is_rendered_ink()) {
            debug!("rendered ink on all sides, keeping primary");
            return Ok(primary.clone());
        }
        if sides.iter().all(|n| n.is_ink()) {
            return merge_ink(base, primary, secondary);
        }
        if !can_three_way_merge(base, primary, secondary) {
            return Ok(note_with_new_type(base, primary, secondary));
        }

        let primary_diffs = self.side_diffs(base, primary, SelectionFrom::Primary)?;
        let secondary_diffs = self.side_diffs(base, secondary, SelectionFrom::Secondary)?;
        let primary_index = DiffIndex::new(&primary_diffs);
        let secondary_index = DiffIndex::new(&secondary_diffs);

        let prefer = self.config.selection_from;
        let selection = AnchoredSelection::new(&prefer.pick(primary, secondary).document, prefer);

        let document = merge_document(
            &base.document,
            &primary_index,
            &secondary_index,
            prefer,
            &selection,
        );
        let media = merge_media(&base.media, &primary_index, &secondary_index, prefer);
        let metadata = merge_metadata(&primary.metadata, &secondary.metadata);

        let mut merged = Note {
            document,
            media,
            metadata,
            document_modified_at: primary.document_modified_at.max(secondary.document_modified_at),
            ..base.clone()
        };
        apply_patch(&mut merged, &merge_diffs(&primary_index, &secondary_index));
        Ok(merged)
    }

    fn side_diffs(&self, base: &Note, side: &Note, label: SelectionFrom) -> MergeResult<Vec<Diff>> {
        let diffs = sorted(diff(base, side)?);
        debug!(side = ?label, count = diffs.len(), "diffed against base");
        if self.config.log_diffs {
            for d in &diffs {
                trace!(side = ?label, diff = %d);
            }
        }
        Ok(diffs)
    }
}

/// Merge with the default configuration and an explicit tie-break side.
pub fn three_way_merge(
    base: &Note,
    primary: &Note,
    secondary: &Note,
    selection_from: SelectionFrom,
) -> MergeResult<Note> {
    Merger::new(MergeConfig::new(selection_from)).merge(base, primary, secondary)
}
