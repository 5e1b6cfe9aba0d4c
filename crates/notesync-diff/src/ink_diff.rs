//! Stroke-level diff for live-ink documents.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use notesync_types::{Document, Stroke, StrokeId};

/// One stroke change between two ink documents. Strokes are immutable once
/// drawn, so there is no update variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InkDiff {
    StrokeInsertion { stroke: Stroke },
    StrokeDeletion { stroke_id: StrokeId },
}

/// Diff the strokes of two ink documents by id: deletions in base order,
/// then insertions in target order.
pub fn diff_ink(base: &Document, target: &Document) -> Vec<InkDiff> {
    let base_ids: BTreeSet<&StrokeId> = base.strokes.iter().map(|s| &s.id).collect();
    let target_ids: BTreeSet<&StrokeId> = target.strokes.iter().map(|s| &s.id).collect();

    let deletions = base
        .strokes
        .iter()
        .filter(|s| !target_ids.contains(&s.id))
        .map(|s| InkDiff::StrokeDeletion {
            stroke_id: s.id.clone(),
        });
    let insertions = target
        .strokes
        .iter()
        .filter(|s| !base_ids.contains(&s.id))
        .map(|s| InkDiff::StrokeInsertion { stroke: s.clone() });

    deletions.chain(insertions).collect()
}
