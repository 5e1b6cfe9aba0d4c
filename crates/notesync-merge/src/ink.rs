//! Merge of live-ink notes.
//!
//! Strokes are immutable and addressed by id, so the merge is set algebra:
//! a stroke erased on either side is gone, a stroke drawn on either side is
//! added.

use std::collections::BTreeSet;

use tracing::debug;

use notesync_diff::{diff_ink, InkDiff};
use notesync_types::{Note, StrokeId};

use crate::error::MergeResult;

/// Merge three live-ink snapshots.
///
/// The result is `base` with base strokes that neither side erased, in base
/// order, followed by the primary's new strokes and then the secondary's.
/// The color is the primary's if it changed, else the secondary's.
pub fn merge_ink(base: &Note, primary: &Note, secondary: &Note) -> MergeResult<Note> {
    base.document.validate()?;
    primary.document.validate()?;
    secondary.document.validate()?;

    let primary_diffs = diff_ink(&base.document, &primary.document);
    let secondary_diffs = diff_ink(&base.document, &secondary.document);
    debug!(
        primary = primary_diffs.len(),
        secondary = secondary_diffs.len(),
        "merging ink strokes"
    );

    let erased: BTreeSet<&StrokeId> = primary_diffs
        .iter()
        .chain(&secondary_diffs)
        .filter_map(|diff| match diff {
            InkDiff::StrokeDeletion { stroke_id } => Some(stroke_id),
            InkDiff::StrokeInsertion { .. } => None,
        })
        .collect();

    let mut strokes: Vec<_> = base
        .document
        .strokes
        .iter()
        .filter(|s| !erased.contains(&s.id))
        .cloned()
        .collect();
    let mut seen: BTreeSet<StrokeId> = strokes.iter().map(|s| s.id.clone()).collect();
    for diff in primary_diffs.iter().chain(&secondary_diffs) {
        if let InkDiff::StrokeInsertion { stroke } = diff {
            if seen.insert(stroke.id.clone()) {
                strokes.push(stroke.clone());
            }
        }
    }

    let color = if primary.color != base.color {
        primary.color
    } else {
        secondary.color
    };

    let mut merged = base.clone();
    merged.document.strokes = strokes;
    merged.color = color;
    merged.document_modified_at = primary.document_modified_at.max(secondary.document_modified_at);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergeError;
    use chrono::{TimeZone, Utc};
    use notesync_types::{Color, Document, InkPoint, Stroke, TypeError};

    fn stroke(id: &str) -> Stroke {
        Stroke::new(id, vec![InkPoint::new(0.0, 0.0), InkPoint::new(3.0, 4.0)])
    }

    fn ink(ids: &[&str], ms: i64) -> Note {
        Note::new(
            "n",
            Document::ink(ids.iter().map(|id| stroke(id)).collect()),
            Utc.timestamp_millis_opt(ms).unwrap(),
        )
    }

    fn ids(note: &Note) -> Vec<&str> {
        note.document.strokes.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn erasures_and_new_strokes_combine() {
        let base = ink(&["a", "b", "c"], 0);
        let primary = ink(&["a", "c", "p"], 10);
        let secondary = ink(&["b", "c", "s"], 20);

        let merged = merge_ink(&base, &primary, &secondary).unwrap();
        assert_eq!(ids(&merged), vec!["c", "p", "s"]);
        assert_eq!(merged.document_modified_at, secondary.document_modified_at);
    }

    #[test]
    fn same_new_stroke_on_both_sides_once() {
        let base = ink(&[], 0);
        let primary = ink(&["x"], 1);
        let secondary = ink(&["x"], 1);
        assert_eq!(ids(&merge_ink(&base, &primary, &secondary).unwrap()), vec!["x"]);
    }

    #[test]
    fn color_prefers_primary_change() {
        let base = ink(&[], 0);
        let primary = ink(&[], 0).with_color(Color::Blue);
        let secondary = ink(&[], 0).with_color(Color::Pink);
        assert_eq!(merge_ink(&base, &primary, &secondary).unwrap().color, Color::Blue);
        assert_eq!(merge_ink(&base, &base, &secondary).unwrap().color, Color::Pink);
    }

    #[test]
    fn duplicate_stroke_ids_rejected() {
        let base = ink(&["a", "a"], 0);
        let err = merge_ink(&base, &base, &base).unwrap_err();
        assert_eq!(err, MergeError::InvalidSnapshot(TypeError::DuplicateStrokeId("a".into())));
    }
}
