//! Note-level diff.

use notesync_types::Note;

use crate::block_diff::diff_blocks;
use crate::error::DiffResult;
use crate::media_diff::diff_media;
use crate::model::Diff;

/// Compute every change from `base` to `target`.
///
/// Emits at most one [`Diff::ColorUpdate`], then the block diffs, then the
/// media diffs. Metadata and ink strokes are not part of this diff. Fails if
/// either snapshot has duplicate block or media ids.
pub fn diff(base: &Note, target: &Note) -> DiffResult<Vec<Diff>> {
    base.validate()?;
    target.validate()?;

    let mut diffs = Vec::new();
    if base.color != target.color {
        diffs.push(Diff::ColorUpdate {
            color: target.color,
        });
    }
    diffs.extend(diff_blocks(&base.document.blocks, &target.document.blocks));
    diffs.extend(diff_media(&base.media, &target.media));
    Ok(diffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;
    use chrono::{TimeZone, Utc};
    use notesync_types::{Color, Document, Media, Paragraph, TypeError};

    fn note(blocks: &[(&str, &str)]) -> Note {
        let blocks = blocks
            .iter()
            .map(|(id, text)| Paragraph::new(*id, *text).into())
            .collect();
        Note::new(
            "n",
            Document::rich_text(blocks),
            Utc.timestamp_millis_opt(0).unwrap(),
        )
    }

    #[test]
    fn diff_with_self_is_empty() {
        let n = note(&[("a", "one"), ("b", "two")]).with_media(vec![Media::new(
            "m",
            "image/png",
            Utc.timestamp_millis_opt(5).unwrap(),
        )]);
        assert!(diff(&n, &n).unwrap().is_empty());
    }

    #[test]
    fn color_comes_first_then_blocks_then_media() {
        let base = note(&[("a", "one")]);
        let target = note(&[("a", "one!")])
            .with_color(Color::Green)
            .with_media(vec![Media::new("m", "image/png", Utc.timestamp_millis_opt(5).unwrap())]);

        let diffs = diff(&base, &target).unwrap();
        assert_eq!(diffs.len(), 3);
        assert_eq!(diffs[0], Diff::ColorUpdate { color: Color::Green });
        assert!(matches!(diffs[1], Diff::BlockTextInsertion { .. }));
        assert!(matches!(diffs[2], Diff::MediaInsertion { .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let base = note(&[("a", "one")]);
        let broken = note(&[("a", "one"), ("a", "again")]);
        assert_eq!(
            diff(&base, &broken),
            Err(DiffError::InvalidSnapshot(TypeError::DuplicateBlockId(
                "a".into()
            )))
        );
    }
}
