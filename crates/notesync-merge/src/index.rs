//! Diff lists bucketed by kind and target id.
//!
//! A [`DiffIndex`] is built once per side and answers "what did this side do
//! to block X / media Y" in logarithmic time during the merge.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use notesync_diff::Diff;
use notesync_types::{Block, BlockId, Color, Dimensions, Media, MediaId, Span};

/// One side's diffs, grouped by kind and id.
///
/// Text edits keep the order they appear in the source list, which for a
/// sorted list means deletions tail-first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiffIndex {
    pub color: Option<Color>,

    /// Inserted blocks with their index in the side's document, in diff order.
    pub block_insertions: Vec<(Block, usize)>,
    pub block_deletions: BTreeSet<BlockId>,
    pub block_updates: BTreeMap<BlockId, Block>,
    /// Inclusive `(start, end)` ranges of base text removed per block.
    pub text_deletions: BTreeMap<BlockId, Vec<(usize, usize)>>,
    /// Inserted text and its index in the side's text, per block.
    pub text_insertions: BTreeMap<BlockId, Vec<(String, usize)>>,
    pub span_insertions: BTreeMap<BlockId, Vec<Span>>,
    pub span_deletions: BTreeMap<BlockId, Vec<Span>>,
    /// New value of the bullet flag, per block whose flag flipped.
    pub unordered_list: BTreeMap<BlockId, bool>,
    /// New value of the right-to-left flag, per block whose flag flipped.
    pub right_to_left: BTreeMap<BlockId, bool>,

    pub media_insertions: Vec<(Media, usize)>,
    pub media_deletions: BTreeSet<MediaId>,
    pub media_remote_ids: BTreeMap<MediaId, Option<String>>,
    pub media_local_urls: BTreeMap<MediaId, Option<String>>,
    pub media_mime_types: BTreeMap<MediaId, String>,
    pub media_alt_texts: BTreeMap<MediaId, Option<String>>,
    pub media_dimensions: BTreeMap<MediaId, Option<Dimensions>>,
    pub media_last_modified: BTreeMap<MediaId, DateTime<Utc>>,
}

impl DiffIndex {
    /// Bucket a diff list.
    pub fn new(diffs: &[Diff]) -> Self {
        let mut index = Self::default();
        for diff in diffs {
            index.insert(diff);
        }
        index
    }

    fn insert(&mut self, diff: &Diff) {
        match diff {
            Diff::ColorUpdate { color } => self.color = Some(*color),
            Diff::BlockInsertion { block, index } => {
                self.block_insertions.push((block.clone(), *index));
            }
            Diff::BlockDeletion { block_id } => {
                self.block_deletions.insert(block_id.clone());
            }
            Diff::BlockUpdate { block } => {
                self.block_updates.insert(block.id().clone(), block.clone());
            }
            Diff::BlockTextInsertion {
                block_id,
                text,
                index,
            } => self
                .text_insertions
                .entry(block_id.clone())
                .or_default()
                .push((text.clone(), *index)),
            Diff::BlockTextDeletion {
                block_id,
                start,
                end,
            } => self
                .text_deletions
                .entry(block_id.clone())
                .or_default()
                .push((*start, *end)),
            Diff::SpanInsertion { block_id, span } => self
                .span_insertions
                .entry(block_id.clone())
                .or_default()
                .push(*span),
            Diff::SpanDeletion { block_id, span } => self
                .span_deletions
                .entry(block_id.clone())
                .or_default()
                .push(*span),
            Diff::UnorderedListInsertion { block_id } => {
                self.unordered_list.insert(block_id.clone(), true);
            }
            Diff::UnorderedListDeletion { block_id } => {
                self.unordered_list.insert(block_id.clone(), false);
            }
            Diff::RightToLeftInsertion { block_id } => {
                self.right_to_left.insert(block_id.clone(), true);
            }
            Diff::RightToLeftDeletion { block_id } => {
                self.right_to_left.insert(block_id.clone(), false);
            }
            Diff::MediaInsertion { media, index } => {
                self.media_insertions.push((media.clone(), *index));
            }
            Diff::MediaDeletion { media_id } => {
                self.media_deletions.insert(media_id.clone());
            }
            Diff::MediaUpdateRemoteId {
                media_id,
                remote_id,
            } => {
                self.media_remote_ids
                    .insert(media_id.clone(), remote_id.clone());
            }
            Diff::MediaUpdateLocalUrl {
                media_id,
                local_url,
            } => {
                self.media_local_urls
                    .insert(media_id.clone(), local_url.clone());
            }
            Diff::MediaUpdateMimeType {
                media_id,
                mime_type,
            } => {
                self.media_mime_types
                    .insert(media_id.clone(), mime_type.clone());
            }
            Diff::MediaUpdateAltText { media_id, alt_text } => {
                self.media_alt_texts
                    .insert(media_id.clone(), alt_text.clone());
            }
            Diff::MediaUpdateDimensions {
                media_id,
                dimensions,
            } => {
                self.media_dimensions.insert(media_id.clone(), *dimensions);
            }
            Diff::MediaUpdateLastModified {
                media_id,
                last_modified,
            } => {
                self.media_last_modified
                    .insert(media_id.clone(), *last_modified);
            }
        }
    }

    /// Returns `true` if this side changed the block in place (replacement,
    /// text, spans or paragraph flags).
    pub fn modifies_block(&self, id: &BlockId) -> bool {
        self.block_updates.contains_key(id) || self.edits_paragraph(id)
    }

    /// Returns `true` if this side has paragraph-level edits for the block.
    pub fn edits_paragraph(&self, id: &BlockId) -> bool {
        self.text_deletions.contains_key(id)
            || self.text_insertions.contains_key(id)
            || self.span_insertions.contains_key(id)
            || self.span_deletions.contains_key(id)
            || self.unordered_list.contains_key(id)
            || self.right_to_left.contains_key(id)
    }

    /// Returns `true` if this side changed any field of the attachment.
    pub fn modifies_media(&self, id: &MediaId) -> bool {
        self.media_remote_ids.contains_key(id)
            || self.media_local_urls.contains_key(id)
            || self.media_mime_types.contains_key(id)
            || self.media_alt_texts.contains_key(id)
            || self.media_dimensions.contains_key(id)
            || self.media_last_modified.contains_key(id)
    }
}

/// Block replacements that survive into the patch step.
///
/// Every primary replacement is accepted. A secondary replacement is
/// forwarded only when its block id is at once in the primary's deletion,
/// replacement and span-insertion buckets; the check reads the primary's own
/// buckets rather than comparing the two sides. Forwarded replacements follow
/// the primary's in the returned list, so a patch applied in order lets them
/// take effect last.
pub fn merge_updates(primary: &DiffIndex, secondary: &DiffIndex) -> Vec<Diff> {
    let accepted = primary.block_updates.values().cloned();
    let forwarded = secondary
        .block_updates
        .iter()
        .filter(|(id, _)| {
            primary.block_deletions.contains(*id)
                && primary.block_updates.contains_key(*id)
                && primary.span_insertions.contains_key(*id)
        })
        .map(|(_, block)| block.clone());

    accepted
        .chain(forwarded)
        .map(|block| Diff::BlockUpdate { block })
        .collect()
}

/// Note-level diffs for the patch step: the color (primary's, else
/// secondary's) followed by [`merge_updates`].
pub fn merge_diffs(primary: &DiffIndex, secondary: &DiffIndex) -> Vec<Diff> {
    let mut diffs = Vec::new();
    if let Some(color) = primary.color.or(secondary.color) {
        diffs.push(Diff::ColorUpdate { color });
    }
    diffs.extend(merge_updates(primary, secondary));
    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use notesync_types::{InlineMedia, Paragraph, SpanStyle};

    fn image(id: &str, url: &str) -> Block {
        InlineMedia {
            id: id.into(),
            local_url: Some(url.into()),
            remote_url: None,
            mime_type: "image/png".into(),
            alt_text: None,
        }
        .into()
    }

    #[test]
    fn buckets_by_kind_and_id() {
        let diffs = vec![
            Diff::BlockTextDeletion {
                block_id: "p".into(),
                start: 4,
                end: 5,
            },
            Diff::BlockTextDeletion {
                block_id: "p".into(),
                start: 0,
                end: 1,
            },
            Diff::SpanInsertion {
                block_id: "p".into(),
                span: Span::new(SpanStyle::BOLD, 0, 2),
            },
            Diff::UnorderedListDeletion { block_id: "q".into() },
            Diff::BlockDeletion { block_id: "r".into() },
        ];
        let index = DiffIndex::new(&diffs);

        assert_eq!(index.text_deletions[&BlockId::from("p")], vec![(4, 5), (0, 1)]);
        assert_eq!(index.span_insertions[&BlockId::from("p")].len(), 1);
        assert!(!index.unordered_list[&BlockId::from("q")]);
        assert!(index.block_deletions.contains(&BlockId::from("r")));
        assert!(index.modifies_block(&"p".into()));
        assert!(index.modifies_block(&"q".into()));
        assert!(!index.modifies_block(&"r".into()));
    }

    #[test]
    fn color_prefers_primary() {
        let primary = DiffIndex::new(&[Diff::ColorUpdate { color: Color::Blue }]);
        let secondary = DiffIndex::new(&[Diff::ColorUpdate { color: Color::Pink }]);
        assert_eq!(
            merge_diffs(&primary, &secondary),
            vec![Diff::ColorUpdate { color: Color::Blue }]
        );
        assert_eq!(
            merge_diffs(&DiffIndex::default(), &secondary),
            vec![Diff::ColorUpdate { color: Color::Pink }]
        );
        assert!(merge_diffs(&DiffIndex::default(), &DiffIndex::default()).is_empty());
    }

    #[test]
    fn primary_updates_always_accepted() {
        let primary = DiffIndex::new(&[Diff::BlockUpdate {
            block: image("m", "a.png"),
        }]);
        let secondary = DiffIndex::new(&[Diff::BlockUpdate {
            block: image("m", "b.png"),
        }]);
        assert_eq!(
            merge_updates(&primary, &secondary),
            vec![Diff::BlockUpdate {
                block: image("m", "a.png")
            }]
        );
    }

    #[test]
    fn secondary_update_needs_all_three_primary_buckets() {
        let secondary = DiffIndex::new(&[Diff::BlockUpdate {
            block: image("m", "b.png"),
        }]);
        // Secondary-only replacement: the primary never touched "m".
        assert!(merge_updates(&DiffIndex::default(), &secondary).is_empty());

        let mut primary = DiffIndex::new(&[Diff::BlockUpdate {
            block: Paragraph::new("m", "x").into(),
        }]);
        primary.block_deletions.insert("m".into());
        assert_eq!(merge_updates(&primary, &secondary).len(), 1);

        primary
            .span_insertions
            .insert("m".into(), vec![Span::new(SpanStyle::BOLD, 0, 1)]);
        let merged = merge_updates(&primary, &secondary);
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged[1],
            Diff::BlockUpdate {
                block: image("m", "b.png")
            }
        );
    }
}
