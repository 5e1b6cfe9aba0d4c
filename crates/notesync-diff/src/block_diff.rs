//! Block-level diff: paragraphs field by field, everything else atomically.
//!
//! Blocks are joined by id. A block only in the base is deleted, a block only
//! in the target is inserted at its target index, and a block in both is
//! compared. Two paragraphs are compared flag by flag and then by content;
//! any other pairing is replaced wholesale with [`Diff::BlockUpdate`].

use std::collections::BTreeMap;

use notesync_types::{Block, BlockId, Content, Paragraph};

use crate::model::Diff;
use crate::span_diff::{span_deletes, span_inserts};
use crate::text_diff::{text_deletes, text_inserts};

/// Diff two versions of one block.
pub fn diff_block(base: &Block, target: &Block) -> Vec<Diff> {
    if base == target {
        return Vec::new();
    }
    match (base, target) {
        (Block::Paragraph(base), Block::Paragraph(target)) => diff_paragraph(base, target),
        _ => vec![Diff::BlockUpdate {
            block: target.clone(),
        }],
    }
}

fn diff_paragraph(base: &Paragraph, target: &Paragraph) -> Vec<Diff> {
    let id = &target.id;
    let mut diffs = Vec::new();

    match (base.unordered_list, target.unordered_list) {
        (false, true) => diffs.push(Diff::UnorderedListInsertion {
            block_id: id.clone(),
        }),
        (true, false) => diffs.push(Diff::UnorderedListDeletion {
            block_id: id.clone(),
        }),
        _ => {}
    }
    match (base.right_to_left, target.right_to_left) {
        (false, true) => diffs.push(Diff::RightToLeftInsertion {
            block_id: id.clone(),
        }),
        (true, false) => diffs.push(Diff::RightToLeftDeletion {
            block_id: id.clone(),
        }),
        _ => {}
    }

    if base.content != target.content {
        diffs.extend(diff_content(id, &base.content, &target.content));
    }
    diffs
}

/// Diff paragraph content: text deletions, text insertions, span deletions,
/// span insertions, in that order.
pub fn diff_content(block_id: &BlockId, base: &Content, target: &Content) -> Vec<Diff> {
    let mut diffs = text_deletes(block_id, &base.text, &target.text);
    diffs.extend(text_inserts(block_id, &base.text, &target.text));
    diffs.extend(span_deletes(block_id, &base.spans, &target.spans));
    diffs.extend(span_inserts(block_id, &base.spans, &target.spans));
    diffs
}

fn index_by_id(blocks: &[Block]) -> BTreeMap<&BlockId, &Block> {
    blocks.iter().map(|b| (b.id(), b)).collect()
}

/// Diff two block lists by id.
///
/// Deletions come first in base order, then insertions and per-block diffs
/// in target order.
pub fn diff_blocks(base: &[Block], target: &[Block]) -> Vec<Diff> {
    let base_by_id = index_by_id(base);
    let target_by_id = index_by_id(target);
    let mut diffs = Vec::new();

    for block in base {
        if !target_by_id.contains_key(block.id()) {
            diffs.push(Diff::BlockDeletion {
                block_id: block.id().clone(),
            });
        }
    }

    for (index, block) in target.iter().enumerate() {
        match base_by_id.get(block.id()) {
            Some(base_block) => diffs.extend(diff_block(base_block, block)),
            None => diffs.push(Diff::BlockInsertion {
                block: block.clone(),
                index,
            }),
        }
    }

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use notesync_types::{InlineMedia, Span, SpanStyle};

    fn para(id: &str, text: &str) -> Block {
        Paragraph::new(id, text).into()
    }

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
    fn equal_blocks_produce_nothing() {
        assert!(diff_block(&para("a", "x"), &para("a", "x")).is_empty());
        assert!(diff_block(&image("m", "u"), &image("m", "u")).is_empty());
    }

    #[test]
    fn book_to_look_scenario() {
        let mut base = Paragraph::new("p1", "book");
        base.content.spans = vec![Span::new(SpanStyle::BOLD, 1, 2)];
        let mut target = Paragraph::new("p1", "look");
        target.content.spans = vec![Span::new(SpanStyle::ITALIC, 1, 2)];

        let id = BlockId::from("p1");
        assert_eq!(
            diff_block(&base.into(), &target.into()),
            vec![
                Diff::BlockTextDeletion {
                    block_id: id.clone(),
                    start: 0,
                    end: 0
                },
                Diff::BlockTextInsertion {
                    block_id: id.clone(),
                    text: "l".into(),
                    index: 0
                },
                Diff::SpanDeletion {
                    block_id: id.clone(),
                    span: Span::new(SpanStyle::BOLD, 1, 2)
                },
                Diff::SpanInsertion {
                    block_id: id,
                    span: Span::new(SpanStyle::ITALIC, 1, 2)
                },
            ]
        );
    }

    #[test]
    fn flag_flips_emit_style_diffs() {
        let base = Paragraph::new("p", "item");
        let mut target = base.clone();
        target.unordered_list = true;
        target.right_to_left = true;

        let diffs = diff_block(&base.clone().into(), &target.clone().into());
        assert_eq!(
            diffs,
            vec![
                Diff::UnorderedListInsertion { block_id: "p".into() },
                Diff::RightToLeftInsertion { block_id: "p".into() },
            ]
        );

        let back = diff_block(&target.into(), &base.into());
        assert_eq!(
            back,
            vec![
                Diff::UnorderedListDeletion { block_id: "p".into() },
                Diff::RightToLeftDeletion { block_id: "p".into() },
            ]
        );
    }

    #[test]
    fn media_blocks_are_replaced_atomically() {
        let diffs = diff_block(&image("m", "a.png"), &image("m", "b.png"));
        assert_eq!(
            diffs,
            vec![Diff::BlockUpdate {
                block: image("m", "b.png")
            }]
        );
    }

    #[test]
    fn paragraph_turned_media_is_replaced() {
        let diffs = diff_block(&para("x", "text"), &image("x", "a.png"));
        assert!(matches!(diffs.as_slice(), [Diff::BlockUpdate { .. }]));
    }

    #[test]
    fn insertion_uses_target_index() {
        let base = vec![para("p1", "one"), para("p2", "two"), para("p3", "three")];
        let target = vec![
            para("p1", "one"),
            para("p1.5", "new"),
            para("p2", "two"),
            para("p3", "three"),
        ];
        assert_eq!(
            diff_blocks(&base, &target),
            vec![Diff::BlockInsertion {
                block: para("p1.5", "new"),
                index: 1
            }]
        );
    }

    #[test]
    fn deletions_come_before_other_changes() {
        let base = vec![para("a", "one"), para("b", "two")];
        let target = vec![para("b", "twos"), para("c", "three")];
        let diffs = diff_blocks(&base, &target);
        assert!(matches!(&diffs[0], Diff::BlockDeletion { block_id } if block_id.as_str() == "a"));
        assert!(matches!(
            &diffs[1],
            Diff::BlockTextInsertion { text, index: 3, .. } if text == "s"
        ));
        assert!(matches!(&diffs[2], Diff::BlockInsertion { index: 1, .. }));
    }
}
