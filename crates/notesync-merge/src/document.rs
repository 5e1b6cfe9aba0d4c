//! Block-level merge of a rich-text document.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use notesync_types::{Block, BlockId, Content, Document, Paragraph, Span};

use crate::config::SelectionFrom;
use crate::index::DiffIndex;
use crate::order;
use crate::selection::AnchoredSelection;
use crate::text::{side_hunks, Bias, TextMerge};

/// Merge both sides' block diffs into `base`.
///
/// A block deleted by the preferred side is gone. A block deleted by the
/// other side is gone unless the preferred side modified it. Surviving
/// blocks take the preferred side's replacement if it has one, otherwise
/// the other side's replacement when the preferred side left the block
/// alone, otherwise the merge of both sides' paragraph edits. Inserted
/// blocks are placed after the base block they followed on their side.
pub fn merge_document(
    base: &Document,
    primary: &DiffIndex,
    secondary: &DiffIndex,
    prefer: SelectionFrom,
    selection: &AnchoredSelection,
) -> Document {
    let preferred = prefer.pick(primary, secondary);
    let other = prefer.pick(secondary, primary);

    let mut text_merges = BTreeMap::new();
    let mut survivors = Vec::with_capacity(base.blocks.len());
    for block in &base.blocks {
        let id = block.id();
        let merged = if is_deleted(id, preferred, other) {
            trace!(block = %id, "block deleted");
            None
        } else {
            Some(merge_block(block, primary, secondary, prefer, &mut text_merges))
        };
        survivors.push((id.clone(), merged));
    }

    let base_ids: Vec<BlockId> = base.blocks.iter().map(|b| b.id().clone()).collect();
    let insertions = order::combine(
        side_insertions(&base_ids, preferred),
        side_insertions(&base_ids, other),
        Block::id,
    );
    debug!(
        blocks = base.blocks.len(),
        inserted = insertions.len(),
        text_merges = text_merges.len(),
        "merged document"
    );
    let blocks = order::interleave(survivors, insertions);
    let selection = selection.resolve(&blocks, &text_merges);

    Document {
        kind: base.kind,
        blocks,
        strokes: base.strokes.clone(),
        selection,
    }
}

fn is_deleted(id: &BlockId, preferred: &DiffIndex, other: &DiffIndex) -> bool {
    preferred.block_deletions.contains(id)
        || (other.block_deletions.contains(id) && !preferred.modifies_block(id))
}

fn side_insertions(base_ids: &[BlockId], index: &DiffIndex) -> Vec<(Option<BlockId>, Block)> {
    order::anchored(base_ids, &index.block_deletions, &index.block_insertions, Block::id)
}

fn merge_block(
    block: &Block,
    primary: &DiffIndex,
    secondary: &DiffIndex,
    prefer: SelectionFrom,
    text_merges: &mut BTreeMap<BlockId, TextMerge>,
) -> Block {
    let id = block.id();
    let preferred = prefer.pick(primary, secondary);
    let other = prefer.pick(secondary, primary);

    if let Some(update) = preferred.block_updates.get(id) {
        return update.clone();
    }
    if !preferred.edits_paragraph(id) {
        if let Some(update) = other.block_updates.get(id) {
            return update.clone();
        }
    }
    match block {
        Block::Paragraph(paragraph)
            if primary.edits_paragraph(id) || secondary.edits_paragraph(id) =>
        {
            let (merged, text) = merge_paragraph(paragraph, primary, secondary, prefer);
            text_merges.insert(id.clone(), text);
            Block::Paragraph(merged)
        }
        _ => block.clone(),
    }
}

/// Merge both sides' paragraph edits into `base`.
///
/// Text goes through [`TextMerge`]. Base spans removed by neither side keep
/// their offsets, clamped to the merged text. Spans inserted by the preferred
/// side follow, then those inserted by the other side, each moved from its
/// side's coordinates into merged ones; inserted spans that end up empty are
/// dropped. A flag flipped by the preferred side takes its value, else a flip
/// by the other side does.
pub fn merge_paragraph(
    base: &Paragraph,
    primary: &DiffIndex,
    secondary: &DiffIndex,
    prefer: SelectionFrom,
) -> (Paragraph, TextMerge) {
    let id = &base.id;
    let base_len = base.content.char_len();
    let hunks = |index: &DiffIndex| {
        side_hunks(
            base_len,
            index.text_deletions.get(id).map(Vec::as_slice).unwrap_or_default(),
            index.text_insertions.get(id).map(Vec::as_slice).unwrap_or_default(),
        )
    };
    let text = TextMerge::new(&base.content.text, hunks(primary), hunks(secondary), prefer);

    let removed = |span: &Span| {
        [primary, secondary]
            .iter()
            .any(|index| index.span_deletions.get(id).is_some_and(|s| s.contains(span)))
    };
    // A side that moved a span records it as a deletion plus an insertion,
    // so surviving base spans stay at their base offsets.
    let merged_len = text.len();
    let mut spans: Vec<Span> = base
        .content
        .spans
        .iter()
        .filter(|span| !removed(*span))
        .filter_map(|span| {
            let start = span.start.min(merged_len);
            let end = span.end.min(merged_len);
            (start < end || span.is_empty()).then_some(Span { start, end, ..*span })
        })
        .collect();

    for side in [prefer, prefer.other()] {
        let index = side.pick(primary, secondary);
        for span in index.span_insertions.get(id).into_iter().flatten() {
            let start = text.map_side(side, span.start, Bias::Right);
            let end = text.map_side(side, span.end, Bias::Left);
            let mapped = Span { start, end, ..*span };
            if start < end && !spans.contains(&mapped) {
                spans.push(mapped);
            }
        }
    }

    let preferred = prefer.pick(primary, secondary);
    let other = prefer.pick(secondary, primary);
    let unordered_list = preferred
        .unordered_list
        .get(id)
        .or_else(|| other.unordered_list.get(id))
        .copied()
        .unwrap_or(base.unordered_list);
    let right_to_left = preferred
        .right_to_left
        .get(id)
        .or_else(|| other.right_to_left.get(id))
        .copied()
        .unwrap_or(base.right_to_left);

    let paragraph = Paragraph {
        id: id.clone(),
        unordered_list,
        right_to_left,
        content: Content {
            text: text.text().to_string(),
            spans,
        },
    };
    (paragraph, text)
}
