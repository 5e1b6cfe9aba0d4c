//! Carrying the selection of one side into the merged document.
//!
//! Selections address blocks by index, which the merge invalidates. Before
//! merging, each endpoint is re-expressed as a block id plus an offset in that
//! side's text; afterwards the id is looked up again and the offset is mapped
//! through the block's [`TextMerge`].

use std::collections::BTreeMap;

use notesync_types::{Block, BlockId, Document, Selection, TextPosition};

use crate::config::SelectionFrom;
use crate::text::{Bias, TextMerge};

/// A selection endpoint addressed by block id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdPosition {
    pub block_id: BlockId,
    pub offset: usize,
}

impl IdPosition {
    fn from_position(document: &Document, position: TextPosition) -> Option<Self> {
        document.blocks.get(position.block_index).map(|block| Self {
            block_id: block.id().clone(),
            offset: position.offset,
        })
    }
}

/// The selection of one side, detached from block indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchoredSelection {
    side: SelectionFrom,
    start: Option<IdPosition>,
    end: Option<IdPosition>,
}

impl AnchoredSelection {
    /// Anchor `document`'s selection, which belongs to `side`. Endpoints
    /// pointing past the last block are left unanchored.
    pub fn new(document: &Document, side: SelectionFrom) -> Self {
        Self {
            side,
            start: IdPosition::from_position(document, document.selection.start),
            end: IdPosition::from_position(document, document.selection.end),
        }
    }

    /// Resolve against merged `blocks`. The start leans left and the end
    /// leans right, so text inserted by the other side at a selection edge
    /// ends up inside the selection. Endpoints whose block no longer exists
    /// collapse to the end of the document.
    pub fn resolve(
        &self,
        blocks: &[Block],
        text_merges: &BTreeMap<BlockId, TextMerge>,
    ) -> Selection {
        Selection {
            start: self.resolve_position(self.start.as_ref(), blocks, text_merges, Bias::Left),
            end: self.resolve_position(self.end.as_ref(), blocks, text_merges, Bias::Right),
        }
    }

    fn resolve_position(
        &self,
        position: Option<&IdPosition>,
        blocks: &[Block],
        text_merges: &BTreeMap<BlockId, TextMerge>,
        bias: Bias,
    ) -> TextPosition {
        let found = position.and_then(|p| {
            blocks
                .iter()
                .position(|b| b.id() == &p.block_id)
                .map(|index| (index, p))
        });
        match found {
            Some((index, p)) => {
                let offset = match text_merges.get(&p.block_id) {
                    Some(merge) => merge.map_side(self.side, p.offset, bias),
                    None => p.offset,
                };
                TextPosition::new(index, offset.min(blocks[index].char_len()))
            }
            None => end_of(blocks),
        }
    }
}

/// Caret position after the last char of the last block.
pub fn end_of(blocks: &[Block]) -> TextPosition {
    match blocks.last() {
        Some(last) => TextPosition::new(blocks.len() - 1, last.char_len()),
        None => TextPosition::new(0, 0),
    }
}

/// Pull a selection back inside `blocks`.
pub fn clamp(selection: Selection, blocks: &[Block]) -> Selection {
    let clamp_one = |p: TextPosition| match blocks.get(p.block_index) {
        Some(block) => TextPosition::new(p.block_index, p.offset.min(block.char_len())),
        None => end_of(blocks),
    };
    Selection {
        start: clamp_one(selection.start),
        end: clamp_one(selection.end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::side_hunks;
    use notesync_types::Paragraph;

    fn doc(blocks: &[(&str, &str)]) -> Document {
        Document::rich_text(
            blocks
                .iter()
                .map(|(id, text)| Paragraph::new(*id, *text).into())
                .collect(),
        )
    }

    #[test]
    fn anchors_by_block_id() {
        let d = doc(&[("a", "one"), ("b", "two")]).with_selection(Selection::new(
            TextPosition::new(0, 1),
            TextPosition::new(1, 2),
        ));
        let anchored = AnchoredSelection::new(&d, SelectionFrom::Primary);

        // "a" was removed and a new block leads the list
        let merged = doc(&[("z", "zz"), ("b", "two")]);
        let selection = anchored.resolve(&merged.blocks, &BTreeMap::new());
        assert_eq!(selection.start, TextPosition::new(1, 3));
        assert_eq!(selection.end, TextPosition::new(1, 2));
    }

    #[test]
    fn offsets_follow_text_merge() {
        let d = doc(&[("a", "hello world")]).with_selection(Selection::caret(0, 11));
        let anchored = AnchoredSelection::new(&d, SelectionFrom::Primary);

        // secondary typed at the head of the paragraph
        let merge = TextMerge::new(
            "hello world",
            vec![],
            side_hunks(11, &[], &[(">> ".into(), 0)]),
            SelectionFrom::Primary,
        );
        let merged = doc(&[("a", merge.text())]);
        let merges = BTreeMap::from([(BlockId::from("a"), merge)]);
        let selection = anchored.resolve(&merged.blocks, &merges);
        assert_eq!(selection, Selection::caret(0, 14));
    }

    #[test]
    fn missing_anchor_collapses_to_end() {
        let d = doc(&[("a", "x")]).with_selection(Selection::caret(0, 0));
        let anchored = AnchoredSelection::new(&d, SelectionFrom::Secondary);
        let merged = doc(&[("b", "four")]);
        assert_eq!(
            anchored.resolve(&merged.blocks, &BTreeMap::new()),
            Selection::caret(0, 4)
        );
        assert_eq!(
            anchored.resolve(&[], &BTreeMap::new()),
            Selection::caret(0, 0)
        );
    }

    #[test]
    fn clamp_pulls_offsets_inside() {
        let d = doc(&[("a", "ab")]);
        let s = Selection::new(TextPosition::new(0, 5), TextPosition::new(3, 0));
        assert_eq!(
            clamp(s, &d.blocks),
            Selection::new(TextPosition::new(0, 2), TextPosition::new(0, 2))
        );
    }
}
