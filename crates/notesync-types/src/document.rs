use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::block::{Block, Paragraph};
use crate::error::{TypeError, TypeResult};
use crate::id::BlockId;
use crate::ink::Stroke;

/// What a document's body is made of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Paragraphs and inline media.
    #[default]
    RichText,
    /// Ink rasterized to an image; the strokes are not available.
    RenderedInk,
    /// Live pen strokes.
    Ink,
    /// Produced by a newer client; carried through untouched.
    Unsupported,
}

/// A cursor position: a block index and a `char` offset inside that block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextPosition {
    pub block_index: usize,
    pub offset: usize,
}

impl TextPosition {
    pub fn new(block_index: usize, offset: usize) -> Self {
        Self {
            block_index,
            offset,
        }
    }
}

/// The active selection of a document. A collapsed selection is a caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl Selection {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    /// A caret at `offset` in block `block_index`.
    pub fn caret(block_index: usize, offset: usize) -> Self {
        let pos = TextPosition::new(block_index, offset);
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// The body of a note.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub kind: DocumentKind,
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Pen strokes; only populated for [`DocumentKind::Ink`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Stroke>,
    #[serde(default)]
    pub selection: Selection,
}

impl Document {
    /// A rich-text document with the given blocks and a caret at the start.
    pub fn rich_text(blocks: Vec<Block>) -> Self {
        Self {
            kind: DocumentKind::RichText,
            blocks,
            strokes: Vec::new(),
            selection: Selection::default(),
        }
    }

    /// A live-ink document holding the given strokes.
    pub fn ink(strokes: Vec<Stroke>) -> Self {
        Self {
            kind: DocumentKind::Ink,
            blocks: Vec::new(),
            strokes,
            selection: Selection::default(),
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn block_index(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == id)
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// Concatenated paragraph text, one line per paragraph.
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(|p| p.content.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check that block ids and stroke ids are unique.
    pub fn validate(&self) -> TypeResult<()> {
        let mut blocks = HashSet::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if !blocks.insert(block.id()) {
                return Err(TypeError::DuplicateBlockId(block.id().clone()));
            }
        }
        let mut strokes = HashSet::with_capacity(self.strokes.len());
        for stroke in &self.strokes {
            if !strokes.insert(&stroke.id) {
                return Err(TypeError::DuplicateStrokeId(stroke.id.clone()));
            }
        }
        Ok(())
    }
}
