//! Document blocks.

use serde::{Deserialize, Serialize};

use crate::id::BlockId;
use crate::span::Span;

/// Text of a paragraph and the style ranges over it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Content {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    pub fn with_spans(text: impl Into<String>, spans: Vec<Span>) -> Self {
        Self {
            text: text.into(),
            spans,
        }
    }

    /// Length of the text in `char`s, the unit every offset is expressed in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A paragraph of styled text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub id: BlockId,
    #[serde(default)]
    pub unordered_list: bool,
    #[serde(default)]
    pub right_to_left: bool,
    pub content: Content,
}

impl Paragraph {
    pub fn new(id: impl Into<BlockId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unordered_list: false,
            right_to_left: false,
            content: Content::new(text),
        }
    }
}

/// An image embedded between paragraphs. Merged as a single unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineMedia {
    pub id: BlockId,
    pub local_url: Option<String>,
    pub remote_url: Option<String>,
    pub mime_type: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// One entry in a document's block list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    InlineMedia(InlineMedia),
}

impl Block {
    pub fn id(&self) -> &BlockId {
        match self {
            Self::Paragraph(p) => &p.id,
            Self::InlineMedia(m) => &m.id,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Self::Paragraph(p) => Some(p),
            Self::InlineMedia(_) => None,
        }
    }

    /// Length of the block's selectable text. Media blocks have none, so
    /// only offset 0 is valid in them.
    pub fn char_len(&self) -> usize {
        match self {
            Self::Paragraph(p) => p.content.char_len(),
            Self::InlineMedia(_) => 0,
        }
    }
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Self::Paragraph(p)
    }
}

impl From<InlineMedia> for Block {
    fn from(m: InlineMedia) -> Self {
        Self::InlineMedia(m)
    }
}
