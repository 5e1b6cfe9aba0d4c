//! Note value model for notesync.
//!
//! Every type in this crate is a plain immutable value. A [`Note`] is a
//! snapshot: editing a note or receiving a server delta produces a new
//! snapshot rather than mutating shared state. The diff and merge crates
//! consume these snapshots by reference and never hold on to them.
//!
//! # Key Types
//!
//! - [`Note`] -- A full note snapshot with its shadow and server linkage
//! - [`Document`] -- Typed document body: blocks, ink strokes and selection
//! - [`Block`] -- Either a [`Paragraph`] or an opaque [`InlineMedia`]
//! - [`Content`] / [`Span`] -- Paragraph text and its style ranges
//! - [`Media`] -- Note-level attachment
//! - [`Metadata`] -- Capture context and reminder

pub mod block;
pub mod color;
pub mod document;
pub mod error;
pub mod id;
pub mod ink;
pub mod media;
pub mod metadata;
pub mod note;
pub mod span;

pub use block::{Block, Content, InlineMedia, Paragraph};
pub use color::Color;
pub use document::{Document, DocumentKind, Selection, TextPosition};
pub use error::{TypeError, TypeResult};
pub use id::{BlockId, MediaId, NoteId, StrokeId};
pub use ink::{InkPoint, Stroke};
pub use media::{Dimensions, Media};
pub use metadata::{Metadata, NoteContext, Reminder};
pub use note::{Note, RemoteData};
pub use span::{Span, SpanStyle};
