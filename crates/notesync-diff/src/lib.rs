//! Structural diff engine for notesync.
//!
//! Compares two snapshots of the same note and produces id-addressed change
//! sets. Diffs are derived data: they are recomputed from `(base, target)`
//! every time and never stored.
//!
//! # Key Types
//!
//! - [`Diff`] -- One change between two rich-text note snapshots
//! - [`InkDiff`] -- One stroke change between two live-ink documents
//!
//! # Entry Points
//!
//! - [`diff`] -- Full note diff (color, blocks, media)
//! - [`sort_diffs`] -- Deterministic application order
//! - [`diff_ink`] -- Stroke-level diff of ink documents

pub mod block_diff;
pub mod error;
pub mod ink_diff;
pub mod media_diff;
pub mod model;
pub mod note_diff;
pub mod sort;
pub mod span_diff;
pub mod text_diff;

pub use block_diff::{diff_block, diff_blocks, diff_content};
pub use error::{DiffError, DiffResult};
pub use ink_diff::{diff_ink, InkDiff};
pub use media_diff::diff_media;
pub use model::Diff;
pub use note_diff::diff;
pub use sort::{sort_diffs, sorted};
