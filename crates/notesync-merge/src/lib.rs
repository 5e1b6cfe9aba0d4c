//! Three-way merge engine for notesync.
//!
//! Reconciles two snapshots of a note (primary and secondary) that both
//! diverged from a shared base. Each side is diffed against the base, the two
//! change sets are combined with deterministic tie-breaks, and the result is
//! applied to the base. The whole computation is a pure function of its
//! inputs: no I/O, no shared state, no caching.
//!
//! # Entry Points
//!
//! - [`three_way_merge`] -- Merge with an explicit tie-break side
//! - [`Merger`] -- Merge driven by a [`MergeConfig`]
//! - [`can_three_way_merge`] / [`note_with_new_type`] -- Document type guard
//! - [`merge_server_update`] / [`merge_ui_edit`] -- Merge against a note's own shadows

pub mod config;
pub mod document;
pub mod error;
pub mod guard;
pub mod index;
pub mod ink;
pub mod media;
pub mod merge;
pub mod metadata;
pub mod order;
pub mod patch;
pub mod selection;
pub mod shadow;
pub mod text;

pub use config::{MergeConfig, SelectionFrom};
pub use error::{MergeError, MergeResult};
pub use guard::{can_three_way_merge, note_with_new_type};
pub use index::{merge_diffs, merge_updates, DiffIndex};
pub use merge::{three_way_merge, Merger};
pub use shadow::{merge_server_update, merge_ui_edit, MergeBase};
