//! Error types for the merge crate.

use notesync_diff::DiffError;
use notesync_types::TypeError;

/// Errors that can occur during a merge.
///
/// Divergent document types and conflicting edits are resolved by policy and
/// never reported here. The only content errors are broken id invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// Diffing one side against the base failed.
    #[error("diff error: {0}")]
    Diff(#[from] DiffError),

    /// A snapshot breaks an id uniqueness invariant.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(#[from] TypeError),

    /// The merge configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
