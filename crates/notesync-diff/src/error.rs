//! Error types for the diff crate.

use notesync_types::TypeError;

/// Errors that can occur during diff operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// One of the snapshots breaks an id uniqueness invariant. Diffing it
    /// would join unrelated entities.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(#[from] TypeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
