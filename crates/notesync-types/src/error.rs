use thiserror::Error;

use crate::id::{BlockId, MediaId, StrokeId};

/// Errors produced when a snapshot violates the model invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Two blocks in one document share an id.
    #[error("duplicate block id: {0}")]
    DuplicateBlockId(BlockId),

    /// Two media attachments in one note share an id.
    #[error("duplicate media id: {0}")]
    DuplicateMediaId(MediaId),

    /// Two ink strokes in one document share an id.
    #[error("duplicate stroke id: {0}")]
    DuplicateStrokeId(StrokeId),
}

/// Convenience alias for model validation results.
pub type TypeResult<T> = Result<T, TypeError>;
