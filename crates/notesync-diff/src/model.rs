//! The [`Diff`] sum type.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notesync_types::{Block, BlockId, Color, Dimensions, Media, MediaId, Span};

/// A single change between a base note and a target note.
///
/// Every variant names its target by id, except the two insertion variants
/// which carry the new entity and its index in the target list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Diff {
    ColorUpdate {
        color: Color,
    },
    /// A block that exists only in the target, at `index` in the target's
    /// block list.
    BlockInsertion {
        block: Block,
        index: usize,
    },
    BlockDeletion {
        block_id: BlockId,
    },
    /// Whole-block replacement, used for every pairing other than
    /// paragraph/paragraph.
    BlockUpdate {
        block: Block,
    },
    /// `text` inserted at `index` (target coordinates).
    BlockTextInsertion {
        block_id: BlockId,
        text: String,
        index: usize,
    },
    /// Characters `start..=end` of the base text removed.
    BlockTextDeletion {
        block_id: BlockId,
        start: usize,
        end: usize,
    },
    SpanInsertion {
        block_id: BlockId,
        span: Span,
    },
    SpanDeletion {
        block_id: BlockId,
        span: Span,
    },
    UnorderedListInsertion {
        block_id: BlockId,
    },
    UnorderedListDeletion {
        block_id: BlockId,
    },
    RightToLeftInsertion {
        block_id: BlockId,
    },
    RightToLeftDeletion {
        block_id: BlockId,
    },
    MediaInsertion {
        media: Media,
        index: usize,
    },
    MediaDeletion {
        media_id: MediaId,
    },
    MediaUpdateRemoteId {
        media_id: MediaId,
        remote_id: Option<String>,
    },
    MediaUpdateLocalUrl {
        media_id: MediaId,
        local_url: Option<String>,
    },
    MediaUpdateMimeType {
        media_id: MediaId,
        mime_type: String,
    },
    MediaUpdateAltText {
        media_id: MediaId,
        alt_text: Option<String>,
    },
    MediaUpdateDimensions {
        media_id: MediaId,
        dimensions: Option<Dimensions>,
    },
    MediaUpdateLastModified {
        media_id: MediaId,
        last_modified: DateTime<Utc>,
    },
}

impl Diff {
    /// The block this diff targets, if it is a block-level diff.
    pub fn block_id(&self) -> Option<&BlockId> {
        match self {
            Self::BlockInsertion { block, .. } | Self::BlockUpdate { block } => Some(block.id()),
            Self::BlockDeletion { block_id }
            | Self::BlockTextInsertion { block_id, .. }
            | Self::BlockTextDeletion { block_id, .. }
            | Self::SpanInsertion { block_id, .. }
            | Self::SpanDeletion { block_id, .. }
            | Self::UnorderedListInsertion { block_id }
            | Self::UnorderedListDeletion { block_id }
            | Self::RightToLeftInsertion { block_id }
            | Self::RightToLeftDeletion { block_id } => Some(block_id),
            _ => None,
        }
    }

    /// The media attachment this diff targets, if it is a media diff.
    pub fn media_id(&self) -> Option<&MediaId> {
        match self {
            Self::MediaInsertion { media, .. } => Some(&media.id),
            Self::MediaDeletion { media_id }
            | Self::MediaUpdateRemoteId { media_id, .. }
            | Self::MediaUpdateLocalUrl { media_id, .. }
            | Self::MediaUpdateMimeType { media_id, .. }
            | Self::MediaUpdateAltText { media_id, .. }
            | Self::MediaUpdateDimensions { media_id, .. }
            | Self::MediaUpdateLastModified { media_id, .. } => Some(media_id),
            _ => None,
        }
    }

    /// Returns `true` for the variants that remove content.
    pub fn is_deletion(&self) -> bool {
        matches!(
            self,
            Self::BlockDeletion { .. }
                | Self::BlockTextDeletion { .. }
                | Self::SpanDeletion { .. }
                | Self::UnorderedListDeletion { .. }
                | Self::RightToLeftDeletion { .. }
                | Self::MediaDeletion { .. }
        )
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColorUpdate { color } => write!(f, "ColorUpdate({color})"),
            Self::BlockInsertion { block, index } => {
                write!(f, "BlockInsertion({}, {index})", block.id())
            }
            Self::BlockDeletion { block_id } => write!(f, "BlockDeletion({block_id})"),
            Self::BlockUpdate { block } => write!(f, "BlockUpdate({})", block.id()),
            Self::BlockTextInsertion {
                block_id,
                text,
                index,
            } => write!(f, "BlockTextInsertion({block_id}, {text:?}, {index})"),
            Self::BlockTextDeletion {
                block_id,
                start,
                end,
            } => write!(f, "BlockTextDeletion({block_id}, {start}, {end})"),
            Self::SpanInsertion { block_id, span } => write!(
                f,
                "SpanInsertion({block_id}, {}, {}, {})",
                span.style, span.start, span.end
            ),
            Self::SpanDeletion { block_id, span } => write!(
                f,
                "SpanDeletion({block_id}, {}, {}, {})",
                span.style, span.start, span.end
            ),
            Self::UnorderedListInsertion { block_id } => {
                write!(f, "UnorderedListInsertion({block_id})")
            }
            Self::UnorderedListDeletion { block_id } => {
                write!(f, "UnorderedListDeletion({block_id})")
            }
            Self::RightToLeftInsertion { block_id } => {
                write!(f, "RightToLeftInsertion({block_id})")
            }
            Self::RightToLeftDeletion { block_id } => write!(f, "RightToLeftDeletion({block_id})"),
            Self::MediaInsertion { media, index } => {
                write!(f, "MediaInsertion({}, {index})", media.id)
            }
            Self::MediaDeletion { media_id } => write!(f, "MediaDeletion({media_id})"),
            Self::MediaUpdateRemoteId { media_id, .. } => {
                write!(f, "MediaUpdateRemoteId({media_id})")
            }
            Self::MediaUpdateLocalUrl { media_id, .. } => {
                write!(f, "MediaUpdateLocalUrl({media_id})")
            }
            Self::MediaUpdateMimeType { media_id, .. } => {
                write!(f, "MediaUpdateMimeType({media_id})")
            }
            Self::MediaUpdateAltText { media_id, .. } => {
                write!(f, "MediaUpdateAltText({media_id})")
            }
            Self::MediaUpdateDimensions { media_id, .. } => {
                write!(f, "MediaUpdateDimensions({media_id})")
            }
            Self::MediaUpdateLastModified { media_id, .. } => {
                write!(f, "MediaUpdateLastModified({media_id})")
            }
        }
    }
}
