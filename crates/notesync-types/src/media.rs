use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::MediaId;

/// Pixel size of an image attachment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A note-level attachment.
///
/// `remote_id` is filled in once the server has accepted the upload;
/// `local_url` points at the on-device copy, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    #[serde(default)]
    pub remote_id: Option<String>,
    #[serde(default)]
    pub local_url: Option<String>,
    pub mime_type: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    pub last_modified: DateTime<Utc>,
}

impl Media {
    pub fn new(
        id: impl Into<MediaId>,
        mime_type: impl Into<String>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            remote_id: None,
            local_url: None,
            mime_type: mime_type.into(),
            alt_text: None,
            dimensions: None,
            last_modified,
        }
    }
}
