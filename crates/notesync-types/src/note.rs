use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::document::{Document, DocumentKind};
use crate::error::{TypeError, TypeResult};
use crate::id::NoteId;
use crate::media::Media;
use crate::metadata::Metadata;

/// Server linkage of a note that has been synced at least once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteData {
    /// Server-side id of the note.
    pub id: String,
    /// Opaque version token returned by the server with the last response.
    pub change_key: String,
    /// The snapshot the server last acknowledged. Used as merge base when a
    /// server delta arrives.
    pub last_server_version: Box<Note>,
}

/// An immutable snapshot of a note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub color: Color,
    pub document: Document,
    #[serde(default)]
    pub media: Vec<Media>,
    #[serde(default)]
    pub metadata: Metadata,
    /// Incremented by the application on every local edit.
    #[serde(default)]
    pub revision: u64,
    /// Locally retained checkpoint ("uiShadow") used as merge base for edits
    /// made while a merge was pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Box<Note>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_data: Option<RemoteData>,
    pub document_modified_at: DateTime<Utc>,
}

impl Note {
    /// A fresh, never-synced note.
    pub fn new(
        id: impl Into<NoteId>,
        document: Document,
        document_modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            color: Color::default(),
            document,
            media: Vec::new(),
            metadata: Metadata::default(),
            revision: 0,
            shadow: None,
            remote_data: None,
            document_modified_at,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_media(mut self, media: Vec<Media>) -> Self {
        self.media = media;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn kind(&self) -> DocumentKind {
        self.document.kind
    }

    pub fn is_rendered_ink(&self) -> bool {
        self.document.kind == DocumentKind::RenderedInk
    }

    pub fn is_ink(&self) -> bool {
        self.document.kind == DocumentKind::Ink
    }

    pub fn ui_shadow(&self) -> Option<&Note> {
        self.shadow.as_deref()
    }

    pub fn last_server_version(&self) -> Option<&Note> {
        self.remote_data
            .as_ref()
            .map(|remote| remote.last_server_version.as_ref())
    }

    /// A copy of this note whose shadow is the note itself.
    ///
    /// The stored shadow does not carry a shadow of its own, so repeated
    /// calls do not nest.
    pub fn as_own_shadow(&self) -> Note {
        let mut checkpoint = self.clone();
        checkpoint.shadow = None;
        let mut note = self.clone();
        note.shadow = Some(Box::new(checkpoint));
        note
    }

    /// Check the id uniqueness invariants of the document and media list.
    pub fn validate(&self) -> TypeResult<()> {
        self.document.validate()?;
        let mut seen = HashSet::with_capacity(self.media.len());
        for media in &self.media {
            if !seen.insert(&media.id) {
                return Err(TypeError::DuplicateMediaId(media.id.clone()));
            }
        }
        Ok(())
    }
}
