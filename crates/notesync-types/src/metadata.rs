use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a note was captured from (a web page, an app).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContext {
    pub host: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl NoteContext {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            url: None,
            display_name: None,
        }
    }
}

/// A time-based reminder attached to a note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub remind_at: DateTime<Utc>,
    #[serde(default)]
    pub dismissed: bool,
}

/// Note metadata merged field-by-field rather than diffed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub context: Option<NoteContext>,
    #[serde(default)]
    pub reminder: Option<Reminder>,
}
