//! Stable string identifiers.
//!
//! Ids are assigned once when an entity is created and never change, so they
//! serve as the join key when two snapshots of the same note are compared.
//! Server-assigned ids arrive as arbitrary strings; locally created ids are
//! time-ordered UUID v7 strings.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh time-ordered id (UUID v7).
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7().to_string())
            }

            /// The id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Local identifier of a note.
    NoteId
);

string_id!(
    /// Identifier of a block, unique within its document.
    BlockId
);

string_id!(
    /// Identifier of a media attachment, unique within its note.
    MediaId
);

string_id!(
    /// Identifier of an ink stroke, unique within its document.
    StrokeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = BlockId::new();
        let b = BlockId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn from_str_keeps_value() {
        let id = MediaId::from("m-1");
        assert_eq!(id.as_str(), "m-1");
        assert_eq!(id.to_string(), "m-1");
        assert_eq!(format!("{id:?}"), "MediaId(m-1)");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = StrokeId::from("s1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"s1\"");
        let parsed: StrokeId = serde_json::from_str("\"s1\"").unwrap();
        assert_eq!(parsed, id);
    }
}
