use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};

/// Which side of a merge provides the selection and wins same-range
/// collisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionFrom {
    #[default]
    Primary,
    Secondary,
}

impl SelectionFrom {
    pub fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    /// Pick this side's value out of a `(primary, secondary)` pair.
    pub fn pick<T>(self, primary: T, secondary: T) -> T {
        match self {
            Self::Primary => primary,
            Self::Secondary => secondary,
        }
    }
}

/// Configuration for a [`crate::Merger`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Side that provides the selection and wins collisions.
    pub selection_from: SelectionFrom,
    /// Emit every computed diff at `trace` level.
    pub log_diffs: bool,
}

impl MergeConfig {
    pub fn new(selection_from: SelectionFrom) -> Self {
        Self {
            selection_from,
            ..Default::default()
        }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> MergeResult<Self> {
        toml::from_str(s).map_err(|e| MergeError::Config(e.to_string()))
    }
}
