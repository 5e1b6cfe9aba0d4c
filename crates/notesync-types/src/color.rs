use std::fmt;

use serde::{Deserialize, Serialize};

/// Background color of a note.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Yellow,
    Green,
    Pink,
    Purple,
    Blue,
    Grey,
    Charcoal,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Pink => "pink",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Grey => "grey",
            Self::Charcoal => "charcoal",
        };
        f.write_str(name)
    }
}
