use std::fmt;

use serde::{Deserialize, Serialize};

/// Character style flags carried by a [`Span`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanStyle {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
}

impl SpanStyle {
    pub const PLAIN: Self = Self {
        bold: false,
        italic: false,
        underline: false,
        strikethrough: false,
    };
    pub const BOLD: Self = Self {
        bold: true,
        ..Self::PLAIN
    };
    pub const ITALIC: Self = Self {
        italic: true,
        ..Self::PLAIN
    };
    pub const UNDERLINE: Self = Self {
        underline: true,
        ..Self::PLAIN
    };
    pub const STRIKETHROUGH: Self = Self {
        strikethrough: true,
        ..Self::PLAIN
    };

    /// Returns `true` if no style flag is set.
    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}

impl fmt::Display for SpanStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_plain() {
            return f.write_str("PLAIN");
        }
        let names: Vec<&str> = [
            (self.bold, "BOLD"),
            (self.italic, "ITALIC"),
            (self.underline, "UNDERLINE"),
            (self.strikethrough, "STRIKETHROUGH"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect();
        f.write_str(&names.join("|"))
    }
}

/// A style applied to the half-open character range `[start, end)` of a
/// paragraph.
///
/// Spans are compared structurally: two spans are the same span only if
/// style, both bounds and the flag all match. Offsets count `char`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub style: SpanStyle,
    pub start: usize,
    pub end: usize,
    /// Ordering flag controlling how the span behaves at its boundaries when
    /// text is typed next to it.
    #[serde(default)]
    pub flag: i32,
}

impl Span {
    pub fn new(style: SpanStyle, start: usize, end: usize) -> Self {
        Self {
            style,
            start,
            end,
            flag: 0,
        }
    }

    pub fn with_flag(mut self, flag: i32) -> Self {
        self.flag = flag;
        self
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
