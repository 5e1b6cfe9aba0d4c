//! Paragraph text merge.
//!
//! Each side's text diffs for one paragraph are turned into [`Hunk`]s: a
//! half-open base range to remove plus the text that takes its place. Hunks
//! from the two sides are then combined: every hunk of the preferred side is
//! kept, and a hunk of the other side is kept only if it collides with none
//! of them. Kept hunks never overlap, so they can be applied to the base in
//! one left-to-right pass.
//!
//! [`TextMerge`] also remembers where each kept hunk landed, which lets spans
//! and the selection be carried from base or side coordinates into merged
//! coordinates.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::config::SelectionFrom;

/// Which way a position sitting exactly on an insertion point resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bias {
    /// Before text inserted at this position.
    Left,
    /// After text inserted at this position.
    Right,
}

/// One contiguous replacement, in base coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hunk {
    /// First removed base char.
    pub start: usize,
    /// One past the last removed base char; equal to `start` for a pure
    /// insertion.
    pub end: usize,
    pub text: String,
    /// Offset of `text` in the side's own version of the paragraph.
    pub target_start: usize,
}

impl Hunk {
    pub fn inserted_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_insertion(&self) -> bool {
        self.start == self.end
    }

    /// Two hunks collide when their base ranges overlap or they begin at the
    /// same base offset.
    pub fn conflicts_with(&self, other: &Hunk) -> bool {
        (self.start < other.end && other.start < self.end) || self.start == other.start
    }
}

/// Build one side's hunks from its text deletions (inclusive base ranges)
/// and text insertions (side-text offsets).
///
/// An insertion is anchored in front of the first surviving base char at its
/// offset; when that char directly follows a deleted run, the insertion and
/// the run form a single replacement hunk.
pub fn side_hunks(
    base_len: usize,
    deletions: &[(usize, usize)],
    insertions: &[(String, usize)],
) -> Vec<Hunk> {
    let deleted: BTreeSet<usize> = deletions
        .iter()
        .flat_map(|&(start, end)| start..=end)
        .filter(|&i| i < base_len)
        .collect();
    let kept: Vec<usize> = (0..base_len).filter(|i| !deleted.contains(i)).collect();

    let mut hunks: BTreeMap<usize, Hunk> = BTreeMap::new();
    let mut run: Option<(usize, usize)> = None;
    for &i in &deleted {
        run = match run {
            Some((start, end)) if i == end => Some((start, i + 1)),
            Some((start, end)) => {
                hunks.insert(start, replacement(start, end));
                Some((i, i + 1))
            }
            None => Some((i, i + 1)),
        };
    }
    if let Some((start, end)) = run {
        hunks.insert(start, replacement(start, end));
    }

    let mut ordered: Vec<&(String, usize)> = insertions.iter().collect();
    ordered.sort_by_key(|(_, index)| *index);

    let mut target = 0;
    let mut next_kept = 0;
    for (text, index) in ordered {
        while target < *index && next_kept < kept.len() {
            target += 1;
            next_kept += 1;
        }
        let anchor = kept.get(next_kept).copied().unwrap_or(base_len);
        match hunks.values_mut().find(|h| h.end == anchor) {
            Some(hunk) => hunk.text.push_str(text),
            None => {
                hunks
                    .entry(anchor)
                    .or_insert_with(|| replacement(anchor, anchor))
                    .text
                    .push_str(text);
            }
        }
        target += text.chars().count();
    }

    let mut removed = 0;
    let mut added = 0;
    for hunk in hunks.values_mut() {
        hunk.target_start = hunk.start - removed + added;
        removed += hunk.end - hunk.start;
        added += hunk.inserted_len();
    }
    hunks.into_values().collect()
}

fn side_hunk<'a>(
    primary: &'a [Hunk],
    secondary: &'a [Hunk],
    side: SelectionFrom,
    i: usize,
) -> &'a Hunk {
    match side {
        SelectionFrom::Primary => &primary[i],
        SelectionFrom::Secondary => &secondary[i],
    }
}

fn replacement(start: usize, end: usize) -> Hunk {
    Hunk {
        start,
        end,
        text: String::new(),
        target_start: 0,
    }
}

/// The merged text of one paragraph plus the bookkeeping needed to map
/// positions into it.
#[derive(Clone, Debug)]
pub struct TextMerge {
    text: String,
    len: usize,
    /// Kept hunks sorted by base start, with their merged start offset.
    kept: Vec<(Hunk, usize)>,
    /// Each side's hunks with their merged start, if they were kept.
    primary: Vec<(Hunk, Option<usize>)>,
    secondary: Vec<(Hunk, Option<usize>)>,
}

impl TextMerge {
    pub fn new(
        base: &str,
        primary: Vec<Hunk>,
        secondary: Vec<Hunk>,
        prefer: SelectionFrom,
    ) -> Self {
        let (preferred, other) = match prefer {
            SelectionFrom::Primary => (&primary, &secondary),
            SelectionFrom::Secondary => (&secondary, &primary),
        };

        let mut chosen: Vec<(SelectionFrom, usize)> =
            (0..preferred.len()).map(|i| (prefer, i)).collect();
        for (i, hunk) in other.iter().enumerate() {
            if preferred.iter().any(|p| p.conflicts_with(hunk)) {
                trace!(start = hunk.start, end = hunk.end, "dropping colliding text hunk");
            } else {
                chosen.push((prefer.other(), i));
            }
        }
        chosen.sort_by_key(|&(side, i)| side_hunk(&primary, &secondary, side, i).start);

        let base_chars: Vec<char> = base.chars().collect();
        let mut text = String::with_capacity(base.len());
        let mut len = 0;
        let mut cursor = 0;
        let mut kept = Vec::with_capacity(chosen.len());
        let mut primary_starts = vec![None; primary.len()];
        let mut secondary_starts = vec![None; secondary.len()];

        for &(side, i) in &chosen {
            let hunk = side_hunk(&primary, &secondary, side, i);
            let start = hunk.start.min(base_chars.len());
            text.extend(&base_chars[cursor.min(start)..start]);
            len += start.saturating_sub(cursor);
            let merged_start = len;
            text.push_str(&hunk.text);
            len += hunk.inserted_len();
            cursor = hunk.end.min(base_chars.len()).max(cursor);

            kept.push((hunk.clone(), merged_start));
            match side {
                SelectionFrom::Primary => primary_starts[i] = Some(merged_start),
                SelectionFrom::Secondary => secondary_starts[i] = Some(merged_start),
            }
        }
        if cursor < base_chars.len() {
            text.extend(&base_chars[cursor..]);
            len += base_chars.len() - cursor;
        }

        Self {
            text,
            len,
            kept,
            primary: primary.into_iter().zip(primary_starts).collect(),
            secondary: secondary.into_iter().zip(secondary_starts).collect(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the merged text in chars.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Map a base offset into the merged text.
    ///
    /// An offset inside a replaced range keeps its distance from the start
    /// of the range, clamped to the replacement's length.
    pub fn map_base(&self, pos: usize, bias: Bias) -> usize {
        let mut base_end = 0;
        let mut merged_end = 0;
        for (hunk, merged_start) in &self.kept {
            if pos < hunk.start {
                break;
            }
            let inserted = hunk.inserted_len();
            if hunk.is_insertion() && pos == hunk.start {
                return match bias {
                    Bias::Left => *merged_start,
                    Bias::Right => merged_start + inserted,
                };
            }
            if pos < hunk.end {
                return merged_start + (pos - hunk.start).min(inserted);
            }
            base_end = hunk.end;
            merged_end = merged_start + inserted;
        }
        (merged_end + pos.saturating_sub(base_end)).min(self.len)
    }

    /// Map an offset in one side's version of the paragraph into the merged
    /// text. Offsets inside text the side inserted follow that text if it
    /// was kept, and collapse onto the replaced range if it was dropped.
    pub fn map_side(&self, side: SelectionFrom, pos: usize, bias: Bias) -> usize {
        let hunks = match side {
            SelectionFrom::Primary => &self.primary,
            SelectionFrom::Secondary => &self.secondary,
        };

        let mut base_end = 0;
        let mut target_end = 0;
        for (hunk, merged_start) in hunks {
            if pos < hunk.target_start {
                break;
            }
            let inserted = hunk.inserted_len();
            let hunk_target_end = hunk.target_start + inserted;
            if pos > hunk_target_end {
                base_end = hunk.end;
                target_end = hunk_target_end;
                continue;
            }

            let before = pos == hunk.target_start && bias == Bias::Left;
            let after = pos == hunk_target_end && bias == Bias::Right;
            return match merged_start {
                Some(start) if inserted > 0 && !before && !after => {
                    start + (pos - hunk.target_start)
                }
                _ => match bias {
                    Bias::Left => self.map_base(hunk.start, Bias::Left),
                    Bias::Right => self.map_base(hunk.end, Bias::Right),
                },
            };
        }
        self.map_base(base_end + (pos - target_end), bias)
    }
}
