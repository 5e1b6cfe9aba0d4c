//! Character-level text diff.
//!
//! The diff trims the common prefix and the common suffix of the two
//! strings; whatever is left in the middle is the changed section. The base's
//! middle is deleted and the target's middle is inserted. This is cheaper and
//! more predictable than an LCS diff and matches how a single editing session
//! changes a paragraph: one contiguous replacement.
//!
//! All offsets count `char`s (Unicode scalar values). A surrogate pair or a
//! multi-byte UTF-8 sequence is never split; grapheme clusters can be.

use std::ops::Range;

use notesync_types::BlockId;

use crate::model::Diff;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn prefix_len(base: &[char], target: &[char]) -> usize {
    base.iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count()
}

fn suffix_start(base: &[char], target: &[char], prefix: usize) -> (usize, usize) {
    let mut i = base.len();
    let mut j = target.len();
    while i > prefix && j > prefix && base[i - 1] == target[j - 1] {
        i -= 1;
        j -= 1;
    }
    (i, j)
}

fn ranges(base: &[char], target: &[char]) -> (Range<usize>, Range<usize>) {
    let prefix = prefix_len(base, target);
    let (base_end, target_end) = suffix_start(base, target, prefix);
    (prefix..base_end, prefix..target_end)
}

/// Length of the longest common prefix.
pub fn prefix_offset(base: &str, target: &str) -> usize {
    prefix_len(&chars(base), &chars(target))
}

/// Where the common suffix begins in each string, as `(base_index,
/// target_index)`. The suffix never reaches back past `prefix_offset`, so the
/// prefix and suffix do not overlap.
pub fn suffix_offset(base: &str, target: &str, prefix_offset: usize) -> (usize, usize) {
    suffix_start(&chars(base), &chars(target), prefix_offset)
}

/// The differing middle section of each string as half-open ranges:
/// `(base_range, target_range)`. Both are empty when the strings are equal.
pub fn changed_ranges(base: &str, target: &str) -> (Range<usize>, Range<usize>) {
    ranges(&chars(base), &chars(target))
}

/// Indices of base characters that do not survive into the target.
pub fn to_delete_indices(base: &str, target: &str) -> Vec<usize> {
    let (base_range, _) = changed_ranges(base, target);
    base_range.collect()
}

/// Target characters that are not in the base, with their target index.
pub fn to_char_insert(base: &str, target: &str) -> Vec<(char, usize)> {
    let target_chars = chars(target);
    let (_, target_range) = ranges(&chars(base), &target_chars);
    target_range.map(|i| (target_chars[i], i)).collect()
}

/// Deletions coalesced into runs of adjacent indices.
///
/// Each run becomes one [`Diff::BlockTextDeletion`] with an inclusive `end`.
pub fn text_deletes(block_id: &BlockId, base: &str, target: &str) -> Vec<Diff> {
    let mut diffs = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    for index in to_delete_indices(base, target) {
        run = match run {
            Some((start, end)) if index == end + 1 => Some((start, index)),
            Some((start, end)) => {
                diffs.push(Diff::BlockTextDeletion {
                    block_id: block_id.clone(),
                    start,
                    end,
                });
                Some((index, index))
            }
            None => Some((index, index)),
        };
    }
    if let Some((start, end)) = run {
        diffs.push(Diff::BlockTextDeletion {
            block_id: block_id.clone(),
            start,
            end,
        });
    }
    diffs
}

/// Insertions coalesced into runs of adjacent target indices.
pub fn text_inserts(block_id: &BlockId, base: &str, target: &str) -> Vec<Diff> {
    let mut diffs = Vec::new();
    let mut run: Option<(String, usize, usize)> = None;

    for (c, index) in to_char_insert(base, target) {
        if let Some((text, _, last)) = run.as_mut() {
            if index == *last + 1 {
                text.push(c);
                *last = index;
                continue;
            }
        }
        if let Some((text, start, _)) = run.take() {
            diffs.push(Diff::BlockTextInsertion {
                block_id: block_id.clone(),
                text,
                index: start,
            });
        }
        run = Some((c.to_string(), index, index));
    }
    if let Some((text, start, _)) = run {
        diffs.push(Diff::BlockTextInsertion {
            block_id: block_id.clone(),
            text,
            index: start,
        });
    }
    diffs
}

/// Apply text deletions and insertions to `text`, in the order given.
///
/// Non-text diffs are ignored. Deletions are expected tail-first (as
/// produced by [`crate::sort_diffs`]) and insertions head-first, which is the
/// order that keeps every offset valid.
pub fn apply_text_diffs<'a>(text: &str, diffs: impl IntoIterator<Item = &'a Diff>) -> String {
    let mut out = chars(text);
    for diff in diffs {
        match diff {
            Diff::BlockTextDeletion { start, end, .. } => {
                let end = (*end + 1).min(out.len());
                let start = (*start).min(end);
                out.drain(start..end);
            }
            Diff::BlockTextInsertion {
                text: inserted,
                index,
                ..
            } => {
                let at = (*index).min(out.len());
                let tail = out.split_off(at);
                out.extend(inserted.chars());
                out.extend(tail);
            }
            _ => {}
        }
    }
    out.into_iter().collect()
}
