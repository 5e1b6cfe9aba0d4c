//! Application order for diff lists.
//!
//! Text deletions run first, then span deletions, then everything else.
//! Within the two deletion groups the diff with the highest start offset
//! comes first, so removing a tail range never shifts the offsets of a head
//! range that is still waiting to be removed. All other diffs keep their
//! emission order.

use std::cmp::Reverse;

use crate::model::Diff;

fn sort_key(diff: &Diff) -> (u8, Reverse<usize>) {
    match diff {
        Diff::BlockTextDeletion { start, .. } => (0, Reverse(*start)),
        Diff::SpanDeletion { span, .. } => (1, Reverse(span.start)),
        _ => (2, Reverse(0)),
    }
}

/// Sort `diffs` in place into application order. The sort is stable.
pub fn sort_diffs(diffs: &mut [Diff]) {
    diffs.sort_by_key(sort_key);
}

/// Owned variant of [`sort_diffs`].
pub fn sorted(mut diffs: Vec<Diff>) -> Vec<Diff> {
    sort_diffs(&mut diffs);
    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use notesync_types::{BlockId, Span, SpanStyle};

    fn id() -> BlockId {
        BlockId::from("p")
    }

    fn text_del(start: usize, end: usize) -> Diff {
        Diff::BlockTextDeletion {
            block_id: id(),
            start,
            end,
        }
    }

    fn span_del(start: usize) -> Diff {
        Diff::SpanDeletion {
            block_id: id(),
            span: Span::new(SpanStyle::BOLD, start, start + 1),
        }
    }

    fn insert(text: &str, index: usize) -> Diff {
        Diff::BlockTextInsertion {
            block_id: id(),
            text: text.into(),
            index,
        }
    }

    #[test]
    fn deletions_are_grouped_and_tail_first() {
        let diffs = sorted(vec![
            insert("a", 0),
            span_del(1),
            text_del(0, 1),
            insert("b", 5),
            span_del(7),
            text_del(4, 6),
        ]);
        assert_eq!(
            diffs,
            vec![
                text_del(4, 6),
                text_del(0, 1),
                span_del(7),
                span_del(1),
                insert("a", 0),
                insert("b", 5),
            ]
        );
    }

    #[test]
    fn other_diffs_keep_emission_order() {
        let original = vec![
            Diff::BlockDeletion { block_id: "x".into() },
            insert("z", 9),
            Diff::UnorderedListInsertion { block_id: "y".into() },
        ];
        assert_eq!(sorted(original.clone()), original);
    }
}
