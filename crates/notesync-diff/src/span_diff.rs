//! Span set difference.
//!
//! Spans have no identity of their own, so they are diffed as sets under
//! structural equality. Changing a span's style or bounds removes the old
//! span and adds the new one; there is no in-place span update.

use notesync_types::{BlockId, Span};

use crate::model::Diff;

/// Base spans missing from the target, in base order.
pub fn span_deletes(block_id: &BlockId, base: &[Span], target: &[Span]) -> Vec<Diff> {
    base.iter()
        .filter(|span| !target.contains(span))
        .map(|span| Diff::SpanDeletion {
            block_id: block_id.clone(),
            span: *span,
        })
        .collect()
}

/// Target spans missing from the base, in target order.
pub fn span_inserts(block_id: &BlockId, base: &[Span], target: &[Span]) -> Vec<Diff> {
    target
        .iter()
        .filter(|span| !base.contains(span))
        .map(|span| Diff::SpanInsertion {
            block_id: block_id.clone(),
            span: *span,
        })
        .collect()
}
