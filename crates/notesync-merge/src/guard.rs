//! Document type divergence guard.
//!
//! Diffs only make sense between documents of the same kind. When one side
//! converted the note (rich text to ink, say), no merge is attempted and the
//! converting side's snapshot is taken wholesale.

use tracing::debug;

use notesync_types::Note;

/// Returns `true` if both sides kept the base's document kind.
pub fn can_three_way_merge(base: &Note, primary: &Note, secondary: &Note) -> bool {
    primary.kind() == base.kind() && secondary.kind() == base.kind()
}

/// The snapshot to keep when the kinds diverged: the primary if its kind
/// changed, else the secondary if its kind changed, else the primary. The
/// returned note is its own shadow, so the next merge uses it as base.
pub fn note_with_new_type(base: &Note, primary: &Note, secondary: &Note) -> Note {
    let winner = if primary.kind() != base.kind() {
        primary
    } else if secondary.kind() != base.kind() {
        secondary
    } else {
        primary
    };
    debug!(
        base = ?base.kind(),
        kept = ?winner.kind(),
        "document kind diverged, keeping converted snapshot"
    );
    winner.as_own_shadow()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use notesync_types::{Document, DocumentKind, Paragraph};

    fn note(kind: DocumentKind, text: &str) -> Note {
        let mut document = Document::rich_text(vec![Paragraph::new("p", text).into()]);
        document.kind = kind;
        Note::new("n", document, Utc.timestamp_millis_opt(0).unwrap())
    }

    #[test]
    fn same_kind_is_mergeable() {
        let n = note(DocumentKind::RichText, "x");
        assert!(can_three_way_merge(&n, &n, &n));
    }

    #[test]
    fn ink_on_primary_side_wins() {
        let base = note(DocumentKind::RichText, "base");
        let primary = note(DocumentKind::Ink, "primary");
        let secondary = note(DocumentKind::RichText, "secondary");

        assert!(!can_three_way_merge(&base, &primary, &secondary));
        let kept = note_with_new_type(&base, &primary, &secondary);
        assert_eq!(kept.document, primary.document);
        assert_eq!(kept.ui_shadow().map(|s| &s.document), Some(&primary.document));
        assert!(kept.ui_shadow().and_then(Note::ui_shadow).is_none());
    }

    #[test]
    fn secondary_conversion_is_kept() {
        let base = note(DocumentKind::RichText, "base");
        let primary = note(DocumentKind::RichText, "primary");
        let secondary = note(DocumentKind::RenderedInk, "secondary");
        let kept = note_with_new_type(&base, &primary, &secondary);
        assert_eq!(kept.kind(), DocumentKind::RenderedInk);
    }
}
