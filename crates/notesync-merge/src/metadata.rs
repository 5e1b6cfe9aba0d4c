use notesync_types::Metadata;

/// Metadata is not diffed. Each field takes the primary's value when it has
/// one, else the secondary's.
pub fn merge_metadata(primary: &Metadata, secondary: &Metadata) -> Metadata {
    Metadata {
        context: primary.context.clone().or_else(|| secondary.context.clone()),
        reminder: primary.reminder.clone().or_else(|| secondary.reminder.clone()),
    }
}
