//! Placement of inserted entries (blocks or media) in a merged sequence.
//!
//! An insertion is recorded as an index in the inserting side's own list.
//! That index means nothing in the merged list, so each insertion is
//! re-anchored to the nearest base entry that precedes it on its side, and
//! the merged list is rebuilt by emitting every base survivor followed by
//! whatever was anchored to it.

use std::collections::{BTreeMap, BTreeSet};

/// Anchor one side's insertions.
///
/// The side's list is reconstructed from `base_ids` minus its deletions,
/// with the insertions placed at their indices in ascending order. Each
/// insertion is then paired with the closest base id in front of it, or
/// `None` when it leads the list. The result is in the side's list order.
pub(crate) fn anchored<Id, T>(
    base_ids: &[Id],
    deleted: &BTreeSet<Id>,
    inserted: &[(T, usize)],
    id_of: impl Fn(&T) -> &Id,
) -> Vec<(Option<Id>, T)>
where
    Id: Ord + Clone,
    T: Clone,
{
    enum Slot<'a, Id, T> {
        Base(&'a Id),
        Inserted(&'a T),
    }

    let mut list: Vec<Slot<'_, Id, T>> = base_ids
        .iter()
        .filter(|id| !deleted.contains(*id))
        .map(Slot::Base)
        .collect();

    let mut by_index: Vec<&(T, usize)> = inserted.iter().collect();
    by_index.sort_by_key(|(_, index)| *index);
    for (item, index) in by_index {
        let at = (*index).min(list.len());
        list.insert(at, Slot::Inserted(item));
    }

    let mut anchor: Option<&Id> = None;
    let mut out = Vec::with_capacity(inserted.len());
    for slot in list {
        match slot {
            Slot::Base(id) => anchor = Some(id),
            Slot::Inserted(item) => {
                // an insertion that reuses a surviving base id is not new
                if base_ids.contains(id_of(item)) && !deleted.contains(id_of(item)) {
                    continue;
                }
                out.push((anchor.cloned(), item.clone()));
            }
        }
    }
    out
}

/// Concatenate two sides' anchored insertions, preferred side first,
/// dropping later entries whose id was already seen.
pub(crate) fn combine<Id, T>(
    preferred: Vec<(Option<Id>, T)>,
    other: Vec<(Option<Id>, T)>,
    id_of: impl Fn(&T) -> &Id,
) -> Vec<(Option<Id>, T)>
where
    Id: Ord + Clone,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(preferred.len() + other.len());
    for (anchor, item) in preferred.into_iter().chain(other) {
        if seen.insert(id_of(&item).clone()) {
            out.push((anchor, item));
        }
    }
    out
}

/// Rebuild a list from base entries (`None` for removed ones) and anchored
/// insertions. Insertions sharing an anchor keep their relative order.
pub(crate) fn interleave<Id, T>(
    base: Vec<(Id, Option<T>)>,
    insertions: Vec<(Option<Id>, T)>,
) -> Vec<T>
where
    Id: Ord,
{
    let mut slots: BTreeMap<Option<Id>, Vec<T>> = BTreeMap::new();
    for (anchor, item) in insertions {
        slots.entry(anchor).or_default().push(item);
    }

    let mut out = slots.remove(&None).unwrap_or_default();
    for (id, item) in base {
        out.extend(item);
        if let Some(after) = slots.remove(&Some(id)) {
            out.extend(after);
        }
    }
    // anchors outside the base list
    for (_, rest) in slots {
        out.extend(rest);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn own(s: &String) -> &String {
        s
    }

    #[test]
    fn anchors_to_preceding_base_entry() {
        let base = ids(&["p1", "p2", "p3"]);
        let inserted = vec![("p1.5".to_string(), 1)];
        assert_eq!(
            anchored(&base, &BTreeSet::new(), &inserted, own),
            vec![(Some("p1".to_string()), "p1.5".to_string())]
        );
    }

    #[test]
    fn leading_insertion_has_no_anchor() {
        let base = ids(&["a", "b"]);
        let inserted = vec![("x".to_string(), 0)];
        assert_eq!(
            anchored(&base, &BTreeSet::new(), &inserted, own),
            vec![(None, "x".to_string())]
        );
    }

    #[test]
    fn deleted_entries_are_skipped_when_anchoring() {
        let base = ids(&["a", "b", "c"]);
        let deleted: BTreeSet<String> = ["b".to_string()].into();
        // side list is [a, c]; "x" at 1 sits between a and c
        let inserted = vec![("x".to_string(), 1)];
        assert_eq!(
            anchored(&base, &deleted, &inserted, own),
            vec![(Some("a".to_string()), "x".to_string())]
        );
    }

    #[test]
    fn consecutive_insertions_share_anchor_in_order() {
        let base = ids(&["a"]);
        let inserted = vec![("y".to_string(), 2), ("x".to_string(), 1)];
        assert_eq!(
            anchored(&base, &BTreeSet::new(), &inserted, own),
            vec![(Some("a".to_string()), "x".to_string()), (Some("a".to_string()), "y".to_string())]
        );
    }

    #[test]
    fn out_of_range_index_appends() {
        let base = ids(&["a"]);
        let inserted = vec![("x".to_string(), 9)];
        assert_eq!(
            anchored(&base, &BTreeSet::new(), &inserted, own),
            vec![(Some("a".to_string()), "x".to_string())]
        );
    }

    #[test]
    fn combine_prefers_first_side_and_dedups() {
        let a = vec![(None, "x".to_string())];
        let b = vec![(Some("q".to_string()), "x".to_string()), (None, "y".to_string())];
        assert_eq!(combine(a, b, own), vec![(None, "x".to_string()), (None, "y".to_string())]);
    }

    #[test]
    fn interleave_places_after_anchor() {
        let base = vec![("a", Some("A")), ("b", None), ("c", Some("C"))];
        let ins = vec![(Some("b"), "B2"), (None, "Z"), (Some("a"), "A2")];
        assert_eq!(interleave(base, ins), vec!["Z", "A", "A2", "B2", "C"]);
    }
}
