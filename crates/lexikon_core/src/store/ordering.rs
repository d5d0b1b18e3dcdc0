//! Reordering of ordered relationship lists.
//!
//! Move semantics: the elements at `from_offsets` are taken out in their
//! original relative order, the rest close ranks, and the taken elements are
//! reinserted as one block. `to_offset` is expressed in the original index
//! space and shifted left by the number of taken elements that sat before it.

use super::Database;
use crate::model::ids::{EntryCollectionId, EntryId, KeywordId, UsageId};
use log::debug;
use std::collections::BTreeSet;

/// One ordered relationship list, identified by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderedList {
    EntryLanguages(EntryId),
    EntryRoots(EntryId),
    EntryTranslations(EntryId),
    EntrySeeAlso(EntryId),
    EntryUsages(EntryId),
    EntryNotes(EntryId),
    KeywordMatches(KeywordId),
    UsageLanguages(UsageId),
    UsageNotes(UsageId),
    CollectionEntries(EntryCollectionId),
}

impl OrderedList {
    fn name(self) -> &'static str {
        match self {
            Self::EntryLanguages(_) => "entry_languages",
            Self::EntryRoots(_) => "entry_roots",
            Self::EntryTranslations(_) => "entry_translations",
            Self::EntrySeeAlso(_) => "entry_see_also",
            Self::EntryUsages(_) => "entry_usages",
            Self::EntryNotes(_) => "entry_notes",
            Self::KeywordMatches(_) => "keyword_matches",
            Self::UsageLanguages(_) => "usage_languages",
            Self::UsageNotes(_) => "usage_notes",
            Self::CollectionEntries(_) => "collection_entries",
        }
    }
}

impl Database {
    /// Reorders one ordered list in place.
    ///
    /// A missing owner is treated as an empty list, so the call is a no-op.
    /// Offsets beyond the list are ignored and `to_offset` is clamped to
    /// the list length.
    pub fn move_items(&mut self, list: OrderedList, from_offsets: &[usize], to_offset: usize) {
        match list {
            OrderedList::EntryLanguages(id) => {
                if let Some(links) = self.entry_links.get_mut(&id) {
                    move_offsets(&mut links.languages, from_offsets, to_offset);
                }
            }
            OrderedList::EntryRoots(id) => {
                if let Some(links) = self.entry_links.get_mut(&id) {
                    move_offsets(&mut links.roots, from_offsets, to_offset);
                }
            }
            OrderedList::EntryTranslations(id) => {
                if let Some(links) = self.entry_links.get_mut(&id) {
                    move_offsets(&mut links.translations, from_offsets, to_offset);
                }
            }
            OrderedList::EntrySeeAlso(id) => {
                if let Some(links) = self.entry_links.get_mut(&id) {
                    move_offsets(&mut links.see_also, from_offsets, to_offset);
                }
            }
            OrderedList::EntryUsages(id) => {
                if let Some(links) = self.entry_links.get_mut(&id) {
                    move_offsets(&mut links.usages, from_offsets, to_offset);
                }
            }
            OrderedList::EntryNotes(id) => {
                if let Some(links) = self.entry_links.get_mut(&id) {
                    move_offsets(&mut links.notes, from_offsets, to_offset);
                }
            }
            OrderedList::KeywordMatches(id) => {
                if let Some(links) = self.keyword_links.get_mut(&id) {
                    move_offsets(&mut links.matches, from_offsets, to_offset);
                }
            }
            OrderedList::UsageLanguages(id) => {
                if let Some(links) = self.usage_links.get_mut(&id) {
                    move_offsets(&mut links.languages, from_offsets, to_offset);
                }
            }
            OrderedList::UsageNotes(id) => {
                if let Some(links) = self.usage_links.get_mut(&id) {
                    move_offsets(&mut links.notes, from_offsets, to_offset);
                }
            }
            OrderedList::CollectionEntries(id) => {
                if let Some(links) = self.entry_collection_links.get_mut(&id) {
                    move_offsets(&mut links.entries, from_offsets, to_offset);
                }
            }
        }
        debug!(
            "event=relationship_move module=store status=ok list={} moved={} to_offset={}",
            list.name(),
            from_offsets.len(),
            to_offset
        );
    }
}

/// Stable multi-element move; the result is always a permutation of `items`.
pub(crate) fn move_offsets<T>(items: &mut Vec<T>, from_offsets: &[usize], to_offset: usize) {
    let len = items.len();
    let offsets: BTreeSet<usize> = from_offsets
        .iter()
        .copied()
        .filter(|offset| *offset < len)
        .collect();
    if offsets.is_empty() {
        return;
    }

    let to_offset = to_offset.min(len);
    let insert_at = to_offset - offsets.range(..to_offset).count();

    let mut moved = Vec::with_capacity(offsets.len());
    let mut kept = Vec::with_capacity(len - offsets.len());
    for (index, item) in items.drain(..).enumerate() {
        if offsets.contains(&index) {
            moved.push(item);
        } else {
            kept.push(item);
        }
    }
    kept.splice(insert_at..insert_at, moved);
    *items = kept;
}

#[cfg(test)]
mod tests {
    use super::move_offsets;

    fn moved(from: &[usize], to: usize) -> Vec<char> {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_offsets(&mut items, from, to);
        items
    }

    #[test]
    fn single_element_moves_toward_end_and_start() {
        assert_eq!(moved(&[0], 2), vec!['b', 'a', 'c', 'd']);
        assert_eq!(moved(&[0], 4), vec!['b', 'c', 'd', 'a']);
        assert_eq!(moved(&[3], 0), vec!['d', 'a', 'b', 'c']);
        assert_eq!(moved(&[2], 1), vec!['a', 'c', 'b', 'd']);
    }

    #[test]
    fn moving_to_own_position_is_identity() {
        assert_eq!(moved(&[1], 1), vec!['a', 'b', 'c', 'd']);
        assert_eq!(moved(&[1], 2), vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn multiple_offsets_land_contiguously_in_original_order() {
        assert_eq!(moved(&[0, 2], 4), vec!['b', 'd', 'a', 'c']);
        assert_eq!(moved(&[3, 1], 0), vec!['b', 'd', 'a', 'c']);
        assert_eq!(moved(&[0, 3], 2), vec!['b', 'a', 'd', 'c']);
    }

    #[test]
    fn out_of_range_input_is_ignored_or_clamped() {
        assert_eq!(moved(&[9], 0), vec!['a', 'b', 'c', 'd']);
        assert_eq!(moved(&[0], 99), vec!['b', 'c', 'd', 'a']);
        assert_eq!(moved(&[], 1), vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn every_move_is_a_permutation() {
        let original = vec![10, 20, 30, 40, 50];
        for mask in 0u32..32 {
            let from: Vec<usize> = (0..5).filter(|bit| mask & (1 << bit) != 0).collect();
            for to in 0..=5 {
                let mut items = original.clone();
                move_offsets(&mut items, &from, to);
                let mut sorted = items.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, original, "from={from:?} to={to}");
            }
        }
    }
}
