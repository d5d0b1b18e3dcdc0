//! Denormalized read views over the store.
//!
//! # Responsibility
//! - Expand a record's relationship ids into owned copies of the related
//!   records.
//! - Provide bulk assembly with optional id set, filter and sort.
//!
//! # Invariants
//! - Assembly never mutates the store.
//! - Ids that do not resolve are dropped silently.
//! - Related lists keep the stored order; set-backed relations come out in
//!   id order.
//! - Bulk queries filter first, then stable-sort.

mod query;

pub use query::AggregateQuery;

use crate::model::collection::EntryCollection;
use crate::model::entry::Entry;
use crate::model::ids::{EntryCollectionId, EntryId, KeywordId, LanguageId, NoteId, UsageId};
use crate::model::keyword::Keyword;
use crate::model::language::Language;
use crate::model::note::Note;
use crate::model::relationships::{EntryRelationships, NoteTarget};
use crate::model::usage::Usage;
use crate::store::{Database, Table};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryAggregate {
    pub entry: Entry,
    pub languages: Vec<Language>,
    pub roots: Vec<Entry>,
    pub derived: Vec<Entry>,
    pub translations: Vec<Entry>,
    pub back_translations: Vec<Entry>,
    pub see_also: Vec<Entry>,
    pub usages: Vec<Usage>,
    pub keywords: Vec<Keyword>,
    pub notes: Vec<Note>,
    pub entry_collections: Vec<EntryCollection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageAggregate {
    pub language: Language,
    pub entries: Vec<Entry>,
    pub usages: Vec<Usage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordAggregate {
    pub keyword: Keyword,
    pub matches: Vec<Entry>,
}

/// Resolved owner of a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOwner {
    Entry(Entry),
    Usage(Usage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteAggregate {
    pub note: Note,
    /// `None` for detached notes or when the owner no longer resolves.
    pub owner: Option<NoteOwner>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageAggregate {
    pub usage: Usage,
    pub languages: Vec<Language>,
    pub notes: Vec<Note>,
    pub uses: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCollectionAggregate {
    pub collection: EntryCollection,
    pub entries: Vec<Entry>,
}

impl Database {
    pub fn entry_aggregate(&self, id: EntryId) -> Option<EntryAggregate> {
        let entry = self.entry(id)?.clone();
        let empty = EntryRelationships::default();
        let links = self.entry_relationships(id).unwrap_or(&empty);
        Some(EntryAggregate {
            entry,
            languages: resolve(&self.languages, &links.languages),
            roots: resolve(&self.entries, &links.roots),
            derived: resolve(&self.entries, &links.derived),
            translations: resolve(&self.entries, &links.translations),
            back_translations: resolve(&self.entries, &links.back_translations),
            see_also: resolve(&self.entries, &links.see_also),
            usages: resolve(&self.usages, &links.usages),
            keywords: resolve(&self.keywords, &links.keywords),
            notes: resolve(&self.notes, &links.notes),
            entry_collections: resolve(&self.entry_collections, &links.entry_collections),
        })
    }

    pub fn language_aggregate(&self, id: &LanguageId) -> Option<LanguageAggregate> {
        let language = self.language(id)?.clone();
        let links = self.language_relationships(id);
        Some(LanguageAggregate {
            language,
            entries: links.map_or_else(Vec::new, |links| resolve(&self.entries, &links.entries)),
            usages: links.map_or_else(Vec::new, |links| resolve(&self.usages, &links.usages)),
        })
    }

    pub fn keyword_aggregate(&self, id: KeywordId) -> Option<KeywordAggregate> {
        let keyword = self.keyword(id)?.clone();
        Some(KeywordAggregate {
            keyword,
            matches: resolve(&self.entries, self.matches_of_keyword(id)),
        })
    }

    pub fn note_aggregate(&self, id: NoteId) -> Option<NoteAggregate> {
        let note = self.note(id)?.clone();
        let owner = match self.target_of_note(id) {
            Some(NoteTarget::Entry(entry)) => self.entry(entry).cloned().map(NoteOwner::Entry),
            Some(NoteTarget::Usage(usage)) => self.usage(usage).cloned().map(NoteOwner::Usage),
            None => None,
        };
        Some(NoteAggregate { note, owner })
    }

    pub fn usage_aggregate(&self, id: UsageId) -> Option<UsageAggregate> {
        let usage = self.usage(id)?.clone();
        let links = self.usage_relationships(id);
        Some(UsageAggregate {
            usage,
            languages: resolve(&self.languages, self.languages_of_usage(id)),
            notes: resolve(&self.notes, self.notes_of_usage(id)),
            uses: links.map_or_else(Vec::new, |links| resolve(&self.entries, &links.uses)),
        })
    }

    pub fn entry_collection_aggregate(
        &self,
        id: EntryCollectionId,
    ) -> Option<EntryCollectionAggregate> {
        let collection = self.entry_collection(id)?.clone();
        Some(EntryCollectionAggregate {
            collection,
            entries: resolve(&self.entries, self.entries_of_collection(id)),
        })
    }

    /// Assembles entry aggregates; all entries in table order by default.
    pub fn entry_aggregates(
        &self,
        query: AggregateQuery<'_, EntryId, EntryAggregate>,
    ) -> Vec<EntryAggregate> {
        query.run(
            || self.entries.keys().copied().collect(),
            |id| self.entry_aggregate(*id),
        )
    }

    pub fn language_aggregates(
        &self,
        query: AggregateQuery<'_, LanguageId, LanguageAggregate>,
    ) -> Vec<LanguageAggregate> {
        query.run(
            || self.languages.keys().cloned().collect(),
            |id| self.language_aggregate(id),
        )
    }

    pub fn keyword_aggregates(
        &self,
        query: AggregateQuery<'_, KeywordId, KeywordAggregate>,
    ) -> Vec<KeywordAggregate> {
        query.run(
            || self.keywords.keys().copied().collect(),
            |id| self.keyword_aggregate(*id),
        )
    }

    pub fn note_aggregates(
        &self,
        query: AggregateQuery<'_, NoteId, NoteAggregate>,
    ) -> Vec<NoteAggregate> {
        query.run(
            || self.notes.keys().copied().collect(),
            |id| self.note_aggregate(*id),
        )
    }

    pub fn usage_aggregates(
        &self,
        query: AggregateQuery<'_, UsageId, UsageAggregate>,
    ) -> Vec<UsageAggregate> {
        query.run(
            || self.usages.keys().copied().collect(),
            |id| self.usage_aggregate(*id),
        )
    }

    pub fn entry_collection_aggregates(
        &self,
        query: AggregateQuery<'_, EntryCollectionId, EntryCollectionAggregate>,
    ) -> Vec<EntryCollectionAggregate> {
        query.run(
            || self.entry_collections.keys().copied().collect(),
            |id| self.entry_collection_aggregate(*id),
        )
    }
}

fn resolve<'a, K, V>(table: &Table<K, V>, ids: impl IntoIterator<Item = &'a K>) -> Vec<V>
where
    K: Clone + Eq + Hash + 'a,
    V: Clone,
{
    ids.into_iter()
        .filter_map(|id| table.get(id).cloned())
        .collect()
}
