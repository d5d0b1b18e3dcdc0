//! Record lookups, bulk listing and relationship accessors.
//!
//! Lookups of missing ids return `None` or an empty collection; reads never
//! fail.

use super::Database;
use crate::model::collection::EntryCollection;
use crate::model::entity::{Entity, EntityRef};
use crate::model::entry::Entry;
use crate::model::ids::{EntryCollectionId, EntryId, KeywordId, LanguageId, NoteId, UsageId};
use crate::model::keyword::Keyword;
use crate::model::language::Language;
use crate::model::note::Note;
use crate::model::relationships::{
    EntryCollectionRelationships, EntryRelationships, KeywordRelationships,
    LanguageRelationships, NoteRelationships, NoteTarget, UsageRelationships,
};
use crate::model::usage::Usage;

impl Database {
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    pub fn language(&self, id: &LanguageId) -> Option<&Language> {
        self.languages.get(id)
    }

    pub fn keyword(&self, id: KeywordId) -> Option<&Keyword> {
        self.keywords.get(&id)
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn usage(&self, id: UsageId) -> Option<&Usage> {
        self.usages.get(&id)
    }

    pub fn entry_collection(&self, id: EntryCollectionId) -> Option<&EntryCollection> {
        self.entry_collections.get(&id)
    }

    /// Owned copy of any record.
    pub fn entity(&self, target: &EntityRef) -> Option<Entity> {
        match target {
            EntityRef::Entry(id) => self.entry(*id).cloned().map(Entity::Entry),
            EntityRef::Language(id) => self.language(id).cloned().map(Entity::Language),
            EntityRef::Keyword(id) => self.keyword(*id).cloned().map(Entity::Keyword),
            EntityRef::Note(id) => self.note(*id).cloned().map(Entity::Note),
            EntityRef::Usage(id) => self.usage(*id).cloned().map(Entity::Usage),
            EntityRef::EntryCollection(id) => self
                .entry_collection(*id)
                .cloned()
                .map(Entity::EntryCollection),
        }
    }

    pub fn contains(&self, target: &EntityRef) -> bool {
        match target {
            EntityRef::Entry(id) => self.entries.contains(id),
            EntityRef::Language(id) => self.languages.contains(id),
            EntityRef::Keyword(id) => self.keywords.contains(id),
            EntityRef::Note(id) => self.notes.contains(id),
            EntityRef::Usage(id) => self.usages.contains(id),
            EntityRef::EntryCollection(id) => self.entry_collections.contains(id),
        }
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn entries_where(&self, predicate: impl Fn(&Entry) -> bool) -> Vec<&Entry> {
        self.entries().filter(|entry| predicate(entry)).collect()
    }

    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.languages.values()
    }

    pub fn languages_where(&self, predicate: impl Fn(&Language) -> bool) -> Vec<&Language> {
        self.languages().filter(|language| predicate(language)).collect()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.values()
    }

    pub fn keywords_where(&self, predicate: impl Fn(&Keyword) -> bool) -> Vec<&Keyword> {
        self.keywords().filter(|keyword| predicate(keyword)).collect()
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    pub fn notes_where(&self, predicate: impl Fn(&Note) -> bool) -> Vec<&Note> {
        self.notes().filter(|note| predicate(note)).collect()
    }

    pub fn usages(&self) -> impl Iterator<Item = &Usage> {
        self.usages.values()
    }

    pub fn usages_where(&self, predicate: impl Fn(&Usage) -> bool) -> Vec<&Usage> {
        self.usages().filter(|usage| predicate(usage)).collect()
    }

    pub fn entry_collections(&self) -> impl Iterator<Item = &EntryCollection> {
        self.entry_collections.values()
    }

    pub fn entry_collections_where(
        &self,
        predicate: impl Fn(&EntryCollection) -> bool,
    ) -> Vec<&EntryCollection> {
        self.entry_collections()
            .filter(|collection| predicate(collection))
            .collect()
    }

    /// Entries whose primary spelling equals `spelling` exactly.
    pub fn find_entries_by_spelling(&self, spelling: &str) -> Vec<&Entry> {
        self.entries_where(|entry| entry.spelling == spelling)
    }

    pub fn entry_relationships(&self, id: EntryId) -> Option<&EntryRelationships> {
        self.entry_links.get(&id)
    }

    pub fn language_relationships(&self, id: &LanguageId) -> Option<&LanguageRelationships> {
        self.language_links.get(id)
    }

    pub fn keyword_relationships(&self, id: KeywordId) -> Option<&KeywordRelationships> {
        self.keyword_links.get(&id)
    }

    pub fn note_relationships(&self, id: NoteId) -> Option<&NoteRelationships> {
        self.note_links.get(&id)
    }

    pub fn usage_relationships(&self, id: UsageId) -> Option<&UsageRelationships> {
        self.usage_links.get(&id)
    }

    pub fn entry_collection_relationships(
        &self,
        id: EntryCollectionId,
    ) -> Option<&EntryCollectionRelationships> {
        self.entry_collection_links.get(&id)
    }

    pub fn languages_of_entry(&self, id: EntryId) -> &[LanguageId] {
        self.entry_relationships(id)
            .map(|links| links.languages.as_slice())
            .unwrap_or_default()
    }

    pub fn roots_of(&self, id: EntryId) -> &[EntryId] {
        self.entry_relationships(id)
            .map(|links| links.roots.as_slice())
            .unwrap_or_default()
    }

    pub fn derived_of(&self, id: EntryId) -> Vec<EntryId> {
        self.entry_relationships(id)
            .map(|links| links.derived.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn translations_of(&self, id: EntryId) -> &[EntryId] {
        self.entry_relationships(id)
            .map(|links| links.translations.as_slice())
            .unwrap_or_default()
    }

    pub fn back_translations_of(&self, id: EntryId) -> Vec<EntryId> {
        self.entry_relationships(id)
            .map(|links| links.back_translations.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn see_also_of(&self, id: EntryId) -> &[EntryId] {
        self.entry_relationships(id)
            .map(|links| links.see_also.as_slice())
            .unwrap_or_default()
    }

    pub fn usages_of_entry(&self, id: EntryId) -> &[UsageId] {
        self.entry_relationships(id)
            .map(|links| links.usages.as_slice())
            .unwrap_or_default()
    }

    pub fn keywords_of_entry(&self, id: EntryId) -> Vec<KeywordId> {
        self.entry_relationships(id)
            .map(|links| links.keywords.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn notes_of_entry(&self, id: EntryId) -> &[NoteId] {
        self.entry_relationships(id)
            .map(|links| links.notes.as_slice())
            .unwrap_or_default()
    }

    pub fn collections_of_entry(&self, id: EntryId) -> Vec<EntryCollectionId> {
        self.entry_relationships(id)
            .map(|links| links.entry_collections.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn entries_of_language(&self, id: &LanguageId) -> Vec<EntryId> {
        self.language_relationships(id)
            .map(|links| links.entries.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn usages_of_language(&self, id: &LanguageId) -> Vec<UsageId> {
        self.language_relationships(id)
            .map(|links| links.usages.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn matches_of_keyword(&self, id: KeywordId) -> &[EntryId] {
        self.keyword_relationships(id)
            .map(|links| links.matches.as_slice())
            .unwrap_or_default()
    }

    pub fn target_of_note(&self, id: NoteId) -> Option<NoteTarget> {
        self.note_relationships(id).and_then(|links| links.target)
    }

    pub fn languages_of_usage(&self, id: UsageId) -> &[LanguageId] {
        self.usage_relationships(id)
            .map(|links| links.languages.as_slice())
            .unwrap_or_default()
    }

    pub fn notes_of_usage(&self, id: UsageId) -> &[NoteId] {
        self.usage_relationships(id)
            .map(|links| links.notes.as_slice())
            .unwrap_or_default()
    }

    pub fn uses_of_usage(&self, id: UsageId) -> Vec<EntryId> {
        self.usage_relationships(id)
            .map(|links| links.uses.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn entries_of_collection(&self, id: EntryCollectionId) -> &[EntryId] {
        self.entry_collection_relationships(id)
            .map(|links| links.entries.as_slice())
            .unwrap_or_default()
    }
}
