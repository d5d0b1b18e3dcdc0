//! Record replacement.
//!
//! Updates replace the scalar record only; links are untouched. `added` is
//! preserved from the stored record and `modified` is set to `now`.
//! Uniqueness rules are not checked here (see `service::LexiconService`).

use super::{Database, StoreResult};
use crate::model::collection::EntryCollection;
use crate::model::entity::{Entity, EntityKind, EntityRef, Metadata};
use crate::model::entry::Entry;
use crate::model::keyword::Keyword;
use crate::model::language::Language;
use crate::model::note::Note;
use crate::model::usage::Usage;
use log::debug;

impl Database {
    pub fn update(&mut self, entity: Entity, now: i64) -> StoreResult<()> {
        match entity {
            Entity::Entry(entry) => self.update_entry(entry, now),
            Entity::Language(language) => self.update_language(language, now),
            Entity::Keyword(keyword) => self.update_keyword(keyword, now),
            Entity::Note(note) => self.update_note(note, now),
            Entity::Usage(usage) => self.update_usage(usage, now),
            Entity::EntryCollection(collection) => self.update_entry_collection(collection, now),
        }
    }

    pub fn update_entry(&mut self, mut entry: Entry, now: i64) -> StoreResult<()> {
        entry.validate()?;
        let Some(current) = self.entries.get(&entry.id) else {
            return self.missing("entity_update", EntityRef::Entry(entry.id));
        };
        entry.metadata = touched(current.metadata, now);
        let id = entry.id;
        if let Some(slot) = self.entries.get_mut(&id) {
            *slot = entry;
        }
        log_updated(EntityKind::Entry);
        Ok(())
    }

    pub fn update_language(&mut self, mut language: Language, now: i64) -> StoreResult<()> {
        let Some(current) = self.languages.get(&language.id) else {
            return self.missing("entity_update", EntityRef::Language(language.id));
        };
        language.metadata = touched(current.metadata, now);
        let id = language.id.clone();
        if let Some(slot) = self.languages.get_mut(&id) {
            *slot = language;
        }
        log_updated(EntityKind::Language);
        Ok(())
    }

    pub fn update_keyword(&mut self, mut keyword: Keyword, now: i64) -> StoreResult<()> {
        keyword.validate()?;
        let Some(current) = self.keywords.get(&keyword.id) else {
            return self.missing("entity_update", EntityRef::Keyword(keyword.id));
        };
        keyword.metadata = touched(current.metadata, now);
        let id = keyword.id;
        if let Some(slot) = self.keywords.get_mut(&id) {
            *slot = keyword;
        }
        log_updated(EntityKind::Keyword);
        Ok(())
    }

    pub fn update_note(&mut self, mut note: Note, now: i64) -> StoreResult<()> {
        note.validate()?;
        let Some(current) = self.notes.get(&note.id) else {
            return self.missing("entity_update", EntityRef::Note(note.id));
        };
        note.metadata = touched(current.metadata, now);
        let id = note.id;
        if let Some(slot) = self.notes.get_mut(&id) {
            *slot = note;
        }
        log_updated(EntityKind::Note);
        Ok(())
    }

    pub fn update_usage(&mut self, mut usage: Usage, now: i64) -> StoreResult<()> {
        usage.validate()?;
        let Some(current) = self.usages.get(&usage.id) else {
            return self.missing("entity_update", EntityRef::Usage(usage.id));
        };
        usage.metadata = touched(current.metadata, now);
        let id = usage.id;
        if let Some(slot) = self.usages.get_mut(&id) {
            *slot = usage;
        }
        log_updated(EntityKind::Usage);
        Ok(())
    }

    pub fn update_entry_collection(
        &mut self,
        mut collection: EntryCollection,
        now: i64,
    ) -> StoreResult<()> {
        collection.validate()?;
        let Some(current) = self.entry_collections.get(&collection.id) else {
            return self.missing("entity_update", EntityRef::EntryCollection(collection.id));
        };
        collection.metadata = touched(current.metadata, now);
        let id = collection.id;
        if let Some(slot) = self.entry_collections.get_mut(&id) {
            *slot = collection;
        }
        log_updated(EntityKind::EntryCollection);
        Ok(())
    }
}

fn touched(current: Metadata, now: i64) -> Metadata {
    Metadata {
        added: current.added,
        modified: now,
    }
}

fn log_updated(kind: EntityKind) {
    debug!("event=entity_update module=store status=ok kind={kind}");
}
