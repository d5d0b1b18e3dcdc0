//! Deletion with eager cascade.
//!
//! # Invariants
//! - After `delete` returns `Ok`, no relationship record mentions the
//!   removed id.
//! - Cleanup walks every table that can hold the id, so one-way
//!   (`Direction::Unidirectional`) links are removed as well.
//! - Notes owned by a deleted entry or usage survive, detached.

use super::{Database, StoreResult};
use crate::model::entity::EntityRef;
use crate::model::ids::{EntryCollectionId, EntryId, KeywordId, LanguageId, NoteId, UsageId};
use crate::model::relationships::NoteTarget;
use log::info;

impl Database {
    /// Removes a record and every reference to it.
    ///
    /// Missing ids follow `StoreOptions::missing_entity`.
    pub fn delete(&mut self, target: &EntityRef) -> StoreResult<()> {
        match target {
            EntityRef::Entry(id) => self.delete_entry(*id),
            EntityRef::Language(id) => self.delete_language(id),
            EntityRef::Keyword(id) => self.delete_keyword(*id),
            EntityRef::Note(id) => self.delete_note(*id),
            EntityRef::Usage(id) => self.delete_usage(*id),
            EntityRef::EntryCollection(id) => self.delete_entry_collection(*id),
        }
    }

    pub fn delete_entry(&mut self, id: EntryId) -> StoreResult<()> {
        if self.entries.remove(&id).is_none() {
            return self.missing("entity_delete", EntityRef::Entry(id));
        }
        self.entry_links.remove(&id);

        for links in self.entry_links.values_mut() {
            links.roots.retain(|other| *other != id);
            links.derived.remove(&id);
            links.translations.retain(|other| *other != id);
            links.back_translations.remove(&id);
            links.see_also.retain(|other| *other != id);
        }
        for links in self.language_links.values_mut() {
            links.entries.remove(&id);
        }
        for links in self.keyword_links.values_mut() {
            links.matches.retain(|other| *other != id);
        }
        for links in self.usage_links.values_mut() {
            links.uses.remove(&id);
        }
        for links in self.entry_collection_links.values_mut() {
            links.entries.retain(|other| *other != id);
        }
        for links in self.note_links.values_mut() {
            if links.target == Some(NoteTarget::Entry(id)) {
                links.target = None;
            }
        }

        log_deleted(&EntityRef::Entry(id));
        Ok(())
    }

    pub fn delete_language(&mut self, id: &LanguageId) -> StoreResult<()> {
        if self.languages.remove(id).is_none() {
            return self.missing("entity_delete", EntityRef::Language(id.clone()));
        }
        self.language_links.remove(id);

        for links in self.entry_links.values_mut() {
            links.languages.retain(|other| other != id);
        }
        for links in self.usage_links.values_mut() {
            links.languages.retain(|other| other != id);
        }

        log_deleted(&EntityRef::Language(id.clone()));
        Ok(())
    }

    pub fn delete_keyword(&mut self, id: KeywordId) -> StoreResult<()> {
        if self.keywords.remove(&id).is_none() {
            return self.missing("entity_delete", EntityRef::Keyword(id));
        }
        self.keyword_links.remove(&id);

        for links in self.entry_links.values_mut() {
            links.keywords.remove(&id);
        }

        log_deleted(&EntityRef::Keyword(id));
        Ok(())
    }

    pub fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        if self.notes.remove(&id).is_none() {
            return self.missing("entity_delete", EntityRef::Note(id));
        }
        self.note_links.remove(&id);

        for links in self.entry_links.values_mut() {
            links.notes.retain(|other| *other != id);
        }
        for links in self.usage_links.values_mut() {
            links.notes.retain(|other| *other != id);
        }

        log_deleted(&EntityRef::Note(id));
        Ok(())
    }

    pub fn delete_usage(&mut self, id: UsageId) -> StoreResult<()> {
        if self.usages.remove(&id).is_none() {
            return self.missing("entity_delete", EntityRef::Usage(id));
        }
        self.usage_links.remove(&id);

        for links in self.entry_links.values_mut() {
            links.usages.retain(|other| *other != id);
        }
        for links in self.language_links.values_mut() {
            links.usages.remove(&id);
        }
        for links in self.note_links.values_mut() {
            if links.target == Some(NoteTarget::Usage(id)) {
                links.target = None;
            }
        }

        log_deleted(&EntityRef::Usage(id));
        Ok(())
    }

    pub fn delete_entry_collection(&mut self, id: EntryCollectionId) -> StoreResult<()> {
        if self.entry_collections.remove(&id).is_none() {
            return self.missing("entity_delete", EntityRef::EntryCollection(id));
        }
        self.entry_collection_links.remove(&id);

        for links in self.entry_links.values_mut() {
            links.entry_collections.remove(&id);
        }

        log_deleted(&EntityRef::EntryCollection(id));
        Ok(())
    }
}

fn log_deleted(target: &EntityRef) {
    info!(
        "event=entity_delete module=store status=ok kind={} target={target}",
        target.kind()
    );
}
