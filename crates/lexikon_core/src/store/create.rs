//! Record creation and create-then-connect helpers.

use super::{Database, Direction, StoreError, StoreResult};
use crate::model::collection::EntryCollection;
use crate::model::entity::{Entity, EntityKind, EntityRef, Metadata};
use crate::model::entry::Entry;
use crate::model::ids::{
    EntryCollectionId, EntryId, IdGenerator, KeywordId, LanguageId, NoteId, UsageId,
};
use crate::model::keyword::Keyword;
use crate::model::language::Language;
use crate::model::note::Note;
use crate::model::relationships::{
    EntryCollectionRelationships, EntryRelationships, KeywordRelationships,
    LanguageRelationships, NoteRelationships, NoteTarget, UsageRelationships,
};
use crate::model::usage::Usage;
use log::{debug, warn};

/// Field values for an entry created through a helper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub spelling: String,
    pub alternate_spellings: Vec<String>,
}

impl NewEntry {
    pub fn spelled(spelling: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
            alternate_spellings: Vec::new(),
        }
    }

    fn into_entry(self, id: EntryId) -> Entry {
        let mut entry = Entry::new(id, self.spelling);
        entry.alternate_spellings = self.alternate_spellings;
        entry
    }
}

impl Database {
    /// Inserts any record kind.
    pub fn create(&mut self, entity: Entity, now: i64) -> StoreResult<()> {
        match entity {
            Entity::Entry(entry) => self.create_entry(entry, now),
            Entity::Language(language) => self.create_language(language, now),
            Entity::Keyword(keyword) => self.create_keyword(keyword, now),
            Entity::Note(note) => self.create_note(note, now),
            Entity::Usage(usage) => self.create_usage(usage, now),
            Entity::EntryCollection(collection) => self.create_entry_collection(collection, now),
        }
    }

    /// Inserts a new entry with empty relationships.
    ///
    /// # Errors
    /// - `Validation` when the spelling is blank or the id is nil.
    /// - `DuplicateId` when an entry with this id exists.
    pub fn create_entry(&mut self, mut entry: Entry, now: i64) -> StoreResult<()> {
        entry.validate()?;
        let id = entry.id;
        entry.metadata = Metadata::at(now);
        if !self.entries.insert_new(id, entry) {
            return Err(duplicate(EntityRef::Entry(id)));
        }
        self.entry_links.insert(id, EntryRelationships::default());
        log_created(EntityKind::Entry, &id);
        Ok(())
    }

    pub fn create_language(&mut self, mut language: Language, now: i64) -> StoreResult<()> {
        let id = language.id.clone();
        language.metadata = Metadata::at(now);
        if !self.languages.insert_new(id.clone(), language) {
            return Err(duplicate(EntityRef::Language(id)));
        }
        self.language_links
            .insert(id.clone(), LanguageRelationships::default());
        log_created(EntityKind::Language, &id);
        Ok(())
    }

    pub fn create_keyword(&mut self, mut keyword: Keyword, now: i64) -> StoreResult<()> {
        keyword.validate()?;
        let id = keyword.id;
        keyword.metadata = Metadata::at(now);
        if !self.keywords.insert_new(id, keyword) {
            return Err(duplicate(EntityRef::Keyword(id)));
        }
        self.keyword_links.insert(id, KeywordRelationships::default());
        log_created(EntityKind::Keyword, &id);
        Ok(())
    }

    pub fn create_note(&mut self, mut note: Note, now: i64) -> StoreResult<()> {
        note.validate()?;
        let id = note.id;
        note.metadata = Metadata::at(now);
        if !self.notes.insert_new(id, note) {
            return Err(duplicate(EntityRef::Note(id)));
        }
        self.note_links.insert(id, NoteRelationships::default());
        log_created(EntityKind::Note, &id);
        Ok(())
    }

    pub fn create_usage(&mut self, mut usage: Usage, now: i64) -> StoreResult<()> {
        usage.validate()?;
        let id = usage.id;
        usage.metadata = Metadata::at(now);
        if !self.usages.insert_new(id, usage) {
            return Err(duplicate(EntityRef::Usage(id)));
        }
        self.usage_links.insert(id, UsageRelationships::default());
        log_created(EntityKind::Usage, &id);
        Ok(())
    }

    pub fn create_entry_collection(
        &mut self,
        mut collection: EntryCollection,
        now: i64,
    ) -> StoreResult<()> {
        collection.validate()?;
        let id = collection.id;
        collection.metadata = Metadata::at(now);
        if !self.entry_collections.insert_new(id, collection) {
            return Err(duplicate(EntityRef::EntryCollection(id)));
        }
        self.entry_collection_links
            .insert(id, EntryCollectionRelationships::default());
        log_created(EntityKind::EntryCollection, &id);
        Ok(())
    }

    /// Returns the language for `tag`, creating it first when absent.
    pub fn ensure_language(&mut self, tag: &str, now: i64) -> StoreResult<LanguageId> {
        let id = LanguageId::parse(tag)?;
        if !self.languages.contains(&id) {
            self.create_language(Language::new(id.clone()), now)?;
        }
        Ok(id)
    }

    /// Creates an entry and optionally assigns it a language.
    ///
    /// Nothing is written when validation fails or the language is missing.
    pub fn new_entry(
        &mut self,
        params: NewEntry,
        language: Option<&LanguageId>,
        now: i64,
        ids: &mut impl IdGenerator,
    ) -> StoreResult<EntryId> {
        let entry = params.into_entry(EntryId::generate(ids));
        entry.validate()?;
        if let Some(language) = language {
            self.require(EntityRef::Language(language.clone()))?;
        }

        let id = entry.id;
        self.create_entry(entry, now)?;
        if let Some(language) = language {
            self.connect_language(id, language)?;
        }
        Ok(id)
    }

    /// Creates an entry and links it as a translation of `of`.
    pub fn new_translation(
        &mut self,
        of: EntryId,
        params: NewEntry,
        language: Option<&LanguageId>,
        direction: Direction,
        now: i64,
        ids: &mut impl IdGenerator,
    ) -> StoreResult<EntryId> {
        self.require(EntityRef::Entry(of))?;
        let id = self.new_entry(params, language, now, ids)?;
        self.connect_translation(id, of, direction)?;
        Ok(id)
    }

    /// Creates an entry and links it as a root of `of`.
    pub fn new_root(
        &mut self,
        of: EntryId,
        params: NewEntry,
        language: Option<&LanguageId>,
        now: i64,
        ids: &mut impl IdGenerator,
    ) -> StoreResult<EntryId> {
        self.require(EntityRef::Entry(of))?;
        let id = self.new_entry(params, language, now, ids)?;
        self.connect_root(id, of)?;
        Ok(id)
    }

    /// Creates a usage example attached to `for_entry`.
    pub fn new_usage(
        &mut self,
        for_entry: EntryId,
        value: impl Into<String>,
        now: i64,
        ids: &mut impl IdGenerator,
    ) -> StoreResult<UsageId> {
        let usage = Usage::new(UsageId::generate(ids), value);
        usage.validate()?;
        self.require(EntityRef::Entry(for_entry))?;

        let id = usage.id;
        self.create_usage(usage, now)?;
        self.connect_usage(id, for_entry)?;
        Ok(id)
    }

    /// Creates a note owned by `target`.
    pub fn new_note(
        &mut self,
        target: NoteTarget,
        value: impl Into<String>,
        now: i64,
        ids: &mut impl IdGenerator,
    ) -> StoreResult<NoteId> {
        let note = Note::new(NoteId::generate(ids), value);
        note.validate()?;
        self.require(target.into())?;

        let id = note.id;
        self.create_note(note, now)?;
        self.connect_note(id, target)?;
        Ok(id)
    }

    /// Creates a keyword, optionally tagging one entry with it.
    pub fn new_keyword(
        &mut self,
        title: impl Into<String>,
        for_entry: Option<EntryId>,
        now: i64,
        ids: &mut impl IdGenerator,
    ) -> StoreResult<KeywordId> {
        let keyword = Keyword::new(KeywordId::generate(ids), title);
        keyword.validate()?;
        if let Some(entry) = for_entry {
            self.require(EntityRef::Entry(entry))?;
        }

        let id = keyword.id;
        self.create_keyword(keyword, now)?;
        if let Some(entry) = for_entry {
            self.connect_keyword(id, entry)?;
        }
        Ok(id)
    }

    /// Creates a collection, optionally seeded with one entry.
    pub fn new_entry_collection(
        &mut self,
        title: impl Into<String>,
        description: Option<String>,
        with_entry: Option<EntryId>,
        now: i64,
        ids: &mut impl IdGenerator,
    ) -> StoreResult<EntryCollectionId> {
        let mut collection = EntryCollection::new(EntryCollectionId::generate(ids), title);
        collection.description = description;
        collection.validate()?;
        if let Some(entry) = with_entry {
            self.require(EntityRef::Entry(entry))?;
        }

        let id = collection.id;
        self.create_entry_collection(collection, now)?;
        if let Some(entry) = with_entry {
            self.connect_entry_collection(entry, id)?;
        }
        Ok(id)
    }
}

fn duplicate(target: EntityRef) -> StoreError {
    warn!(
        "event=entity_create module=store status=error kind={} error_code=duplicate_id",
        target.kind()
    );
    StoreError::DuplicateId(target)
}

fn log_created(kind: EntityKind, id: &dyn std::fmt::Display) {
    debug!("event=entity_create module=store status=ok kind={kind} id={id}");
}
