//! Conflict-aware creation and rename flows.
//!
//! # Responsibility
//! - Decide what happens when a new spelling or title collides with an
//!   existing record.
//! - Draw `now` from the injected clock and ids from the injected generator.
//!
//! # Invariants
//! - `Conflicts` and `Canceled` outcomes leave the store untouched.
//! - Spelling and title comparison is exact and case-sensitive.
//! - Store primitives never auto-resolve duplicates; only this module does.

use super::outcome::Outcome;
use crate::clock::Clock;
use crate::model::collection::EntryCollection;
use crate::model::entity::{require_text, EntityKind, EntityRef};
use crate::model::entry::Entry;
use crate::model::ids::{EntryCollectionId, EntryId, IdGenerator, KeywordId, LanguageId};
use crate::model::keyword::Keyword;
use crate::store::{Database, Direction, NewEntry, StoreError, StoreResult};
use log::info;

/// Caller decision for a spelling that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Reuse the first matching entry instead of creating a new one.
    MergeWithFirstMatch,
    /// Create a new entry even though the spelling exists.
    MaintainDistinction,
    /// Abandon the flow.
    Cancel,
}

/// Use-case facade over a borrowed store.
pub struct LexiconService<'db, C, I> {
    db: &'db mut Database,
    clock: C,
    ids: I,
}

impl<'db, C: Clock, I: IdGenerator> LexiconService<'db, C, I> {
    pub fn new(db: &'db mut Database, clock: C, ids: I) -> Self {
        Self { db, clock, ids }
    }

    pub fn database(&self) -> &Database {
        &*self.db
    }

    /// Adds an entry spelled `spelling` in `language`.
    ///
    /// With no existing entry of that spelling a new one is created. When
    /// matches exist the result depends on `policy`; without a policy the
    /// matches are returned as `Conflicts`.
    pub fn add_entry(
        &mut self,
        spelling: &str,
        language: &LanguageId,
        policy: Option<DuplicatePolicy>,
    ) -> StoreResult<Outcome<Entry, Entry>> {
        let outcome = self.place_entry(spelling, language, policy, None)?;
        log_flow("entry_add", &outcome);
        self.resolved(outcome)
    }

    /// Adds `spelling` as a bidirectional translation of `of`.
    ///
    /// `of` itself is never offered as a match.
    pub fn add_translation(
        &mut self,
        of: EntryId,
        spelling: &str,
        language: &LanguageId,
        policy: Option<DuplicatePolicy>,
    ) -> StoreResult<Outcome<Entry, Entry>> {
        self.db.require(EntityRef::Entry(of))?;
        let outcome = self.place_entry(spelling, language, policy, Some(of))?;
        if let Outcome::Success(id) = &outcome {
            self.db
                .connect_translation(*id, of, Direction::Bidirectional)?;
        }
        log_flow("translation_add", &outcome);
        self.resolved(outcome)
    }

    /// Adds `spelling` as a root of `of`.
    pub fn add_root(
        &mut self,
        of: EntryId,
        spelling: &str,
        language: &LanguageId,
        policy: Option<DuplicatePolicy>,
    ) -> StoreResult<Outcome<Entry, Entry>> {
        self.db.require(EntityRef::Entry(of))?;
        let outcome = self.place_entry(spelling, language, policy, Some(of))?;
        if let Outcome::Success(id) = &outcome {
            self.db.connect_root(*id, of)?;
        }
        log_flow("root_add", &outcome);
        self.resolved(outcome)
    }

    /// Changes an entry's spelling unless another entry already has it.
    ///
    /// A missing `id` follows the store's missing-entity policy: an error
    /// when strict, [`Outcome::Canceled`] when tolerant.
    pub fn rename_entry(
        &mut self,
        id: EntryId,
        spelling: &str,
    ) -> StoreResult<Outcome<Entry, Entry>> {
        require_text(spelling, EntityKind::Entry, "spelling")?;
        let Some(current) = self.db.entry(id).cloned() else {
            return self.skip_missing("entry_rename", EntityRef::Entry(id));
        };

        let conflicts: Vec<Entry> = self
            .db
            .find_entries_by_spelling(spelling)
            .into_iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            let outcome = Outcome::Conflicts(conflicts);
            log_flow("entry_rename", &outcome);
            return Ok(outcome);
        }

        let mut renamed = current;
        renamed.spelling = spelling.to_string();
        self.db.update_entry(renamed, self.clock.now_ms())?;
        let outcome = Outcome::Success(self.stored_entry(id)?);
        log_flow("entry_rename", &outcome);
        Ok(outcome)
    }

    /// Changes a keyword title unless another keyword already has it.
    pub fn retitle_keyword(
        &mut self,
        id: KeywordId,
        title: &str,
    ) -> StoreResult<Outcome<Keyword, Keyword>> {
        require_text(title, EntityKind::Keyword, "title")?;
        let Some(current) = self.db.keyword(id).cloned() else {
            return self.skip_missing("keyword_retitle", EntityRef::Keyword(id));
        };

        let conflicts: Vec<Keyword> = self
            .db
            .keywords_where(|keyword| keyword.id != id && keyword.title == title)
            .into_iter()
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            let outcome = Outcome::Conflicts(conflicts);
            log_flow("keyword_retitle", &outcome);
            return Ok(outcome);
        }

        let mut retitled = current;
        retitled.title = title.to_string();
        self.db
            .update_keyword(retitled.clone(), self.clock.now_ms())?;
        let outcome = Outcome::Success(self.db.keyword(id).cloned().unwrap_or(retitled));
        log_flow("keyword_retitle", &outcome);
        Ok(outcome)
    }

    /// Changes a collection title unless another collection already has it.
    pub fn retitle_collection(
        &mut self,
        id: EntryCollectionId,
        title: &str,
    ) -> StoreResult<Outcome<EntryCollection, EntryCollection>> {
        require_text(title, EntityKind::EntryCollection, "title")?;
        let Some(current) = self.db.entry_collection(id).cloned() else {
            return self.skip_missing("collection_retitle", EntityRef::EntryCollection(id));
        };

        let conflicts: Vec<EntryCollection> = self
            .db
            .entry_collections_where(|collection| collection.id != id && collection.title == title)
            .into_iter()
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            let outcome = Outcome::Conflicts(conflicts);
            log_flow("collection_retitle", &outcome);
            return Ok(outcome);
        }

        let mut retitled = current;
        retitled.title = title.to_string();
        self.db
            .update_entry_collection(retitled.clone(), self.clock.now_ms())?;
        let stored = self.db.entry_collection(id).cloned().unwrap_or(retitled);
        let outcome = Outcome::Success(stored);
        log_flow("collection_retitle", &outcome);
        Ok(outcome)
    }

    /// Tags `entry` with the keyword titled `title`, creating the keyword
    /// when none has that exact title.
    pub fn attach_keyword_by_title(
        &mut self,
        entry: EntryId,
        title: &str,
    ) -> StoreResult<KeywordId> {
        require_text(title, EntityKind::Keyword, "title")?;
        self.db.require(EntityRef::Entry(entry))?;

        let existing = self
            .db
            .keywords()
            .find(|keyword| keyword.title == title)
            .map(|keyword| keyword.id);
        let keyword = match existing {
            Some(keyword) => {
                self.db.connect_keyword(keyword, entry)?;
                keyword
            }
            None => {
                let now = self.clock.now_ms();
                self.db.new_keyword(title, Some(entry), now, &mut self.ids)?
            }
        };
        info!(
            "event=keyword_attach module=service status=ok reused={}",
            existing.is_some()
        );
        Ok(keyword)
    }

    fn skip_missing<T, K>(&self, operation: &str, target: EntityRef) -> StoreResult<Outcome<T, K>> {
        self.db.missing(operation, target)?;
        Ok(Outcome::Canceled)
    }

    /// Shared decision table of the add flows. Returns the id of the entry
    /// to link, or the outcome that stops the flow.
    fn place_entry(
        &mut self,
        spelling: &str,
        language: &LanguageId,
        policy: Option<DuplicatePolicy>,
        exclude: Option<EntryId>,
    ) -> StoreResult<Outcome<EntryId, Entry>> {
        require_text(spelling, EntityKind::Entry, "spelling")?;
        self.db.require(EntityRef::Language(language.clone()))?;

        let matches: Vec<Entry> = self
            .db
            .find_entries_by_spelling(spelling)
            .into_iter()
            .filter(|entry| Some(entry.id) != exclude)
            .cloned()
            .collect();
        let Some(first) = matches.first().map(|entry| entry.id) else {
            return self.create_entry(spelling, language).map(Outcome::Success);
        };

        match policy {
            None => Ok(Outcome::Conflicts(matches)),
            Some(DuplicatePolicy::Cancel) => Ok(Outcome::Canceled),
            Some(DuplicatePolicy::MergeWithFirstMatch) => {
                self.db.connect_language(first, language)?;
                Ok(Outcome::Success(first))
            }
            Some(DuplicatePolicy::MaintainDistinction) => {
                self.create_entry(spelling, language).map(Outcome::Success)
            }
        }
    }

    fn create_entry(&mut self, spelling: &str, language: &LanguageId) -> StoreResult<EntryId> {
        let now = self.clock.now_ms();
        self.db
            .new_entry(NewEntry::spelled(spelling), Some(language), now, &mut self.ids)
    }

    fn resolved(&self, outcome: Outcome<EntryId, Entry>) -> StoreResult<Outcome<Entry, Entry>> {
        Ok(match outcome {
            Outcome::Success(id) => Outcome::Success(self.stored_entry(id)?),
            Outcome::Conflicts(conflicts) => Outcome::Conflicts(conflicts),
            Outcome::Canceled => Outcome::Canceled,
        })
    }

    fn stored_entry(&self, id: EntryId) -> StoreResult<Entry> {
        self.db
            .entry(id)
            .cloned()
            .ok_or(StoreError::NotFound(EntityRef::Entry(id)))
    }
}

fn log_flow<T, C>(event: &str, outcome: &Outcome<T, C>) {
    info!(
        "event={event} module=service status={} conflicts={}",
        outcome.status(),
        outcome.conflicts().len()
    );
}
