//! In-memory relational store.
//!
//! # Responsibility
//! - Own one record table and one relationship table per entity kind.
//! - Expose create/read/update/delete/connect/disconnect/move operations.
//!
//! # Invariants
//! - Every id in a relationship record refers to a live record.
//! - Bidirectional links are written and removed on both sides within the
//!   same call; no caller can observe a half-applied link.
//! - Deleting a record strips its id from every other relationship record
//!   eagerly.
//! - Single writer: `&mut Database` is the only mutation path.

mod connect;
mod create;
mod delete;
mod error;
mod integrity;
mod ordering;
mod read;
mod table;
mod update;

pub use connect::Direction;
pub use create::NewEntry;
pub use error::{StoreError, StoreResult};
pub use integrity::IntegrityViolation;
pub use ordering::OrderedList;

pub(crate) use table::Table;

use crate::model::collection::EntryCollection;
use crate::model::entity::{EntityKind, EntityRef};
use crate::model::entry::Entry;
use crate::model::ids::{EntryCollectionId, EntryId, KeywordId, LanguageId, NoteId, UsageId};
use crate::model::keyword::Keyword;
use crate::model::language::Language;
use crate::model::note::Note;
use crate::model::relationships::{
    EntryCollectionRelationships, EntryRelationships, KeywordRelationships,
    LanguageRelationships, NoteRelationships, UsageRelationships,
};
use crate::model::usage::Usage;
use log::{debug, warn};
use std::collections::HashMap;

/// How update/delete react to an id that is not in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingEntityPolicy {
    /// Report `StoreError::NotFound`.
    #[default]
    Strict,
    /// Treat the call as a no-op.
    Tolerant,
}

/// Store configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub missing_entity: MissingEntityPolicy,
}

impl StoreOptions {
    pub fn tolerant() -> Self {
        Self {
            missing_entity: MissingEntityPolicy::Tolerant,
        }
    }
}

/// The relational entity store.
#[derive(Debug, Clone, Default)]
pub struct Database {
    options: StoreOptions,
    pub(crate) entries: Table<EntryId, Entry>,
    pub(crate) languages: Table<LanguageId, Language>,
    pub(crate) keywords: Table<KeywordId, Keyword>,
    pub(crate) notes: Table<NoteId, Note>,
    pub(crate) usages: Table<UsageId, Usage>,
    pub(crate) entry_collections: Table<EntryCollectionId, EntryCollection>,
    pub(crate) entry_links: HashMap<EntryId, EntryRelationships>,
    pub(crate) language_links: HashMap<LanguageId, LanguageRelationships>,
    pub(crate) keyword_links: HashMap<KeywordId, KeywordRelationships>,
    pub(crate) note_links: HashMap<NoteId, NoteRelationships>,
    pub(crate) usage_links: HashMap<UsageId, UsageRelationships>,
    pub(crate) entry_collection_links: HashMap<EntryCollectionId, EntryCollectionRelationships>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn set_options(&mut self, options: StoreOptions) {
        self.options = options;
    }

    /// Number of records of one kind.
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Entry => self.entries.len(),
            EntityKind::Language => self.languages.len(),
            EntityKind::Keyword => self.keywords.len(),
            EntityKind::Note => self.notes.len(),
            EntityKind::Usage => self.usages.len(),
            EntityKind::EntryCollection => self.entry_collections.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::ALL.into_iter().all(|kind| self.len(kind) == 0)
    }

    /// Fails with `NotFound` unless `target` exists, independent of policy.
    pub(crate) fn require(&self, target: EntityRef) -> StoreResult<()> {
        if self.contains(&target) {
            return Ok(());
        }
        warn!(
            "event=require_entity module=store status=error kind={} error_code=not_found",
            target.kind()
        );
        Err(StoreError::NotFound(target))
    }

    /// Applies `MissingEntityPolicy` to an update/delete of a missing id.
    pub(crate) fn missing(&self, operation: &str, target: EntityRef) -> StoreResult<()> {
        match self.options.missing_entity {
            MissingEntityPolicy::Strict => {
                warn!(
                    "event={operation} module=store status=error kind={} error_code=not_found",
                    target.kind()
                );
                Err(StoreError::NotFound(target))
            }
            MissingEntityPolicy::Tolerant => {
                debug!(
                    "event={operation} module=store status=skipped kind={} reason=not_found",
                    target.kind()
                );
                Ok(())
            }
        }
    }

    pub(crate) fn entry_links_mut(&mut self, id: EntryId) -> &mut EntryRelationships {
        self.entry_links.entry(id).or_default()
    }

    pub(crate) fn language_links_mut(&mut self, id: &LanguageId) -> &mut LanguageRelationships {
        self.language_links.entry(id.clone()).or_default()
    }

    pub(crate) fn keyword_links_mut(&mut self, id: KeywordId) -> &mut KeywordRelationships {
        self.keyword_links.entry(id).or_default()
    }

    pub(crate) fn note_links_mut(&mut self, id: NoteId) -> &mut NoteRelationships {
        self.note_links.entry(id).or_default()
    }

    pub(crate) fn usage_links_mut(&mut self, id: UsageId) -> &mut UsageRelationships {
        self.usage_links.entry(id).or_default()
    }

    pub(crate) fn entry_collection_links_mut(
        &mut self,
        id: EntryCollectionId,
    ) -> &mut EntryCollectionRelationships {
        self.entry_collection_links.entry(id).or_default()
    }
}
