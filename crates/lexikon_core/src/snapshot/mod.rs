//! Serializable image of a whole `Database`.
//!
//! # Responsibility
//! - Capture every record and relationship record, per kind, in table order.
//! - Rebuild a `Database` from a snapshot, rejecting data that breaks the
//!   store invariants.
//! - Encode to and from JSON.
//!
//! # Invariants
//! - `Database::from_snapshot(db.snapshot())` reproduces ids, metadata,
//!   relationship state and table order exactly.
//! - A snapshot with dangling or unmirrored links never becomes a
//!   `Database`.

mod codec;
mod restore;

pub(crate) use codec::EncodedTable;

use crate::db::DbError;
use crate::model::collection::EntryCollection;
use crate::model::entity::{EntityKind, ValidationError};
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
use crate::store::{Database, StoreError, Table};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

/// Format written by this build; older or newer formats are rejected.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

pub type SnapshotResult<T> = Result<T, SnapshotError>;

#[derive(Debug)]
pub enum SnapshotError {
    Db(DbError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
    /// Well-formed input that violates a store invariant.
    InvalidData(String),
    /// The connection was not migrated for snapshot storage.
    MissingRequiredTable(&'static str),
    Store(StoreError),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "snapshot encode failed: {err}"),
            Self::Decode(err) => write!(f, "snapshot decode failed: {err}"),
            Self::InvalidData(details) => write!(f, "invalid snapshot: {details}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for SnapshotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SnapshotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<StoreError> for SnapshotError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ValidationError> for SnapshotError {
    fn from(value: ValidationError) -> Self {
        Self::Store(StoreError::Validation(value))
    }
}

/// Relationship record of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRow<I, L> {
    pub id: I,
    pub links: L,
}

/// Records of one kind plus their relationship records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot<I, R, L> {
    pub records: Vec<R>,
    pub relationships: Vec<RelationshipRow<I, L>>,
}

impl<I, R, L> Default for TableSnapshot<I, R, L> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            relationships: Vec::new(),
        }
    }
}

impl<I: Clone + Eq + Hash, R: Clone, L: Clone + Default> TableSnapshot<I, R, L> {
    fn capture(table: &Table<I, R>, links: &HashMap<I, L>) -> Self {
        let records = table.values().cloned().collect();
        let relationships = table
            .keys()
            .map(|id| RelationshipRow {
                id: id.clone(),
                links: links.get(id).cloned().unwrap_or_default(),
            })
            .collect();
        Self {
            records,
            relationships,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    #[serde(default)]
    pub entries: TableSnapshot<EntryId, Entry, EntryRelationships>,
    #[serde(default)]
    pub languages: TableSnapshot<LanguageId, Language, LanguageRelationships>,
    #[serde(default)]
    pub keywords: TableSnapshot<KeywordId, Keyword, KeywordRelationships>,
    #[serde(default)]
    pub notes: TableSnapshot<NoteId, Note, NoteRelationships>,
    #[serde(default)]
    pub usages: TableSnapshot<UsageId, Usage, UsageRelationships>,
    #[serde(default)]
    pub entry_collections:
        TableSnapshot<EntryCollectionId, EntryCollection, EntryCollectionRelationships>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            entries: TableSnapshot::default(),
            languages: TableSnapshot::default(),
            keywords: TableSnapshot::default(),
            notes: TableSnapshot::default(),
            usages: TableSnapshot::default(),
            entry_collections: TableSnapshot::default(),
        }
    }
}

impl Snapshot {
    /// Number of records of one kind.
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Entry => self.entries.records.len(),
            EntityKind::Language => self.languages.records.len(),
            EntityKind::Keyword => self.keywords.records.len(),
            EntityKind::Note => self.notes.records.len(),
            EntityKind::Usage => self.usages.records.len(),
            EntityKind::EntryCollection => self.entry_collections.records.len(),
        }
    }

    pub fn record_count(&self) -> usize {
        EntityKind::ALL.into_iter().map(|kind| self.len(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    pub fn to_json(&self) -> SnapshotResult<String> {
        serde_json::to_string(self).map_err(SnapshotError::Encode)
    }

    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        serde_json::from_str(json).map_err(SnapshotError::Decode)
    }
}

impl Database {
    /// Captures the whole store.
    pub fn snapshot(&self) -> Snapshot {
        let snapshot = Snapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            entries: TableSnapshot::capture(&self.entries, &self.entry_links),
            languages: TableSnapshot::capture(&self.languages, &self.language_links),
            keywords: TableSnapshot::capture(&self.keywords, &self.keyword_links),
            notes: TableSnapshot::capture(&self.notes, &self.note_links),
            usages: TableSnapshot::capture(&self.usages, &self.usage_links),
            entry_collections: TableSnapshot::capture(
                &self.entry_collections,
                &self.entry_collection_links,
            ),
        };
        debug!(
            "event=snapshot_capture module=snapshot status=ok records={}",
            snapshot.record_count()
        );
        snapshot
    }
}
