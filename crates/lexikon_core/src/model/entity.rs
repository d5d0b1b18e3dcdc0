//! Closed set of entity kinds and the sum types ranging over them.

use crate::model::collection::EntryCollection;
use crate::model::entry::Entry;
use crate::model::ids::{EntryCollectionId, EntryId, KeywordId, LanguageId, NoteId, UsageId};
use crate::model::keyword::Keyword;
use crate::model::language::Language;
use crate::model::note::Note;
use crate::model::usage::Usage;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Creation/modification timestamps in epoch milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub added: i64,
    pub modified: i64,
}

impl Metadata {
    pub fn at(now: i64) -> Self {
        Self {
            added: now,
            modified: now,
        }
    }
}

/// The six record kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Entry,
    Language,
    Keyword,
    Note,
    Usage,
    EntryCollection,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Entry,
        EntityKind::Language,
        EntityKind::Keyword,
        EntityKind::Note,
        EntityKind::Usage,
        EntityKind::EntryCollection,
    ];

    /// Stable name used in log lines and snapshot rows.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Language => "language",
            Self::Keyword => "keyword",
            Self::Note => "note",
            Self::Usage => "usage",
            Self::EntryCollection => "entry_collection",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed reference to any entity in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Entry(EntryId),
    Language(LanguageId),
    Keyword(KeywordId),
    Note(NoteId),
    Usage(UsageId),
    EntryCollection(EntryCollectionId),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Entry(_) => EntityKind::Entry,
            Self::Language(_) => EntityKind::Language,
            Self::Keyword(_) => EntityKind::Keyword,
            Self::Note(_) => EntityKind::Note,
            Self::Usage(_) => EntityKind::Usage,
            Self::EntryCollection(_) => EntityKind::EntryCollection,
        }
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry(id) => write!(f, "entry:{id}"),
            Self::Language(id) => write!(f, "language:{id}"),
            Self::Keyword(id) => write!(f, "keyword:{id}"),
            Self::Note(id) => write!(f, "note:{id}"),
            Self::Usage(id) => write!(f, "usage:{id}"),
            Self::EntryCollection(id) => write!(f, "entry_collection:{id}"),
        }
    }
}

impl From<EntryId> for EntityRef {
    fn from(value: EntryId) -> Self {
        Self::Entry(value)
    }
}

impl From<LanguageId> for EntityRef {
    fn from(value: LanguageId) -> Self {
        Self::Language(value)
    }
}

impl From<KeywordId> for EntityRef {
    fn from(value: KeywordId) -> Self {
        Self::Keyword(value)
    }
}

impl From<NoteId> for EntityRef {
    fn from(value: NoteId) -> Self {
        Self::Note(value)
    }
}

impl From<UsageId> for EntityRef {
    fn from(value: UsageId) -> Self {
        Self::Usage(value)
    }
}

impl From<EntryCollectionId> for EntityRef {
    fn from(value: EntryCollectionId) -> Self {
        Self::EntryCollection(value)
    }
}

/// Owned record of any kind, used by the kind-generic store entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Entry(Entry),
    Language(Language),
    Keyword(Keyword),
    Note(Note),
    Usage(Usage),
    EntryCollection(EntryCollection),
}

impl Entity {
    pub fn entity_ref(&self) -> EntityRef {
        match self {
            Self::Entry(entry) => EntityRef::Entry(entry.id),
            Self::Language(language) => EntityRef::Language(language.id.clone()),
            Self::Keyword(keyword) => EntityRef::Keyword(keyword.id),
            Self::Note(note) => EntityRef::Note(note.id),
            Self::Usage(usage) => EntityRef::Usage(usage.id),
            Self::EntryCollection(collection) => EntityRef::EntryCollection(collection.id),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.entity_ref().kind()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Entry(entry) => entry.validate(),
            Self::Language(_) => Ok(()),
            Self::Keyword(keyword) => keyword.validate(),
            Self::Note(note) => note.validate(),
            Self::Usage(usage) => usage.validate(),
            Self::EntryCollection(collection) => collection.validate(),
        }
    }
}

impl From<Entry> for Entity {
    fn from(value: Entry) -> Self {
        Self::Entry(value)
    }
}

impl From<Language> for Entity {
    fn from(value: Language) -> Self {
        Self::Language(value)
    }
}

impl From<Keyword> for Entity {
    fn from(value: Keyword) -> Self {
        Self::Keyword(value)
    }
}

impl From<Note> for Entity {
    fn from(value: Note) -> Self {
        Self::Note(value)
    }
}

impl From<Usage> for Entity {
    fn from(value: Usage) -> Self {
        Self::Usage(value)
    }
}

impl From<EntryCollection> for Entity {
    fn from(value: EntryCollection) -> Self {
        Self::EntryCollection(value)
    }
}

/// Record-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField {
        kind: EntityKind,
        field: &'static str,
    },
    /// Language tag does not look like a BCP-47 tag.
    InvalidLanguageTag(String),
    /// UUID-backed ids must not be nil.
    NilId(EntityKind),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { kind, field } => write!(f, "{kind}.{field} must not be empty"),
            Self::InvalidLanguageTag(tag) => write!(f, "invalid language tag `{tag}`"),
            Self::NilId(kind) => write!(f, "{kind} id must not be nil"),
        }
    }
}

impl Error for ValidationError {}

/// Shared check for required text fields.
pub(crate) fn require_text(
    value: &str,
    kind: EntityKind,
    field: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { kind, field });
    }
    Ok(())
}

pub(crate) fn require_non_nil(nil: bool, kind: EntityKind) -> Result<(), ValidationError> {
    if nil {
        return Err(ValidationError::NilId(kind));
    }
    Ok(())
}
