//! Per-entity relationship records.
//!
//! # Responsibility
//! - Hold every link of one entity as id lists/sets, separate from its
//!   scalar attributes.
//!
//! # Invariants
//! - Ordered lists never contain the same id twice.
//! - Every bidirectional link is mirrored on the other side's record; the
//!   store is the only writer and keeps both sides in lock-step.

use crate::model::entity::EntityRef;
use crate::model::ids::{EntryCollectionId, EntryId, KeywordId, LanguageId, NoteId, UsageId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Links of one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryRelationships {
    /// Mirrored by `LanguageRelationships::entries`.
    pub languages: Vec<LanguageId>,
    /// Entries this entry derives from; mirrored by their `derived`.
    pub roots: Vec<EntryId>,
    pub derived: BTreeSet<EntryId>,
    /// Mirrored by the targets' `back_translations`.
    pub translations: Vec<EntryId>,
    pub back_translations: BTreeSet<EntryId>,
    pub see_also: Vec<EntryId>,
    /// Mirrored by `UsageRelationships::uses`.
    pub usages: Vec<UsageId>,
    /// Mirrored by `KeywordRelationships::matches`.
    pub keywords: BTreeSet<KeywordId>,
    /// Mirrored by `NoteRelationships::target`.
    pub notes: Vec<NoteId>,
    /// Mirrored by `EntryCollectionRelationships::entries`.
    pub entry_collections: BTreeSet<EntryCollectionId>,
}

impl EntryRelationships {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Links of one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageRelationships {
    pub entries: BTreeSet<EntryId>,
    pub usages: BTreeSet<UsageId>,
}

impl LanguageRelationships {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.usages.is_empty()
    }
}

/// Links of one keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordRelationships {
    pub matches: Vec<EntryId>,
}

impl KeywordRelationships {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Owner of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum NoteTarget {
    Entry(EntryId),
    Usage(UsageId),
}

impl From<NoteTarget> for EntityRef {
    fn from(value: NoteTarget) -> Self {
        match value {
            NoteTarget::Entry(id) => EntityRef::Entry(id),
            NoteTarget::Usage(id) => EntityRef::Usage(id),
        }
    }
}

/// Links of one note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteRelationships {
    pub target: Option<NoteTarget>,
}

impl NoteRelationships {
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
    }
}

/// Links of one usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageRelationships {
    /// Mirrored by `LanguageRelationships::usages`.
    pub languages: Vec<LanguageId>,
    pub notes: Vec<NoteId>,
    /// Mirrored by `EntryRelationships::usages`.
    pub uses: BTreeSet<EntryId>,
}

impl UsageRelationships {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.notes.is_empty() && self.uses.is_empty()
    }
}

/// Links of one entry collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryCollectionRelationships {
    /// User-controlled display order.
    pub entries: Vec<EntryId>,
}

impl EntryCollectionRelationships {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Appends `value` unless already present. Returns whether it was added.
pub(crate) fn push_unique<T: PartialEq>(list: &mut Vec<T>, value: T) -> bool {
    if list.contains(&value) {
        return false;
    }
    list.push(value);
    true
}

/// Removes the first occurrence of `value`. Returns whether it was present.
pub(crate) fn remove_first<T: PartialEq>(list: &mut Vec<T>, value: &T) -> bool {
    match list.iter().position(|item| item == value) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}
