//! Entry domain model.
//!
//! # Responsibility
//! - Hold the scalar attributes of one dictionary entry.
//!
//! # Invariants
//! - `spelling` is never blank for a stored entry.
//! - Relationship data lives in `EntryRelationships`, never here.

use crate::model::entity::{require_non_nil, require_text, EntityKind, Metadata, ValidationError};
use crate::model::ids::EntryId;
use serde::{Deserialize, Serialize};

/// Central node of the store: one spelled word or phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub spelling: String,
    /// Variant spellings shown alongside the primary one.
    #[serde(default)]
    pub alternate_spellings: Vec<String>,
    /// Set by the store on create/update.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Entry {
    pub fn new(id: EntryId, spelling: impl Into<String>) -> Self {
        Self {
            id,
            spelling: spelling.into(),
            alternate_spellings: Vec::new(),
            metadata: Metadata::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_nil(self.id.is_nil(), EntityKind::Entry)?;
        require_text(&self.spelling, EntityKind::Entry, "spelling")
    }

    /// Whether `text` equals the primary or any alternate spelling.
    pub fn is_spelled(&self, text: &str) -> bool {
        self.spelling == text || self.alternate_spellings.iter().any(|value| value == text)
    }
}
