//! Entry collection domain model.

use crate::model::entity::{require_non_nil, require_text, EntityKind, Metadata, ValidationError};
use crate::model::ids::EntryCollectionId;
use serde::{Deserialize, Serialize};

/// User-defined, user-ordered grouping of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCollection {
    pub id: EntryCollectionId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl EntryCollection {
    pub fn new(id: EntryCollectionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            metadata: Metadata::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_nil(self.id.is_nil(), EntityKind::EntryCollection)?;
        require_text(&self.title, EntityKind::EntryCollection, "title")
    }
}
