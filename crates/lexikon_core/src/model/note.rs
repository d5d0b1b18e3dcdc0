//! Note domain model.

use crate::model::entity::{require_non_nil, EntityKind, Metadata, ValidationError};
use crate::model::ids::NoteId;
use serde::{Deserialize, Serialize};

/// Free-text annotation; attached to at most one entry or usage.
///
/// `value` may be empty: a note can be created before it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub value: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Note {
    pub fn new(id: NoteId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            metadata: Metadata::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_nil(self.id.is_nil(), EntityKind::Note)
    }
}
