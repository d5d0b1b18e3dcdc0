//! Keyword domain model.

use crate::model::entity::{require_non_nil, require_text, EntityKind, Metadata, ValidationError};
use crate::model::ids::KeywordId;
use serde::{Deserialize, Serialize};

/// Tag-like node matched against entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: KeywordId,
    pub title: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Keyword {
    pub fn new(id: KeywordId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            metadata: Metadata::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_nil(self.id.is_nil(), EntityKind::Keyword)?;
        require_text(&self.title, EntityKind::Keyword, "title")
    }
}
