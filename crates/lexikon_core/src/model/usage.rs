//! Usage domain model.

use crate::model::entity::{require_non_nil, require_text, EntityKind, Metadata, ValidationError};
use crate::model::ids::UsageId;
use serde::{Deserialize, Serialize};

/// Example sentence using one or more entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub id: UsageId,
    pub value: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Usage {
    pub fn new(id: UsageId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            metadata: Metadata::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_nil(self.id.is_nil(), EntityKind::Usage)?;
        require_text(&self.value, EntityKind::Usage, "value")
    }
}
