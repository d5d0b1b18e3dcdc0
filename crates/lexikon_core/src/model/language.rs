//! Language domain model.

use crate::model::entity::Metadata;
use crate::model::ids::LanguageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language keyed by its own normalized tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    /// User overrides of the display title, keyed by display locale.
    #[serde(default)]
    pub custom_localized_titles: BTreeMap<String, String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Language {
    pub fn new(id: LanguageId) -> Self {
        Self {
            id,
            custom_localized_titles: BTreeMap::new(),
            metadata: Metadata::default(),
        }
    }

    /// Display title for `locale`; falls back to the tag itself.
    pub fn title(&self, locale: &str) -> &str {
        self.custom_localized_titles
            .get(locale)
            .map(String::as_str)
            .unwrap_or(self.id.as_str())
    }
}
