//! Typed identifiers for every entity kind.
//!
//! # Responsibility
//! - Give each entity kind its own id type so ids cannot be mixed up.
//! - Provide the id-generation seam consumed by creation helpers.
//!
//! # Invariants
//! - UUID-backed ids compare and hash by their UUID only.
//! - `LanguageId` always holds a normalized, validated tag.

use crate::model::entity::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

static LANGUAGE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").expect("valid language tag regex")
});

macro_rules! define_uuid_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an existing UUID (import/snapshot paths).
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Draws a fresh id from the supplied generator.
            pub fn generate(ids: &mut impl IdGenerator) -> Self {
                Self(ids.next_uuid())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }

            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(value).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_uuid_id!(EntryId, "Stable identifier of an entry.");
define_uuid_id!(KeywordId, "Stable identifier of a keyword.");
define_uuid_id!(NoteId, "Stable identifier of a note.");
define_uuid_id!(UsageId, "Stable identifier of a usage example.");
define_uuid_id!(EntryCollectionId, "Stable identifier of an entry collection.");

/// Language identity: its own normalized BCP-47-like tag.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageId(String);

impl LanguageId {
    /// Normalizes and validates a language tag.
    ///
    /// `en_us` becomes `en-US`, `zh-hant-tw` becomes `zh-Hant-TW`.
    pub fn parse(tag: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_language_tag(tag);
        if !LANGUAGE_TAG_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidLanguageTag(tag.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag, e.g. `en` for `en-US`.
    pub fn primary_subtag(&self) -> &str {
        self.0.split('-').next().unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for LanguageId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageId> for String {
    fn from(value: LanguageId) -> Self {
        value.0
    }
}

/// Source of fresh identifiers for newly created entities.
pub trait IdGenerator {
    fn next_uuid(&mut self) -> Uuid;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_uuid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic ids `00000000-...-0001`, `...-0002`, ... for tests and imports.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_uuid(&mut self) -> Uuid {
        self.issued += 1;
        Uuid::from_u128(self.issued)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_uuid(&mut self) -> Uuid {
        (**self).next_uuid()
    }
}

fn normalize_language_tag(tag: &str) -> String {
    tag.trim()
        .replace('_', "-")
        .split('-')
        .enumerate()
        .map(|(index, subtag)| {
            let alphabetic = subtag.chars().all(|c| c.is_ascii_alphabetic());
            if index == 0 {
                subtag.to_ascii_lowercase()
            } else if alphabetic && subtag.len() == 2 {
                subtag.to_ascii_uppercase()
            } else if alphabetic && subtag.len() == 4 {
                let (head, tail) = subtag.split_at(1);
                format!("{}{}", head.to_ascii_uppercase(), tail.to_ascii_lowercase())
            } else {
                subtag.to_ascii_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
