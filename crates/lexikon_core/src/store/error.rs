//! Store error taxonomy.
//!
//! These are structural faults: the caller broke a precondition (blank
//! required field, duplicate id, missing endpoint). Business outcomes such
//! as spelling collisions are never reported here; see `service::Outcome`.

use crate::model::entity::{EntityRef, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Record failed validation; nothing was written.
    Validation(ValidationError),
    /// Creation is not upsert.
    DuplicateId(EntityRef),
    /// Referenced entity does not exist.
    NotFound(EntityRef),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(target) => write!(f, "entity already exists: {target}"),
            Self::NotFound(target) => write!(f, "entity not found: {target}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
