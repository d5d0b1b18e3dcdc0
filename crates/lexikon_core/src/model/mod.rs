//! Domain model for the lexicon store.
//!
//! # Responsibility
//! - Define typed ids, entity records and relationship records.
//! - Keep scalar attributes and links in separate structures.
//!
//! # Invariants
//! - Records never embed links to other records; links live in the
//!   per-kind relationship records and reference ids only.
//! - Required text fields are validated before a record is stored.

pub mod collection;
pub mod entity;
pub mod entry;
pub mod ids;
pub mod keyword;
pub mod language;
pub mod note;
pub mod relationships;
pub mod usage;
