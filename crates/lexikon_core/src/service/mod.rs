//! Use-case services over the store.
//!
//! # Responsibility
//! - Own business policy: uniqueness of spellings and titles, and what to
//!   do with duplicates. Store primitives apply neither.
//! - Report domain decisions as `Outcome` values.

pub mod lexicon_service;
pub mod outcome;
