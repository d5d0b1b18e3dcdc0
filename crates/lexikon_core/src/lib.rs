//! Core of the lexikon dictionary store.
//!
//! An in-memory relational store of entries, languages, keywords, notes,
//! usages and entry collections, with reciprocal links kept in lock-step,
//! conflict-aware creation flows and SQLite snapshot persistence.

pub mod aggregate;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod snapshot;
pub mod store;

pub use aggregate::{
    AggregateQuery, EntryAggregate, EntryCollectionAggregate, KeywordAggregate,
    LanguageAggregate, NoteAggregate, NoteOwner, UsageAggregate,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::{open_db, open_db_in_memory, open_existing_db, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::collection::EntryCollection;
pub use model::entity::{Entity, EntityKind, EntityRef, Metadata, ValidationError};
pub use model::entry::Entry;
pub use model::ids::{
    EntryCollectionId, EntryId, IdGenerator, KeywordId, LanguageId, NoteId, RandomIds,
    SequentialIds, UsageId,
};
pub use model::keyword::Keyword;
pub use model::language::Language;
pub use model::note::Note;
pub use model::relationships::NoteTarget;
pub use model::usage::Usage;
pub use repo::snapshot_repo::{
    load_database, save_database, SnapshotRepository, SqliteSnapshotRepository,
};
pub use service::lexicon_service::{DuplicatePolicy, LexiconService};
pub use service::outcome::Outcome;
pub use snapshot::{Snapshot, SnapshotError, SnapshotResult, SNAPSHOT_FORMAT_VERSION};
pub use store::{
    Database, Direction, IntegrityViolation, MissingEntityPolicy, NewEntry, OrderedList,
    StoreError, StoreOptions, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
