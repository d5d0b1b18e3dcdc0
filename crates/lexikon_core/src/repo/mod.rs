//! Persistence adapters.
//!
//! # Responsibility
//! - Move whole-store snapshots in and out of durable storage.
//! - Keep SQLite details out of the in-memory store.
//!
//! # Invariants
//! - Persistence runs after a mutation completes, never interleaved with
//!   one; the store itself stays synchronous and storage-agnostic.

pub mod snapshot_repo;
