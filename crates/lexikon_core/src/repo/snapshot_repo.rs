//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist a whole-store `Snapshot` as one row per entity kind.
//! - Load the last saved snapshot back.
//!
//! # Invariants
//! - `save_snapshot` replaces every row in a single immediate transaction;
//!   readers never see a mix of two saves.
//! - An empty database (never saved) loads as `None`, not as an empty
//!   snapshot.

use crate::model::entity::EntityKind;
use crate::snapshot::{EncodedTable, Snapshot, SnapshotError, SnapshotResult};
use crate::store::{Database, StoreOptions};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::time::Instant;

const REQUIRED_TABLES: [&str; 2] = ["snapshot_tables", "snapshot_meta"];

/// Storage for whole-store snapshots.
pub trait SnapshotRepository {
    /// Replaces the stored snapshot.
    fn save_snapshot(&mut self, snapshot: &Snapshot, saved_at: i64) -> SnapshotResult<()>;
    /// Returns the stored snapshot, or `None` if nothing was saved yet.
    fn load_snapshot(&self) -> SnapshotResult<Option<Snapshot>>;
    /// Epoch milliseconds of the last save.
    fn last_saved_at(&self) -> SnapshotResult<Option<i64>>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection opened with `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when migrations were not applied.
    pub fn try_new(conn: &'conn mut Connection) -> SnapshotResult<Self> {
        for table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(SnapshotError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn save_snapshot(&mut self, snapshot: &Snapshot, saved_at: i64) -> SnapshotResult<()> {
        let tables = snapshot.encode_tables()?;
        let record_count = i64::try_from(snapshot.record_count()).unwrap_or(i64::MAX);

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM snapshot_tables;", [])?;
        for table in &tables {
            tx.execute(
                "INSERT INTO snapshot_tables (kind, records, relationships, saved_at)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    table.kind.as_str(),
                    table.records,
                    table.relationships,
                    saved_at
                ],
            )?;
        }
        tx.execute(
            "INSERT INTO snapshot_meta (id, format_version, record_count, saved_at)
             VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                format_version = excluded.format_version,
                record_count = excluded.record_count,
                saved_at = excluded.saved_at;",
            params![snapshot.format_version, record_count, saved_at],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn load_snapshot(&self) -> SnapshotResult<Option<Snapshot>> {
        let format_version: Option<u32> = self
            .conn
            .query_row(
                "SELECT format_version FROM snapshot_meta WHERE id = 1;",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let Some(format_version) = format_version else {
            return Ok(None);
        };

        let mut stmt = self
            .conn
            .prepare("SELECT kind, records, relationships FROM snapshot_tables ORDER BY kind;")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut tables = Vec::new();
        for row in rows {
            let (kind, records, relationships) = row?;
            let kind = EntityKind::parse(&kind).ok_or_else(|| {
                SnapshotError::InvalidData(format!("unknown snapshot table kind `{kind}`"))
            })?;
            tables.push(EncodedTable {
                kind,
                records,
                relationships,
            });
        }

        Snapshot::decode_tables(format_version, tables).map(Some)
    }

    fn last_saved_at(&self) -> SnapshotResult<Option<i64>> {
        let saved_at = self
            .conn
            .query_row("SELECT saved_at FROM snapshot_meta WHERE id = 1;", [], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(saved_at)
    }
}

/// Captures `db` and saves it through `repo`.
pub fn save_database(
    repo: &mut impl SnapshotRepository,
    db: &Database,
    saved_at: i64,
) -> SnapshotResult<()> {
    let started_at = Instant::now();
    let snapshot = db.snapshot();
    match repo.save_snapshot(&snapshot, saved_at) {
        Ok(()) => {
            info!(
                "event=snapshot_save module=snapshot status=ok records={} duration_ms={}",
                snapshot.record_count(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=snapshot_save module=snapshot status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

/// Loads the stored snapshot into a new `Database`.
///
/// Returns `None` when nothing was saved yet.
pub fn load_database(
    repo: &impl SnapshotRepository,
    options: StoreOptions,
) -> SnapshotResult<Option<Database>> {
    let started_at = Instant::now();
    let result = repo
        .load_snapshot()
        .and_then(|snapshot| {
            snapshot
                .map(|snapshot| Database::from_snapshot(snapshot, options))
                .transpose()
        });
    match &result {
        Ok(loaded) => info!(
            "event=snapshot_load module=snapshot status=ok found={} duration_ms={}",
            loaded.is_some(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=snapshot_load module=snapshot status=error duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}

fn table_exists(conn: &Connection, table: &str) -> SnapshotResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [table],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(exists == 1)
}
