//! Per-kind row encoding used by the SQLite snapshot repository.

use super::{Snapshot, SnapshotError, SnapshotResult, TableSnapshot};
use crate::model::entity::EntityKind;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// One `snapshot_tables` row: JSON arrays of records and relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EncodedTable {
    pub kind: EntityKind,
    pub records: String,
    pub relationships: String,
}

impl Snapshot {
    /// Splits the snapshot into one encoded row per kind, in `EntityKind::ALL`
    /// order.
    pub(crate) fn encode_tables(&self) -> SnapshotResult<Vec<EncodedTable>> {
        Ok(vec![
            encode(EntityKind::Entry, &self.entries)?,
            encode(EntityKind::Language, &self.languages)?,
            encode(EntityKind::Keyword, &self.keywords)?,
            encode(EntityKind::Note, &self.notes)?,
            encode(EntityKind::Usage, &self.usages)?,
            encode(EntityKind::EntryCollection, &self.entry_collections)?,
        ])
    }

    /// Reassembles a snapshot from stored rows. Kinds without a row are
    /// empty.
    pub(crate) fn decode_tables(
        format_version: u32,
        tables: Vec<EncodedTable>,
    ) -> SnapshotResult<Self> {
        let mut snapshot = Snapshot {
            format_version,
            ..Snapshot::default()
        };
        for table in tables {
            match table.kind {
                EntityKind::Entry => snapshot.entries = decode(&table)?,
                EntityKind::Language => snapshot.languages = decode(&table)?,
                EntityKind::Keyword => snapshot.keywords = decode(&table)?,
                EntityKind::Note => snapshot.notes = decode(&table)?,
                EntityKind::Usage => snapshot.usages = decode(&table)?,
                EntityKind::EntryCollection => snapshot.entry_collections = decode(&table)?,
            }
        }
        Ok(snapshot)
    }
}

fn encode<I, R, L>(kind: EntityKind, table: &TableSnapshot<I, R, L>) -> SnapshotResult<EncodedTable>
where
    I: Serialize,
    R: Serialize,
    L: Serialize,
{
    Ok(EncodedTable {
        kind,
        records: serde_json::to_string(&table.records).map_err(SnapshotError::Encode)?,
        relationships: serde_json::to_string(&table.relationships)
            .map_err(SnapshotError::Encode)?,
    })
}

fn decode<I, R, L>(table: &EncodedTable) -> SnapshotResult<TableSnapshot<I, R, L>>
where
    I: DeserializeOwned,
    R: DeserializeOwned,
    L: DeserializeOwned,
{
    Ok(TableSnapshot {
        records: serde_json::from_str(&table.records).map_err(SnapshotError::Decode)?,
        relationships: serde_json::from_str(&table.relationships)
            .map_err(SnapshotError::Decode)?,
    })
}
