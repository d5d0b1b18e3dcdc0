//! Rebuilding a `Database` from a snapshot.

use super::{Snapshot, SnapshotError, SnapshotResult, TableSnapshot, SNAPSHOT_FORMAT_VERSION};
use crate::model::entity::{EntityKind, ValidationError};
use crate::store::{Database, StoreOptions, Table};
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

impl Database {
    /// Restores a store captured with `Database::snapshot`.
    ///
    /// Records keep their stored metadata. Every record is re-validated and
    /// the result is audited for referential integrity and reciprocity.
    ///
    /// # Errors
    /// - `InvalidData` for an unknown format version, duplicate ids,
    ///   relationship rows without a record, or integrity violations.
    /// - `Store(Validation)` for a record with a blank required field.
    pub fn from_snapshot(snapshot: Snapshot, options: StoreOptions) -> SnapshotResult<Self> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(invalid(format!(
                "unsupported format version {} (expected {SNAPSHOT_FORMAT_VERSION})",
                snapshot.format_version
            )));
        }

        let mut db = Database::with_options(options);
        load_table(
            EntityKind::Entry,
            snapshot.entries,
            &mut db.entries,
            &mut db.entry_links,
            |entry| entry.id,
            |entry| entry.validate(),
        )?;
        load_table(
            EntityKind::Language,
            snapshot.languages,
            &mut db.languages,
            &mut db.language_links,
            |language| language.id.clone(),
            |_| Ok(()),
        )?;
        load_table(
            EntityKind::Keyword,
            snapshot.keywords,
            &mut db.keywords,
            &mut db.keyword_links,
            |keyword| keyword.id,
            |keyword| keyword.validate(),
        )?;
        load_table(
            EntityKind::Note,
            snapshot.notes,
            &mut db.notes,
            &mut db.note_links,
            |note| note.id,
            |note| note.validate(),
        )?;
        load_table(
            EntityKind::Usage,
            snapshot.usages,
            &mut db.usages,
            &mut db.usage_links,
            |usage| usage.id,
            |usage| usage.validate(),
        )?;
        load_table(
            EntityKind::EntryCollection,
            snapshot.entry_collections,
            &mut db.entry_collections,
            &mut db.entry_collection_links,
            |collection| collection.id,
            |collection| collection.validate(),
        )?;

        let violations = db.integrity_violations();
        if let Some(first) = violations.first() {
            warn!(
                "event=snapshot_restore module=snapshot status=error error_code=integrity violations={}",
                violations.len()
            );
            return Err(invalid(format!(
                "{first} ({} violation(s) in total)",
                violations.len()
            )));
        }

        info!(
            "event=snapshot_restore module=snapshot status=ok entries={} languages={} keywords={} notes={} usages={} collections={}",
            db.len(EntityKind::Entry),
            db.len(EntityKind::Language),
            db.len(EntityKind::Keyword),
            db.len(EntityKind::Note),
            db.len(EntityKind::Usage),
            db.len(EntityKind::EntryCollection),
        );
        Ok(db)
    }
}

fn load_table<I, R, L>(
    kind: EntityKind,
    snapshot: TableSnapshot<I, R, L>,
    table: &mut Table<I, R>,
    links: &mut HashMap<I, L>,
    id_of: impl Fn(&R) -> I,
    validate: impl Fn(&R) -> Result<(), ValidationError>,
) -> SnapshotResult<()>
where
    I: Clone + Eq + Hash + Display,
    L: Default,
{
    for record in snapshot.records {
        validate(&record)?;
        let id = id_of(&record);
        if !table.insert_new(id.clone(), record) {
            return Err(invalid(format!("duplicate {kind} id {id}")));
        }
        links.insert(id, L::default());
    }

    let mut seen = HashSet::new();
    for row in snapshot.relationships {
        if !table.contains(&row.id) {
            return Err(invalid(format!("relationships for unknown {kind} {}", row.id)));
        }
        if !seen.insert(row.id.clone()) {
            return Err(invalid(format!("duplicate relationships for {kind} {}", row.id)));
        }
        links.insert(row.id, row.links);
    }
    Ok(())
}

fn invalid(details: String) -> SnapshotError {
    SnapshotError::InvalidData(details)
}
