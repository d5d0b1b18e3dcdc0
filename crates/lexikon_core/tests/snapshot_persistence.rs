use lexikon_core::snapshot::RelationshipRow;
use lexikon_core::{
    load_database, open_db, open_db_in_memory, save_database, Database, Direction, EntityKind,
    EntryId, NewEntry, NoteTarget, SequentialIds, Snapshot, SnapshotError, SnapshotRepository,
    SqliteSnapshotRepository, StoreOptions, SNAPSHOT_FORMAT_VERSION,
};
use rusqlite::Connection;

const NOW: i64 = 1_700_000_000_000;

fn sample_database() -> (Database, EntryId) {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let english = db.ensure_language("en", NOW).unwrap();
    let german = db.ensure_language("de-de", NOW).unwrap();
    let water = db
        .new_entry(NewEntry::spelled("water"), Some(&english), NOW, &mut ids)
        .unwrap();
    let wasser = db
        .new_entry(NewEntry::spelled("Wasser"), Some(&german), NOW + 1, &mut ids)
        .unwrap();
    let aqua = db
        .new_entry(NewEntry::spelled("aqua"), None, NOW + 2, &mut ids)
        .unwrap();
    db.connect_translation(wasser, water, Direction::Bidirectional)
        .unwrap();
    db.connect_root(aqua, water).unwrap();
    db.connect_see_also(water, aqua, Direction::Unidirectional)
        .unwrap();
    let usage = db
        .new_usage(water, "A glass of water.", NOW, &mut ids)
        .unwrap();
    db.connect_usage_language(usage, &english).unwrap();
    db.new_note(NoteTarget::Usage(usage), "countable here", NOW, &mut ids)
        .unwrap();
    db.new_note(NoteTarget::Entry(water), "H2O", NOW, &mut ids)
        .unwrap();
    db.new_keyword("liquids", Some(water), NOW, &mut ids)
        .unwrap();
    db.new_entry_collection(
        "elements",
        Some("classical elements".to_string()),
        Some(water),
        NOW,
        &mut ids,
    )
    .unwrap();

    let mut renamed = db.entry(aqua).unwrap().clone();
    renamed.alternate_spellings.push("aqua-".to_string());
    db.update_entry(renamed, NOW + 10).unwrap();
    (db, water)
}

#[test]
fn json_round_trip_restores_identical_store() {
    let (db, water) = sample_database();
    let json = db.snapshot().to_json().unwrap();

    let snapshot = Snapshot::from_json(&json).unwrap();
    let restored = Database::from_snapshot(snapshot, StoreOptions::default()).unwrap();
    assert_eq!(restored.snapshot(), db.snapshot());
    assert_eq!(restored.entry_aggregate(water), db.entry_aggregate(water));
    assert!(restored.integrity_violations().is_empty());
}

#[test]
fn json_layout_groups_records_and_relationships_per_kind() {
    let (db, _) = sample_database();
    let json = db.snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["format_version"], SNAPSHOT_FORMAT_VERSION);
    assert_eq!(value["entries"]["records"].as_array().unwrap().len(), 3);
    assert_eq!(value["languages"]["records"][1]["id"], "de-DE");
    let first_row = &value["entries"]["relationships"][0];
    assert!(first_row["id"].is_string());
    assert!(first_row["links"]["translations"].is_array());
    assert_eq!(
        value["entry_collections"]["records"][0]["description"],
        "classical elements"
    );
}

#[test]
fn missing_kinds_decode_as_empty_tables() {
    let snapshot = Snapshot::from_json(r#"{"format_version":1}"#).unwrap();
    assert!(snapshot.is_empty());

    let db = Database::from_snapshot(snapshot, StoreOptions::default()).unwrap();
    assert!(db.is_empty());
}

#[test]
fn sqlite_save_and_load_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexikon.db");
    let (db, _) = sample_database();

    {
        let mut conn = open_db(&path).unwrap();
        let mut repo = SqliteSnapshotRepository::try_new(&mut conn).unwrap();
        save_database(&mut repo, &db, NOW + 99).unwrap();
        assert_eq!(repo.last_saved_at().unwrap(), Some(NOW + 99));
    }

    let mut conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&mut conn).unwrap();
    let loaded = load_database(&repo, StoreOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(loaded.snapshot(), db.snapshot());
    for kind in EntityKind::ALL {
        assert_eq!(loaded.len(kind), db.len(kind), "kind={kind}");
    }
}

#[test]
fn saving_again_replaces_previous_snapshot() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteSnapshotRepository::try_new(&mut conn).unwrap();
    let (mut db, water) = sample_database();
    save_database(&mut repo, &db, NOW).unwrap();

    db.delete_entry(water).unwrap();
    save_database(&mut repo, &db, NOW + 1).unwrap();

    let stored = repo.load_snapshot().unwrap().unwrap();
    assert_eq!(stored.len(EntityKind::Entry), 2);
    assert_eq!(stored, db.snapshot());
    assert_eq!(repo.last_saved_at().unwrap(), Some(NOW + 1));
}

#[test]
fn fresh_database_has_no_snapshot() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&mut conn).unwrap();

    assert!(repo.load_snapshot().unwrap().is_none());
    assert!(repo.last_saved_at().unwrap().is_none());
    assert!(load_database(&repo, StoreOptions::default())
        .unwrap()
        .is_none());
}

#[test]
fn unmigrated_connection_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();
    match SqliteSnapshotRepository::try_new(&mut conn) {
        Err(SnapshotError::MissingRequiredTable(table)) => assert_eq!(table, "snapshot_tables"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected missing table error"),
    }
}

#[test]
fn corrupted_table_row_fails_to_decode() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteSnapshotRepository::try_new(&mut conn).unwrap();
        let (db, _) = sample_database();
        save_database(&mut repo, &db, NOW).unwrap();
    }
    conn.execute(
        "UPDATE snapshot_tables SET records = 'not json' WHERE kind = 'keyword';",
        [],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::try_new(&mut conn).unwrap();
    assert!(matches!(
        repo.load_snapshot(),
        Err(SnapshotError::Decode(_))
    ));
}

#[test]
fn restore_rejects_dangling_links() {
    let (db, water) = sample_database();
    let mut snapshot = db.snapshot();
    let ghost = EntryId::from_uuid(uuid::Uuid::from_u128(777));
    let row = snapshot
        .entries
        .relationships
        .iter_mut()
        .find(|row| row.id == water)
        .unwrap();
    row.links.see_also.push(ghost);

    assert!(matches!(
        Database::from_snapshot(snapshot, StoreOptions::default()),
        Err(SnapshotError::InvalidData(_))
    ));
}

#[test]
fn restore_rejects_unmirrored_links() {
    let (db, water) = sample_database();
    let mut snapshot = db.snapshot();
    let row = snapshot
        .entries
        .relationships
        .iter_mut()
        .find(|row| row.id == water)
        .unwrap();
    row.links.back_translations.clear();

    assert!(matches!(
        Database::from_snapshot(snapshot, StoreOptions::default()),
        Err(SnapshotError::InvalidData(_))
    ));
}

#[test]
fn restore_rejects_duplicate_ids_and_foreign_rows() {
    let (db, _) = sample_database();

    let mut duplicated = db.snapshot();
    let copy = duplicated.keywords.records[0].clone();
    duplicated.keywords.records.push(copy);
    assert!(matches!(
        Database::from_snapshot(duplicated, StoreOptions::default()),
        Err(SnapshotError::InvalidData(_))
    ));

    let mut foreign = db.snapshot();
    foreign.entries.relationships.push(RelationshipRow {
        id: EntryId::from_uuid(uuid::Uuid::from_u128(555)),
        links: Default::default(),
    });
    assert!(matches!(
        Database::from_snapshot(foreign, StoreOptions::default()),
        Err(SnapshotError::InvalidData(_))
    ));
}

#[test]
fn restore_rejects_unknown_format_and_blank_records() {
    let (db, _) = sample_database();

    let mut future = db.snapshot();
    future.format_version = SNAPSHOT_FORMAT_VERSION + 1;
    assert!(matches!(
        Database::from_snapshot(future, StoreOptions::default()),
        Err(SnapshotError::InvalidData(_))
    ));

    let mut blank = db.snapshot();
    blank.usages.records[0].value = "  ".to_string();
    assert!(matches!(
        Database::from_snapshot(blank, StoreOptions::default()),
        Err(SnapshotError::Store(_))
    ));

    let mut unnamed = db.snapshot();
    unnamed.entries.records[0].spelling = String::new();
    assert!(matches!(
        Database::from_snapshot(unnamed, StoreOptions::default()),
        Err(SnapshotError::Store(_))
    ));

    let mut empty_note = db.snapshot();
    empty_note.notes.records[0].value = String::new();
    assert!(Database::from_snapshot(empty_note, StoreOptions::default()).is_ok());
}
