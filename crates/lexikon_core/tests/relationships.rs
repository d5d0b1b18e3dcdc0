use lexikon_core::{
    Database, Direction, EntityRef, EntryId, KeywordId, LanguageId, NewEntry, NoteTarget,
    SequentialIds, StoreError,
};

const NOW: i64 = 1_700_000_000_000;

fn entry(db: &mut Database, ids: &mut SequentialIds, spelling: &str) -> EntryId {
    db.new_entry(NewEntry::spelled(spelling), None, NOW, ids)
        .unwrap()
}

#[test]
fn root_connect_and_disconnect_updates_both_sides() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let root = entry(&mut db, &mut ids, "root_spelling");
    let derived = entry(&mut db, &mut ids, "derived_spelling");

    db.connect_root(root, derived).unwrap();
    assert_eq!(db.roots_of(derived), &[root]);
    assert_eq!(db.derived_of(root), vec![derived]);
    assert!(db.roots_of(root).is_empty());
    assert!(db.derived_of(derived).is_empty());

    db.disconnect_root(root, derived);
    assert!(db.roots_of(derived).is_empty());
    assert!(db.derived_of(root).is_empty());
    assert!(db.roots_of(root).is_empty());
    assert!(db.derived_of(derived).is_empty());
    assert!(db.integrity_violations().is_empty());
}

#[test]
fn bidirectional_translation_is_mirrored_in_back_translations() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let house = entry(&mut db, &mut ids, "house");
    let haus = entry(&mut db, &mut ids, "Haus");

    db.connect_translation(haus, house, Direction::Bidirectional)
        .unwrap();
    assert_eq!(db.translations_of(house), &[haus]);
    assert_eq!(db.translations_of(haus), &[house]);
    assert_eq!(db.back_translations_of(house), vec![haus]);
    assert_eq!(db.back_translations_of(haus), vec![house]);
    assert!(db.integrity_violations().is_empty());

    db.disconnect_translation(haus, house, Direction::Bidirectional);
    assert!(db.translations_of(house).is_empty());
    assert!(db.translations_of(haus).is_empty());
    assert!(db.back_translations_of(house).is_empty());
    assert!(db.back_translations_of(haus).is_empty());
}

#[test]
fn unidirectional_translation_writes_one_edge_and_its_mirror() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let house = entry(&mut db, &mut ids, "house");
    let haus = entry(&mut db, &mut ids, "Haus");

    db.connect_translation(haus, house, Direction::Unidirectional)
        .unwrap();
    assert_eq!(db.translations_of(house), &[haus]);
    assert!(db.translations_of(haus).is_empty());
    assert_eq!(db.back_translations_of(haus), vec![house]);
    assert!(db.back_translations_of(house).is_empty());
    assert!(db.integrity_violations().is_empty());
}

#[test]
fn see_also_disconnect_removes_both_directions() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let big = entry(&mut db, &mut ids, "big");
    let large = entry(&mut db, &mut ids, "large");
    let huge = entry(&mut db, &mut ids, "huge");

    db.connect_see_also(big, large, Direction::Bidirectional)
        .unwrap();
    db.connect_see_also(big, huge, Direction::Bidirectional)
        .unwrap();
    assert_eq!(db.see_also_of(big), &[large, huge]);
    assert_eq!(db.see_also_of(large), &[big]);

    db.disconnect_see_also(big, large, Direction::Bidirectional);
    assert_eq!(db.see_also_of(big), &[huge]);
    assert!(db.see_also_of(large).is_empty());
    assert_eq!(db.see_also_of(huge), &[big]);

    db.connect_see_also(large, huge, Direction::Unidirectional)
        .unwrap();
    assert_eq!(db.see_also_of(large), &[huge]);
    assert_eq!(db.see_also_of(huge), &[big]);
    assert!(db.integrity_violations().is_empty());
}

#[test]
fn reconnect_after_disconnect_starts_clean_and_redisconnect_is_noop() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let word = entry(&mut db, &mut ids, "word");
    let english = db.ensure_language("en", NOW).unwrap();

    db.connect_language(word, &english).unwrap();
    db.disconnect_language(word, &english);
    db.disconnect_language(word, &english);
    assert!(db.languages_of_entry(word).is_empty());
    assert!(db.entries_of_language(&english).is_empty());

    db.connect_language(word, &english).unwrap();
    db.connect_language(word, &english).unwrap();
    assert_eq!(db.languages_of_entry(word), &[english.clone()]);
    assert_eq!(db.entries_of_language(&english), vec![word]);
}

#[test]
fn connect_rejects_missing_endpoint_without_writing() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let word = entry(&mut db, &mut ids, "word");
    let french = LanguageId::parse("fr").unwrap();

    let err = db.connect_language(word, &french).unwrap_err();
    assert_eq!(err, StoreError::NotFound(EntityRef::Language(french.clone())));
    assert!(db.languages_of_entry(word).is_empty());
    assert!(db.language_relationships(&french).is_none());

    let ghost = KeywordId::from_uuid(uuid_from(999));
    assert!(matches!(
        db.connect_keyword(ghost, word),
        Err(StoreError::NotFound(EntityRef::Keyword(_)))
    ));
    assert!(db.keywords_of_entry(word).is_empty());
}

#[test]
fn self_links_are_ignored() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let word = entry(&mut db, &mut ids, "word");

    db.connect_root(word, word).unwrap();
    db.connect_translation(word, word, Direction::Bidirectional)
        .unwrap();
    db.connect_see_also(word, word, Direction::Bidirectional)
        .unwrap();
    assert!(db.entry_relationships(word).unwrap().is_empty());
}

#[test]
fn keyword_usage_and_collection_links_are_reciprocal() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let run = entry(&mut db, &mut ids, "run");
    let sprint = entry(&mut db, &mut ids, "sprint");
    let english = db.ensure_language("en", NOW).unwrap();

    let motion = db.new_keyword("motion", Some(run), NOW, &mut ids).unwrap();
    db.connect_keyword(motion, sprint).unwrap();
    assert_eq!(db.matches_of_keyword(motion), &[run, sprint]);
    assert_eq!(db.keywords_of_entry(sprint), vec![motion]);

    let usage = db
        .new_usage(run, "I run every morning.", NOW, &mut ids)
        .unwrap();
    db.connect_usage(usage, sprint).unwrap();
    db.connect_usage_language(usage, &english).unwrap();
    assert_eq!(db.usages_of_entry(run), &[usage]);
    assert_eq!(db.uses_of_usage(usage), {
        let mut expected = vec![run, sprint];
        expected.sort();
        expected
    });
    assert_eq!(db.languages_of_usage(usage), &[english.clone()]);
    assert_eq!(db.usages_of_language(&english), vec![usage]);

    let verbs = db
        .new_entry_collection("verbs", None, Some(run), NOW, &mut ids)
        .unwrap();
    db.connect_entry_collection(sprint, verbs).unwrap();
    assert_eq!(db.entries_of_collection(verbs), &[run, sprint]);
    assert_eq!(db.collections_of_entry(sprint), vec![verbs]);

    db.disconnect_keyword(motion, run);
    db.disconnect_usage(usage, sprint);
    db.disconnect_usage_language(usage, &english);
    db.disconnect_entry_collection(run, verbs);
    assert_eq!(db.matches_of_keyword(motion), &[sprint]);
    assert!(db.keywords_of_entry(run).is_empty());
    assert_eq!(db.uses_of_usage(usage), vec![run]);
    assert!(db.usages_of_entry(sprint).is_empty());
    assert!(db.usages_of_language(&english).is_empty());
    assert_eq!(db.entries_of_collection(verbs), &[sprint]);
    assert!(db.integrity_violations().is_empty());
}

#[test]
fn attaching_a_note_elsewhere_moves_it() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let word = entry(&mut db, &mut ids, "word");
    let usage = db.new_usage(word, "A word.", NOW, &mut ids).unwrap();
    let note = db
        .new_note(NoteTarget::Entry(word), "check etymology", NOW, &mut ids)
        .unwrap();
    assert_eq!(db.notes_of_entry(word), &[note]);
    assert_eq!(db.target_of_note(note), Some(NoteTarget::Entry(word)));

    db.connect_note(note, NoteTarget::Usage(usage)).unwrap();
    assert!(db.notes_of_entry(word).is_empty());
    assert_eq!(db.notes_of_usage(usage), &[note]);
    assert_eq!(db.target_of_note(note), Some(NoteTarget::Usage(usage)));

    db.disconnect_note(note, NoteTarget::Usage(usage));
    assert!(db.notes_of_usage(usage).is_empty());
    assert_eq!(db.target_of_note(note), None);
    assert!(db.integrity_violations().is_empty());
}

fn uuid_from(value: u128) -> uuid::Uuid {
    uuid::Uuid::from_u128(value)
}
