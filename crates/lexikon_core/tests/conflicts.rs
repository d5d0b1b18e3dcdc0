use lexikon_core::{
    Database, DuplicatePolicy, EntityKind, EntityRef, EntryCollectionId, EntryId, FixedClock,
    KeywordId, LanguageId, LexiconService, NewEntry, Outcome, SequentialIds, StoreError,
    StoreOptions, ValidationError,
};
use uuid::Uuid;

const NOW: i64 = 1_700_000_000_000;

struct Fixture {
    db: Database,
    ids: SequentialIds,
    clock: FixedClock,
    english: LanguageId,
    german: LanguageId,
}

impl Fixture {
    fn new() -> Self {
        let mut db = Database::new();
        let english = db.ensure_language("en", NOW).unwrap();
        let german = db.ensure_language("de", NOW).unwrap();
        Self {
            db,
            ids: SequentialIds::new(),
            clock: FixedClock::at(NOW),
            english,
            german,
        }
    }

    fn entry(&mut self, spelling: &str) -> EntryId {
        self.db
            .new_entry(
                NewEntry::spelled(spelling),
                Some(&self.english),
                NOW,
                &mut self.ids,
            )
            .unwrap()
    }

    fn service(&mut self) -> LexiconService<'_, &FixedClock, &mut SequentialIds> {
        LexiconService::new(&mut self.db, &self.clock, &mut self.ids)
    }
}

#[test]
fn rename_to_taken_spelling_reports_conflict_and_keeps_old_value() {
    let mut fx = Fixture::new();
    let first = fx.entry("first_entry");
    let second = fx.entry("second_entry");

    let outcome = fx.service().rename_entry(first, "second_entry").unwrap();
    match outcome {
        Outcome::Conflicts(conflicts) => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].id, second);
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(fx.db.entry(first).unwrap().spelling, "first_entry");
}

#[test]
fn rename_to_own_spelling_or_fresh_spelling_succeeds() {
    let mut fx = Fixture::new();
    let word = fx.entry("colour");
    fx.clock.set(NOW + 500);

    let same = fx.service().rename_entry(word, "colour").unwrap();
    assert!(same.is_success());

    let renamed = fx
        .service()
        .rename_entry(word, "color")
        .unwrap()
        .success()
        .unwrap();
    assert_eq!(renamed.spelling, "color");
    assert_eq!(renamed.metadata.added, NOW);
    assert_eq!(renamed.metadata.modified, NOW + 500);
}

#[test]
fn add_entry_without_matches_creates_and_links_language() {
    let mut fx = Fixture::new();
    let english = fx.english.clone();

    let created = fx
        .service()
        .add_entry("apple", &english, None)
        .unwrap()
        .success()
        .unwrap();
    assert_eq!(created.spelling, "apple");
    assert_eq!(created.metadata.added, NOW);
    assert_eq!(fx.db.languages_of_entry(created.id), &[english]);
}

#[test]
fn add_entry_with_match_follows_policy() {
    let mut fx = Fixture::new();
    let existing = fx.entry("Gift");
    let german = fx.german.clone();

    let conflict = fx.service().add_entry("Gift", &german, None).unwrap();
    assert_eq!(conflict.conflicts().len(), 1);
    assert_eq!(conflict.conflicts()[0].id, existing);
    assert_eq!(fx.db.len(EntityKind::Entry), 1);

    let canceled = fx
        .service()
        .add_entry("Gift", &german, Some(DuplicatePolicy::Cancel))
        .unwrap();
    assert_eq!(canceled, Outcome::Canceled);
    assert_eq!(fx.db.len(EntityKind::Entry), 1);

    let merged = fx
        .service()
        .add_entry("Gift", &german, Some(DuplicatePolicy::MergeWithFirstMatch))
        .unwrap()
        .success()
        .unwrap();
    assert_eq!(merged.id, existing);
    assert_eq!(fx.db.len(EntityKind::Entry), 1);
    assert_eq!(
        fx.db.languages_of_entry(existing),
        &[fx.english.clone(), german.clone()]
    );

    let distinct = fx
        .service()
        .add_entry("Gift", &german, Some(DuplicatePolicy::MaintainDistinction))
        .unwrap()
        .success()
        .unwrap();
    assert_ne!(distinct.id, existing);
    assert_eq!(fx.db.find_entries_by_spelling("Gift").len(), 2);
}

#[test]
fn spelling_match_is_case_sensitive() {
    let mut fx = Fixture::new();
    fx.entry("gift");
    let german = fx.german.clone();

    let outcome = fx.service().add_entry("Gift", &german, None).unwrap();
    assert!(outcome.is_success());
    assert_eq!(fx.db.len(EntityKind::Entry), 2);
}

#[test]
fn add_translation_links_new_or_merged_entry_both_ways() {
    let mut fx = Fixture::new();
    let house = fx.entry("house");
    let german = fx.german.clone();

    let haus = fx
        .service()
        .add_translation(house, "Haus", &german, None)
        .unwrap()
        .success()
        .unwrap();
    assert_eq!(fx.db.translations_of(house), &[haus.id]);
    assert_eq!(fx.db.translations_of(haus.id), &[house]);

    let building = fx.entry("building");
    let merged = fx
        .service()
        .add_translation(
            building,
            "Haus",
            &german,
            Some(DuplicatePolicy::MergeWithFirstMatch),
        )
        .unwrap()
        .success()
        .unwrap();
    assert_eq!(merged.id, haus.id);
    assert_eq!(fx.db.translations_of(haus.id), &[house, building]);
    assert!(fx.db.integrity_violations().is_empty());
}

#[test]
fn add_translation_never_offers_the_source_entry_as_a_match() {
    let mut fx = Fixture::new();
    let okay = fx.entry("okay");
    let german = fx.german.clone();

    let outcome = fx
        .service()
        .add_translation(okay, "okay", &german, None)
        .unwrap();
    let translated = outcome.success().unwrap();
    assert_ne!(translated.id, okay);
    assert_eq!(fx.db.translations_of(okay), &[translated.id]);
}

#[test]
fn add_root_connects_result_as_root() {
    let mut fx = Fixture::new();
    let singer = fx.entry("singer");
    let english = fx.english.clone();

    let conflict_free = fx
        .service()
        .add_root(singer, "sing", &english, None)
        .unwrap()
        .success()
        .unwrap();
    assert_eq!(fx.db.roots_of(singer), &[conflict_free.id]);
    assert_eq!(fx.db.derived_of(conflict_free.id), vec![singer]);

    let singing = fx.entry("singing");
    let outcome = fx
        .service()
        .add_root(singing, "sing", &english, None)
        .unwrap();
    assert_eq!(outcome.conflicts().len(), 1);
    assert!(fx.db.roots_of(singing).is_empty());
}

#[test]
fn retitle_keyword_and_collection_detect_duplicates() {
    let mut fx = Fixture::new();
    let word = fx.entry("word");
    let grammar = fx
        .db
        .new_keyword("grammar", Some(word), NOW, &mut fx.ids)
        .unwrap();
    let syntax = fx.db.new_keyword("syntax", None, NOW, &mut fx.ids).unwrap();
    let nouns = fx
        .db
        .new_entry_collection("nouns", None, None, NOW, &mut fx.ids)
        .unwrap();
    let verbs = fx
        .db
        .new_entry_collection("verbs", None, None, NOW, &mut fx.ids)
        .unwrap();
    fx.clock.advance(1_000);

    let clash = fx.service().retitle_keyword(syntax, "grammar").unwrap();
    assert_eq!(clash.conflicts()[0].id, grammar);
    assert_eq!(fx.db.keyword(syntax).unwrap().title, "syntax");

    let retitled = fx
        .service()
        .retitle_keyword(syntax, "morphology")
        .unwrap()
        .success()
        .unwrap();
    assert_eq!(retitled.title, "morphology");
    assert_eq!(retitled.metadata.modified, NOW + 1_000);

    let clash = fx.service().retitle_collection(verbs, "nouns").unwrap();
    assert_eq!(clash.conflicts()[0].id, nouns);
    let renamed = fx
        .service()
        .retitle_collection(verbs, "actions")
        .unwrap()
        .success()
        .unwrap();
    assert_eq!(fx.db.entry_collection(verbs).unwrap().title, renamed.title);
}

#[test]
fn attach_keyword_by_title_reuses_existing_keyword() {
    let mut fx = Fixture::new();
    let cat = fx.entry("cat");
    let dog = fx.entry("dog");

    let first = fx.service().attach_keyword_by_title(cat, "pets").unwrap();
    let second = fx.service().attach_keyword_by_title(dog, "pets").unwrap();
    assert_eq!(first, second);
    assert_eq!(fx.db.len(EntityKind::Keyword), 1);
    assert_eq!(fx.db.matches_of_keyword(first), &[cat, dog]);
}

#[test]
fn structural_faults_are_errors_not_outcomes() {
    let mut fx = Fixture::new();
    let word = fx.entry("word");
    let english = fx.english.clone();
    let french = LanguageId::parse("fr").unwrap();

    let blank = fx.service().add_entry("   ", &english, None).unwrap_err();
    assert_eq!(
        blank,
        StoreError::Validation(ValidationError::EmptyField {
            kind: EntityKind::Entry,
            field: "spelling",
        })
    );

    let missing_language = fx.service().add_entry("mot", &french, None).unwrap_err();
    assert_eq!(missing_language, StoreError::NotFound(EntityRef::Language(french)));

    fx.db.delete_entry(word).unwrap();
    let missing_source = fx
        .service()
        .add_translation(word, "Wort", &english, None)
        .unwrap_err();
    assert_eq!(missing_source, StoreError::NotFound(EntityRef::Entry(word)));
    assert_eq!(fx.db.len(EntityKind::Entry), 0);
}

#[test]
fn renames_of_missing_records_follow_missing_entity_policy() {
    let ghost_entry = EntryId::from_uuid(Uuid::from_u128(404));
    let ghost_keyword = KeywordId::from_uuid(Uuid::from_u128(405));
    let ghost_collection = EntryCollectionId::from_uuid(Uuid::from_u128(406));
    let clock = FixedClock::at(NOW);
    let mut ids = SequentialIds::new();

    let mut strict = Database::new();
    let mut service = LexiconService::new(&mut strict, &clock, &mut ids);
    assert_eq!(
        service.rename_entry(ghost_entry, "x").unwrap_err(),
        StoreError::NotFound(EntityRef::Entry(ghost_entry))
    );
    assert_eq!(
        service.retitle_keyword(ghost_keyword, "x").unwrap_err(),
        StoreError::NotFound(EntityRef::Keyword(ghost_keyword))
    );

    let mut tolerant = Database::with_options(StoreOptions::tolerant());
    let mut service = LexiconService::new(&mut tolerant, &clock, &mut ids);
    assert_eq!(service.rename_entry(ghost_entry, "x").unwrap(), Outcome::Canceled);
    assert_eq!(service.retitle_keyword(ghost_keyword, "x").unwrap(), Outcome::Canceled);
    assert_eq!(service.retitle_collection(ghost_collection, "x").unwrap(), Outcome::Canceled);
    assert!(tolerant.is_empty());
}
