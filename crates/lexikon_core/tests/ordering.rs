use lexikon_core::{
    Database, Direction, EntryCollectionId, EntryId, NewEntry, OrderedList, SequentialIds,
};

const NOW: i64 = 1_700_000_000_000;

fn entries(db: &mut Database, ids: &mut SequentialIds, spellings: &[&str]) -> Vec<EntryId> {
    spellings
        .iter()
        .map(|spelling| {
            db.new_entry(NewEntry::spelled(*spelling), None, NOW, ids)
                .unwrap()
        })
        .collect()
}

fn collection_of_four() -> (Database, EntryCollectionId, Vec<EntryId>) {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let collection = db
        .new_entry_collection("letters", None, None, NOW, &mut ids)
        .unwrap();
    let members = entries(&mut db, &mut ids, &["a", "b", "c", "d"]);
    for member in &members {
        db.connect_entry_collection(*member, collection).unwrap();
    }
    (db, collection, members)
}

#[test]
fn collection_membership_keeps_insertion_order_through_removals() {
    let (mut db, collection, members) = collection_of_four();
    let [a, b, c, d] = [members[0], members[1], members[2], members[3]];
    assert_eq!(db.entries_of_collection(collection), &[a, b, c, d]);

    db.disconnect_entry_collection(a, collection);
    assert_eq!(db.entries_of_collection(collection), &[b, c, d]);

    db.disconnect_entry_collection(c, collection);
    assert_eq!(db.entries_of_collection(collection), &[b, d]);

    db.disconnect_entry_collection(c, collection);
    assert_eq!(db.entries_of_collection(collection), &[b, d]);
}

#[test]
fn move_uses_destination_index_before_removal() {
    let (mut db, collection, members) = collection_of_four();
    let [a, b, c, d] = [members[0], members[1], members[2], members[3]];

    db.move_items(OrderedList::CollectionEntries(collection), &[0], 3);
    assert_eq!(db.entries_of_collection(collection), &[b, c, a, d]);

    db.move_items(OrderedList::CollectionEntries(collection), &[3], 0);
    assert_eq!(db.entries_of_collection(collection), &[d, b, c, a]);

    db.move_items(OrderedList::CollectionEntries(collection), &[0, 2], 4);
    assert_eq!(db.entries_of_collection(collection), &[b, a, d, c]);
}

#[test]
fn move_reorders_translations_and_keyword_matches() {
    let mut db = Database::new();
    let mut ids = SequentialIds::new();
    let words = entries(&mut db, &mut ids, &["dog", "Hund", "chien", "perro"]);
    let [dog, hund, chien, perro] = [words[0], words[1], words[2], words[3]];
    for translation in [hund, chien, perro] {
        db.connect_translation(translation, dog, Direction::Bidirectional)
            .unwrap();
    }

    db.move_items(OrderedList::EntryTranslations(dog), &[2], 0);
    assert_eq!(db.translations_of(dog), &[perro, hund, chien]);

    let animals = db.new_keyword("animal", None, NOW, &mut ids).unwrap();
    for word in [dog, hund, chien] {
        db.connect_keyword(animals, word).unwrap();
    }
    db.move_items(OrderedList::KeywordMatches(animals), &[0], 2);
    assert_eq!(db.matches_of_keyword(animals), &[hund, dog, chien]);
    assert!(db.integrity_violations().is_empty());
}

#[test]
fn move_on_missing_owner_or_bad_offsets_is_a_noop() {
    let (mut db, collection, members) = collection_of_four();
    let absent = EntryCollectionId::from_uuid(uuid::Uuid::from_u128(4242));

    db.move_items(OrderedList::CollectionEntries(absent), &[0], 1);
    db.move_items(OrderedList::CollectionEntries(collection), &[17], 0);
    db.move_items(OrderedList::CollectionEntries(collection), &[], 2);
    assert_eq!(db.entries_of_collection(collection), members.as_slice());
}

#[test]
fn every_move_is_a_permutation_of_the_list() {
    let (mut db, collection, members) = collection_of_four();
    let mut expected = members.clone();
    expected.sort();

    for mask in 0u32..16 {
        let from: Vec<usize> = (0..4).filter(|bit| mask & (1 << bit) != 0).collect();
        for to in 0..=4 {
            db.move_items(OrderedList::CollectionEntries(collection), &from, to);
            let mut current = db.entries_of_collection(collection).to_vec();
            assert_eq!(current.len(), 4);
            current.sort();
            assert_eq!(current, expected, "from={from:?} to={to}");
        }
    }
}
