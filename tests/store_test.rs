mod common;

use common::create_test_store;
use histoquest::content::store::ContentStore;
use histoquest::names;

#[test]
fn fresh_start_saves_and_serves_the_defaults() {
    let (store, dir) = create_test_store();

    let catalog = store.load();
    assert_eq!(catalog, ContentStore::default_catalog());
    assert!(
        dir.join(names::STORAGE_KEY_CURRENT).exists(),
        "a fresh start writes the current record"
    );

    assert_eq!(store.load(), catalog, "a second load is identical");
}

#[test]
fn save_then_load_round_trips_edits() {
    let (store, _dir) = create_test_store();

    let mut catalog = store.load();
    catalog[0].title = "Bewerkt thema".to_string();
    catalog[0].lessons[0].check_question_1.correct_answer = 2;
    store.save(&catalog);

    assert_eq!(store.load(), catalog);
}

#[test]
fn corrupt_record_falls_back_without_overwriting() {
    let (store, dir) = create_test_store();
    let path = dir.join(names::STORAGE_KEY_CURRENT);
    std::fs::write(&path, "{ dit is geen json").unwrap();

    assert_eq!(store.load(), ContentStore::default_catalog());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{ dit is geen json",
        "the broken record is kept for inspection"
    );
}

#[test]
fn v2_record_is_migrated_and_left_in_place() {
    let (store, dir) = create_test_store();

    // Old-style record: an edited nl-indo, nothing else.
    let mut old = vec![ContentStore::default_catalog()[0].clone()];
    old[0].lessons[0].title = "Eigen lestitel".to_string();
    let old_json = serde_json::to_string(&old).unwrap();
    std::fs::write(dir.join(names::STORAGE_KEY_V2), &old_json).unwrap();

    let catalog = store.load();
    assert_eq!(catalog[0].lessons[0].title, "Eigen lestitel");
    assert!(
        catalog.iter().any(|c| c.id == "ww1" && !c.lessons.is_empty()),
        "courses added after v2 come from the defaults"
    );

    assert!(dir.join(names::STORAGE_KEY_CURRENT).exists());
    assert_eq!(
        std::fs::read_to_string(dir.join(names::STORAGE_KEY_V2)).unwrap(),
        old_json,
        "the old record is read, not rewritten"
    );

    assert_eq!(store.load(), catalog, "migration happens only once");
}

#[test]
fn reset_removes_every_record_version() {
    let (store, dir) = create_test_store();
    let mut catalog = store.load();
    catalog[0].title = "Weg ermee".to_string();
    store.save(&catalog);
    std::fs::write(dir.join(names::STORAGE_KEY_V2), "[]").unwrap();

    let defaults = store.reset();
    assert_eq!(defaults, ContentStore::default_catalog());
    for key in names::ALL_STORAGE_KEYS {
        assert!(!dir.join(key).exists(), "{key} should be gone");
    }
}

#[test]
fn records_keep_the_camel_case_field_spelling() {
    let course = &ContentStore::default_catalog()[0];
    let json = serde_json::to_value(course).unwrap();

    let lesson = &json["lessons"][0];
    assert!(lesson.get("checkQuestion1").is_some());
    assert!(lesson.get("deepDive").is_some());
    assert_eq!(lesson["hook"]["type"], "image");
    assert!(lesson["checkQuestion1"].get("correctAnswer").is_some());
    assert!(
        lesson.get("check_question_1").is_none(),
        "snake_case must never leak into the record"
    );
}
