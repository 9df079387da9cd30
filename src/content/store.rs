//! Versioned persistence of the catalog.
//!
//! Each schema version is one JSON record in the data directory, named after
//! the storage key it had in earlier releases. Only the current record is
//! written; prior records are read once for migration and otherwise left
//! alone until an explicit reset.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::content::{Catalog, DeepDive, Hook, HookKind, Lesson, LessonContent, Question};
use crate::names;

static DEFAULT_CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../data/default_catalog.json"))
        .expect("embedded default catalog is valid")
});

/// Course ids that already existed in the v2 schema. During migration an old
/// record for one of these always wins over the built-in default; for ids
/// introduced after v2 the old record only wins when it actually has lessons,
/// so a stale empty entry can never suppress new default content.
const V2_ERA_COURSE_IDS: &[&str] = &["nl-indo"];

#[derive(Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::error!("could not create data directory {}: {e}", dir.display());
        }
        Self { dir }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn default_catalog() -> Catalog {
        DEFAULT_CATALOG.clone()
    }

    /// Load the catalog. Never fails: a corrupt record falls back to the
    /// built-in defaults without being overwritten, an absent record triggers
    /// a one-time migration from the previous schema version, and an absent
    /// prior record means a fresh start.
    pub fn load(&self) -> Catalog {
        let current = self.record_path(names::STORAGE_KEY_CURRENT);
        match fs::read_to_string(&current) {
            Ok(text) => match serde_json::from_str::<Catalog>(&text) {
                Ok(catalog) => return catalog,
                Err(e) => {
                    tracing::error!("corrupt record {}: {e}; using defaults", current.display());
                    return Self::default_catalog();
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::error!("could not read {}: {e}; using defaults", current.display());
                return Self::default_catalog();
            }
        }

        match fs::read_to_string(self.record_path(names::STORAGE_KEY_V2)) {
            Ok(text) => match serde_json::from_str::<Catalog>(&text) {
                Ok(old) => {
                    let migrated = migrate_from_v2(old);
                    tracing::info!("migrated catalog from v2 record");
                    self.save(&migrated);
                    return migrated;
                }
                Err(e) => {
                    tracing::error!("corrupt v2 record: {e}; using defaults");
                    return Self::default_catalog();
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::error!("could not read v2 record: {e}"),
        }

        let catalog = Self::default_catalog();
        self.save(&catalog);
        catalog
    }

    /// Persist the catalog as the current-version record. Write failures are
    /// logged and swallowed; the in-memory catalog stays authoritative for
    /// the rest of the session.
    pub fn save(&self, catalog: &Catalog) {
        let path = self.record_path(names::STORAGE_KEY_CURRENT);
        let json = match serde_json::to_string_pretty(catalog) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("could not serialize catalog: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&path, json) {
            tracing::error!("could not write {}: {e}", path.display());
        }
    }

    /// Delete every known record version and return the defaults. The caller
    /// decides whether to persist them again.
    pub fn reset(&self) -> Catalog {
        for key in names::ALL_STORAGE_KEYS {
            let path = self.record_path(key);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => tracing::error!("could not remove {}: {e}", path.display()),
            }
        }
        Self::default_catalog()
    }

    /// Blank lesson with the given id, structurally valid so it can be
    /// committed before the teacher touches every field.
    pub fn create_empty_lesson(id: u32) -> Lesson {
        Lesson {
            id,
            title: "Nieuwe Les".to_string(),
            era: "Tijdvak...".to_string(),
            hook: Hook {
                kind: HookKind::Image,
                description: "Beschrijving van de afbeelding".to_string(),
                search_term: "Zoekterm".to_string(),
                image_url: Some(String::new()),
                video_url: None,
            },
            content: LessonContent {
                title: "Titel van de paragraaf".to_string(),
                text: "Schrijf hier de lesstof...".to_string(),
            },
            check_question_1: Question {
                question: "Vraag 1".to_string(),
                options: vec![
                    "Antwoord A".to_string(),
                    "Antwoord B".to_string(),
                    "Antwoord C".to_string(),
                    "Antwoord D".to_string(),
                ],
                correct_answer: 0,
                explanation: "Uitleg bij het antwoord.".to_string(),
            },
            deep_dive: DeepDive {
                title: "Verdieping titel".to_string(),
                description: "Verdiepende tekst...".to_string(),
                source_text: Some("Bronvermelding".to_string()),
                image_url: None,
            },
            check_question_2: Question {
                question: "Vraag 2 (Inzicht)".to_string(),
                options: vec![
                    "Optie A".to_string(),
                    "Optie B".to_string(),
                    "Optie C".to_string(),
                    "Optie D".to_string(),
                ],
                correct_answer: 0,
                explanation: "Uitleg...".to_string(),
            },
            cliffhanger: "Cliffhanger naar de volgende les...".to_string(),
        }
    }
}

/// Merge an old v2 record over the current defaults. Only course ids known to
/// the defaults survive; edits made in the v2 era are preserved, new default
/// courses appear even when the old record predates them.
fn migrate_from_v2(old: Catalog) -> Catalog {
    let mut catalog = ContentStore::default_catalog();
    for course in &mut catalog {
        let Some(old_course) = old.iter().find(|c| c.id == course.id) else {
            continue;
        };
        if V2_ERA_COURSE_IDS.contains(&course.id.as_str()) || !old_course.lessons.is_empty() {
            *course = old_course.clone();
        }
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::validate;

    #[test]
    fn default_catalog_is_structurally_valid() {
        let catalog = ContentStore::default_catalog();
        assert_eq!(catalog.len(), 2);
        for course in &catalog {
            validate::validate_course(course).unwrap();
        }
    }

    #[test]
    fn empty_lesson_is_structurally_valid() {
        let lesson = ContentStore::create_empty_lesson(7);
        assert_eq!(lesson.id, 7);
        validate::validate_lesson(&lesson).unwrap();
    }

    #[test]
    fn migration_keeps_old_edits_and_new_defaults() {
        // v2-era record: edited nl-indo, no ww1 entry at all.
        let mut old = vec![ContentStore::default_catalog()[0].clone()];
        old[0].title = "Bewerkt thema".to_string();

        let migrated = migrate_from_v2(old);
        assert_eq!(migrated[0].title, "Bewerkt thema");
        assert!(migrated.iter().any(|c| c.id == "ww1" && !c.lessons.is_empty()));
    }

    #[test]
    fn migration_prefers_old_data_for_new_ids_with_lessons() {
        let defaults = ContentStore::default_catalog();
        let mut old_ww1 = defaults[1].clone();
        old_ww1.title = "Eigen WO1-thema".to_string();

        let migrated = migrate_from_v2(vec![old_ww1]);
        let ww1 = migrated.iter().find(|c| c.id == "ww1").unwrap();
        assert_eq!(ww1.title, "Eigen WO1-thema");
    }

    #[test]
    fn migration_drops_empty_entries_for_new_default_ids() {
        let defaults = ContentStore::default_catalog();
        let mut old_ww1 = defaults[1].clone();
        old_ww1.title = "Leeg spook".to_string();
        old_ww1.lessons.clear();

        let migrated = migrate_from_v2(vec![old_ww1]);
        let ww1 = migrated.iter().find(|c| c.id == "ww1").unwrap();
        assert_eq!(ww1, &defaults[1]);
    }
}
