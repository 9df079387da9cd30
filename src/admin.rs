//! Teacher-side editing: draft/commit on a selected course or lesson, plus
//! structural operations that act on the live catalog directly.
//!
//! Edits keep the dotted field-path contract (`hook.imageUrl`,
//! `checkQuestion1.options[2]`) but a path is parsed into a typed field enum
//! before anything is mutated; an unknown path is an input error, never a
//! blind traversal.

use thiserror::Error;
use uuid::Uuid;

use crate::content::store::ContentStore;
use crate::content::validate::{self, ValidationError};
use crate::content::{Catalog, Course, Lesson};
use crate::session::QuizSlot;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("onbekend veld: {0}")]
    UnknownField(String),
    #[error("ongeldige waarde voor {field}: {value}")]
    BadValue { field: String, value: String },
    #[error("er is geen concept geselecteerd")]
    NoDraft,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CourseField {
    Title,
    Description,
    ImageUrl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionField {
    Question,
    Option(usize),
    CorrectAnswer,
    Explanation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonField {
    Title,
    Era,
    Cliffhanger,
    HookKind,
    HookDescription,
    HookSearchTerm,
    HookImageUrl,
    HookVideoUrl,
    ContentTitle,
    ContentText,
    Check(QuizSlot, QuestionField),
    DeepDiveTitle,
    DeepDiveDescription,
    DeepDiveSourceText,
    DeepDiveImageUrl,
}

impl CourseField {
    pub fn parse(path: &str) -> Result<Self, EditError> {
        match path {
            "title" => Ok(CourseField::Title),
            "description" => Ok(CourseField::Description),
            "imageUrl" => Ok(CourseField::ImageUrl),
            _ => Err(EditError::UnknownField(path.to_string())),
        }
    }
}

impl LessonField {
    pub fn parse(path: &str) -> Result<Self, EditError> {
        use LessonField::*;

        if let Some((slot, rest)) = path
            .strip_prefix("checkQuestion1.")
            .map(|r| (QuizSlot::First, r))
            .or_else(|| path.strip_prefix("checkQuestion2.").map(|r| (QuizSlot::Second, r)))
        {
            return Ok(Check(slot, QuestionField::parse(path, rest)?));
        }

        match path {
            "title" => Ok(Title),
            "era" => Ok(Era),
            "cliffhanger" => Ok(Cliffhanger),
            "hook.type" => Ok(HookKind),
            "hook.description" => Ok(HookDescription),
            "hook.searchTerm" => Ok(HookSearchTerm),
            "hook.imageUrl" => Ok(HookImageUrl),
            "hook.videoUrl" => Ok(HookVideoUrl),
            "content.title" => Ok(ContentTitle),
            "content.text" => Ok(ContentText),
            "deepDive.title" => Ok(DeepDiveTitle),
            "deepDive.description" => Ok(DeepDiveDescription),
            "deepDive.sourceText" => Ok(DeepDiveSourceText),
            "deepDive.imageUrl" => Ok(DeepDiveImageUrl),
            _ => Err(EditError::UnknownField(path.to_string())),
        }
    }
}

impl QuestionField {
    fn parse(full_path: &str, rest: &str) -> Result<Self, EditError> {
        if let Some(idx) = rest
            .strip_prefix("options[")
            .and_then(|r| r.strip_suffix(']'))
        {
            let idx = idx
                .parse::<usize>()
                .map_err(|_| EditError::UnknownField(full_path.to_string()))?;
            return Ok(QuestionField::Option(idx));
        }
        match rest {
            "question" => Ok(QuestionField::Question),
            "correctAnswer" => Ok(QuestionField::CorrectAnswer),
            "explanation" => Ok(QuestionField::Explanation),
            _ => Err(EditError::UnknownField(full_path.to_string())),
        }
    }
}

fn opt_string(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn set_course_field(course: &mut Course, field: CourseField, value: &str) {
    match field {
        CourseField::Title => course.title = value.to_string(),
        CourseField::Description => course.description = value.to_string(),
        CourseField::ImageUrl => course.image_url = opt_string(value),
    }
}

fn set_lesson_field(lesson: &mut Lesson, field: LessonField, value: &str) -> Result<(), EditError> {
    use LessonField::*;
    match field {
        Title => lesson.title = value.to_string(),
        Era => lesson.era = value.to_string(),
        Cliffhanger => lesson.cliffhanger = value.to_string(),
        HookKind => {
            lesson.hook.kind = match value {
                "image" => crate::content::HookKind::Image,
                "video" => crate::content::HookKind::Video,
                _ => {
                    return Err(EditError::BadValue {
                        field: "hook.type".to_string(),
                        value: value.to_string(),
                    })
                }
            }
        }
        HookDescription => lesson.hook.description = value.to_string(),
        HookSearchTerm => lesson.hook.search_term = value.to_string(),
        HookImageUrl => lesson.hook.image_url = opt_string(value),
        HookVideoUrl => lesson.hook.video_url = opt_string(value),
        ContentTitle => lesson.content.title = value.to_string(),
        ContentText => lesson.content.text = value.to_string(),
        DeepDiveTitle => lesson.deep_dive.title = value.to_string(),
        DeepDiveDescription => lesson.deep_dive.description = value.to_string(),
        DeepDiveSourceText => lesson.deep_dive.source_text = opt_string(value),
        DeepDiveImageUrl => lesson.deep_dive.image_url = opt_string(value),
        Check(slot, qfield) => {
            let question = match slot {
                QuizSlot::First => &mut lesson.check_question_1,
                QuizSlot::Second => &mut lesson.check_question_2,
            };
            match qfield {
                QuestionField::Question => question.question = value.to_string(),
                QuestionField::Explanation => question.explanation = value.to_string(),
                QuestionField::Option(idx) => {
                    let count = question.options.len();
                    let slot_ref =
                        question.options.get_mut(idx).ok_or(EditError::BadValue {
                            field: format!("options[{idx}] (er zijn {count} opties)"),
                            value: value.to_string(),
                        })?;
                    *slot_ref = value.to_string();
                }
                QuestionField::CorrectAnswer => {
                    // Range is checked at commit; parse failure is immediate.
                    question.correct_answer =
                        value.parse().map_err(|_| EditError::BadValue {
                            field: "correctAnswer".to_string(),
                            value: value.to_string(),
                        })?;
                }
            }
        }
    }
    Ok(())
}

/// The private scratch copy being edited.
#[derive(Clone, Debug)]
pub enum Draft {
    Course(Course),
    Lesson(Lesson),
}

/// One editor's session. Selecting anything deep-clones it into the draft;
/// the previous draft is discarded silently, committed or not.
#[derive(Default)]
pub struct AdminSession {
    pub selected_course: Option<String>,
    pub draft: Option<Draft>,
}

impl AdminSession {
    pub fn select_course(&mut self, catalog: &Catalog, course_id: &str) -> bool {
        let Some(course) = crate::content::find_course(catalog, course_id) else {
            return false;
        };
        self.selected_course = Some(course_id.to_string());
        self.draft = Some(Draft::Course(course.clone()));
        true
    }

    pub fn select_lesson(&mut self, catalog: &Catalog, lesson_id: u32) -> bool {
        let Some(course) = self
            .selected_course
            .as_deref()
            .and_then(|id| crate::content::find_course(catalog, id))
        else {
            return false;
        };
        let Some(lesson) = course.lesson(lesson_id) else {
            return false;
        };
        self.draft = Some(Draft::Lesson(lesson.clone()));
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_course = None;
        self.draft = None;
    }

    /// Apply one field edit to the draft, addressed by dotted path.
    pub fn edit_field(&mut self, path: &str, value: &str) -> Result<(), EditError> {
        match self.draft.as_mut().ok_or(EditError::NoDraft)? {
            Draft::Course(course) => {
                set_course_field(course, CourseField::parse(path)?, value);
                Ok(())
            }
            Draft::Lesson(lesson) => set_lesson_field(lesson, LessonField::parse(path)?, value),
        }
    }

    /// Validate the draft and fold it back into the live catalog. The draft
    /// stays selected so the editor can keep working. The caller persists the
    /// catalog afterwards.
    pub fn commit(&mut self, catalog: &mut Catalog) -> Result<(), EditError> {
        match self.draft.as_ref().ok_or(EditError::NoDraft)? {
            Draft::Course(draft) => {
                validate::validate_course(draft)?;
                if let Some(live) = crate::content::find_course_mut(catalog, &draft.id) {
                    *live = draft.clone();
                }
            }
            Draft::Lesson(draft) => {
                validate::validate_lesson(draft)?;
                let course = self
                    .selected_course
                    .as_deref()
                    .and_then(|id| crate::content::find_course_mut(catalog, id))
                    .ok_or(EditError::NoDraft)?;
                if let Some(live) = course.lesson_mut(draft.id) {
                    *live = draft.clone();
                }
            }
        }
        Ok(())
    }

    /// Coherence hints for the current draft, if it has a hook.
    pub fn draft_warnings(&self) -> Vec<validate::Warning> {
        match &self.draft {
            Some(Draft::Lesson(lesson)) => validate::hook_warnings(&lesson.hook),
            _ => Vec::new(),
        }
    }
}

// Structural operations work on the live catalog and are persisted by the
// caller immediately, bypassing the draft.

pub fn add_course(catalog: &mut Catalog) -> String {
    let id = format!("custom-{}", Uuid::new_v4());
    catalog.push(Course {
        id: id.clone(),
        title: "Nieuw Thema".to_string(),
        description: "Beschrijving van het nieuwe thema...".to_string(),
        image_url: None,
        lessons: Vec::new(),
    });
    id
}

/// Remove a course; returns the id of the first remaining course, if any.
pub fn delete_course(catalog: &mut Catalog, course_id: &str) -> Option<String> {
    catalog.retain(|c| c.id != course_id);
    catalog.first().map(|c| c.id.clone())
}

/// Append a blank lesson with id `max(existing) + 1`.
pub fn add_lesson(course: &mut Course) -> u32 {
    let id = course.lessons.iter().map(|l| l.id).max().unwrap_or(0) + 1;
    course
        .lessons
        .push(ContentStore::create_empty_lesson(id));
    id
}

/// Remove a lesson and reindex the survivors to a dense 1..N sequence in
/// their current order, keeping the unlock chain intact. Lesson ids are
/// therefore not stable across deletes; callers holding an id must
/// re-resolve it. Returns the first remaining lesson id, if any.
pub fn delete_lesson(course: &mut Course, lesson_id: u32) -> Option<u32> {
    course.lessons.retain(|l| l.id != lesson_id);
    for (idx, lesson) in course.lessons.iter_mut().enumerate() {
        lesson.id = idx as u32 + 1;
    }
    course.lessons.first().map(|l| l.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::store::ContentStore;

    fn catalog() -> Catalog {
        ContentStore::default_catalog()
    }

    #[test]
    fn lesson_paths_resolve_to_typed_fields() {
        assert_eq!(LessonField::parse("hook.imageUrl"), Ok(LessonField::HookImageUrl));
        assert_eq!(
            LessonField::parse("checkQuestion1.options[2]"),
            Ok(LessonField::Check(QuizSlot::First, QuestionField::Option(2)))
        );
        assert_eq!(
            LessonField::parse("checkQuestion2.correctAnswer"),
            Ok(LessonField::Check(QuizSlot::Second, QuestionField::CorrectAnswer))
        );
        assert!(matches!(
            LessonField::parse("hook.__proto__"),
            Err(EditError::UnknownField(_))
        ));
    }

    #[test]
    fn editing_mutates_only_the_draft() {
        let catalog = catalog();
        let mut admin = AdminSession::default();
        admin.select_course(&catalog, "nl-indo");
        admin.select_lesson(&catalog, 1);
        admin.edit_field("title", "Aangepaste titel").unwrap();

        let Some(Draft::Lesson(draft)) = &admin.draft else {
            panic!("expected lesson draft");
        };
        assert_eq!(draft.title, "Aangepaste titel");
        assert_eq!(catalog[0].lessons[0].title, "De VOC-tijd");
    }

    #[test]
    fn commit_replaces_the_live_entry() {
        let mut catalog = catalog();
        let mut admin = AdminSession::default();
        admin.select_course(&catalog, "nl-indo");
        admin.select_lesson(&catalog, 2);
        admin.edit_field("content.text", "Nieuwe lesstof").unwrap();
        admin.commit(&mut catalog).unwrap();

        assert_eq!(catalog[0].lessons[1].content.text, "Nieuwe lesstof");
    }

    #[test]
    fn commit_blocks_out_of_range_correct_answer() {
        let mut catalog = catalog();
        let mut admin = AdminSession::default();
        admin.select_course(&catalog, "nl-indo");
        admin.select_lesson(&catalog, 1);
        admin.edit_field("checkQuestion1.correctAnswer", "12").unwrap();

        let err = admin.commit(&mut catalog).unwrap_err();
        assert!(matches!(
            err,
            EditError::Invalid(ValidationError::CorrectAnswerOutOfRange { index: 12, .. })
        ));
        assert_eq!(catalog[0].lessons[0].check_question_1.correct_answer, 1);
    }

    #[test]
    fn switching_selection_discards_the_draft() {
        let catalog = catalog();
        let mut admin = AdminSession::default();
        admin.select_course(&catalog, "nl-indo");
        admin.select_lesson(&catalog, 1);
        admin.edit_field("title", "Weggegooid").unwrap();

        admin.select_lesson(&catalog, 2);
        let Some(Draft::Lesson(draft)) = &admin.draft else {
            panic!("expected lesson draft");
        };
        assert_eq!(draft.id, 2);
        assert_ne!(draft.title, "Weggegooid");
    }

    #[test]
    fn add_lesson_takes_max_id_plus_one() {
        let mut course = catalog()[0].clone();
        assert_eq!(add_lesson(&mut course), 6);

        let mut empty = catalog()[0].clone();
        empty.lessons.clear();
        assert_eq!(add_lesson(&mut empty), 1);
    }

    #[test]
    fn delete_lesson_reindexes_to_a_dense_sequence() {
        let mut course = catalog()[0].clone();
        let titles: Vec<_> = course.lessons.iter().map(|l| l.title.clone()).collect();

        let first = delete_lesson(&mut course, 2);
        assert_eq!(first, Some(1));
        let ids: Vec<_> = course.lessons.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        // Old lesson 3 is now addressable as id 2.
        assert_eq!(course.lessons[1].title, titles[2]);
    }

    #[test]
    fn delete_course_selects_the_first_remaining() {
        let mut catalog = catalog();
        assert_eq!(delete_course(&mut catalog, "nl-indo"), Some("ww1".to_string()));
        assert_eq!(delete_course(&mut catalog, "ww1"), None);
        assert!(catalog.is_empty());
    }

    #[test]
    fn added_course_gets_a_fresh_opaque_id() {
        let mut catalog = catalog();
        let a = add_course(&mut catalog);
        let b = add_course(&mut catalog);
        assert_ne!(a, b);
        assert!(a.starts_with("custom-"));
        assert!(catalog.iter().any(|c| c.id == a && c.lessons.is_empty()));
    }
}
