//! Structural checks run before a draft is committed.
//!
//! Hard invariants block the commit; coherence warnings are surfaced in the
//! editor but never stop a save.

use thiserror::Error;

use super::{Course, Hook, HookKind, Lesson, Question};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("vraag '{question}' heeft maar {count} antwoordopties (minimaal 2)")]
    TooFewOptions { question: String, count: usize },

    #[error("vraag '{question}' wijst antwoord {index} aan maar er zijn {count} opties")]
    CorrectAnswerOutOfRange {
        question: String,
        index: usize,
        count: usize,
    },

    #[error("les-id {id} komt meerdere keren voor in dit thema")]
    DuplicateLessonId { id: u32 },
}

/// Non-fatal coherence issues, shown to the editor as hints.
#[derive(Debug, PartialEq, Eq)]
pub enum Warning {
    /// Video hook without a video URL: the lesson falls back to the image.
    VideoWithoutUrl,
    /// Image hook without an image URL: a generic placeholder is shown.
    ImageWithoutUrl,
}

impl Warning {
    pub fn message(&self) -> &'static str {
        match self {
            Warning::VideoWithoutUrl => {
                "Type is 'video' maar er is geen video-URL; de afbeelding wordt getoond."
            }
            Warning::ImageWithoutUrl => {
                "Geen afbeeldings-URL ingevuld; er wordt een placeholder getoond."
            }
        }
    }
}

pub fn validate_question(q: &Question) -> Result<(), ValidationError> {
    if q.options.len() < 2 {
        return Err(ValidationError::TooFewOptions {
            question: q.question.clone(),
            count: q.options.len(),
        });
    }
    if q.correct_answer >= q.options.len() {
        return Err(ValidationError::CorrectAnswerOutOfRange {
            question: q.question.clone(),
            index: q.correct_answer,
            count: q.options.len(),
        });
    }
    Ok(())
}

pub fn validate_lesson(lesson: &Lesson) -> Result<(), ValidationError> {
    validate_question(&lesson.check_question_1)?;
    validate_question(&lesson.check_question_2)?;
    Ok(())
}

pub fn validate_course(course: &Course) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for lesson in &course.lessons {
        if !seen.insert(lesson.id) {
            return Err(ValidationError::DuplicateLessonId { id: lesson.id });
        }
        validate_lesson(lesson)?;
    }
    Ok(())
}

pub fn hook_warnings(hook: &Hook) -> Vec<Warning> {
    let empty = |url: &Option<String>| url.as_deref().unwrap_or("").is_empty();
    match hook.kind {
        HookKind::Video if empty(&hook.video_url) => vec![Warning::VideoWithoutUrl],
        HookKind::Image if empty(&hook.image_url) => vec![Warning::ImageWithoutUrl],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: usize, correct: usize) -> Question {
        Question {
            question: "Q".to_string(),
            options: (0..options).map(|i| format!("optie {i}")).collect(),
            correct_answer: correct,
            explanation: String::new(),
        }
    }

    #[test]
    fn question_needs_at_least_two_options() {
        let err = validate_question(&question(1, 0)).unwrap_err();
        assert!(matches!(err, ValidationError::TooFewOptions { count: 1, .. }));
        assert!(validate_question(&question(2, 1)).is_ok());
    }

    #[test]
    fn correct_answer_must_be_in_range() {
        let err = validate_question(&question(3, 3)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::CorrectAnswerOutOfRange { index: 3, count: 3, .. }
        ));
    }

    #[test]
    fn duplicate_lesson_ids_are_rejected() {
        let mut course = crate::content::store::ContentStore::default_catalog()[0].clone();
        course.lessons[1].id = 1;
        let err = validate_course(&course).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateLessonId { id: 1 });
    }

    #[test]
    fn video_hook_without_url_warns() {
        let hook = Hook {
            kind: HookKind::Video,
            description: String::new(),
            search_term: String::new(),
            image_url: None,
            video_url: None,
        };
        assert_eq!(hook_warnings(&hook), vec![Warning::VideoWithoutUrl]);
    }
}
