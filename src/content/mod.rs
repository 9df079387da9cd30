// Content model - the course/lesson catalog and its invariants

pub mod store;
pub mod validate;

use serde::{Deserialize, Serialize};

/// The full collection of courses; the unit of persistence.
pub type Catalog = Vec<Course>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Stable opaque key; never reused after deletion.
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub lessons: Vec<Lesson>,
}

/// Lesson ids within a course form a dense 1..N sequence by convention;
/// the progression chain relies on it (see `progression`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    pub era: String,
    pub hook: Hook,
    pub content: LessonContent,
    pub check_question_1: Question,
    pub deep_dive: DeepDive,
    pub check_question_2: Question,
    pub cliffhanger: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookKind {
    Image,
    Video,
}

/// Lesson introduction media.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    #[serde(rename = "type")]
    pub kind: HookKind,
    pub description: String,
    pub search_term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonContent {
    pub title: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepDive {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Course {
    pub fn lesson(&self, id: u32) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    pub fn lesson_mut(&mut self, id: u32) -> Option<&mut Lesson> {
        self.lessons.iter_mut().find(|l| l.id == id)
    }

    pub fn has_lesson(&self, id: u32) -> bool {
        self.lessons.iter().any(|l| l.id == id)
    }
}

impl Hook {
    /// Image to render when the hook is not a playable video. Falls back to a
    /// placeholder service keyed on the lesson id, so every lesson has art
    /// before anything is filled in.
    pub fn image_or_fallback(&self, lesson_id: u32) -> String {
        match &self.image_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => format!("https://picsum.photos/800/450?random={lesson_id}"),
        }
    }
}

pub fn find_course<'a>(catalog: &'a [Course], id: &str) -> Option<&'a Course> {
    catalog.iter().find(|c| c.id == id)
}

pub fn find_course_mut<'a>(catalog: &'a mut Catalog, id: &str) -> Option<&'a mut Course> {
    catalog.iter_mut().find(|c| c.id == id)
}
