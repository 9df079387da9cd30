//! Lesson unlock chain.
//!
//! Progress is derived, never stored per lesson: a lesson is completed when
//! its id is in the completion set, locked when its predecessor is not, and
//! current otherwise. Completing lesson n is the only thing that unlocks
//! lesson n+1, so a gap in the id sequence leaves the whole tail locked.

use std::collections::BTreeSet;

use crate::content::Course;

/// Lesson ids marked done in the current course visit. Cleared when the
/// student switches courses; never persisted.
pub type CompletionSet = BTreeSet<u32>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonStatus {
    Completed,
    Current,
    Locked,
}

/// Status of a single lesson given the completion set. `force_unlock` is the
/// instructor-preview override that disables the prerequisite chain.
pub fn lesson_status(lesson_id: u32, completed: &CompletionSet, force_unlock: bool) -> LessonStatus {
    if completed.contains(&lesson_id) {
        return LessonStatus::Completed;
    }
    let locked = !force_unlock && lesson_id != 1 && !completed.contains(&(lesson_id - 1));
    if locked {
        LessonStatus::Locked
    } else {
        LessonStatus::Current
    }
}

/// Outcome of finishing a lesson.
#[derive(Debug, PartialEq, Eq)]
pub struct Advance {
    /// Next lesson to show, or `None` when the student should return to the
    /// course menu.
    pub next_lesson_id: Option<u32>,
}

impl Advance {
    pub fn advanced(&self) -> bool {
        self.next_lesson_id.is_some()
    }
}

/// Mark `current_id` complete (idempotent) and pick the follow-up lesson.
pub fn advance(current_id: u32, course: &Course, completed: &mut CompletionSet) -> Advance {
    completed.insert(current_id);
    let next = current_id + 1;
    Advance {
        next_lesson_id: course.has_lesson(next).then_some(next),
    }
}

/// The course is finished for this visit once every lesson is completed.
pub fn course_finished(course: &Course, completed: &CompletionSet) -> bool {
    !course.lessons.is_empty() && completed.len() == course.lessons.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::store::ContentStore;

    fn nl_indo() -> Course {
        ContentStore::default_catalog()[0].clone()
    }

    #[test]
    fn first_lesson_is_never_prerequisite_locked() {
        let completed = CompletionSet::new();
        assert_eq!(lesson_status(1, &completed, false), LessonStatus::Current);
    }

    #[test]
    fn lessons_unlock_in_a_strict_chain() {
        let mut completed = CompletionSet::new();
        assert_eq!(lesson_status(2, &completed, false), LessonStatus::Locked);
        assert_eq!(lesson_status(3, &completed, false), LessonStatus::Locked);

        completed.insert(1);
        assert_eq!(lesson_status(1, &completed, false), LessonStatus::Completed);
        assert_eq!(lesson_status(2, &completed, false), LessonStatus::Current);
        assert_eq!(lesson_status(3, &completed, false), LessonStatus::Locked);
    }

    #[test]
    fn completed_lesson_stays_reachable() {
        let completed: CompletionSet = [1, 2].into_iter().collect();
        assert_eq!(lesson_status(2, &completed, false), LessonStatus::Completed);
    }

    #[test]
    fn force_unlock_opens_everything_not_completed() {
        let completed = CompletionSet::new();
        assert_eq!(lesson_status(5, &completed, true), LessonStatus::Current);
    }

    #[test]
    fn id_gap_leaves_the_tail_locked() {
        // Regression for the adjacency rule: ids {1, 2, 4} leave 4 locked no
        // matter how much of the head is completed.
        let mut course = nl_indo();
        course.lessons.retain(|l| l.id != 3);
        let completed: CompletionSet = [1, 2].into_iter().collect();
        assert_eq!(lesson_status(4, &completed, false), LessonStatus::Locked);
    }

    #[test]
    fn advance_marks_current_complete_and_moves_on() {
        let course = nl_indo();
        let mut completed = CompletionSet::new();

        let outcome = advance(1, &course, &mut completed);
        assert!(completed.contains(&1));
        assert_eq!(outcome.next_lesson_id, Some(2));
        assert!(outcome.advanced());
    }

    #[test]
    fn advance_is_idempotent_on_the_completion_set() {
        let course = nl_indo();
        let mut completed: CompletionSet = [1].into_iter().collect();
        advance(1, &course, &mut completed);
        assert_eq!(completed.len(), 1);
    }

    #[test]
    fn advance_past_last_lesson_returns_to_menu() {
        let course = nl_indo();
        let mut completed: CompletionSet = (1..=4).collect();

        let outcome = advance(5, &course, &mut completed);
        assert_eq!(outcome.next_lesson_id, None);
        assert!(!outcome.advanced());
        assert!(course_finished(&course, &completed));
    }

    #[test]
    fn empty_course_is_never_finished() {
        let mut course = nl_indo();
        course.lessons.clear();
        assert!(!course_finished(&course, &CompletionSet::new()));
    }
}
