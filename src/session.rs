//! Per-visit student state: which course is open, which lesson is active,
//! and the two one-way quiz gates inside a lesson visit.

use crate::content::{Course, Question};
use crate::progression::{self, CompletionSet};

/// Which of a lesson's two check questions a widget belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizSlot {
    First,
    Second,
}

impl QuizSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizSlot::First => "1",
            QuizSlot::Second => "2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1" => Some(QuizSlot::First),
            "2" => Some(QuizSlot::Second),
            _ => None,
        }
    }

    pub fn question<'a>(&self, lesson: &'a crate::content::Lesson) -> &'a Question {
        match self {
            QuizSlot::First => &lesson.check_question_1,
            QuizSlot::Second => &lesson.check_question_2,
        }
    }
}

/// Local state of one quiz widget instance. Selection is free until submit;
/// submit is a one-way transition for this instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuizInstance {
    pub selected: Option<usize>,
    pub submitted: bool,
}

impl QuizInstance {
    /// Pick an option. Overwrites any earlier pick; ignored after submit or
    /// when the index is out of range.
    pub fn select(&mut self, index: usize, option_count: usize) {
        if !self.submitted && index < option_count {
            self.selected = Some(index);
        }
    }

    /// Submit the current selection. A submit without a selection is a no-op
    /// (the button is disabled client-side, but the state machine does not
    /// rely on that). Returns whether the answer was correct.
    pub fn submit(&mut self, question: &Question) -> bool {
        let Some(selected) = self.selected else {
            return false;
        };
        if self.submitted {
            return self.passed(question);
        }
        self.submitted = true;
        selected == question.correct_answer
    }

    pub fn passed(&self, question: &Question) -> bool {
        self.submitted && self.selected == Some(question.correct_answer)
    }
}

/// State of one lesson visit. Built fresh whenever the active lesson id
/// changes; there is no backward transition within a visit.
#[derive(Clone, Debug)]
pub struct LessonSession {
    pub lesson_id: u32,
    pub quiz1: QuizInstance,
    pub quiz2: QuizInstance,
}

impl LessonSession {
    pub fn new(lesson_id: u32) -> Self {
        Self {
            lesson_id,
            quiz1: QuizInstance::default(),
            quiz2: QuizInstance::default(),
        }
    }

    pub fn quiz(&self, slot: QuizSlot) -> &QuizInstance {
        match slot {
            QuizSlot::First => &self.quiz1,
            QuizSlot::Second => &self.quiz2,
        }
    }

    pub fn quiz_mut(&mut self, slot: QuizSlot) -> &mut QuizInstance {
        match slot {
            QuizSlot::First => &mut self.quiz1,
            QuizSlot::Second => &mut self.quiz2,
        }
    }

    /// Gate 1: the deep dive and second question become reachable.
    pub fn deep_dive_open(&self, lesson: &crate::content::Lesson) -> bool {
        self.quiz1.passed(&lesson.check_question_1)
    }

    /// Gate 2: the cliffhanger and the advance control become reachable.
    /// Gate 1 must already be open; gate 2 cannot be reached around it.
    pub fn conclusion_open(&self, lesson: &crate::content::Lesson) -> bool {
        self.deep_dive_open(lesson) && self.quiz2.passed(&lesson.check_question_2)
    }
}

/// The active student visit. Owns the completion set, which is discarded
/// whenever the selected course changes.
#[derive(Default)]
pub struct StudentSession {
    pub course_id: Option<String>,
    pub completed: CompletionSet,
    pub force_unlock: bool,
    pub lesson: Option<LessonSession>,
}

impl StudentSession {
    /// Open a course. Selecting a different course resets session progress.
    pub fn select_course(&mut self, course_id: &str) {
        if self.course_id.as_deref() != Some(course_id) {
            self.completed.clear();
        }
        self.course_id = Some(course_id.to_string());
        self.lesson = None;
    }

    /// Leave the course view entirely (back to the course chooser).
    pub fn leave_course(&mut self) {
        self.course_id = None;
        self.completed.clear();
        self.lesson = None;
    }

    /// Enter a lesson, starting a fresh visit when the id differs from the
    /// current one.
    pub fn start_lesson(&mut self, lesson_id: u32) -> &mut LessonSession {
        let fresh = self
            .lesson
            .as_ref()
            .is_none_or(|s| s.lesson_id != lesson_id);
        if fresh {
            self.lesson = Some(LessonSession::new(lesson_id));
        }
        self.lesson.as_mut().expect("lesson session just ensured")
    }

    /// Finish the active lesson and move forward; `None` when there is no
    /// next lesson and the student should see the menu again.
    pub fn finish_lesson(&mut self, course: &Course) -> Option<u32> {
        let current = self.lesson.as_ref()?.lesson_id;
        let outcome = progression::advance(current, course, &mut self.completed);
        match outcome.next_lesson_id {
            Some(next) => {
                self.lesson = Some(LessonSession::new(next));
                Some(next)
            }
            None => {
                self.lesson = None;
                None
            }
        }
    }

    /// Restart action offered once the whole course is completed.
    pub fn restart(&mut self) {
        self.completed.clear();
        self.lesson = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::store::ContentStore;

    fn lesson() -> crate::content::Lesson {
        // nl-indo lesson 1; both questions have correct_answer = 1.
        ContentStore::default_catalog()[0].lessons[0].clone()
    }

    #[test]
    fn correct_submission_opens_gate_one() {
        let lesson = lesson();
        let mut session = LessonSession::new(lesson.id);
        session.quiz1.select(1, lesson.check_question_1.options.len());
        assert!(session.quiz1.submit(&lesson.check_question_1));
        assert!(session.deep_dive_open(&lesson));
        assert!(!session.conclusion_open(&lesson));
    }

    #[test]
    fn wrong_submission_keeps_gate_closed_but_is_inspectable() {
        let lesson = lesson();
        let mut session = LessonSession::new(lesson.id);
        session.quiz1.select(0, lesson.check_question_1.options.len());
        assert!(!session.quiz1.submit(&lesson.check_question_1));
        assert!(!session.deep_dive_open(&lesson));
        // Both the chosen and the correct option stay identifiable.
        assert_eq!(session.quiz1.selected, Some(0));
        assert!(session.quiz1.submitted);
    }

    #[test]
    fn selection_is_free_before_submit_and_frozen_after() {
        let lesson = lesson();
        let mut quiz = QuizInstance::default();
        let count = lesson.check_question_1.options.len();

        quiz.select(0, count);
        quiz.select(2, count);
        assert_eq!(quiz.selected, Some(2));

        quiz.submit(&lesson.check_question_1);
        quiz.select(1, count);
        assert_eq!(quiz.selected, Some(2));
    }

    #[test]
    fn submit_without_selection_is_a_no_op() {
        let lesson = lesson();
        let mut quiz = QuizInstance::default();
        assert!(!quiz.submit(&lesson.check_question_1));
        assert!(!quiz.submitted);
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut quiz = QuizInstance::default();
        quiz.select(9, 4);
        assert_eq!(quiz.selected, None);
    }

    #[test]
    fn conclusion_needs_both_gates() {
        let lesson = lesson();
        let mut session = LessonSession::new(lesson.id);
        session.quiz2.select(1, lesson.check_question_2.options.len());
        session.quiz2.submit(&lesson.check_question_2);
        // Gate 2 passed without gate 1: still closed.
        assert!(!session.conclusion_open(&lesson));

        session.quiz1.select(1, lesson.check_question_1.options.len());
        session.quiz1.submit(&lesson.check_question_1);
        assert!(session.conclusion_open(&lesson));
    }

    #[test]
    fn entering_a_different_lesson_resets_the_gates() {
        let mut student = StudentSession::default();
        student.select_course("nl-indo");
        let session = student.start_lesson(1);
        session.quiz1.select(1, 4);
        session.quiz1.submitted = true;

        student.start_lesson(2);
        let session = student.lesson.as_ref().unwrap();
        assert_eq!(session.quiz1, QuizInstance::default());

        // Re-entering the same lesson keeps the visit.
        student.start_lesson(2);
        assert_eq!(student.lesson.as_ref().unwrap().lesson_id, 2);
    }

    #[test]
    fn switching_courses_discards_progress() {
        let mut student = StudentSession::default();
        student.select_course("nl-indo");
        student.completed.extend([1, 2]);

        student.select_course("nl-indo");
        assert_eq!(student.completed.len(), 2, "same course keeps progress");

        student.select_course("ww1");
        assert!(student.completed.is_empty());
    }

    #[test]
    fn finish_lesson_walks_the_course_and_ends_at_the_menu() {
        let course = ContentStore::default_catalog()[0].clone();
        let mut student = StudentSession::default();
        student.select_course(&course.id);
        student.start_lesson(4);

        assert_eq!(student.finish_lesson(&course), Some(5));
        assert_eq!(student.lesson.as_ref().unwrap().lesson_id, 5);

        assert_eq!(student.finish_lesson(&course), None);
        assert!(student.lesson.is_none());
        assert!(student.completed.contains(&4) && student.completed.contains(&5));
    }
}
