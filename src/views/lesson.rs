use maud::{html, Markup};

use crate::content::{Course, HookKind, Lesson, Question};
use crate::names;
use crate::session::{LessonSession, QuizInstance, QuizSlot};

/// The whole lesson column. Quiz interactions swap this element in place so
/// the sections below a freshly opened gate appear in the same response.
pub fn lesson(course: &Course, lesson: &Lesson, session: &LessonSession) -> Markup {
    let is_last = course.lessons.last().is_some_and(|l| l.id == lesson.id);

    html! {
        div #lesson {
            hgroup {
                h1 { (lesson.title) }
                p { (lesson.era) }
            }

            (hook(lesson))

            section {
                h2 { (lesson.content.title) }
                p ."prewrap" { (lesson.content.text) }
            }

            (quiz(QuizSlot::First, &lesson.check_question_1, session.quiz(QuizSlot::First)))

            @if session.deep_dive_open(lesson) {
                (deep_dive(lesson))
                (quiz(QuizSlot::Second, &lesson.check_question_2, session.quiz(QuizSlot::Second)))
            }

            @if session.conclusion_open(lesson) {
                section {
                    h3 { "Hoe gaat het verder?" }
                    p ."prewrap" { (lesson.cliffhanger) }
                    button hx-post=(names::NEXT_LESSON_URL) hx-target="main" {
                        @if is_last { "Thema afronden" } @else { "Volgende les →" }
                    }
                }
            }

            p {
                a href=(names::course_url(&course.id)) hx-get=(names::course_url(&course.id))
                    hx-target="main" hx-push-url="true" {
                    "← Terug naar het overzicht"
                }
            }
        }
    }
}

fn hook(lesson: &Lesson) -> Markup {
    let hook = &lesson.hook;
    let video = hook.video_url.as_deref().unwrap_or("");

    html! {
        figure {
            @if hook.kind == HookKind::Video && !video.is_empty() {
                iframe src=(video) title=(hook.description) allowfullscreen {}
            } @else {
                img src=(hook.image_or_fallback(lesson.id)) alt=(hook.description);
            }
            figcaption { (hook.description) }
        }
    }
}

fn deep_dive(lesson: &Lesson) -> Markup {
    let dive = &lesson.deep_dive;

    html! {
        section {
            h3 { "Verdieping: " (dive.title) }
            p ."prewrap" { (dive.description) }
            @if let Some(text) = &dive.source_text {
                blockquote { (text) }
            }
            @if let Some(url) = &dive.image_url {
                img src=(url) alt=(dive.title);
            }
        }
    }
}

fn quiz(slot: QuizSlot, question: &Question, instance: &QuizInstance) -> Markup {
    html! {
        section id=(format!("quiz-{}", slot.as_str())) {
            h3 { "Checkvraag" }
            p { (question.question) }

            @for (i, option) in question.options.iter().enumerate() {
                @let chosen = instance.selected == Some(i);
                @let correct = question.correct_answer == i;
                @if instance.submitted {
                    button ."outline" .option-correct[correct]
                        .option-wrong[chosen && !correct] disabled {
                        (option)
                    }
                } @else {
                    button ."outline" .option-selected[chosen]
                        hx-post=(names::select_option_url(slot.as_str()))
                        hx-vals=(format!(r#"{{"index": {i}}}"#))
                        hx-target="#lesson" hx-swap="outerHTML" {
                        (option)
                    }
                }
            }

            @if instance.submitted {
                @if instance.passed(question) {
                    p { mark { "Goed zo!" } " " (question.explanation) }
                } @else {
                    p { "Helaas, dat is niet juist. " (question.explanation) }
                    p { small { "Ga terug naar het overzicht en open de les opnieuw om het nog eens te proberen." } }
                }
            } @else {
                button hx-post=(names::submit_answer_url(slot.as_str()))
                    hx-target="#lesson" hx-swap="outerHTML"
                    disabled[instance.selected.is_none()] {
                    "Controleer antwoord"
                }
            }
        }
    }
}
