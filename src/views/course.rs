use maud::{html, Markup};

use crate::content::Course;
use crate::names;
use crate::progression::{self, CompletionSet, LessonStatus};

pub fn chooser(catalog: &[Course]) -> Markup {
    html! {
        div #course-chooser {
            hgroup {
                h1 { "Kies je avontuur" }
                p { "Welk stuk geschiedenis duik je vandaag in?" }
            }

            @if catalog.is_empty() {
                article { "Er zijn nog geen thema's. Vraag je docent om er een te maken." }
            }

            div ."grid" {
                @for course in catalog {
                    article {
                        @if let Some(url) = &course.image_url {
                            img src=(url) alt=(course.title);
                        }
                        h3 { (course.title) }
                        p { (course.description) }
                        footer {
                            button hx-get=(names::course_url(&course.id))
                                hx-target="main" hx-push-url="true" {
                                "Start"
                            }
                        }
                    }
                }
            }

            p { a ."secondary" href=(names::ADMIN_URL) { "Docent Login" } }
        }
    }
}

pub fn menu(course: &Course, completed: &CompletionSet, force_unlock: bool) -> Markup {
    html! {
        div #course-menu {
            hgroup {
                h1 { (course.title) }
                p { (course.description) }
            }

            @if force_unlock {
                p { mark { "Docentweergave: alle lessen zijn ontgrendeld." } }
            }

            @if course.lessons.is_empty() {
                article { "Dit thema heeft nog geen lessen." }
            } @else {
                p {
                    "Voortgang: " (completed.len()) " van " (course.lessons.len()) " lessen"
                }
                progress value=(completed.len()) max=(course.lessons.len()) {}
            }

            @if progression::course_finished(course, completed) {
                article {
                    h3 { "Gefeliciteerd! 🎉" }
                    p { "Je hebt alle lessen van dit thema afgerond." }
                    button hx-post=(names::RESTART_URL) hx-target="main" {
                        "Opnieuw beginnen"
                    }
                }
            }

            @for lesson in &course.lessons {
                @let status = progression::lesson_status(lesson.id, completed, force_unlock);
                article .locked[status == LessonStatus::Locked] {
                    hgroup {
                        h4 { "Les " (lesson.id) ": " (lesson.title) }
                        p { (lesson.era) }
                    }
                    @match status {
                        LessonStatus::Locked => {
                            p { "🔒 Rond eerst de vorige les af" }
                        }
                        LessonStatus::Completed => {
                            button ."secondary" hx-get=(names::lesson_url(lesson.id))
                                hx-target="main" hx-push-url="true" {
                                "✓ Bekijk opnieuw"
                            }
                        }
                        LessonStatus::Current => {
                            button hx-get=(names::lesson_url(lesson.id))
                                hx-target="main" hx-push-url="true" {
                                "Start les"
                            }
                        }
                    }
                }
            }

            p {
                a href=(names::HOME_URL) hx-get=(names::HOME_URL)
                    hx-target="main" hx-push-url="true" {
                    "← Ander thema kiezen"
                }
            }
        }
    }
}
