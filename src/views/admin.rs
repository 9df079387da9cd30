use maud::{html, Markup};

use crate::admin::{AdminSession, Draft};
use crate::content::{Course, HookKind, Lesson, Question};
use crate::names;

pub fn login(failed: bool) -> Markup {
    html! {
        div #admin-login {
            hgroup {
                h1 { "Docent Login" }
                p { "Log in om de lesstof te bewerken." }
            }
            @if failed {
                p { mark { "Onjuist wachtwoord." } }
            }
            form hx-post=(names::ADMIN_LOGIN_URL) hx-target="main" {
                label {
                    "Wachtwoord"
                    input type="password" name="password" autocomplete="current-password";
                }
                button { "Inloggen" }
            }
            p { a href=(names::HOME_URL) { "← Terug naar de lessen" } }
        }
    }
}

/// The whole editing panel; every panel interaction swaps this element.
pub fn panel(catalog: &[Course], editor: &AdminSession, saved: Option<&str>) -> Markup {
    html! {
        div #admin-panel {
            nav {
                ul { li { strong { "Docent Paneel" } } }
                ul {
                    li {
                        button ."secondary" hx-post=(names::ADMIN_STUDENT_VIEW_URL) {
                            "Leerlingweergave"
                        }
                    }
                    li {
                        button ."secondary" ."outline" hx-post=(names::ADMIN_RESET_URL)
                            hx-target="#admin-panel" hx-swap="outerHTML"
                            hx-confirm="Alle aangepaste lesstof verwijderen en de standaardinhoud terugzetten?" {
                            "Standaard herstellen"
                        }
                    }
                    li {
                        button ."outline" hx-post=(names::ADMIN_LOGOUT_URL) {
                            "Uitloggen"
                        }
                    }
                }
            }

            div ."grid" {
                (course_list(catalog, editor))
                (lesson_list(catalog, editor))
                div #admin-editor {
                    (editor_pane(editor))
                    (notice(saved.unwrap_or(""), true))
                }
            }
        }
    }
}

/// The feedback line under the editor form. Swapped by field edits and
/// commits without re-rendering the panel.
pub fn notice(text: &str, ok: bool) -> Markup {
    html! {
        div #admin-notice {
            @if text.is_empty() {
            } @else if ok {
                ins { (text) }
            } @else {
                mark { (text) }
            }
        }
    }
}

fn course_list(catalog: &[Course], editor: &AdminSession) -> Markup {
    html! {
        div {
            h4 { "Thema's" }
            @for course in catalog {
                @let selected = editor.selected_course.as_deref() == Some(course.id.as_str());
                div role="group" {
                    button .outline[!selected] hx-get=(names::admin_course_url(&course.id))
                        hx-target="#admin-panel" hx-swap="outerHTML" {
                        (course.title)
                    }
                    button ."secondary" ."outline"
                        hx-delete=(names::admin_delete_course_url(&course.id))
                        hx-target="#admin-panel" hx-swap="outerHTML"
                        hx-confirm=(format!("Thema '{}' en alle lessen erin verwijderen?", course.title)) {
                        "✕"
                    }
                }
            }
            button ."secondary" hx-post=(names::ADMIN_ADD_COURSE_URL)
                hx-target="#admin-panel" hx-swap="outerHTML" {
                "+ Nieuw thema"
            }
        }
    }
}

fn lesson_list(catalog: &[Course], editor: &AdminSession) -> Markup {
    let course = editor
        .selected_course
        .as_deref()
        .and_then(|id| crate::content::find_course(catalog, id));

    html! {
        div {
            h4 { "Lessen" }
            @match course {
                Some(course) => {
                    button .outline[!matches!(editor.draft, Some(Draft::Course(_)))]
                        hx-get=(names::admin_course_url(&course.id))
                        hx-target="#admin-panel" hx-swap="outerHTML" {
                        "⚙ Thema-instellingen"
                    }
                    @for lesson in &course.lessons {
                        @let selected = matches!(&editor.draft, Some(Draft::Lesson(l)) if l.id == lesson.id);
                        div role="group" {
                            button .outline[!selected]
                                hx-get=(names::admin_lesson_url(lesson.id))
                                hx-target="#admin-panel" hx-swap="outerHTML" {
                                "Les " (lesson.id) ": " (lesson.title)
                            }
                            button ."secondary" ."outline"
                                hx-delete=(names::admin_delete_lesson_url(lesson.id))
                                hx-target="#admin-panel" hx-swap="outerHTML"
                                hx-confirm=(format!("Les '{}' verwijderen? De overige lessen worden hernummerd.", lesson.title)) {
                                "✕"
                            }
                        }
                    }
                    button ."secondary" hx-post=(names::ADMIN_ADD_LESSON_URL)
                        hx-target="#admin-panel" hx-swap="outerHTML" {
                        "+ Nieuwe les"
                    }
                }
                None => {
                    p { "Selecteer eerst een thema." }
                }
            }
        }
    }
}

fn editor_pane(editor: &AdminSession) -> Markup {
    match &editor.draft {
        Some(Draft::Course(course)) => course_form(course),
        Some(Draft::Lesson(lesson)) => lesson_form(lesson, editor),
        None => html! { p { "Selecteer een thema of les om te bewerken." } },
    }
}

fn course_form(course: &Course) -> Markup {
    html! {
        form onsubmit="return false" {
            h4 { "Thema bewerken" }
            (text_field("Titel", "title", &course.title))
            (textarea_field("Beschrijving", "description", &course.description))
            (text_field("Afbeeldings-URL", "imageUrl", course.image_url.as_deref().unwrap_or("")))
            (commit_button("Thema opslaan"))
        }
    }
}

fn lesson_form(lesson: &Lesson, editor: &AdminSession) -> Markup {
    html! {
        form onsubmit="return false" {
            h4 { "Les " (lesson.id) " bewerken" }
            (text_field("Titel", "title", &lesson.title))
            (text_field("Tijdvak", "era", &lesson.era))

            h5 { "Introductie" }
            label {
                "Type"
                select name="value" hx-post=(names::ADMIN_FIELD_URL)
                    hx-vals=(path_vals("hook.type"))
                    hx-trigger="change" hx-target="#admin-notice" hx-swap="outerHTML" {
                    option value="image" selected[lesson.hook.kind == HookKind::Image] { "Afbeelding" }
                    option value="video" selected[lesson.hook.kind == HookKind::Video] { "Video" }
                }
            }
            (text_field("Beschrijving", "hook.description", &lesson.hook.description))
            (text_field("Zoekterm", "hook.searchTerm", &lesson.hook.search_term))
            (text_field("Afbeeldings-URL", "hook.imageUrl", lesson.hook.image_url.as_deref().unwrap_or("")))
            (text_field("Video-URL", "hook.videoUrl", lesson.hook.video_url.as_deref().unwrap_or("")))
            @for warning in editor.draft_warnings() {
                p { small { mark { (warning.message()) } } }
            }

            h5 { "Lesstof" }
            (text_field("Titel", "content.title", &lesson.content.title))
            (textarea_field("Tekst", "content.text", &lesson.content.text))

            (question_form("Checkvraag 1", "checkQuestion1", &lesson.check_question_1))

            h5 { "Verdieping" }
            (text_field("Titel", "deepDive.title", &lesson.deep_dive.title))
            (textarea_field("Beschrijving", "deepDive.description", &lesson.deep_dive.description))
            (textarea_field("Brontekst", "deepDive.sourceText", lesson.deep_dive.source_text.as_deref().unwrap_or("")))
            (text_field("Afbeeldings-URL", "deepDive.imageUrl", lesson.deep_dive.image_url.as_deref().unwrap_or("")))

            (question_form("Checkvraag 2", "checkQuestion2", &lesson.check_question_2))

            h5 { "Cliffhanger" }
            (textarea_field("Tekst", "cliffhanger", &lesson.cliffhanger))

            (commit_button("Les opslaan"))
        }
    }
}

fn question_form(heading: &str, prefix: &str, question: &Question) -> Markup {
    html! {
        h5 { (heading) }
        (textarea_field("Vraag", &format!("{prefix}.question"), &question.question))
        @for (i, option) in question.options.iter().enumerate() {
            (text_field(&format!("Optie {}", i + 1), &format!("{prefix}.options[{i}]"), option))
        }
        label {
            "Juiste antwoord"
            select name="value" hx-post=(names::ADMIN_FIELD_URL)
                hx-vals=(path_vals(&format!("{prefix}.correctAnswer")))
                hx-trigger="change" hx-target="#admin-notice" hx-swap="outerHTML" {
                @for i in 0..question.options.len() {
                    option value=(i) selected[i == question.correct_answer] {
                        "Optie " (i + 1)
                    }
                }
            }
        }
        (textarea_field("Uitleg", &format!("{prefix}.explanation"), &question.explanation))
    }
}

fn text_field(label: &str, path: &str, value: &str) -> Markup {
    html! {
        label {
            (label)
            input name="value" value=(value)
                hx-post=(names::ADMIN_FIELD_URL) hx-vals=(path_vals(path))
                hx-trigger="change" hx-target="#admin-notice" hx-swap="outerHTML";
        }
    }
}

fn textarea_field(label: &str, path: &str, value: &str) -> Markup {
    html! {
        label {
            (label)
            textarea name="value" rows="4"
                hx-post=(names::ADMIN_FIELD_URL) hx-vals=(path_vals(path))
                hx-trigger="change" hx-target="#admin-notice" hx-swap="outerHTML" {
                (value)
            }
        }
    }
}

fn commit_button(label: &str) -> Markup {
    html! {
        button hx-post=(names::ADMIN_COMMIT_URL)
            hx-target="#admin-notice" hx-swap="outerHTML" {
            (label)
        }
    }
}

fn path_vals(path: &str) -> String {
    format!(r#"{{"path": "{path}"}}"#)
}
