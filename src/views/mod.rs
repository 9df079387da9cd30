pub mod admin;
pub mod chat;
pub mod course;
pub mod lesson;

use maud::{html, Markup, DOCTYPE};

use crate::names;

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
        style {
            (maud::PreEscaped(r#"
            .locked { opacity: 0.5; filter: grayscale(1); }
            .option-correct { border: 2px solid #2e7d32; background-color: #e8f5e9; }
            .option-wrong { border: 2px solid #c62828; background-color: #ffebee; }
            .option-selected { border: 2px solid #1565c0; }
            .prewrap { white-space: pre-line; }
            #chat-box { position: fixed; bottom: 1rem; right: 1rem; width: 24rem; z-index: 10; }
            #chat-messages { max-height: 20rem; overflow-y: auto; }
            "#))
        }
    }
}

fn js() -> Markup {
    html! {
        script src="https://unpkg.com/htmx.org@2.0.4" {}
    }
}

fn header() -> Markup {
    html! {
        header {
            nav {
                ul {
                    li."secondary" {
                        a href=(names::HOME_URL) {
                            strong { "Geschiedenis Interactief" }
                        }
                    }
                }
                ul {
                    li."secondary" { (names::VERSION) }
                }
            }
        }
    }
}

fn main(body: Markup) -> Markup {
    html! {
        main { (body) }
    }
}

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (js())

            title { (format!("{title} - Geschiedenis Interactief")) }
        }

        body."container" {
            (header())
            (main(body))
        }
    }
}

pub fn titled(title: &str, body: Markup) -> Markup {
    html! {
        title { (title) " - Geschiedenis Interactief" }
        (body)
    }
}

/// Full page for a direct request, titled fragment for an htmx swap.
pub fn render(is_htmx: bool, title: &str, body: Markup) -> Markup {
    if is_htmx {
        titled(title, body)
    } else {
        page(title, body)
    }
}
