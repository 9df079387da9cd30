use maud::{html, Markup};

use crate::chat::{ChatSession, Role};
use crate::names;

/// Floating Digi Docent box, included on every student view.
pub fn widget(session: &ChatSession) -> Markup {
    html! {
        details #chat-box {
            summary role="button" { "💬 Digi Docent" }
            article #chat-body {
                (body(session))
            }
        }
    }
}

/// The part that gets swapped after a send: transcript plus a fresh form.
pub fn body(session: &ChatSession) -> Markup {
    html! {
        (transcript(session))
        (compose(session.is_pending()))
    }
}

fn transcript(session: &ChatSession) -> Markup {
    html! {
        div #chat-messages {
            @for message in &session.messages {
                @match message.role {
                    Role::Assistant => {
                        p { strong { "Digi Docent: " } (message.text) }
                    }
                    Role::User => {
                        p { em { "Jij: " } (message.text) }
                    }
                }
            }
            @if session.is_pending() {
                p { em { "Digi Docent is aan het typen..." } }
            }
        }
    }
}

fn compose(pending: bool) -> Markup {
    html! {
        form hx-post=(names::CHAT_SEND_URL) hx-target="#chat-body" hx-swap="innerHTML" {
            fieldset role="group" {
                input name="message" placeholder="Stel je vraag..."
                    autocomplete="off" disabled[pending];
                button disabled[pending] { "Stuur" }
            }
        }
    }
}
