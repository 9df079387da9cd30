use axum::extract::State;
use axum::routing::post;
use axum::{Form, Router};
use maud::Markup;
use serde::Deserialize;

use crate::chat::AssistantClient;
use crate::{names, views, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route(names::CHAT_SEND_URL, post(send))
}

#[derive(Deserialize)]
struct SendForm {
    message: String,
}

/// One chat turn. The state lock is released while the assistant call is in
/// flight; the pending flag keeps a second send from interleaving.
async fn send(State(state): State<AppState>, Form(form): Form<SendForm>) -> Markup {
    let prior = {
        let mut app = state.app.lock().await;
        app.chat.begin(&form.message)
    };

    if let Some(prior) = prior {
        let reply = state.assistant.reply(&prior, form.message.trim()).await;
        let mut app = state.app.lock().await;
        app.chat.finish(reply);
    }

    let app = state.app.lock().await;
    views::chat::body(&app.chat)
}
