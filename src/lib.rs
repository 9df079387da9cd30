pub mod admin;
pub mod chat;
pub mod content;
pub mod extractors;
pub mod handlers;
pub mod names;
pub mod progression;
pub mod rejections;
pub mod session;
pub mod utils;
pub mod views;

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::sync::Mutex;

use crate::admin::AdminSession;
use crate::chat::{ChatSession, GeminiClient};
use crate::content::store::ContentStore;
use crate::content::Catalog;
use crate::session::StudentSession;

/// Everything owned by the single active session. One writer, one lock.
pub struct App {
    pub catalog: Catalog,
    pub student: StudentSession,
    pub admin: AdminSession,
    pub chat: ChatSession,
    pub admin_token: Option<String>,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            student: StudentSession::default(),
            admin: AdminSession::default(),
            chat: ChatSession::new(),
            admin_token: None,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub app: Arc<Mutex<App>>,
    pub assistant: GeminiClient,
    pub admin_password: String,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(store: ContentStore, assistant: GeminiClient, admin_password: String) -> Self {
        let catalog = store.load();
        Self {
            store,
            app: Arc::new(Mutex::new(App::new(catalog))),
            assistant,
            admin_password,
            secure_cookies: false,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::course::routes())
        .merge(handlers::lesson::routes())
        .merge(handlers::admin::routes())
        .merge(handlers::chat::routes())
        .layer(middleware::from_fn(csrf_check))
        .with_state(state)
}

async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let has_hx_request = req
            .headers()
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");

        if !has_hx_request {
            return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
        }
    }

    next.run(req).await
}
