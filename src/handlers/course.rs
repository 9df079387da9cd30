use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use maud::{html, Markup};

use crate::content;
use crate::extractors::IsHtmx;
use crate::rejections::{AppError, OptionExt};
use crate::{names, views, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::HOME_URL, get(home))
        .route("/course/{course_id}", get(open_course))
        .route(names::RESTART_URL, post(restart))
}

async fn home(State(state): State<AppState>, IsHtmx(is_htmx): IsHtmx) -> Markup {
    let mut app = state.app.lock().await;
    app.student.leave_course();

    let body = html! {
        (views::course::chooser(&app.catalog))
        (views::chat::widget(&app.chat))
    };
    views::render(is_htmx, "Kies je avontuur", body)
}

async fn open_course(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Path(course_id): Path<String>,
) -> Result<Markup, AppError> {
    let mut app = state.app.lock().await;
    if content::find_course(&app.catalog, &course_id).is_none() {
        return Err(AppError::NotFound);
    }
    app.student.select_course(&course_id);

    let app = &*app;
    let course = content::find_course(&app.catalog, &course_id).or_not_found()?;
    let body = html! {
        (views::course::menu(course, &app.student.completed, app.student.force_unlock))
        (views::chat::widget(&app.chat))
    };
    Ok(views::render(is_htmx, &course.title, body))
}

async fn restart(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Markup, AppError> {
    let mut app = state.app.lock().await;
    app.student.restart();

    let app = &*app;
    let course = app
        .student
        .course_id
        .as_deref()
        .and_then(|id| content::find_course(&app.catalog, id))
        .or_not_found()?;
    let body = html! {
        (views::course::menu(course, &app.student.completed, app.student.force_unlock))
        (views::chat::widget(&app.chat))
    };
    Ok(views::render(is_htmx, &course.title, body))
}
