use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Form, Router};
use axum_extra::extract::CookieJar;
use maud::Markup;
use serde::Deserialize;
use uuid::Uuid;

use crate::admin;
use crate::content;
use crate::extractors::{AdminGuard, IsHtmx};
use crate::rejections::{AppError, OptionExt, ResultExt};
use crate::{names, utils, views, App, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::ADMIN_URL, get(panel))
        .route(names::ADMIN_LOGIN_URL, post(login))
        .route(names::ADMIN_LOGOUT_URL, post(logout))
        .route(names::ADMIN_STUDENT_VIEW_URL, post(student_view))
        .route("/admin/course/{course_id}", get(select_course))
        .route("/admin/lesson/{lesson_id}", get(select_lesson))
        .route(names::ADMIN_FIELD_URL, post(edit_field))
        .route(names::ADMIN_COMMIT_URL, post(commit))
        .route(names::ADMIN_ADD_COURSE_URL, post(add_course))
        .route(names::ADMIN_ADD_LESSON_URL, post(add_lesson))
        .route("/admin/delete-course/{course_id}", delete(delete_course))
        .route("/admin/delete-lesson/{lesson_id}", delete(delete_lesson))
        .route(names::ADMIN_RESET_URL, post(reset))
}

async fn panel(State(state): State<AppState>, IsHtmx(is_htmx): IsHtmx, jar: CookieJar) -> Markup {
    let app = state.app.lock().await;
    let authed = jar
        .get(names::ADMIN_SESSION_COOKIE_NAME)
        .is_some_and(|c| app.admin_token.as_deref() == Some(c.value()));

    if authed {
        views::render(
            is_htmx,
            "Docent Paneel",
            views::admin::panel(&app.catalog, &app.admin, None),
        )
    } else {
        views::render(is_htmx, "Docent Login", views::admin::login(false))
    }
}

#[derive(Deserialize)]
struct LoginForm {
    password: String,
}

async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if form.password != state.admin_password {
        tracing::warn!("failed teacher panel login attempt");
        return Ok(views::admin::login(true).into_response());
    }

    let token = Uuid::new_v4().to_string();
    let mut app = state.app.lock().await;
    app.admin_token = Some(token.clone());

    let App {
        catalog,
        admin: editor,
        ..
    } = &mut *app;
    if let Some(id) = catalog.first().map(|c| c.id.clone()) {
        editor.select_course(catalog, &id);
    }

    let cookie = utils::cookie(names::ADMIN_SESSION_COOKIE_NAME, &token, state.secure_cookies)
        .reject("could not build session cookie")?;
    let markup = views::admin::panel(catalog, editor, None);
    Ok(([(header::SET_COOKIE, cookie)], markup).into_response())
}

async fn logout(State(state): State<AppState>, _: AdminGuard) -> Result<Response, AppError> {
    let mut app = state.app.lock().await;
    app.admin_token = None;
    app.admin.clear_selection();
    app.student.force_unlock = false;

    let cookie = utils::clear_cookie(names::ADMIN_SESSION_COOKIE_NAME, state.secure_cookies)
        .reject("could not build session cookie")?;
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, cookie);
    headers.insert("HX-Redirect", HeaderValue::from_static(names::HOME_URL));
    Ok((headers, "").into_response())
}

/// Back to the student side with the prerequisite chain disabled, so the
/// teacher can preview any lesson. The panel session itself stays logged in.
async fn student_view(State(state): State<AppState>, _: AdminGuard) -> Response {
    let mut app = state.app.lock().await;
    app.student.force_unlock = true;
    app.student.leave_course();

    let mut headers = HeaderMap::new();
    headers.insert("HX-Redirect", HeaderValue::from_static(names::HOME_URL));
    (headers, "").into_response()
}

async fn select_course(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(course_id): Path<String>,
) -> Result<Markup, AppError> {
    let mut app = state.app.lock().await;
    let App {
        catalog,
        admin: editor,
        ..
    } = &mut *app;
    if !editor.select_course(catalog, &course_id) {
        return Err(AppError::NotFound);
    }
    Ok(views::admin::panel(catalog, editor, None))
}

async fn select_lesson(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(lesson_id): Path<u32>,
) -> Result<Markup, AppError> {
    let mut app = state.app.lock().await;
    let App {
        catalog,
        admin: editor,
        ..
    } = &mut *app;
    if !editor.select_lesson(catalog, lesson_id) {
        return Err(AppError::NotFound);
    }
    Ok(views::admin::panel(catalog, editor, None))
}

#[derive(Deserialize)]
struct FieldForm {
    path: String,
    value: String,
}

async fn edit_field(
    State(state): State<AppState>,
    _: AdminGuard,
    Form(form): Form<FieldForm>,
) -> Markup {
    let mut app = state.app.lock().await;
    match app.admin.edit_field(&form.path, &form.value) {
        Ok(()) => views::admin::notice("Aangepast, nog niet opgeslagen", true),
        Err(e) => {
            tracing::warn!("rejected field edit on {}: {e}", form.path);
            views::admin::notice(&e.to_string(), false)
        }
    }
}

async fn commit(State(state): State<AppState>, _: AdminGuard) -> Markup {
    let mut app = state.app.lock().await;
    let result = {
        let App {
            catalog,
            admin: editor,
            ..
        } = &mut *app;
        editor.commit(catalog)
    };

    match result {
        Ok(()) => {
            state.store.save(&app.catalog);
            views::admin::notice("Opgeslagen!", true)
        }
        Err(e) => {
            tracing::warn!("rejected commit: {e}");
            views::admin::notice(&e.to_string(), false)
        }
    }
}

async fn add_course(State(state): State<AppState>, _: AdminGuard) -> Markup {
    let mut app = state.app.lock().await;
    let id = admin::add_course(&mut app.catalog);
    state.store.save(&app.catalog);

    let App {
        catalog,
        admin: editor,
        ..
    } = &mut *app;
    editor.select_course(catalog, &id);
    views::admin::panel(catalog, editor, Some("Nieuw thema toegevoegd"))
}

async fn delete_course(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(course_id): Path<String>,
) -> Markup {
    let mut app = state.app.lock().await;
    let next = admin::delete_course(&mut app.catalog, &course_id);
    state.store.save(&app.catalog);

    let App {
        catalog,
        admin: editor,
        student,
        ..
    } = &mut *app;
    if student.course_id.as_deref() == Some(course_id.as_str()) {
        student.leave_course();
    }
    match next {
        Some(id) => {
            editor.select_course(catalog, &id);
        }
        None => editor.clear_selection(),
    }
    views::admin::panel(catalog, editor, Some("Thema verwijderd"))
}

async fn add_lesson(State(state): State<AppState>, _: AdminGuard) -> Result<Markup, AppError> {
    let mut app = state.app.lock().await;
    let lesson_id = {
        let App {
            catalog,
            admin: editor,
            ..
        } = &mut *app;
        let course_id = editor
            .selected_course
            .clone()
            .ok_or(AppError::Input("Selecteer eerst een thema"))?;
        let course = content::find_course_mut(catalog, &course_id).or_not_found()?;
        admin::add_lesson(course)
    };
    state.store.save(&app.catalog);

    let App {
        catalog,
        admin: editor,
        ..
    } = &mut *app;
    editor.select_lesson(catalog, lesson_id);
    Ok(views::admin::panel(catalog, editor, Some("Nieuwe les toegevoegd")))
}

async fn delete_lesson(
    State(state): State<AppState>,
    _: AdminGuard,
    Path(lesson_id): Path<u32>,
) -> Result<Markup, AppError> {
    let mut app = state.app.lock().await;
    let (course_id, first) = {
        let App {
            catalog,
            admin: editor,
            ..
        } = &mut *app;
        let course_id = editor
            .selected_course
            .clone()
            .ok_or(AppError::Input("Selecteer eerst een thema"))?;
        let course = content::find_course_mut(catalog, &course_id).or_not_found()?;
        (course_id, admin::delete_lesson(course, lesson_id))
    };
    state.store.save(&app.catalog);

    let App {
        catalog,
        admin: editor,
        student,
        ..
    } = &mut *app;
    // Surviving lessons were renumbered; any in-flight visit of this course
    // would point at the wrong lesson.
    if student.course_id.as_deref() == Some(course_id.as_str()) {
        student.completed.clear();
        student.lesson = None;
    }
    match first {
        Some(id) => {
            editor.select_lesson(catalog, id);
        }
        None => {
            editor.select_course(catalog, &course_id);
        }
    }
    Ok(views::admin::panel(catalog, editor, Some("Les verwijderd")))
}

/// Put the factory content back. The catalog in memory is replaced but not
/// written out; the next commit or structural edit persists it.
async fn reset(State(state): State<AppState>, _: AdminGuard) -> Markup {
    let mut app = state.app.lock().await;
    app.catalog = state.store.reset();

    let App {
        catalog,
        admin: editor,
        student,
        ..
    } = &mut *app;
    student.leave_course();
    match catalog.first().map(|c| c.id.clone()) {
        Some(id) => {
            editor.select_course(catalog, &id);
        }
        None => editor.clear_selection(),
    }
    views::admin::panel(catalog, editor, Some("Standaardinhoud hersteld"))
}
