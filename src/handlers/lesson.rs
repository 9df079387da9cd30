use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Form, Router};
use maud::{html, Markup};
use serde::Deserialize;

use crate::content;
use crate::extractors::IsHtmx;
use crate::progression::{self, LessonStatus};
use crate::rejections::{AppError, OptionExt};
use crate::session::QuizSlot;
use crate::{names, views, App, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/lesson/{lesson_id}", get(open_lesson))
        .route("/lesson/select/{slot}", post(select_option))
        .route("/lesson/submit/{slot}", post(submit_answer))
        .route(names::NEXT_LESSON_URL, post(next_lesson))
}

async fn open_lesson(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Path(lesson_id): Path<u32>,
) -> Result<Markup, AppError> {
    let mut app = state.app.lock().await;
    let course_id = app.student.course_id.clone().or_not_found()?;
    {
        let course = content::find_course(&app.catalog, &course_id).or_not_found()?;
        course.lesson(lesson_id).or_not_found()?;
        let status =
            progression::lesson_status(lesson_id, &app.student.completed, app.student.force_unlock);
        if status == LessonStatus::Locked {
            return Err(AppError::Input("Deze les is nog vergrendeld"));
        }
    }
    app.student.start_lesson(lesson_id);

    let app = &*app;
    let course = content::find_course(&app.catalog, &course_id).or_not_found()?;
    let lesson = course.lesson(lesson_id).or_not_found()?;
    let session = app.student.lesson.as_ref().or_not_found()?;
    let body = html! {
        (views::lesson::lesson(course, lesson, session))
        (views::chat::widget(&app.chat))
    };
    Ok(views::render(is_htmx, &lesson.title, body))
}

#[derive(Deserialize)]
struct SelectForm {
    index: usize,
}

async fn select_option(
    State(state): State<AppState>,
    Path(slot): Path<String>,
    Form(form): Form<SelectForm>,
) -> Result<Markup, AppError> {
    let slot = QuizSlot::parse(&slot).or_not_found()?;
    let mut app = state.app.lock().await;
    let (course_id, lesson_id) = active_lesson(&app)?;

    let option_count = {
        let course = content::find_course(&app.catalog, &course_id).or_not_found()?;
        let lesson = course.lesson(lesson_id).or_not_found()?;
        slot.question(lesson).options.len()
    };
    app.student
        .lesson
        .as_mut()
        .or_not_found()?
        .quiz_mut(slot)
        .select(form.index, option_count);

    render_lesson(&app, &course_id, lesson_id)
}

async fn submit_answer(
    State(state): State<AppState>,
    Path(slot): Path<String>,
) -> Result<Markup, AppError> {
    let slot = QuizSlot::parse(&slot).or_not_found()?;
    let mut app = state.app.lock().await;
    let (course_id, lesson_id) = active_lesson(&app)?;

    let question = {
        let course = content::find_course(&app.catalog, &course_id).or_not_found()?;
        let lesson = course.lesson(lesson_id).or_not_found()?;
        slot.question(lesson).clone()
    };
    app.student
        .lesson
        .as_mut()
        .or_not_found()?
        .quiz_mut(slot)
        .submit(&question);

    render_lesson(&app, &course_id, lesson_id)
}

async fn next_lesson(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
) -> Result<Markup, AppError> {
    let mut app = state.app.lock().await;
    let course_id = app.student.course_id.clone().or_not_found()?;
    let course = content::find_course(&app.catalog, &course_id)
        .or_not_found()?
        .clone();

    match app.student.finish_lesson(&course) {
        Some(next) => {
            let app = &*app;
            let lesson = course.lesson(next).or_not_found()?;
            let session = app.student.lesson.as_ref().or_not_found()?;
            let body = html! {
                (views::lesson::lesson(&course, lesson, session))
                (views::chat::widget(&app.chat))
            };
            Ok(views::render(is_htmx, &lesson.title, body))
        }
        None => {
            let app = &*app;
            let body = html! {
                (views::course::menu(&course, &app.student.completed, app.student.force_unlock))
                (views::chat::widget(&app.chat))
            };
            Ok(views::render(is_htmx, &course.title, body))
        }
    }
}

fn active_lesson(app: &App) -> Result<(String, u32), AppError> {
    let course_id = app.student.course_id.clone().or_not_found()?;
    let lesson_id = app.student.lesson.as_ref().or_not_found()?.lesson_id;
    Ok((course_id, lesson_id))
}

fn render_lesson(app: &App, course_id: &str, lesson_id: u32) -> Result<Markup, AppError> {
    let course = content::find_course(&app.catalog, course_id).or_not_found()?;
    let lesson = course.lesson(lesson_id).or_not_found()?;
    let session = app.student.lesson.as_ref().or_not_found()?;
    Ok(views::lesson::lesson(course, lesson, session))
}
