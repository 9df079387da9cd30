mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use histoquest::{names, router};
use tower::ServiceExt;

fn app() -> axum::Router {
    router(common::create_test_state("geheim"))
}

#[tokio::test]
async fn protected_admin_routes_reject_requests_without_a_session_cookie() {
    let app = app();

    let cases = [
        (Method::GET, "/admin/course/nl-indo"),
        (Method::GET, "/admin/lesson/1"),
        (Method::POST, names::ADMIN_FIELD_URL),
        (Method::POST, names::ADMIN_COMMIT_URL),
        (Method::POST, names::ADMIN_ADD_COURSE_URL),
        (Method::POST, names::ADMIN_ADD_LESSON_URL),
        (Method::DELETE, "/admin/delete-course/nl-indo"),
        (Method::DELETE, "/admin/delete-lesson/1"),
        (Method::POST, names::ADMIN_RESET_URL),
        (Method::POST, names::ADMIN_LOGOUT_URL),
        (Method::POST, names::ADMIN_STUDENT_VIEW_URL),
    ];

    for (method, uri) in cases {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("HX-Request", "true")
            .body(Body::empty())
            .expect("request build should succeed");
        let resp = app
            .clone()
            .oneshot(req)
            .await
            .expect("router should respond");

        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "expected UNAUTHORIZED for {uri}",
        );
    }
}

#[tokio::test]
async fn state_changing_requests_without_the_htmx_header_are_blocked() {
    let app = app();

    let req = Request::builder()
        .method(Method::POST)
        .uri(names::RESTART_URL)
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_issues_a_cookie_that_unlocks_the_panel() {
    let app = app();

    let req = Request::builder()
        .method(Method::POST)
        .uri(names::ADMIN_LOGIN_URL)
        .header("HX-Request", "true")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("password=geheim"))
        .expect("request build should succeed");
    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with(names::ADMIN_SESSION_COOKIE_NAME));

    let session = cookie.split(';').next().unwrap().to_string();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/admin/course/nl-indo")
        .header(header::COOKIE, session)
        .body(Body::empty())
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_sets_no_cookie() {
    let app = app();

    let req = Request::builder()
        .method(Method::POST)
        .uri(names::ADMIN_LOGIN_URL)
        .header("HX-Request", "true")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("password=fout"))
        .expect("request build should succeed");
    let resp = app.oneshot(req).await.expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn student_routes_are_open() {
    let app = app();

    for uri in [names::HOME_URL, "/course/nl-indo", "/admin"] {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("request build should succeed");
        let resp = app
            .clone()
            .oneshot(req)
            .await
            .expect("router should respond");
        assert_eq!(resp.status(), StatusCode::OK, "expected OK for {uri}");
    }
}
