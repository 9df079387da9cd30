// Central place for URLs, cookie names and storage keys.

pub const HOME_URL: &str = "/";
pub const RESTART_URL: &str = "/restart";
pub const NEXT_LESSON_URL: &str = "/lesson/next";

pub const ADMIN_URL: &str = "/admin";
pub const ADMIN_LOGIN_URL: &str = "/admin/login";
pub const ADMIN_LOGOUT_URL: &str = "/admin/logout";
pub const ADMIN_COMMIT_URL: &str = "/admin/commit";
pub const ADMIN_FIELD_URL: &str = "/admin/field";
pub const ADMIN_ADD_COURSE_URL: &str = "/admin/add-course";
pub const ADMIN_ADD_LESSON_URL: &str = "/admin/add-lesson";
pub const ADMIN_RESET_URL: &str = "/admin/reset";
pub const ADMIN_STUDENT_VIEW_URL: &str = "/admin/student-view";

pub const CHAT_SEND_URL: &str = "/chat/send";

pub const ADMIN_SESSION_COOKIE_NAME: &str = "docent_session";

pub fn course_url(course_id: &str) -> String {
    format!("/course/{course_id}")
}

pub fn lesson_url(lesson_id: u32) -> String {
    format!("/lesson/{lesson_id}")
}

pub fn select_option_url(slot: &str) -> String {
    format!("/lesson/select/{slot}")
}

pub fn submit_answer_url(slot: &str) -> String {
    format!("/lesson/submit/{slot}")
}

pub fn admin_course_url(course_id: &str) -> String {
    format!("/admin/course/{course_id}")
}

pub fn admin_lesson_url(lesson_id: u32) -> String {
    format!("/admin/lesson/{lesson_id}")
}

pub fn admin_delete_course_url(course_id: &str) -> String {
    format!("/admin/delete-course/{course_id}")
}

pub fn admin_delete_lesson_url(lesson_id: u32) -> String {
    format!("/admin/delete-lesson/{lesson_id}")
}

// Storage keys, named after the records of earlier releases so an exported
// record drops straight into the data directory.
pub const STORAGE_KEY_CURRENT: &str = "history_app_data_v3.json";
pub const STORAGE_KEY_V2: &str = "history_app_data_v2.json";
pub const STORAGE_KEY_V1: &str = "indo_nl_history_lessons_v1.json";
pub const ALL_STORAGE_KEYS: &[&str] = &[STORAGE_KEY_CURRENT, STORAGE_KEY_V2, STORAGE_KEY_V1];

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
