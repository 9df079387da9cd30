pub mod admin;
pub mod chat;
pub mod course;
pub mod lesson;
