pub mod application;
pub mod catalog;
pub mod chat_stage;
pub mod question;
