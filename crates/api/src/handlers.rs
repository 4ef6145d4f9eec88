pub mod attendance;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod notes;
pub mod reminders;
pub mod users;
