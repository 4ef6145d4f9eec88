pub mod attendance;
pub mod note;
pub mod reminder;
pub mod session;
pub mod user;
