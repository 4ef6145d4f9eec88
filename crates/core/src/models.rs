pub mod attendance;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod note;
pub mod reminder;
pub mod user;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
