use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_field, CampusResult};
use crate::models::user::Role;

/// Audience of a reminder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetRole {
    #[default]
    All,
    Student,
    Faculty,
}

impl TargetRole {
    /// Whether a user holding `role` is in this audience. Admins only see
    /// reminders aimed at everyone.
    pub fn includes(&self, role: Role) -> bool {
        match self {
            TargetRole::All => true,
            TargetRole::Student => role == Role::Student,
            TargetRole::Faculty => role == Role::Faculty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: String,
    pub target_role: TargetRole,
    pub target_users: Vec<Uuid>,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReminderRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub target_role: TargetRole,
    #[serde(default)]
    pub target_users: Vec<Uuid>,
    pub due_date: DateTime<Utc>,
}

impl CreateReminderRequest {
    pub fn validate(&self) -> CampusResult<()> {
        require_field(&self.title, "title")?;
        require_field(&self.description, "description")?;
        Ok(())
    }
}
