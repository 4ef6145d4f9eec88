use serde::{Deserialize, Serialize};

use crate::models::{attendance::AttendanceStats, note::Note, reminder::Reminder};

/// Number of recent approved notes shown on the student dashboard.
pub const RECENT_NOTES_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum DashboardResponse {
    Student {
        attendance_percentage: f64,
        upcoming_reminders: Vec<Reminder>,
        recent_notes: Vec<Note>,
    },
    Faculty {
        notes_uploaded: usize,
        upcoming_reminders: Vec<Reminder>,
    },
    Admin {
        total_users: usize,
        pending_notes: usize,
        attendance: AttendanceStats,
        total_reminders: usize,
    },
}
