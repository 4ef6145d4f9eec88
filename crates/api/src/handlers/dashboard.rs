use axum::{extract::State, Json};
use campus_core::models::{
    dashboard::{DashboardResponse, RECENT_NOTES_LIMIT},
    user::Role,
};
use chrono::Utc;
use std::sync::Arc;

use crate::{middleware::auth::AuthUser, ApiState};

/// Summary for the caller's role.
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
) -> Json<DashboardResponse> {
    let now = Utc::now();

    let summary = match auth.role() {
        Role::Student => {
            let mut recent_notes = state.db.notes.read().await.approved_notes();
            recent_notes.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
            recent_notes.truncate(RECENT_NOTES_LIMIT);

            DashboardResponse::Student {
                attendance_percentage: state.db.attendance.read().await.overall_percentage(auth.id()),
                upcoming_reminders: state
                    .db
                    .reminders
                    .read()
                    .await
                    .reminders_for_role(Role::Student, now),
                recent_notes,
            }
        }
        Role::Faculty => DashboardResponse::Faculty {
            notes_uploaded: state.db.notes.read().await.notes_by_faculty(auth.id()).len(),
            upcoming_reminders: state
                .db
                .reminders
                .read()
                .await
                .reminders_for_role(Role::Faculty, now),
        },
        Role::Admin => DashboardResponse::Admin {
            total_users: state.db.users.read().await.len(),
            pending_notes: state.db.notes.read().await.pending_count(),
            attendance: state.db.attendance.read().await.stats_for_admin(),
            total_reminders: state.db.reminders.read().await.len(),
        },
    };

    Json(summary)
}
