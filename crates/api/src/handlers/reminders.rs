use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use campus_core::{
    errors::CampusError,
    models::{
        reminder::{CreateReminderRequest, Reminder},
        user::Role,
        DeleteResponse,
    },
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{AuthUser, RequireStaff},
        error_handling::AppError,
        extract::{AppJson, AppPath},
    },
    ApiState,
};

#[axum::debug_handler]
pub async fn create_reminder(
    State(state): State<Arc<ApiState>>,
    RequireStaff(staff): RequireStaff,
    AppJson(payload): AppJson<CreateReminderRequest>,
) -> Result<(StatusCode, Json<Reminder>), AppError> {
    payload.validate()?;

    let reminder = state
        .db
        .reminders
        .write()
        .await
        .add_reminder(staff.id(), payload);
    info!(
        "Reminder created: id={}, creator_id={}, target_role={:?}",
        reminder.id, reminder.creator_id, reminder.target_role
    );

    Ok((StatusCode::CREATED, Json(reminder)))
}

#[axum::debug_handler]
pub async fn upcoming_reminders(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
) -> Json<Vec<Reminder>> {
    let reminders = state
        .db
        .reminders
        .read()
        .await
        .reminders_for_role(auth.role(), Utc::now());
    Json(reminders)
}

#[axum::debug_handler]
pub async fn reminder_history(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
) -> Json<Vec<Reminder>> {
    Json(state.db.reminders.read().await.history_for_role(auth.role()))
}

#[axum::debug_handler]
pub async fn my_reminders(
    State(state): State<Arc<ApiState>>,
    RequireStaff(staff): RequireStaff,
) -> Json<Vec<Reminder>> {
    Json(state.db.reminders.read().await.reminders_by_creator(staff.id()))
}

/// Creators may delete their own reminders; admins may delete any.
#[axum::debug_handler]
pub async fn delete_reminder(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let mut reminders = state.db.reminders.write().await;
    let reminder = reminders.reminder_by_id(id).ok_or_else(|| {
        AppError(CampusError::NotFound(format!("Reminder with ID {} not found", id)))
    })?;

    if reminder.creator_id != auth.id() && auth.role() != Role::Admin {
        return Err(AppError(CampusError::Authorization(
            "Only the creator or an admin may delete this reminder".to_string(),
        )));
    }

    let deleted = reminders.delete_reminder(id);
    Ok(Json(DeleteResponse { deleted }))
}
