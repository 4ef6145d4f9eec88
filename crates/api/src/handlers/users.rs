//! # Account Handlers
//!
//! Admin account management plus the self-service profile and facial-data
//! endpoints.
//!
//! ## Access rules
//!
//! - Listing and creating accounts is admin-only.
//! - Any signed-in user may read their own account; staff may read anyone's.
//! - Users may edit their own profile, but only an admin may change a role or
//!   approval flag.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use campus_core::{
    errors::{require_field, CampusError},
    models::{
        user::{
            CreateUserRequest, FacialDataRequest, NewUser, Role, StudentQuery, UpdateUserRequest,
            UserResponse,
        },
        DeleteResponse,
    },
};
use campus_db::password;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{AuthUser, RequireAdmin, RequireStaff},
        error_handling::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    ApiState,
};

fn user_not_found(id: Uuid) -> AppError {
    AppError(CampusError::NotFound(format!("User with ID {} not found", id)))
}

fn hash(password: &str) -> Result<String, AppError> {
    password::hash_password(password).map_err(|e| AppError(CampusError::Internal(e.into())))
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<Vec<UserResponse>> {
    let users = state.db.users.read().await.all_users();
    Json(users.into_iter().map(UserResponse::from).collect())
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<ApiState>>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;
    let password_hash = hash(&payload.password)?;

    let mut users = state.db.users.write().await;
    if users.user_by_email(&payload.email).is_some() {
        return Err(AppError(CampusError::Validation(format!(
            "An account already exists for {}",
            payload.email
        ))));
    }

    let user = users.add_user(NewUser {
        email: payload.email,
        password_hash,
        role: payload.role,
        name: payload.name,
        approved: payload.approved.unwrap_or(true),
        profile: payload.profile,
        facial_data: None,
    });
    info!("Admin {} created user: id={}, role={}", admin.id(), user.id, user.role);

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[axum::debug_handler]
pub async fn list_students(
    State(state): State<Arc<ApiState>>,
    RequireStaff(_staff): RequireStaff,
    AppQuery(query): AppQuery<StudentQuery>,
) -> Json<Vec<UserResponse>> {
    let users = state.db.users.read().await;
    let students = match query.section.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(section) => users.students_by_section(section),
        None => users.students(),
    };

    Json(students.into_iter().map(UserResponse::from).collect())
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    if !auth.is_self_or_staff(id) {
        return Err(AppError(CampusError::Authorization(
            "You may only view your own account".to_string(),
        )));
    }

    let user = state
        .db
        .users
        .read()
        .await
        .user_by_id(id)
        .ok_or_else(|| user_not_found(id))?;

    Ok(Json(user.into()))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if !auth.is_self_or_admin(id) {
        return Err(AppError(CampusError::Authorization(
            "You may only edit your own account".to_string(),
        )));
    }
    if payload.changes_privileges() && auth.role() != Role::Admin {
        return Err(AppError(CampusError::Authorization(
            "Only an admin may change roles, approval or taught subjects".to_string(),
        )));
    }
    payload.validate()?;

    let password_hash = match &payload.password {
        Some(password) => Some(hash(password)?),
        None => None,
    };

    let mut users = state.db.users.write().await;
    if let Some(email) = &payload.email {
        if users.user_by_email(email).is_some_and(|other| other.id != id) {
            return Err(AppError(CampusError::Validation(format!(
                "An account already exists for {}",
                email
            ))));
        }
    }

    let user = users
        .update_user(id, |user| {
            payload.apply(user);
            if let Some(password_hash) = password_hash {
                user.password_hash = password_hash;
            }
        })
        .ok_or_else(|| user_not_found(id))?;

    Ok(Json(user.into()))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<Arc<ApiState>>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.db.users.write().await.delete_user(id);
    if !deleted {
        return Err(user_not_found(id));
    }

    state.db.sessions.revoke_user(id).await;
    info!("Admin {} deleted user: id={}", admin.id(), id);

    Ok(Json(DeleteResponse { deleted }))
}

#[axum::debug_handler]
pub async fn set_facial_data(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<FacialDataRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if !auth.is_self_or_admin(id) {
        return Err(AppError(CampusError::Authorization(
            "You may only register your own face".to_string(),
        )));
    }
    require_field(&payload.image_data, "image_data")?;

    let user = state
        .db
        .users
        .write()
        .await
        .set_facial_data(id, payload.image_data)
        .ok_or_else(|| user_not_found(id))?;
    info!("Stored facial data for user: id={}", id);

    Ok(Json(user.into()))
}
