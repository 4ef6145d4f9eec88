//! Registration, login and session handlers.

use axum::{extract::State, http::StatusCode, Json};
use campus_core::models::{
    auth::{LoginRequest, LoginResponse, LogoutResponse},
    user::{RegisterRequest, UserResponse},
};
use std::sync::Arc;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError, extract::AppJson},
    ApiState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.db.sessions.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (session, user) = state
        .db
        .sessions
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        token: session.token,
        user: user.into(),
    }))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
) -> Json<LogoutResponse> {
    let logged_out = state.db.sessions.logout(auth.token).await;
    Json(LogoutResponse { logged_out })
}

#[axum::debug_handler]
pub async fn me(State(_state): State<Arc<ApiState>>, auth: AuthUser) -> Json<UserResponse> {
    Json(auth.user.into())
}
