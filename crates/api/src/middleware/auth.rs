//! # Authentication Module
//!
//! Request extractors that resolve the `Authorization: Bearer <token>` header
//! to a signed-in user, plus role guards layered on top of them.
//!
//! A missing, malformed or unknown token is rejected with 401. A valid token
//! whose user lacks the required role is rejected with 403.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use campus_core::{
    errors::CampusError,
    models::user::{Role, User},
};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// The signed-in user behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub token: Uuid,
    pub user: User,
}

impl AuthUser {
    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn id(&self) -> Uuid {
        self.user.id
    }

    /// True when the caller is `user_id` or holds a staff role.
    pub fn is_self_or_staff(&self, user_id: Uuid) -> bool {
        self.user.id == user_id || self.user.role.is_staff()
    }

    /// True when the caller is `user_id` or an admin.
    pub fn is_self_or_admin(&self, user_id: Uuid) -> bool {
        self.user.id == user_id || self.user.role == Role::Admin
    }
}

/// Extracts the token from a `Bearer` authorization header.
pub fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            AppError(CampusError::Authentication(
                "Missing or malformed bearer token".to_string(),
            ))
        })?;

        let user = state.db.sessions.current_user(token).await.ok_or_else(|| {
            AppError(CampusError::Authentication(
                "Session expired or unknown".to_string(),
            ))
        })?;

        Ok(AuthUser { token, user })
    }
}

fn require_role(user: &AuthUser, allowed: &[Role], message: &str) -> Result<(), AppError> {
    if allowed.contains(&user.role()) {
        Ok(())
    } else {
        Err(AppError(CampusError::Authorization(message.to_string())))
    }
}

/// Requires the `admin` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> Result<Json<()>, AppError> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(&user, &[Role::Admin], "Admin role required")?;
        Ok(RequireAdmin(user))
    }
}

/// Requires `faculty` or `admin`.
pub struct RequireStaff(pub AuthUser);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(
            &user,
            &[Role::Faculty, Role::Admin],
            "Faculty or Admin role required",
        )?;
        Ok(RequireStaff(user))
    }
}

/// Requires the `faculty` role.
pub struct RequireFaculty(pub AuthUser);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for RequireFaculty {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(&user, &[Role::Faculty], "Faculty role required")?;
        Ok(RequireFaculty(user))
    }
}

/// Requires the `student` role.
pub struct RequireStudent(pub AuthUser);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require_role(&user, &[Role::Student], "Student role required")?;
        Ok(RequireStudent(user))
    }
}
