use std::{collections::HashMap, sync::Arc};

use campus_core::{
    errors::{CampusError, CampusResult},
    models::{
        auth::Session,
        user::{NewUser, RegisterRequest, User},
    },
};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{password, repositories::user::UserStore};

/// Server-side sessions addressed by opaque tokens.
///
/// Registration and login go through the shared [`UserStore`]; the client
/// only ever receives the session token.
pub struct SessionManager {
    users: Arc<RwLock<UserStore>>,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionManager {
    pub fn new(users: Arc<RwLock<UserStore>>) -> Self {
        Self {
            users,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a new, already approved account.
    ///
    /// # Errors
    ///
    /// - `Validation` when a required field is blank, the role is admin, or
    ///   the email is taken
    /// - `Internal` when the password cannot be hashed
    pub async fn register(&self, request: RegisterRequest) -> CampusResult<User> {
        request.validate()?;
        let password_hash = password::hash_password(&request.password)
            .map_err(|e| CampusError::Internal(e.into()))?;

        let mut users = self.users.write().await;
        if users.user_by_email(&request.email).is_some() {
            return Err(CampusError::Validation(format!(
                "An account already exists for {}",
                request.email
            )));
        }

        let user = users.add_user(NewUser {
            email: request.email,
            password_hash,
            role: request.role,
            name: request.name,
            approved: true,
            profile: request.profile,
            facial_data: None,
        });
        info!("Registered user: id={}, role={}", user.id, user.role);

        Ok(user)
    }

    /// Verifies the credentials and opens a session.
    pub async fn login(&self, email: &str, password: &str) -> CampusResult<(Session, User)> {
        let user = self.users.read().await.user_by_email(email);

        let verified = match &user {
            Some(user) => password::verify_password(&user.password_hash, password)
                .map_err(|e| CampusError::Internal(e.into()))?,
            None => false,
        };

        let user = match user {
            Some(user) if verified => user,
            _ => {
                warn!("Failed login attempt for {}", email);
                return Err(CampusError::Authentication(
                    "Invalid email or password".to_string(),
                ));
            }
        };

        let session = Session {
            token: Uuid::new_v4(),
            user_id: user.id,
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .await
            .insert(session.token, session.clone());
        info!("User logged in: id={}, role={}", user.id, user.role);

        Ok((session, user))
    }

    /// Ends the session. Returns false if the token was unknown.
    pub async fn logout(&self, token: Uuid) -> bool {
        self.sessions.write().await.remove(&token).is_some()
    }

    /// Resolves a token to the latest version of its user. Sessions whose
    /// user has since been deleted are dropped.
    pub async fn current_user(&self, token: Uuid) -> Option<User> {
        let user_id = self.sessions.read().await.get(&token)?.user_id;

        let user = self.users.read().await.user_by_id(user_id);
        if user.is_none() {
            self.sessions.write().await.remove(&token);
        }
        user
    }

    /// Ends every session belonging to `user_id`.
    pub async fn revoke_user(&self, user_id: Uuid) {
        self.sessions
            .write()
            .await
            .retain(|_, session| session.user_id != user_id);
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}
