use std::sync::Arc;

use axum::http::HeaderValue;
use axum_test::TestServer;
use campus_api::{build_router, ApiState};
use campus_assistant::mock::MockChatGateway;
use campus_db::{
    repositories::attendance::DEFAULT_LOW_ATTENDANCE_THRESHOLD,
    seed::{demo_database, DEMO_PASSWORD},
};
use serde_json::{json, Value};
use uuid::Uuid;

pub const ADMIN: &str = "admin@example.com";
pub const FACULTY: &str = "faculty@example.com";
pub const STUDENT: &str = "student@example.com";
pub const STUDENT2: &str = "student2@example.com";

/// A router over the demo campus, served in-process.
pub struct TestContext {
    pub server: TestServer,
    pub state: Arc<ApiState>,
}

impl TestContext {
    /// Context whose chat gateway must never be called.
    pub fn new() -> Self {
        Self::with_gateway(MockChatGateway::new())
    }

    pub fn with_gateway(gateway: MockChatGateway) -> Self {
        let db = demo_database().unwrap();
        let state = Arc::new(ApiState::new(
            db,
            Arc::new(gateway),
            DEFAULT_LOW_ATTENDANCE_THRESHOLD,
        ));
        let server = TestServer::new(build_router(state.clone())).unwrap();

        Self { server, state }
    }

    /// Logs in with the demo password and returns the session token.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .server
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": DEMO_PASSWORD }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn user_id(&self, email: &str) -> Uuid {
        self.state
            .db
            .users
            .read()
            .await
            .user_by_email(email)
            .unwrap()
            .id
    }
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}
