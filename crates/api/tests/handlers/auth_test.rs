use axum::http::{header::AUTHORIZATION, StatusCode};
use campus_core::models::user::UserResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{bearer, TestContext, STUDENT};

#[tokio::test]
async fn test_login_returns_token_without_password_hash() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": STUDENT, "password": "password" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], STUDENT);
    assert_eq!(body["user"]["role"], "student");
    assert!(body["user"].get("password_hash").is_none());
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "email": STUDENT, "password": "wrong" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Invalid email or password"));
}

#[tokio::test]
async fn test_me_requires_a_known_token() {
    let ctx = TestContext::new();

    ctx.server
        .get("/api/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, bearer(&uuid::Uuid::new_v4().to_string()))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let token = ctx.login(STUDENT).await;
    let me: UserResponse = ctx
        .server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(me.email, STUDENT);
    assert!(me.has_facial_data);
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let ctx = TestContext::new();
    let token = ctx.login(STUDENT).await;

    let response = ctx
        .server
        .post("/api/auth/logout")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["logged_out"], true);

    ctx.server
        .get("/api/auth/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_login() {
    let ctx = TestContext::new();
    let registration = json!({
        "email": "dana@example.com",
        "password": "s3cret!",
        "name": "Dana Scully",
        "role": "student",
        "section": "B",
        "roll_no": "CS042"
    });

    let response = ctx.server.post("/api/auth/register").json(&registration).await;
    response.assert_status(StatusCode::CREATED);
    let user: UserResponse = response.json();
    assert!(user.approved);
    assert_eq!(user.profile.section.as_deref(), Some("B"));

    ctx.server
        .post("/api/auth/register")
        .json(&registration)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .post("/api/auth/login")
        .json(&json!({ "email": "dana@example.com", "password": "s3cret!" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_register_rejects_blank_name() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({
            "email": "blank@example.com",
            "password": "pw",
            "name": "   ",
            "role": "faculty"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("name is required"));
}

#[tokio::test]
async fn test_admin_role_cannot_be_self_registered() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&json!({
            "email": "eve@example.com",
            "password": "pw",
            "name": "Eve",
            "role": "admin"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .contains("Admin accounts cannot be self-registered"));

    ctx.server
        .post("/api/auth/login")
        .json(&json!({ "email": "eve@example.com", "password": "pw" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health: Value = ctx.server.get("/health").await.json();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["active_sessions"], 0);

    let version: Value = ctx.server.get("/version").await.json();
    assert_eq!(version["name"], "campus-api");
}
