use axum::http::{header::AUTHORIZATION, StatusCode};
use campus_core::models::reminder::{Reminder, TargetRole};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{bearer, TestContext, ADMIN, FACULTY, STUDENT};

async fn get_reminders(ctx: &TestContext, token: &str, path: &str) -> Vec<Reminder> {
    ctx.server
        .get(path)
        .add_header(AUTHORIZATION, bearer(token))
        .await
        .json()
}

#[tokio::test]
async fn test_history_is_filtered_by_role_newest_first() {
    let ctx = TestContext::new();
    let student = ctx.login(STUDENT).await;
    let faculty = ctx.login(FACULTY).await;
    let admin = ctx.login(ADMIN).await;

    let history = get_reminders(&ctx, &student, "/api/reminders/history").await;
    let titles: Vec<&str> = history.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["DSA Assignment 2 Deadline", "Mid-term Exam Schedule Released"]
    );

    let history = get_reminders(&ctx, &faculty, "/api/reminders/history").await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].title, "Faculty Meeting");

    assert!(get_reminders(&ctx, &admin, "/api/reminders/history").await.is_empty());
}

#[tokio::test]
async fn test_upcoming_excludes_past_due_dates() {
    let ctx = TestContext::new();
    let student = ctx.login(STUDENT).await;
    let faculty = ctx.login(FACULTY).await;

    assert!(get_reminders(&ctx, &student, "/api/reminders/upcoming").await.is_empty());

    for (title, days) in [("Lab viva", 7), ("Project demo", 2)] {
        ctx.server
            .post("/api/reminders")
            .add_header(AUTHORIZATION, bearer(&faculty))
            .json(&json!({
                "title": title,
                "description": "Bring your lab record.",
                "target_role": "student",
                "due_date": Utc::now() + Duration::days(days)
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let upcoming = get_reminders(&ctx, &student, "/api/reminders/upcoming").await;
    let titles: Vec<&str> = upcoming.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Project demo", "Lab viva"]);

    assert!(get_reminders(&ctx, &faculty, "/api/reminders/upcoming").await.is_empty());
}

#[tokio::test]
async fn test_target_role_defaults_to_all() {
    let ctx = TestContext::new();
    let admin = ctx.login(ADMIN).await;

    let reminder: Reminder = ctx
        .server
        .post("/api/reminders")
        .add_header(AUTHORIZATION, bearer(&admin))
        .json(&json!({
            "title": "Campus closed",
            "description": "Holiday on Monday.",
            "due_date": Utc::now() + Duration::days(3)
        }))
        .await
        .json();
    assert_eq!(reminder.target_role, TargetRole::All);

    let upcoming = get_reminders(&ctx, &admin, "/api/reminders/upcoming").await;
    assert_eq!(upcoming.len(), 1);
}

#[tokio::test]
async fn test_create_validates_and_guards() {
    let ctx = TestContext::new();
    let student = ctx.login(STUDENT).await;
    let faculty = ctx.login(FACULTY).await;
    let body = json!({
        "title": "",
        "description": "Missing a title",
        "due_date": Utc::now()
    });

    ctx.server
        .post("/api/reminders")
        .add_header(AUTHORIZATION, bearer(&student))
        .json(&body)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    ctx.server
        .post("/api/reminders")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_is_creator_or_admin() {
    let ctx = TestContext::new();
    let faculty = ctx.login(FACULTY).await;
    let admin = ctx.login(ADMIN).await;

    let mine = get_reminders(&ctx, &faculty, "/api/reminders/mine").await;
    assert_eq!(mine.len(), 1);
    let own = mine[0].id;

    let admins = get_reminders(&ctx, &admin, "/api/reminders/mine").await;
    assert_eq!(admins.len(), 2);

    ctx.server
        .delete(&format!("/api/reminders/{}", admins[0].id))
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    ctx.server
        .delete(&format!("/api/reminders/{}", own))
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .assert_status_ok();

    ctx.server
        .delete(&format!("/api/reminders/{}", admins[0].id))
        .add_header(AUTHORIZATION, bearer(&admin))
        .await
        .assert_status_ok();

    assert_eq!(ctx.state.db.reminders.read().await.len(), 1);
}
