use axum::http::{header::AUTHORIZATION, StatusCode};
use campus_core::models::attendance::{
    AttendanceRecord, AttendanceStats, AttendanceStatus, ClassAttendanceResponse, ClassSheetEntry,
    LowAttendanceStudent, StudentAttendanceSummary,
};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{bearer, TestContext, ADMIN, FACULTY, STUDENT, STUDENT2};

#[tokio::test]
async fn test_student_summary_reports_percentages() {
    let ctx = TestContext::new();
    let token = ctx.login(STUDENT).await;
    let id = ctx.user_id(STUDENT).await;

    let summary: StudentAttendanceSummary = ctx
        .server
        .get(&format!("/api/attendance/students/{}", id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();

    assert_eq!(summary.overall_percentage, 75.0);
    assert_eq!(summary.records.len(), 4);
    assert_eq!(summary.subjects.len(), 2);
    assert_eq!(summary.subjects[0].subject, "DBMS");
    assert!((summary.subjects[0].percentage - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.subjects[1].subject, "DSA");
    assert_eq!(summary.subjects[1].percentage, 100.0);
}

#[tokio::test]
async fn test_students_cannot_read_each_others_summary() {
    let ctx = TestContext::new();
    let token = ctx.login(STUDENT).await;
    let other = ctx.user_id(STUDENT2).await;

    ctx.server
        .get(&format!("/api/attendance/students/{}", other))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_remarking_replaces_the_record() {
    let ctx = TestContext::new();
    let faculty = ctx.login(FACULTY).await;
    let student_id = ctx.user_id(STUDENT).await;

    let mark = |status: &str| {
        json!({
            "student_id": student_id,
            "subject": "DBMS",
            "date": "2024-03-01",
            "status": status
        })
    };

    let absent: AttendanceRecord = ctx
        .server
        .post("/api/attendance")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .json(&mark("absent"))
        .await
        .json();
    let leave: AttendanceRecord = ctx
        .server
        .post("/api/attendance")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .json(&mark("leave"))
        .await
        .json();

    assert_eq!(absent.id, leave.id);
    assert_eq!(leave.status, AttendanceStatus::Leave);

    let records = ctx.state.db.attendance.read().await.records_for_student(student_id);
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].id, leave.id);
    assert_eq!(records[0].status, AttendanceStatus::Leave);
}

#[tokio::test]
async fn test_marking_unknown_student_is_not_found() {
    let ctx = TestContext::new();
    let faculty = ctx.login(FACULTY).await;
    let faculty_id = ctx.user_id(FACULTY).await;

    for student_id in [uuid::Uuid::new_v4(), faculty_id] {
        ctx.server
            .post("/api/attendance")
            .add_header(AUTHORIZATION, bearer(&faculty))
            .json(&json!({
                "student_id": student_id,
                "subject": "DBMS",
                "date": "2024-03-05",
                "status": "present"
            }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_students_cannot_mark_attendance() {
    let ctx = TestContext::new();
    let token = ctx.login(STUDENT).await;
    let id = ctx.user_id(STUDENT).await;

    ctx.server
        .post("/api/attendance")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "student_id": id,
            "subject": "DBMS",
            "date": "2024-03-05",
            "status": "present"
        }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_class_submission_and_sheet() {
    let ctx = TestContext::new();
    let faculty = ctx.login(FACULTY).await;
    let bob = ctx.user_id(STUDENT).await;
    let charlie = ctx.user_id(STUDENT2).await;

    let submitted: ClassAttendanceResponse = ctx
        .server
        .post("/api/attendance/class")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .json(&json!({
            "subject": "DSA",
            "date": "2024-03-11",
            "section": "a",
            "statuses": [{ "student_id": bob, "status": "present" }]
        }))
        .await
        .json();
    assert_eq!(submitted.records.len(), 2);

    let sheet: Vec<ClassSheetEntry> = ctx
        .server
        .get("/api/attendance/class")
        .add_query_param("subject", "DSA")
        .add_query_param("date", "2024-03-11")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .json();

    let status_of = |id| sheet.iter().find(|e| e.student_id == id).unwrap().status;
    assert_eq!(status_of(bob), AttendanceStatus::Present);
    assert_eq!(status_of(charlie), AttendanceStatus::Absent);
    assert_eq!(sheet[0].roll_no.as_deref(), Some("CS001"));
}

#[tokio::test]
async fn test_facial_attendance_marks_present_today() {
    let ctx = TestContext::new();
    let token = ctx.login(STUDENT).await;
    let id = ctx.user_id(STUDENT).await;

    let record: AttendanceRecord = ctx
        .server
        .post("/api/attendance/facial")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "subject": "DBMS", "image_data": "base64simulatedstudentface" }))
        .await
        .json();

    assert_eq!(record.student_id, id);
    assert_eq!(record.creator_id, id);
    assert_eq!(record.status, AttendanceStatus::Present);
    assert_eq!(record.date, Utc::now().date_naive());
}

#[tokio::test]
async fn test_facial_attendance_rejects_mismatch() {
    let ctx = TestContext::new();
    let token = ctx.login(STUDENT).await;

    ctx.server
        .post("/api/attendance/facial")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "subject": "DBMS", "image_data": "base64simulatedstudentface2" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let faculty = ctx.login(FACULTY).await;
    ctx.server
        .post("/api/attendance/facial")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .json(&json!({ "subject": "DBMS", "image_data": "base64simulatedstudentface" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_low_attendance_is_strictly_below_threshold() {
    let ctx = TestContext::new();
    let faculty = ctx.login(FACULTY).await;

    let at_default: Vec<LowAttendanceStudent> = ctx
        .server
        .get("/api/attendance/low")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .json();
    assert!(at_default.is_empty());

    let raised: Vec<LowAttendanceStudent> = ctx
        .server
        .get("/api/attendance/low")
        .add_query_param("threshold", 80)
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .json();
    assert_eq!(raised.len(), 2);
    assert!(raised.iter().all(|entry| entry.percentage == 75.0));

    ctx.server
        .get("/api/attendance/low")
        .add_query_param("threshold", 150)
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_stats() {
    let ctx = TestContext::new();
    let admin = ctx.login(ADMIN).await;
    let faculty = ctx.login(FACULTY).await;

    let stats: AttendanceStats = ctx
        .server
        .get("/api/attendance/stats")
        .add_header(AUTHORIZATION, bearer(&admin))
        .await
        .json();
    assert_eq!(
        stats,
        AttendanceStats {
            total_present: 6,
            total_absent: 2,
            total_records: 8,
        }
    );

    ctx.server
        .get("/api/attendance/stats")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_faculty_record_filters() {
    let ctx = TestContext::new();
    let faculty = ctx.login(FACULTY).await;

    let fetch = |params: Vec<(&'static str, &'static str)>| {
        let mut request = ctx
            .server
            .get("/api/attendance")
            .add_header(AUTHORIZATION, bearer(&faculty));
        for (key, value) in params {
            request = request.add_query_param(key, value);
        }
        request
    };

    let all: Vec<AttendanceRecord> = fetch(vec![]).await.json();
    assert_eq!(all.len(), 8);

    let dsa: Vec<AttendanceRecord> = fetch(vec![("subject", "ds")]).await.json();
    assert_eq!(dsa.len(), 2);
    assert!(dsa.iter().all(|r| r.subject == "DSA"));

    let first_day: Vec<AttendanceRecord> = fetch(vec![("date", "2024-03-01")]).await.json();
    assert_eq!(first_day.len(), 2);

    let section_b: Vec<AttendanceRecord> = fetch(vec![("section", "B")]).await.json();
    assert!(section_b.is_empty());
}

#[tokio::test]
async fn test_faculty_only_see_their_subjects() {
    let ctx = TestContext::new();
    let admin = ctx.login(ADMIN).await;
    let faculty = ctx.login(FACULTY).await;
    let student_id = ctx.user_id(STUDENT).await;

    ctx.server
        .post("/api/attendance")
        .add_header(AUTHORIZATION, bearer(&admin))
        .json(&json!({
            "student_id": student_id,
            "subject": "Networks",
            "date": "2024-03-05",
            "status": "present"
        }))
        .await
        .assert_status_ok();

    let faculty_view: Vec<AttendanceRecord> = ctx
        .server
        .get("/api/attendance")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .json();
    assert_eq!(faculty_view.len(), 8);

    let admin_view: Vec<AttendanceRecord> = ctx
        .server
        .get("/api/attendance")
        .add_header(AUTHORIZATION, bearer(&admin))
        .await
        .json();
    assert_eq!(admin_view.len(), 9);
}

#[tokio::test]
async fn test_records_on_date_are_scoped_to_taught_subjects() {
    let ctx = TestContext::new();
    let admin = ctx.login(ADMIN).await;
    let faculty = ctx.login(FACULTY).await;
    let student_id = ctx.user_id(STUDENT).await;

    ctx.server
        .post("/api/attendance")
        .add_header(AUTHORIZATION, bearer(&admin))
        .json(&json!({
            "student_id": student_id,
            "subject": "Networks",
            "date": "2024-03-01",
            "status": "absent"
        }))
        .await
        .assert_status_ok();

    let faculty_view: Vec<AttendanceRecord> = ctx
        .server
        .get("/api/attendance/dates/2024-03-01")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .json();
    assert_eq!(faculty_view.len(), 2);
    assert!(faculty_view.iter().all(|r| r.subject == "DBMS"));

    let admin_view: Vec<AttendanceRecord> = ctx
        .server
        .get("/api/attendance/dates/2024-03-01")
        .add_header(AUTHORIZATION, bearer(&admin))
        .await
        .json();
    assert_eq!(admin_view.len(), 3);

    let response = ctx
        .server
        .get("/api/attendance/dates/yesterday")
        .add_header(AUTHORIZATION, bearer(&admin))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<serde_json::Value>()["error"].is_string());
}

#[tokio::test]
async fn test_records_for_subject_requires_teaching_it() {
    let ctx = TestContext::new();
    let faculty = ctx.login(FACULTY).await;
    let admin = ctx.login(ADMIN).await;
    let student = ctx.login(STUDENT).await;

    let dsa: Vec<AttendanceRecord> = ctx
        .server
        .get("/api/attendance/subjects/dsa")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .json();
    assert_eq!(dsa.len(), 2);
    assert!(dsa.iter().all(|r| r.subject == "DSA"));

    ctx.server
        .get("/api/attendance/subjects/Networks")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let networks: Vec<AttendanceRecord> = ctx
        .server
        .get("/api/attendance/subjects/Networks")
        .add_header(AUTHORIZATION, bearer(&admin))
        .await
        .json();
    assert!(networks.is_empty());

    ctx.server
        .get("/api/attendance/subjects/DBMS")
        .add_header(AUTHORIZATION, bearer(&student))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_input_gets_json_error() {
    let ctx = TestContext::new();
    let faculty = ctx.login(FACULTY).await;
    let student_id = ctx.user_id(STUDENT).await;

    let response = ctx
        .server
        .post("/api/attendance")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .json(&json!({
            "student_id": student_id,
            "subject": "DBMS",
            "date": "2024-03-01",
            "status": "late"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("unknown variant"));

    let response = ctx
        .server
        .get("/api/attendance/low")
        .add_query_param("threshold", "lots")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<serde_json::Value>()["error"].is_string());

    let response = ctx
        .server
        .get("/api/attendance/students/not-a-uuid")
        .add_header(AUTHORIZATION, bearer(&faculty))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<serde_json::Value>()["error"].is_string());
}
