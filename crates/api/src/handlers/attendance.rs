//! # Attendance Handlers
//!
//! Marking (single record, whole class, or by face match) and the attendance
//! reports shown to students, faculty and admins.
//!
//! Faculty only see records for the subjects they teach. Admins see every
//! record.
//!
//! Dates and times are UTC, like every other timestamp the API stores, so
//! "today" for facial attendance is the current UTC date.

use std::collections::HashSet;

use axum::{
    extract::State,
    Json,
};
use campus_core::{
    errors::{require_field, CampusError},
    models::{
        attendance::{
            AttendanceFilterQuery, AttendanceRecord, AttendanceStats, AttendanceStatus,
            ClassAttendanceRequest, ClassAttendanceResponse, ClassSheetEntry, ClassSheetQuery,
            FacialAttendanceRequest, LowAttendanceQuery, LowAttendanceStudent,
            MarkAttendanceRequest, StudentAttendanceSummary, SubjectAttendance,
        },
        user::{Role, User},
    },
};
use campus_db::repositories::attendance::{recognize_face, RecordFilter};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    middleware::{
        auth::{AuthUser, RequireAdmin, RequireStaff, RequireStudent},
        error_handling::AppError,
        extract::{AppJson, AppPath, AppQuery},
    },
    ApiState,
};

fn student_not_found(id: Uuid) -> AppError {
    AppError(CampusError::NotFound(format!("Student with ID {} not found", id)))
}

/// Students in `section`, or every student when no section is given.
async fn roster(state: &ApiState, section: Option<&str>) -> Vec<User> {
    let users = state.db.users.read().await;
    match section.filter(|s| !s.trim().is_empty()) {
        Some(section) => users.students_by_section(section),
        None => users.students(),
    }
}

#[axum::debug_handler]
pub async fn mark_attendance(
    State(state): State<Arc<ApiState>>,
    RequireStaff(staff): RequireStaff,
    AppJson(payload): AppJson<MarkAttendanceRequest>,
) -> Result<Json<AttendanceRecord>, AppError> {
    payload.validate()?;

    let is_student = state
        .db
        .users
        .read()
        .await
        .user_by_id(payload.student_id)
        .is_some_and(|user| user.role == Role::Student);
    if !is_student {
        return Err(student_not_found(payload.student_id));
    }

    let record = state.db.attendance.write().await.mark_attendance(
        payload.student_id,
        &payload.subject,
        payload.date,
        payload.status,
        staff.id(),
    );

    Ok(Json(record))
}

#[axum::debug_handler]
pub async fn submit_class_attendance(
    State(state): State<Arc<ApiState>>,
    RequireStaff(staff): RequireStaff,
    AppJson(payload): AppJson<ClassAttendanceRequest>,
) -> Result<Json<ClassAttendanceResponse>, AppError> {
    payload.validate()?;

    let students = roster(&state, payload.section.as_deref()).await;
    let records = state
        .db
        .attendance
        .write()
        .await
        .submit_class_attendance(&students, &payload, staff.id());
    info!(
        "Class attendance submitted: subject={}, date={}, students={}, by={}",
        payload.subject,
        payload.date,
        records.len(),
        staff.id()
    );

    Ok(Json(ClassAttendanceResponse {
        subject: payload.subject,
        date: payload.date,
        records,
    }))
}

#[axum::debug_handler]
pub async fn class_sheet(
    State(state): State<Arc<ApiState>>,
    RequireStaff(_staff): RequireStaff,
    AppQuery(query): AppQuery<ClassSheetQuery>,
) -> Result<Json<Vec<ClassSheetEntry>>, AppError> {
    require_field(&query.subject, "subject")?;

    let students = roster(&state, query.section.as_deref()).await;
    let sheet = state
        .db
        .attendance
        .read()
        .await
        .class_sheet(&students, &query.subject, query.date);

    Ok(Json(sheet))
}

/// Marks the calling student present for today once the captured face
/// matches their stored one.
#[axum::debug_handler]
pub async fn facial_attendance(
    State(state): State<Arc<ApiState>>,
    RequireStudent(student): RequireStudent,
    AppJson(payload): AppJson<FacialAttendanceRequest>,
) -> Result<Json<AttendanceRecord>, AppError> {
    payload.validate()?;

    if !recognize_face(&student.user, &payload.image_data) {
        warn!("Face not recognized for student: id={}", student.id());
        return Err(AppError(CampusError::Authentication(
            "Face not recognized".to_string(),
        )));
    }

    let record = state.db.attendance.write().await.mark_attendance_now(
        student.id(),
        &payload.subject,
        AttendanceStatus::Present,
        student.id(),
    );
    info!(
        "Facial attendance marked: student_id={}, subject={}",
        student.id(),
        record.subject
    );

    Ok(Json(record))
}

#[axum::debug_handler]
pub async fn list_records(
    State(state): State<Arc<ApiState>>,
    RequireStaff(staff): RequireStaff,
    AppQuery(query): AppQuery<AttendanceFilterQuery>,
) -> Json<Vec<AttendanceRecord>> {
    let section: Option<HashSet<Uuid>> = match query.section.as_deref() {
        Some(section) if !section.trim().is_empty() => Some(
            roster(&state, Some(section))
                .await
                .into_iter()
                .map(|student| student.id)
                .collect(),
        ),
        _ => None,
    };

    let filter = RecordFilter {
        subjects: visible_subjects(&staff),
        date: query.date,
        subject_contains: query.subject.as_deref().filter(|s| !s.trim().is_empty()),
        students: section.as_ref(),
    };

    Json(state.db.attendance.read().await.filter_records(&filter))
}

/// Subjects whose records `staff` may read. `None` means every subject.
fn visible_subjects(staff: &AuthUser) -> Option<&[String]> {
    match staff.role() {
        Role::Admin => None,
        _ => Some(staff.user.profile.subjects.as_slice()),
    }
}

/// Every visible record taken on `date`.
#[axum::debug_handler]
pub async fn records_on_date(
    State(state): State<Arc<ApiState>>,
    RequireStaff(staff): RequireStaff,
    AppPath(date): AppPath<NaiveDate>,
) -> Json<Vec<AttendanceRecord>> {
    let mut records = state.db.attendance.read().await.records_for_date(date);
    if let Some(subjects) = visible_subjects(&staff) {
        records.retain(|record| subjects.contains(&record.subject));
    }

    Json(records)
}

/// Every record for one subject. Faculty may only ask for subjects they
/// teach.
#[axum::debug_handler]
pub async fn records_for_subject(
    State(state): State<Arc<ApiState>>,
    RequireStaff(staff): RequireStaff,
    AppPath(subject): AppPath<String>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    require_field(&subject, "subject")?;
    if let Some(subjects) = visible_subjects(&staff)
        && !subjects.iter().any(|s| s.eq_ignore_ascii_case(&subject))
    {
        return Err(AppError(CampusError::Authorization(format!(
            "You do not teach {}",
            subject
        ))));
    }

    Ok(Json(
        state.db.attendance.read().await.records_for_subject(&subject),
    ))
}

#[axum::debug_handler]
pub async fn student_summary(
    State(state): State<Arc<ApiState>>,
    auth: AuthUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<StudentAttendanceSummary>, AppError> {
    if !auth.is_self_or_staff(id) {
        return Err(AppError(CampusError::Authorization(
            "You may only view your own attendance".to_string(),
        )));
    }
    if state.db.users.read().await.user_by_id(id).is_none() {
        return Err(student_not_found(id));
    }

    let attendance = state.db.attendance.read().await;
    let subjects = attendance
        .subjects_for_student(id)
        .into_iter()
        .map(|subject| SubjectAttendance {
            percentage: attendance.subject_percentage(id, &subject),
            subject,
        })
        .collect();

    Ok(Json(StudentAttendanceSummary {
        student_id: id,
        overall_percentage: attendance.overall_percentage(id),
        subjects,
        records: attendance.records_for_student(id),
    }))
}

#[axum::debug_handler]
pub async fn low_attendance(
    State(state): State<Arc<ApiState>>,
    RequireStaff(_staff): RequireStaff,
    AppQuery(query): AppQuery<LowAttendanceQuery>,
) -> Result<Json<Vec<LowAttendanceStudent>>, AppError> {
    let threshold = query.threshold.unwrap_or(state.low_attendance_threshold);
    if !(0.0..=100.0).contains(&threshold) {
        return Err(AppError(CampusError::Validation(
            "threshold must be between 0 and 100".to_string(),
        )));
    }

    let students = state.db.users.read().await.students();
    let low = state
        .db
        .attendance
        .read()
        .await
        .low_attendance(&students, threshold)
        .into_iter()
        .map(|(student, percentage)| LowAttendanceStudent {
            student: student.into(),
            percentage,
        })
        .collect();

    Ok(Json(low))
}

#[axum::debug_handler]
pub async fn stats(
    State(state): State<Arc<ApiState>>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<AttendanceStats> {
    Json(state.db.attendance.read().await.stats_for_admin())
}
