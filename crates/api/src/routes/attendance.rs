use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/attendance",
            get(handlers::attendance::list_records).post(handlers::attendance::mark_attendance),
        )
        .route(
            "/api/attendance/class",
            get(handlers::attendance::class_sheet)
                .post(handlers::attendance::submit_class_attendance),
        )
        .route(
            "/api/attendance/facial",
            post(handlers::attendance::facial_attendance),
        )
        .route(
            "/api/attendance/students/:id",
            get(handlers::attendance::student_summary),
        )
        .route(
            "/api/attendance/dates/:date",
            get(handlers::attendance::records_on_date),
        )
        .route(
            "/api/attendance/subjects/:subject",
            get(handlers::attendance::records_for_subject),
        )
        .route("/api/attendance/low", get(handlers::attendance::low_attendance))
        .route("/api/attendance/stats", get(handlers::attendance::stats))
}
