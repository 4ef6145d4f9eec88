use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/reminders", post(handlers::reminders::create_reminder))
        .route(
            "/api/reminders/upcoming",
            get(handlers::reminders::upcoming_reminders),
        )
        .route(
            "/api/reminders/history",
            get(handlers::reminders::reminder_history),
        )
        .route("/api/reminders/mine", get(handlers::reminders::my_reminders))
        .route(
            "/api/reminders/:id",
            delete(handlers::reminders::delete_reminder),
        )
}
