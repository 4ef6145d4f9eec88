//! # Campus API
//!
//! The API crate provides the web server for the campus portal. It exposes
//! RESTful endpoints for accounts, study notes, attendance, reminders, the
//! role dashboards and the academic chat assistant.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like authentication and error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and the in-memory stores from
//! `campus-db` for state.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication, logging, and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method, StatusCode},
    BoxError, Router,
};
use campus_core::assistant::ChatGateway;
use campus_db::Database;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState::new(Database::new(), gateway, 75.0));
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// Campus stores and the session manager
    pub db: Database,
    /// Collaborator that answers chat prompts
    pub assistant: Arc<dyn ChatGateway>,
    /// Default cut-off for the low-attendance report
    pub low_attendance_threshold: f64,
}

impl ApiState {
    pub fn new(
        db: Database,
        assistant: Arc<dyn ChatGateway>,
        low_attendance_threshold: f64,
    ) -> Self {
        Self {
            db,
            assistant,
            low_attendance_threshold,
        }
    }
}

/// Builds the application router with every route attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Registration, login and sessions
        .merge(routes::auth::routes())
        // Account management
        .merge(routes::users::routes())
        // Study notes
        .merge(routes::notes::routes())
        // Attendance tracking and reports
        .merge(routes::attendance::routes())
        // Reminders
        .merge(routes::reminders::routes())
        // Chat assistant
        .merge(routes::chat::routes())
        // Role dashboards
        .merge(routes::dashboard::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Installs the global `tracing` subscriber at `level`.
///
/// Call once, before anything worth logging happens.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Starts the API server with the provided configuration and state
///
/// This function configures routes and middleware and serves HTTP until the
/// listener fails. Logging is expected to be set up via [`init_tracing`].
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let state = ApiState::new(campus_db::seed::demo_database()?, gateway, 75.0);
/// start_server(config, state).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, state: ApiState) -> Result<()> {
    let app = build_router(Arc::new(state));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware; elapsed requests answer 408
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|_: BoxError| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .timeout(Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
