pub mod health;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tracing::warn;

use crate::auth::handlers as auth;
use crate::career::handlers as career;
use crate::classes::handlers as classes;
use crate::config::Config;
use crate::jobs::handlers as jobs;
use crate::learning::handlers as learning;
use crate::state::AppState;
use crate::sync::handlers as sync;
use crate::teacher::handlers as teacher;
use crate::tutor::handlers as tutor;

/// Every `/api` route, with the CORS policy taken from `state.config`.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config);

    Router::new()
        .route("/api", get(health::health_handler))
        .route("/api/", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/me", get(auth::handle_me))
        // Tutor
        .route("/api/tutor/chat", post(tutor::handle_chat))
        .route("/api/tutor/history/:session_id", get(tutor::handle_history))
        // Learning paths
        .route(
            "/api/learning/create-path",
            post(learning::handle_create_path),
        )
        .route("/api/learning/my-paths", get(learning::handle_my_paths))
        .route(
            "/api/learning/progress/:path_id",
            put(learning::handle_update_progress),
        )
        .route(
            "/api/learning/analytics/:path_id",
            get(learning::handle_path_analytics),
        )
        .route(
            "/api/learning/generate-quiz/:path_id/:phase",
            post(learning::handle_generate_quiz),
        )
        .route(
            "/api/learning/submit-quiz/:quiz_id",
            post(learning::handle_submit_quiz),
        )
        // Career & jobs
        .route("/api/career/analyze", post(career::handle_analyze))
        .route("/api/jobs", get(jobs::handle_list_jobs))
        .route("/api/jobs/recommend", post(jobs::handle_recommend))
        // Live classes
        .route("/api/classes/create", post(classes::handle_create_class))
        .route("/api/classes/schedule", get(classes::handle_schedule))
        .route("/api/classes/:class_id/join", post(classes::handle_join))
        // Teacher dashboard
        .route("/api/teacher/students", get(teacher::handle_students))
        .route(
            "/api/teacher/analytics/:student_id",
            get(teacher::handle_student_analytics),
        )
        // Offline sync
        .route("/api/sync/upload", post(sync::handle_upload))
        .layer(cors)
        .with_state(state)
}

/// `*` allows any origin without credentials. An explicit list allows
/// credentials and mirrors the requested method and headers.
pub fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
