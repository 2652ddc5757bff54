pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::parsing::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/health", get(health::health_handler))
        // Upload API, trailing-slash form kept for existing clients
        .route("/parse-resume", post(handlers::handle_parse_resume))
        .route("/parse-resume/", post(handlers::handle_parse_resume))
        // Parsing API
        .route("/api/v1/parse/text", post(handlers::handle_parse_text))
        .route("/api/v1/catalog", get(handlers::handle_get_catalog))
        .layer(body_limit)
        .with_state(state)
}
