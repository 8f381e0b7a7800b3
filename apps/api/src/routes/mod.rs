pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::enhancement::handlers as enhancement_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Leave headroom above the upload cap — the extractor enforces the real
    // limit with a proper validation error.
    let body_limit = state.config.max_upload_bytes + 64 * 1024;

    Router::new()
        .route("/api/health", get(health::health_handler))
        .route(
            "/api/analyze-resume",
            post(analysis_handlers::handle_analyze),
        )
        .route(
            "/api/enhance-resume",
            post(enhancement_handlers::handle_enhance),
        )
        .route(
            "/api/generate-docx",
            post(enhancement_handlers::handle_generate_docx),
        )
        .route(
            "/api/generate-txt",
            post(enhancement_handlers::handle_generate_txt),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
