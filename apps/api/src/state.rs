use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::ChatBackend;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is initialized once at startup and torn down at shutdown;
/// handlers never reach for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The generative backend behind a trait object so tests can script it.
    pub llm: Arc<dyn ChatBackend>,
    pub config: Config,
}
