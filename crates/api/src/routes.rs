use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{handlers, AppState};

/// Build the router; any path without a route is served from `static_dir`.
pub fn create_router(state: Arc<AppState>, static_dir: &str) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Wallet inventory
        .route("/check_wallet", post(handlers::check_wallet))
        .route("/close_accounts", post(handlers::close_accounts))
        .route("/batch_process", post(handlers::batch_process))

        .with_state(state)
        // Serve static frontend files
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}
