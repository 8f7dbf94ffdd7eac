pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

/// Upper bound on an uploaded résumé (multipart body included).
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/letters", post(handlers::handle_create_letter))
        .route(
            "/api/v1/letters/:id",
            get(handlers::handle_get_letter).put(handlers::handle_edit_letter),
        )
        .route(
            "/api/v1/letters/:id/regenerate",
            post(handlers::handle_regenerate_letter),
        )
        .route(
            "/api/v1/letters/:id/export/:format",
            get(handlers::handle_export_letter),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
