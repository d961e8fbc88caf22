//! Route table

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, analysis, documents};
use crate::state::AppState;

/// Room for multipart boundaries and the title field on top of the file
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router.
///
/// Rate limiting is added by `main`, since it needs the peer address.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .route("/api", get(handlers::api_index))
        // Documents
        .route("/api/documents/upload", post(documents::upload))
        .route("/api/documents", get(documents::list))
        .route(
            "/api/documents/:id",
            get(documents::get).delete(documents::delete),
        )
        // Analysis
        .route("/api/analysis/analyze/:id", post(analysis::analyze))
        .route(
            "/api/analysis/chat/:id",
            post(analysis::chat).get(analysis::chat_history),
        )
        .route("/api/analysis/explain", post(analysis::explain))
        .route("/api/analysis/rules", get(analysis::rules))
        .fallback(handlers::not_found)
        // Apply middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
