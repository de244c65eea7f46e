use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;
use crate::handlers;

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // MCP endpoint (streamable HTTP transport)
        .route("/mcp", post(handlers::mcp_request))
        // CORS: allow any origin (MCP hosts may run in various contexts)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
