//! Route definitions
//!
//! Defines all HTTP endpoints of the Tool Endpoint server.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{get_weather, health};

/// Create the endpoint router
pub fn routes() -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Tool operations
        .route("/tools/get_weather", post(get_weather))
}
