//! HTTP server
//!
//! Starts and manages the axum-based Tool Endpoint server.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::routes;
use crate::Result;

/// Start the Tool Endpoint server
pub async fn start_server(port: u16) -> Result<()> {
    let app = routes().layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Weather endpoint listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
