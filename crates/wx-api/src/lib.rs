//! wx-api: HTTP Tool Endpoint for wx-chat
//!
//! Exposes the fixed-response weather service consumed by the
//! get_weather tool. Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use routes::routes;
pub use server::start_server;
