//! Error types for wx-core

use thiserror::Error;

/// Main error type for wx-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Model API error: {0}")]
    ModelApi(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for wx-core
pub type Result<T> = std::result::Result<T, Error>;
