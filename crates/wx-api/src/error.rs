//! エラー型定義 (wx-api)

use thiserror::Error;

/// wx-api のエラー型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, ApiError>;
