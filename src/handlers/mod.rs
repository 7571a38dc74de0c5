pub mod auth;
pub mod claim;
pub mod contract;
pub mod leaderboard;
pub mod paymaster;

use serde::Serialize;

/// Uniform error body for auth failures raised before a handler runs.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// Failures raised inside request handlers, mapped onto status codes
/// by [`crate::errors::AppError`].
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("Upstream request failed: {0}")]
    Upstream(String),
}
