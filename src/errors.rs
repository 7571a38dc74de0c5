use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    chain::ChainConfigError,
    handlers::HandlerError,
    services::{claim_signer::SignerError, iracing::IracingError},
    storage::DbError,
};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Chain configuration error: {0}")]
    ChainConfig(#[from] ChainConfigError),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error(transparent)]
    Handler(#[from] HandlerError),
    #[error("Provider error: {0}")]
    Provider(#[from] IracingError),
    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),
    #[error("Server error: {0}")]
    Server(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Handler(HandlerError::Auth(_)) => StatusCode::UNAUTHORIZED,
            AppError::Handler(HandlerError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Handler(HandlerError::NotConfigured(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Handler(HandlerError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_errors_map_to_client_statuses() {
        let cases = [
            (HandlerError::Auth("no".into()), StatusCode::UNAUTHORIZED),
            (HandlerError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (HandlerError::NotConfigured("signer"), StatusCode::SERVICE_UNAVAILABLE),
            (HandlerError::Upstream("down".into()), StatusCode::BAD_GATEWAY),
        ];

        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn internal_errors_map_to_500() {
        let response = AppError::Server("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
