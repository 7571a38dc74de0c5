//! Pass-through proxy for sponsored-transaction requests, so the
//! paymaster API key never reaches the browser.

use axum::{extract::State, Json};

use crate::{errors::AppResult, handlers::HandlerError, http_server::AppState};

pub async fn proxy(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<serde_json::Value>> {
    let url = state
        .config
        .paymaster_url()
        .ok_or(HandlerError::NotConfigured("Paymaster"))?;

    let response = state
        .http
        .post(url)
        .json(&body)
        .send()
        .await
        .map_err(|e| HandlerError::Upstream(e.to_string()))?;

    let status = response.status();
    let payload: serde_json::Value = response
        .json()
        .await
        .map_err(|e| HandlerError::Upstream(e.to_string()))?;

    if !status.is_success() {
        return Err(HandlerError::Upstream(format!(
            "paymaster returned {}: {}",
            status, payload
        ))
        .into());
    }

    Ok(Json(payload))
}
