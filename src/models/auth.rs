use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session token claims. `sub` is the verified iracing customer id;
/// the provider access token rides along so downstream handlers can
/// re-fetch statistics server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub access_token: String,
    pub iat: usize,
    pub exp: usize,
}

/// One in-flight OAuth login, keyed by the random `state` value.
#[derive(Debug, Clone)]
pub struct OAuthState {
    pub wallet_address: String,
    pub code_verifier: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStartRequest {
    #[serde(default)]
    pub wallet_address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStartResponse {
    pub auth_url: String,
}

/// Provider redirect query. On success the provider sends `code` and
/// `state`; on denial it sends `error` (and usually `state`) with no
/// code, so every field is optional and the handler sorts it out.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
