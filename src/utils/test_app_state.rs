//! Shared fixtures for router-level tests. Chain RPC always points at
//! an unroutable local port so no test touches a live network.

use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header};

use crate::{
    chain::ChainConfig, config::Config, http_server::AppState, models::auth::TokenClaims,
    storage::Storage, utils::jwt::get_default_jwt_config,
};

// Well-known anvil development key, account 0.
const TEST_SIGNER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Minimal state: no provider, no signer, in-memory profile store.
pub async fn create_test_app_state() -> AppState {
    build(Config::default()).await
}

/// State with the OAuth provider pointed at a mock server and a
/// working claim signer.
pub async fn create_test_app_state_with_provider(provider_url: &str) -> AppState {
    let mut config = Config::default();
    config.iracing.client_id = "hodl-racing".to_string();
    config.iracing.client_secret = "s3cret".to_string();
    config.iracing.auth_base_url = provider_url.to_string();
    config.iracing.api_base_url = provider_url.to_string();
    config.signer.private_key = TEST_SIGNER_KEY.to_string();
    build(config).await
}

async fn build(mut config: Config) -> AppState {
    config.chain.rpc_url = "http://127.0.0.1:9".to_string();
    let chain = ChainConfig::resolve(&config.chain).expect("test chain config");
    let db = Arc::new(Storage::connect(None).await.expect("memory storage"));
    AppState::new(Arc::new(config), &chain, db).expect("test app state")
}

/// A session token signed with the test configuration's JWT secret.
pub fn generate_test_token(config: &Config, sub: &str, access_token: &str) -> String {
    let (iat, exp) = get_default_jwt_config(config);
    let claims = TokenClaims {
        sub: sub.to_string(),
        access_token: access_token.to_string(),
        iat,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
    )
    .expect("test token")
}
