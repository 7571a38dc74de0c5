//! Claim signature issuing. Statistics in the signed message are
//! always re-fetched from the provider with the session's access
//! token; nothing a client sends in the body can influence them.

use alloy::primitives::Address;
use axum::{extract::State, Extension, Json};

use crate::{
    errors::AppResult,
    handlers::HandlerError,
    http_server::AppState,
    models::{
        auth::TokenClaims,
        claim::{GenerateSignatureRequest, GenerateSignatureResponse},
    },
};

pub async fn generate_signature(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(body): Json<GenerateSignatureRequest>,
) -> AppResult<Json<GenerateSignatureResponse>> {
    let wallet: Address = body
        .wallet_address
        .filter(|w| !w.is_empty())
        .ok_or_else(|| HandlerError::Validation("walletAddress is required".to_string()))?
        .parse()
        .map_err(|_| HandlerError::Validation("Invalid wallet address".to_string()))?;

    let signer = state
        .signer
        .as_ref()
        .ok_or(HandlerError::NotConfigured("Claim signer"))?;
    let iracing = state
        .iracing
        .as_ref()
        .ok_or(HandlerError::NotConfigured("OAuth provider"))?;

    let info = iracing.fetch_member_info(&claims.access_token).await?;
    let stats = iracing.fetch_yearly_stats(&claims.access_token).await?;

    let signature = signer
        .sign_claim(wallet, info.cust_id as u64, stats)
        .await?;

    tracing::info!(
        iracing_id = info.cust_id,
        wins = stats.wins,
        top5s = stats.top5s,
        starts = stats.starts,
        "Issued claim signature"
    );

    Ok(Json(GenerateSignatureResponse {
        signature,
        iracing_id: info.cust_id,
        wins: stats.wins,
        top5s: stats.top5s,
        starts: stats.starts,
    }))
}
