//! OAuth login flow and authenticated profile endpoints.

use alloy::primitives::Address;
use axum::{
    extract::{Query, State},
    response::Redirect,
    Extension, Json,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::Url;

use crate::{
    errors::{AppError, AppResult},
    handlers::HandlerError,
    http_server::AppState,
    models::{
        auth::{AuthStartRequest, AuthStartResponse, CallbackParams, OAuthState, TokenClaims},
        profile::{ProfileResponse, RacerProfileInput, SyncStatsResponse},
    },
    utils::{
        jwt::get_default_jwt_config,
        pkce::{code_challenge, generate_code_verifier},
    },
};

fn required_wallet(wallet_address: Option<String>) -> Result<String, HandlerError> {
    let wallet = wallet_address
        .filter(|w| !w.is_empty())
        .ok_or_else(|| HandlerError::Validation("walletAddress is required".to_string()))?;
    wallet
        .parse::<Address>()
        .map_err(|_| HandlerError::Validation(format!("Invalid wallet address: {}", wallet)))?;
    Ok(wallet)
}

/// Begins a login: stores PKCE state and hands back the provider's
/// authorization URL for the frontend to redirect to.
pub async fn start_auth(
    State(state): State<AppState>,
    Json(body): Json<AuthStartRequest>,
) -> AppResult<Json<AuthStartResponse>> {
    let wallet_address = required_wallet(body.wallet_address)?;
    let iracing = state
        .iracing
        .as_ref()
        .ok_or(HandlerError::NotConfigured("OAuth provider"))?;

    let code_verifier = generate_code_verifier();
    let challenge = code_challenge(&code_verifier);
    let state_token = uuid::Uuid::new_v4().to_string();

    state
        .oauth_states
        .insert(
            state_token.clone(),
            OAuthState {
                wallet_address,
                code_verifier,
                created_at: chrono::Utc::now(),
            },
        )
        .await;

    let auth_url = iracing.build_auth_url(&state_token, &challenge)?;
    Ok(Json(AuthStartResponse { auth_url }))
}

/// Provider redirect target. Always answers with a redirect to the
/// frontend; success puts the session token in the query, failure an
/// error message.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let frontend = state.config.server.frontend_url.clone();
    match run_callback(&state, params).await {
        Ok(token) => {
            let target = frontend_redirect(&frontend, &[("token", token.as_str()), ("success", "true")]);
            Redirect::to(&target)
        }
        Err(e) => {
            tracing::warn!("OAuth callback failed: {}", e);
            let target = frontend_redirect(&frontend, &[("error", &e.to_string())]);
            Redirect::to(&target)
        }
    }
}

fn frontend_redirect(frontend_url: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(frontend_url, params) {
        Ok(url) => url.to_string(),
        Err(_) => "/".to_string(),
    }
}

async fn run_callback(state: &AppState, params: CallbackParams) -> AppResult<String> {
    if let Some(denial) = params.error {
        return Err(HandlerError::Auth(format!("Provider denied authorization: {}", denial)).into());
    }
    let code = params
        .code
        .ok_or_else(|| HandlerError::Validation("Missing authorization code".to_string()))?;
    let state_token = params
        .state
        .ok_or_else(|| HandlerError::Auth("Invalid or expired state".to_string()))?;

    let entry = state
        .oauth_states
        .consume(&state_token)
        .await
        .ok_or_else(|| HandlerError::Auth("Invalid or expired state".to_string()))?;

    let iracing = state
        .iracing
        .as_ref()
        .ok_or(HandlerError::NotConfigured("OAuth provider"))?;

    let access_token = iracing.exchange_code(&code, &entry.code_verifier).await?;
    let info = iracing.fetch_member_info(&access_token).await?;

    // Cache failures must not block login.
    let profile = RacerProfileInput {
        iracing_id: info.cust_id,
        display_name: info.display_name.clone(),
        first_name: info.first_name.clone(),
        last_name: info.last_name.clone(),
    };
    if let Err(e) = state.db.profiles.upsert(&profile).await {
        tracing::warn!("Profile cache upsert failed: {}", e);
    }
    if let Err(e) = state
        .db
        .profiles
        .link_wallet(&entry.wallet_address, info.cust_id)
        .await
    {
        tracing::warn!("Wallet link failed: {}", e);
    }

    let (iat, exp) = get_default_jwt_config(&state.config);
    let claims = TokenClaims {
        sub: info.cust_id.to_string(),
        access_token,
        iat,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt.secret.as_bytes()),
    )
    .map_err(|e| AppError::Server(format!("Token encoding failed: {}", e)))
}

/// Live profile plus yearly stats for the authenticated driver.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> AppResult<Json<ProfileResponse>> {
    let iracing = state
        .iracing
        .as_ref()
        .ok_or(HandlerError::NotConfigured("OAuth provider"))?;

    let info = iracing.fetch_member_info(&claims.access_token).await?;
    let stats = iracing.fetch_yearly_stats(&claims.access_token).await?;

    Ok(Json(ProfileResponse {
        iracing_id: info.cust_id,
        display_name: info.display_name,
        first_name: info.first_name,
        last_name: info.last_name,
        stats,
    }))
}

/// Refreshes the cached display name from the provider.
pub async fn sync_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> AppResult<Json<SyncStatsResponse>> {
    let iracing = state
        .iracing
        .as_ref()
        .ok_or(HandlerError::NotConfigured("OAuth provider"))?;

    let info = iracing.fetch_member_info(&claims.access_token).await?;
    let profile = state
        .db
        .profiles
        .upsert(&RacerProfileInput {
            iracing_id: info.cust_id,
            display_name: info.display_name,
            first_name: info.first_name,
            last_name: info.last_name,
        })
        .await?;

    Ok(Json(SyncStatsResponse {
        success: true,
        iracing_id: profile.iracing_id,
        display_name: profile.display_name,
    }))
}
