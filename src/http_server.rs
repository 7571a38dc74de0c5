use axum::{middleware, response::Json, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    chain::ChainConfig,
    config::Config,
    errors::AppResult,
    metrics::{metrics_handler, track_metrics, Metrics},
    routes::api_routes,
    services::{
        chain_client::ChainClient, claim_signer::ClaimSigner, iracing::IracingClient,
        leaderboard::LeaderboardService, oauth_store::OAuthStateStore,
    },
    storage::Storage,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<Storage>,
    /// `None` until provider credentials are configured; affected
    /// routes answer 503.
    pub iracing: Option<Arc<IracingClient>>,
    /// `None` until a signer key is configured; claim signing answers
    /// 503.
    pub signer: Option<Arc<ClaimSigner>>,
    pub chain_client: Arc<ChainClient>,
    pub leaderboard: Arc<LeaderboardService>,
    pub oauth_states: Arc<OAuthStateStore>,
    pub http: reqwest::Client,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: Arc<Config>, chain: &ChainConfig, db: Arc<Storage>) -> AppResult<Self> {
        let iracing = config
            .iracing
            .is_configured()
            .then(|| Arc::new(IracingClient::new(&config.iracing)));

        let signer = if config.signer.private_key.is_empty() {
            tracing::warn!("No signer key configured; claim signing is disabled");
            None
        } else {
            Some(Arc::new(ClaimSigner::new(
                &config.signer.private_key,
                chain.chain_id,
                chain.claim_contract,
            )?))
        };

        let chain_client = Arc::new(ChainClient::new(chain));
        let leaderboard = Arc::new(LeaderboardService::new(chain_client.clone(), db.clone()));

        Ok(Self {
            config,
            db,
            iracing,
            signer,
            chain_client,
            leaderboard,
            oauth_states: Arc::new(OAuthStateStore::new()),
            http: reqwest::Client::new(),
            metrics: Metrics::new(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

/// Create the HTTP server router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api", api_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(track_metrics)),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        service: "HODL Racing".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn start_server(state: AppState) -> AppResult<()> {
    let addr = state.config.get_server_address();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| crate::errors::AppError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| crate::errors::AppError::Server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::utils::test_app_state::{
        create_test_app_state, create_test_app_state_with_provider, generate_test_token,
    };

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoints_answer_200() {
        let app = create_router(create_test_app_state().await);

        for uri in ["/health", "/api/health"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn profile_requires_bearer_token() {
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/iracing/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_bearer_token_is_rejected() {
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/iracing/profile")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn auth_start_requires_wallet_address() {
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/iracing/auth/start")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn auth_start_without_provider_answers_503() {
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/iracing/auth/start")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"walletAddress":"0x1111111111111111111111111111111111111111"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn auth_start_returns_provider_url_with_pkce() {
        let server = MockServer::start().await;
        let state = create_test_app_state_with_provider(&server.uri()).await;
        let app = create_router(state.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/iracing/auth/start")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"walletAddress":"0x1111111111111111111111111111111111111111"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let auth_url = json["authUrl"].as_str().unwrap();
        assert!(auth_url.contains("code_challenge_method=S256"));
        assert!(auth_url.contains("state="));
        assert_eq!(state.oauth_states.len().await, 1);
    }

    #[tokio::test]
    async fn callback_with_unknown_state_redirects_with_error() {
        let server = MockServer::start().await;
        let app = create_router(create_test_app_state_with_provider(&server.uri()).await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/callback?code=abc&state=never-issued")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.contains("error="));
        assert!(!location.contains("token="));
    }

    #[tokio::test]
    async fn callback_provider_denial_redirects_with_error() {
        // Consent denial arrives as ?error=...&state=... with no code;
        // the browser must still be bounced back to the frontend.
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/callback?error=access_denied&state=xyz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.contains("error="));
        assert!(location.contains("access_denied"));
        assert!(!location.contains("token="));
    }

    #[tokio::test]
    async fn callback_without_code_redirects_with_error() {
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/callback?state=xyz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.contains("error="));
    }

    #[tokio::test]
    async fn leaderboard_degrades_to_200_when_rpc_is_down() {
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/leaderboard")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json["error"].is_string());
        assert_eq!(json["totalClaimers"], 0);
    }

    #[tokio::test]
    async fn contract_stats_degrade_to_fallback_when_rpc_is_down() {
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/contract/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["fallback"], true);
        assert_eq!(json["currentMultiplier"], 100);
    }

    #[tokio::test]
    async fn paymaster_without_url_answers_503() {
        let app = create_router(create_test_app_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/paymaster")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn signature_stats_come_from_provider_not_request_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/member/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "link": format!("{}/cached/member", server.uri())
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cached/member"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cust_id": 812345,
                "display_name": "Road Racer"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/stats/member/yearly"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "link": format!("{}/cached/yearly", server.uri())
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cached/yearly"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "stats": [{ "wins": 2, "top5": 6, "starts": 20 }]
            })))
            .mount(&server)
            .await;

        let state = create_test_app_state_with_provider(&server.uri()).await;
        let token = generate_test_token(&state.config, "812345", "bearer-xyz");
        let app = create_router(state);

        // Forged stats in the body must be ignored.
        let body = serde_json::json!({
            "walletAddress": "0x1111111111111111111111111111111111111111",
            "wins": 999_999,
            "top5s": 999_999,
            "starts": 999_999
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/claim/generate-signature")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["wins"], 2);
        assert_eq!(json["top5s"], 6);
        assert_eq!(json["starts"], 20);
        assert_eq!(json["iracingId"], 812345);
        assert!(json["signature"].as_str().unwrap().starts_with("0x"));
    }

    #[tokio::test]
    async fn signature_requires_wallet_in_body() {
        let server = MockServer::start().await;
        let state = create_test_app_state_with_provider(&server.uri()).await;
        let token = generate_test_token(&state.config, "812345", "bearer-xyz");
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/claim/generate-signature")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
