//! Typed client for the racing provider's OAuth and data APIs.
//!
//! Data endpoints answer with an indirection link: the first response
//! carries only a pointer URL which must be fetched separately for
//! the actual payload. No automatic retries anywhere; a failure is
//! surfaced to the caller and the user restarts the flow.

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::{
    config::IracingConfig,
    metrics::PROVIDER_API_CALLS_TOTAL,
    models::profile::DriverStats,
    utils::pkce::mask_client_secret,
};

#[derive(Debug, thiserror::Error)]
pub enum IracingError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),
}

pub type IracingResult<T> = Result<T, IracingError>;

#[derive(Debug, Deserialize)]
struct IndirectionLink {
    link: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Member profile as served by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberInfo {
    pub cust_id: i64,
    pub display_name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YearlyStats {
    stats: Vec<YearlyStatsBucket>,
}

/// One per-category, per-year bucket of the member's statistics.
#[derive(Debug, Deserialize)]
struct YearlyStatsBucket {
    #[serde(default)]
    wins: u64,
    #[serde(default)]
    top5: u64,
    #[serde(default)]
    starts: u64,
}

#[derive(Debug, Clone)]
pub struct IracingClient {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_base_url: String,
    api_base_url: String,
}

impl IracingClient {
    pub fn new(config: &IracingConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            auth_base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Provider authorization URL embedding the PKCE challenge and
    /// the unpredictable state token.
    pub fn build_auth_url(&self, state: &str, code_challenge: &str) -> IracingResult<String> {
        let url = Url::parse_with_params(
            &format!("{}/oauth2/authorize", self.auth_base_url),
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", "iracing.profile"),
                ("state", state),
                ("code_challenge", code_challenge),
                ("code_challenge_method", "S256"),
            ],
        )
        .map_err(|e| IracingError::InvalidUrl(e.to_string()))?;

        Ok(url.to_string())
    }

    /// Exchanges an authorization code plus the stored PKCE verifier
    /// for a bearer token. The client secret is sent masked as the
    /// provider requires.
    pub async fn exchange_code(&self, code: &str, code_verifier: &str) -> IracingResult<String> {
        PROVIDER_API_CALLS_TOTAL.with_label_values(&["token_exchange"]).inc();

        let masked_secret = mask_client_secret(&self.client_secret, &self.client_id);
        let response = self
            .client
            .post(format!("{}/oauth2/token", self.auth_base_url))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", masked_secret.as_str()),
                ("code_verifier", code_verifier),
            ])
            .send()
            .await?;

        let token: TokenResponse = Self::decode(response).await?;
        Ok(token.access_token)
    }

    pub async fn fetch_member_info(&self, access_token: &str) -> IracingResult<MemberInfo> {
        PROVIDER_API_CALLS_TOTAL.with_label_values(&["member_info"]).inc();
        self.fetch_linked("/data/member/info", access_token).await
    }

    /// Yearly statistics summed across every category bucket the
    /// provider returns.
    pub async fn fetch_yearly_stats(&self, access_token: &str) -> IracingResult<DriverStats> {
        PROVIDER_API_CALLS_TOTAL.with_label_values(&["yearly_stats"]).inc();
        let yearly: YearlyStats = self
            .fetch_linked("/data/stats/member/yearly", access_token)
            .await?;

        let mut stats = DriverStats::default();
        for bucket in yearly.stats {
            stats.wins += bucket.wins;
            stats.top5s += bucket.top5;
            stats.starts += bucket.starts;
        }
        Ok(stats)
    }

    /// Fetches a data endpoint through the provider's indirection:
    /// the authenticated call returns `{ "link": ... }`, the link
    /// itself serves the payload without auth.
    async fn fetch_linked<T>(&self, path: &str, access_token: &str) -> IracingResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(format!("{}{}", self.api_base_url, path))
            .bearer_auth(access_token)
            .send()
            .await?;
        let pointer: IndirectionLink = Self::decode(response).await?;

        let response = self.client.get(&pointer.link).send().await?;
        Self::decode(response).await
    }

    async fn decode<T>(response: reqwest::Response) -> IracingResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(IracingError::Status { status, body });
        }
        Ok(serde_json::from_str(&body)?)
    }
}
