use serde::{Deserialize, Serialize};

/// Request body for signature generation. Only the destination wallet
/// is read; statistics are always re-fetched from the provider, so
/// any stat fields a client smuggles into the body are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSignatureRequest {
    #[serde(default)]
    pub wallet_address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSignatureResponse {
    pub signature: String,
    pub iracing_id: i64,
    pub wins: u64,
    pub top5s: u64,
    pub starts: u64,
}
