use alloy::primitives::{Address, U256};
use serde::Serialize;

/// One decoded on-chain `Claimed` event. Derived from logs only; the
/// chain is the source of truth.
#[derive(Debug, Clone)]
pub struct ClaimEvent {
    pub wallet: Address,
    pub iracing_id: u64,
    pub amount: U256,
    pub claim_number: u64,
    pub block_number: u64,
    /// Unix seconds of the containing block.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub iracing_id: u64,
    pub wallet_address: String,
    /// All-time claimed amount in token wei, decimal string.
    pub total_claimed: String,
    /// Trailing-7-day claimed amount in token wei, decimal string.
    pub weekly_earned: String,
    pub last_claim_time: i64,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub all_time: Vec<LeaderboardEntry>,
    pub weekly: Vec<LeaderboardEntry>,
    pub total_claimers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LeaderboardResponse {
    /// Degraded payload served when event replay fails; the dashboard
    /// renders empty lists instead of an error page.
    pub fn unavailable(reason: String) -> Self {
        Self {
            all_time: Vec::new(),
            weekly: Vec::new(),
            total_claimers: 0,
            error: Some(reason),
        }
    }
}
