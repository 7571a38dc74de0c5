//! Leaderboard built by replaying `Claimed` events and aggregating
//! per driver. The chain is the only source of truth for amounts; the
//! database contributes display names only.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use chrono::Utc;

use crate::{
    models::leaderboard::{ClaimEvent, LeaderboardEntry, LeaderboardResponse},
    services::chain_client::ChainClient,
    storage::Storage,
};

const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Running totals for one driver across all of their claims.
#[derive(Debug, Clone)]
struct DriverTotals {
    wallet: Address,
    total_claimed: U256,
    weekly_earned: U256,
    last_claim_time: i64,
}

/// Sums claim events per driver identity. A driver claiming from
/// several wallets is one row keyed by their racing id, attributed to
/// the wallet of their most recent claim.
fn aggregate(events: &[ClaimEvent], now: i64) -> Vec<(u64, DriverTotals)> {
    let weekly_cutoff = now - WEEK_SECONDS;

    let mut totals: HashMap<u64, DriverTotals> = HashMap::new();
    let mut order: Vec<u64> = Vec::new();

    for event in events {
        let entry = totals.entry(event.iracing_id).or_insert_with(|| {
            order.push(event.iracing_id);
            DriverTotals {
                wallet: event.wallet,
                total_claimed: U256::ZERO,
                weekly_earned: U256::ZERO,
                last_claim_time: 0,
            }
        });

        entry.total_claimed += event.amount;
        if event.timestamp >= weekly_cutoff {
            entry.weekly_earned += event.amount;
        }
        if event.timestamp >= entry.last_claim_time {
            entry.last_claim_time = event.timestamp;
            entry.wallet = event.wallet;
        }
    }

    order
        .into_iter()
        .filter_map(|id| totals.remove(&id).map(|t| (id, t)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct LeaderboardService {
    chain: Arc<ChainClient>,
    store: Arc<Storage>,
}

impl LeaderboardService {
    pub fn new(chain: Arc<ChainClient>, store: Arc<Storage>) -> Self {
        Self { chain, store }
    }

    /// Builds the full leaderboard payload. Infallible by contract:
    /// an RPC failure degrades to an empty payload with a reason so
    /// the dashboard never sees a 5xx for this route.
    pub async fn build(&self) -> LeaderboardResponse {
        let events = match self.chain.fetch_claim_events().await {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!("Leaderboard event replay failed: {}", e);
                return LeaderboardResponse::unavailable(e.to_string());
            }
        };

        self.assemble(&events, Utc::now().timestamp()).await
    }

    async fn assemble(&self, events: &[ClaimEvent], now: i64) -> LeaderboardResponse {
        let totals = aggregate(events, now);

        let ids: Vec<i64> = totals.iter().map(|(id, _)| *id as i64).collect();
        let names = match self.store.profiles.display_names(&ids).await {
            Ok(names) => names,
            Err(e) => {
                // Missing names are cosmetic; the board still renders.
                tracing::warn!("Display name lookup failed: {}", e);
                HashMap::new()
            }
        };

        let mut all_time: Vec<LeaderboardEntry> = totals
            .into_iter()
            .map(|(id, t)| LeaderboardEntry {
                iracing_id: id,
                wallet_address: t.wallet.to_checksum(None),
                total_claimed: t.total_claimed.to_string(),
                weekly_earned: t.weekly_earned.to_string(),
                last_claim_time: t.last_claim_time,
                display_name: names
                    .get(&(id as i64))
                    .cloned()
                    .unwrap_or_else(|| format!("Racer {}", id)),
            })
            .collect();

        let total_claimers = all_time.len();

        // Stable sorts keep first-claim order among equal amounts.
        all_time.sort_by(|a, b| {
            let a_total: U256 = a.total_claimed.parse().unwrap_or(U256::ZERO);
            let b_total: U256 = b.total_claimed.parse().unwrap_or(U256::ZERO);
            b_total.cmp(&a_total)
        });

        let mut weekly: Vec<LeaderboardEntry> = all_time
            .iter()
            .filter(|e| e.weekly_earned != "0")
            .cloned()
            .collect();
        weekly.sort_by(|a, b| {
            let a_weekly: U256 = a.weekly_earned.parse().unwrap_or(U256::ZERO);
            let b_weekly: U256 = b.weekly_earned.parse().unwrap_or(U256::ZERO);
            b_weekly.cmp(&a_weekly)
        });

        LeaderboardResponse {
            all_time,
            weekly,
            total_claimers,
            error: None,
        }
    }
}
