//! Read-only access to the claim contract: historical `Claimed`
//! event replay for the leaderboard and the four scalar reads behind
//! the halving summary.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::{
    primitives::U256,
    providers::{Provider, ProviderBuilder},
    rpc::types::{BlockNumberOrTag, Filter, Log},
    sol,
    sol_types::SolEvent,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::{chain::ChainConfig, metrics::RPC_CALLS_TOTAL, models::leaderboard::ClaimEvent};

sol! {
    #[sol(rpc)]
    interface IHodlRacingClaim {
        event Claimed(address indexed wallet, uint256 indexed iracingId, uint256 amount, uint256 claimNumber);

        function totalClaimed() external view returns (uint256);
        function totalPool() external view returns (uint256);
        function halvingInterval() external view returns (uint256);
        function currentMultiplier() external view returns (uint256);
    }
}

/// Chunk size for log queries to stay under provider range limits.
const LOG_QUERY_CHUNK_SIZE: u64 = 5_000;

/// Cap on concurrent block-timestamp lookups.
const TIMESTAMP_FETCH_PERMITS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("RPC error: {0}")]
    Rpc(String),
}

pub type ChainResult<T> = Result<T, ChainError>;

/// Scalar reads backing the halving summary.
#[derive(Debug, Clone, Copy)]
pub struct ContractScalars {
    pub total_claimed: U256,
    pub total_pool: U256,
    pub halving_interval: U256,
    pub current_multiplier: u32,
}

#[derive(Debug, Clone)]
pub struct ChainClient {
    rpc_url: String,
    chain: ChainConfig,
}

impl ChainClient {
    pub fn new(chain: &ChainConfig) -> Self {
        Self {
            rpc_url: chain.rpc_url.clone(),
            chain: chain.clone(),
        }
    }

    async fn provider(&self) -> ChainResult<impl Provider + Clone + 'static> {
        ProviderBuilder::new()
            .connect(self.rpc_url.as_str())
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// Replays every `Claimed` event from the deployment block to the
    /// chain head and resolves each event's block timestamp.
    pub async fn fetch_claim_events(&self) -> ChainResult<Vec<ClaimEvent>> {
        let provider = self.provider().await?;

        RPC_CALLS_TOTAL.with_label_values(&["block_number"]).inc();
        let head = provider
            .get_block_number()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        let logs = self
            .query_logs_chunked(&provider, self.chain.deployment_block, head)
            .await?;

        // Decode first so the timestamp pass only touches blocks that
        // actually contain claims.
        let mut decoded: Vec<(IHodlRacingClaim::Claimed, u64)> = Vec::new();
        for log in &logs {
            match log.log_decode::<IHodlRacingClaim::Claimed>() {
                Ok(event) => {
                    if let Some(block_number) = log.block_number {
                        decoded.push((event.inner.data, block_number));
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping undecodable Claimed log: {}", e);
                }
            }
        }

        let mut blocks: Vec<u64> = decoded.iter().map(|(_, b)| *b).collect();
        blocks.sort_unstable();
        blocks.dedup();
        let timestamps = Self::block_timestamps(provider, blocks).await?;

        let events = decoded
            .into_iter()
            .filter_map(|(event, block_number)| {
                let timestamp = *timestamps.get(&block_number)?;
                Some(ClaimEvent {
                    wallet: event.wallet,
                    iracing_id: event.iracingId.saturating_to::<u64>(),
                    amount: event.amount,
                    claim_number: event.claimNumber.saturating_to::<u64>(),
                    block_number,
                    timestamp,
                })
            })
            .collect();

        Ok(events)
    }

    pub async fn fetch_contract_stats(&self) -> ChainResult<ContractScalars> {
        let provider = self.provider().await?;
        let contract = IHodlRacingClaim::new(self.chain.claim_contract, &provider);

        RPC_CALLS_TOTAL.with_label_values(&["contract_stats"]).inc();
        let total_claimed = contract
            .totalClaimed()
            .call()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        let total_pool = contract
            .totalPool()
            .call()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        let halving_interval = contract
            .halvingInterval()
            .call()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        let current_multiplier = contract
            .currentMultiplier()
            .call()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        Ok(ContractScalars {
            total_claimed,
            total_pool,
            halving_interval,
            current_multiplier: current_multiplier.saturating_to::<u32>(),
        })
    }

    async fn query_logs_chunked<P: Provider>(
        &self,
        provider: &P,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<Log>> {
        let filter = Filter::new()
            .address(self.chain.claim_contract)
            .event_signature(IHodlRacingClaim::Claimed::SIGNATURE_HASH);

        let mut all_logs = Vec::new();
        let mut current_from = from_block;

        while current_from <= to_block {
            let current_to = (current_from + LOG_QUERY_CHUNK_SIZE - 1).min(to_block);

            let chunk_filter = filter
                .clone()
                .from_block(BlockNumberOrTag::Number(current_from))
                .to_block(BlockNumberOrTag::Number(current_to));

            RPC_CALLS_TOTAL.with_label_values(&["get_logs"]).inc();
            let logs = provider
                .get_logs(&chunk_filter)
                .await
                .map_err(|e| ChainError::Rpc(e.to_string()))?;
            all_logs.extend(logs);

            current_from = current_to + 1;
        }

        Ok(all_logs)
    }

    /// Unix timestamps for the given block numbers, one lookup per
    /// distinct block, at most [`TIMESTAMP_FETCH_PERMITS`] in flight.
    async fn block_timestamps<P>(provider: P, blocks: Vec<u64>) -> ChainResult<HashMap<u64, i64>>
    where
        P: Provider + Clone + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(TIMESTAMP_FETCH_PERMITS));
        let mut join_set = JoinSet::new();

        for block_number in blocks {
            let provider = provider.clone();
            let semaphore = semaphore.clone();
            join_set.spawn(async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .map_err(|e| ChainError::Rpc(e.to_string()))?;
                RPC_CALLS_TOTAL.with_label_values(&["get_block"]).inc();
                let block = provider
                    .get_block_by_number(BlockNumberOrTag::Number(block_number))
                    .await
                    .map_err(|e| ChainError::Rpc(e.to_string()))?
                    .ok_or_else(|| ChainError::Rpc(format!("block {} not found", block_number)))?;
                Ok::<(u64, i64), ChainError>((block_number, block.header.timestamp as i64))
            });
        }

        let mut timestamps = HashMap::new();
        while let Some(joined) = join_set.join_next().await {
            let (block_number, timestamp) =
                joined.map_err(|e| ChainError::Rpc(e.to_string()))??;
            timestamps.insert(block_number, timestamp);
        }

        Ok(timestamps)
    }
}
