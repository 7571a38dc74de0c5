use axum::{extract::State, Json};

use crate::{http_server::AppState, models::contract::ContractStatsResponse};

/// Halving summary from four scalar contract reads. Always 200; an
/// RPC failure serves the fallback payload.
pub async fn get_contract_stats(State(state): State<AppState>) -> Json<ContractStatsResponse> {
    match state.chain_client.fetch_contract_stats().await {
        Ok(scalars) => Json(ContractStatsResponse::derive(
            scalars.total_claimed,
            scalars.total_pool,
            scalars.halving_interval,
            scalars.current_multiplier,
        )),
        Err(e) => {
            tracing::warn!("Contract stats read failed: {}", e);
            Json(ContractStatsResponse::fallback())
        }
    }
}
