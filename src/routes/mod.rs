use axum::Router;

use crate::{
    http_server::AppState,
    routes::{
        auth::auth_routes, claim::claim_routes, contract::contract_routes,
        leaderboard::leaderboard_routes, paymaster::paymaster_routes,
    },
};

pub mod auth;
pub mod claim;
pub mod contract;
pub mod leaderboard;
pub mod paymaster;

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth_routes(state.clone()))
        .merge(claim_routes(state))
        .merge(leaderboard_routes())
        .merge(contract_routes())
        .merge(paymaster_routes())
}
