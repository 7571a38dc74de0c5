use axum::{routing::get, Router};

use crate::{handlers::contract::get_contract_stats, http_server::AppState};

pub fn contract_routes() -> Router<AppState> {
    Router::new().route("/contract/stats", get(get_contract_stats))
}
