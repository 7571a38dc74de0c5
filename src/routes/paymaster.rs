use axum::{routing::post, Router};

use crate::{handlers::paymaster::proxy, http_server::AppState};

pub fn paymaster_routes() -> Router<AppState> {
    Router::new().route("/paymaster", post(proxy))
}
