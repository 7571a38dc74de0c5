use axum::{routing::get, Router};

use crate::{handlers::leaderboard::get_leaderboard, http_server::AppState};

pub fn leaderboard_routes() -> Router<AppState> {
    Router::new().route("/leaderboard", get(get_leaderboard))
}
