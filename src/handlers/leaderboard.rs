use axum::{extract::State, Json};

use crate::{http_server::AppState, models::leaderboard::LeaderboardResponse};

/// Always 200: replay failures degrade to an empty payload with a
/// reason string.
pub async fn get_leaderboard(State(state): State<AppState>) -> Json<LeaderboardResponse> {
    Json(state.leaderboard.build().await)
}
