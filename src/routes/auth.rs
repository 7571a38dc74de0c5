use axum::{
    handler::Handler,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    handlers::auth::{get_profile, oauth_callback, start_auth, sync_stats},
    http_server::AppState,
    middlewares::bearer_auth::bearer_auth,
};

pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/iracing/auth/start", post(start_auth))
        .route("/auth/callback", get(oauth_callback))
        .route(
            "/iracing/profile",
            get(get_profile
                .layer(middleware::from_fn_with_state(state.clone(), bearer_auth))),
        )
        .route(
            "/iracing/sync-stats",
            post(sync_stats.layer(middleware::from_fn_with_state(state, bearer_auth))),
        )
}
