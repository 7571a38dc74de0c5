use axum::{handler::Handler, middleware, routing::post, Router};

use crate::{
    handlers::claim::generate_signature, http_server::AppState,
    middlewares::bearer_auth::bearer_auth,
};

pub fn claim_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/claim/generate-signature",
        post(generate_signature.layer(middleware::from_fn_with_state(state, bearer_auth))),
    )
}
