use std::sync::Arc;

use axum::{Router, middleware::from_fn};

use crate::{
    auth::handlers::{leaderboard_routes, protected_auth_routes, public_auth_routes},
    health::handlers::health_routes,
    mw::{auth_mw::auth_mw, request_mw::request_mw},
    quiz::handlers::quiz_routes,
    report::handlers::report_routes,
    server::app_state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .nest("/health", health_routes(state.clone()))
        .nest("/auth", public_auth_routes(state.clone()))
        .nest("/leaderboard", leaderboard_routes(state.clone()));

    let protected_routes = Router::new()
        .nest("/account", protected_auth_routes(state.clone()))
        .nest("/quiz", quiz_routes(state.clone()))
        .nest("/reports", report_routes(state.clone()))
        .layer(from_fn(auth_mw));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(from_fn(request_mw))
}
