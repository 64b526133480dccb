use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::exoplanet;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use crate::config::ServerConfig;

/// Create the full router: `/health` at the root, classification routes under the prefix
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let prefix = server.normalized_prefix();
    let classification = if prefix.is_empty() {
        exoplanet::create_exoplanet_router()
    } else {
        Router::new().nest(&prefix, exoplanet::create_exoplanet_router())
    };

    Router::new()
        .route("/health", get(health::health_check))
        .merge(classification)
        .with_state(state)
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}
