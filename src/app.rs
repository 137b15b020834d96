// src/app.rs
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::CorsConfig, routes, state::AppState};

pub fn build(state: AppState, cors: &CorsConfig) -> Router {
    routes::create_router()
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match config {
        CorsConfig::Any => layer.allow_origin(Any),
        CorsConfig::Origins(origins) => layer.allow_origin(origins.clone()),
    }
}

async fn health_check() -> &'static str {
    "OK"
}
