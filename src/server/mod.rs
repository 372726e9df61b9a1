pub mod dispatch;
pub mod routes;
pub mod ws;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/calc", post(routes::post_calc))
        .route("/api/leg", post(routes::post_leg))
        .route("/api/arbitrage", post(routes::post_arbitrage))
        .route("/api/hedge", post(routes::post_hedge))
        .route("/api/distribute", post(routes::post_distribute))
        .route("/api/settle", post(routes::post_settle))
        .route("/api/health", get(routes::get_health))
        .route("/api/counters", get(routes::get_counters))
        .route("/ws", get(ws::ws_handler))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}
