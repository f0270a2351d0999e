// src/web/mod.rs
// HTTP layer: search and health endpoints

pub mod api;
pub mod error;
pub mod state;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::web::state::AppState;

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/search", get(api::search))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
