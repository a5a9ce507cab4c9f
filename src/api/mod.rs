//! HTTP API server

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::storage::AirportStore;

pub mod cors;
pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    let index = ServeFile::new(state.static_dir.join("index.html"));
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route_service("/", index)
        .nest_service("/static", assets)
        .route("/search", get(handlers::search))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(cors::cors))
}

/// Convenience helper wiring a store and static directory into a router
pub fn create_search_router(
    store: Arc<dyn AirportStore>,
    static_dir: impl Into<std::path::PathBuf>,
) -> Router {
    create_router(AppState::new(store, static_dir))
}
