use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tickerhub_aggregator::SnapshotCache;
use tickerhub_clock::Clock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;

/// Application state shared across handlers
pub struct AppState<C: Clock> {
    pub clock: Arc<C>,
    pub cache: SnapshotCache,
    /// Shared secret expected in `x-webhook-token`; `None` disables the check
    pub webhook_token: Option<String>,
}

impl<C: Clock> AppState<C> {
    pub fn new(clock: Arc<C>, cache: SnapshotCache, webhook_token: Option<String>) -> Self {
        AppState {
            clock,
            cache,
            webhook_token,
        }
    }
}

/// Create the REST API router
pub fn create_router<C: Clock + 'static>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::<C>))
        .route("/exchanges", get(handlers::exchanges))
        .route("/markets/{exchange}", get(handlers::markets::<C>))
        // Legacy per-exchange form
        .route("/{exchange}/markets", get(handlers::markets::<C>))
        .route("/webhooks/{exchange}", post(handlers::webhook::<C>))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
