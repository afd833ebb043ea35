//! Route definitions for the Notify HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(preference_routes())
        .merge(sync_routes())
        .merge(push_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Inbox endpoints.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/{address}/notifications",
            get(handlers::notification::list),
        )
        .route(
            "/accounts/{address}/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/accounts/{address}/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/accounts/{address}/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/accounts/{address}/notifications/{id}",
            delete(handlers::notification::remove),
        )
        .route(
            "/accounts/{address}/notifications",
            delete(handlers::notification::clear),
        )
        .route(
            "/accounts/{address}/dedup",
            delete(handlers::notification::reset_dedup),
        )
}

/// Preference endpoints.
fn preference_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/{address}/preferences",
            get(handlers::preference::get_preferences),
        )
        .route(
            "/accounts/{address}/preferences",
            put(handlers::preference::update_preferences),
        )
}

/// Event snapshot ingest.
fn sync_routes() -> Router<AppState> {
    Router::new().route("/accounts/{address}/sync", post(handlers::sync::ingest))
}

/// Push subscription endpoints.
fn push_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/{address}/push/subscribe",
            post(handlers::push::subscribe),
        )
        .route(
            "/accounts/{address}/push/unsubscribe",
            post(handlers::push::unsubscribe),
        )
}

/// Health endpoints.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
