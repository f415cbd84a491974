use axum::{
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        // Tender routes
        .route("/api/tenders/list", get(handlers::tenders::list_tenders))
        .route("/api/tenders/new", post(handlers::tenders::create_tender))
        .route("/api/tenders/:id", get(handlers::tenders::get_tender))
        .route("/api/tenders/:id/edit", patch(handlers::tenders::edit_tender))
        .route("/api/tenders/:id/publish", post(handlers::tenders::publish_tender))
        .route("/api/tenders/:id/cancel", post(handlers::tenders::cancel_tender))
        // Bid routes
        .route("/api/bids/new", post(handlers::bids::create_bid))
        .route("/api/bids/:id/edit", put(handlers::bids::edit_bid))
        .route("/api/bids/:id/status", patch(handlers::bids::update_bid_status))
        .route("/api/bids/:id/publish", post(handlers::bids::publish_bid))
        .route("/api/bids/:id/cancel", post(handlers::bids::cancel_bid))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
