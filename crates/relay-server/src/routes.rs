//! Route configuration for the relay.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers::{alert, callback, home};
use crate::state::AppState;

/// Create the relay router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/callback", post(callback))
        .route("/alert", post(alert))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
