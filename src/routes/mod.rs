//! Route definitions for LoanHarmony API

mod dashboard;
mod requests;
mod session;

pub use dashboard::dashboard_routes;
pub use requests::request_routes;
pub use session::session_routes;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::handlers::{health_check, not_found, root};
use crate::middleware;
use crate::state::AppState;

/// Assemble the full application router
pub fn app_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(session_routes())
        .merge(request_routes())
        .merge(dashboard_routes())
        .fallback(not_found)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(cors)
}
