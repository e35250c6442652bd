//! Loan request route definitions

use axum::{routing::post, Router};

use crate::handlers::*;
use crate::state::AppState;

pub fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/api/requests", axum::routing::get(list_requests).post(submit_request))
        .route("/api/requests/:id/interest", post(express_interest))
        .route("/api/requests/:id/expand", post(toggle_expanded))
}
