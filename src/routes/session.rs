//! Session route definitions

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::*;
use crate::state::AppState;

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/session/tab", put(select_tab))
        .route("/api/session/user/toggle", post(toggle_user_type))
        .route("/api/filter", patch(update_filter))
        .route("/api/draft", patch(update_draft))
}
