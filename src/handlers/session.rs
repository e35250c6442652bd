//! Session API handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::marketplace::{DraftUpdate, FilterUpdate, MarketplaceService, SessionView};
use crate::models::{ApiResponse, SelectTabRequest};

/// GET /api/session - Everything the page needs to render
pub async fn get_session(
    State(service): State<Arc<MarketplaceService>>,
) -> Json<ApiResponse<SessionView>> {
    let state = service.snapshot().await;

    Json(ApiResponse {
        success: true,
        data: Some(SessionView::from_state(&state)),
        error: None,
    })
}

/// PUT /api/session/tab - Switch the active tab
pub async fn select_tab(
    State(service): State<Arc<MarketplaceService>>,
    payload: Result<Json<SelectTabRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<SessionView>>> {
    let Json(request) = payload?;
    let state = service.select_tab(request.tab).await;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(SessionView::from_state(&state)),
        error: None,
    }))
}

/// POST /api/session/user/toggle - Switch between lender and borrower
pub async fn toggle_user_type(
    State(service): State<Arc<MarketplaceService>>,
) -> Json<ApiResponse<SessionView>> {
    let state = service.toggle_user_type().await;

    Json(ApiResponse {
        success: true,
        data: Some(SessionView::from_state(&state)),
        error: None,
    })
}

/// PATCH /api/filter - Edit filter bounds
pub async fn update_filter(
    State(service): State<Arc<MarketplaceService>>,
    payload: Result<Json<FilterUpdate>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<SessionView>>> {
    let Json(update) = payload?;
    let state = service.set_filter(update).await;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(SessionView::from_state(&state)),
        error: None,
    }))
}

/// PATCH /api/draft - Edit request form fields
pub async fn update_draft(
    State(service): State<Arc<MarketplaceService>>,
    payload: Result<Json<DraftUpdate>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<SessionView>>> {
    let Json(update) = payload?;
    let state = service.update_draft(update).await;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(SessionView::from_state(&state)),
        error: None,
    }))
}
