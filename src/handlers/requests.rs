//! Loan request API handlers

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::error::ApiResult;
use crate::marketplace::{
    filter_requests, DraftUpdate, LoanRequest, MarketplaceService, RequestId, SessionView,
};
use crate::models::{ApiResponse, ListRequestsQuery, RequestList};

/// GET /api/requests - Requests matching the session filter (`?all=true` for all)
pub async fn list_requests(
    State(service): State<Arc<MarketplaceService>>,
    Query(query): Query<ListRequestsQuery>,
) -> Json<ApiResponse<RequestList<LoanRequest>>> {
    let state = service.snapshot().await;

    let requests = if query.all {
        state.requests.to_vec()
    } else {
        filter_requests(&state.requests, &state.filter)
    };

    Json(ApiResponse {
        success: true,
        data: Some(RequestList {
            requests,
            total: state.requests.len(),
            filtered: !query.all,
        }),
        error: None,
    })
}

/// POST /api/requests - Submit the draft, optionally merging fields first
///
/// An empty body submits the draft exactly as it stands.
pub async fn submit_request(
    State(service): State<Arc<MarketplaceService>>,
    body: Bytes,
) -> ApiResult<Json<ApiResponse<SessionView>>> {
    if !body.iter().all(u8::is_ascii_whitespace) {
        let update: DraftUpdate = serde_json::from_slice(&body)?;
        if !update.is_empty() {
            service.update_draft(update).await;
        }
    }

    let state = service.submit_request().await?;

    Ok(Json(ApiResponse {
        success: true,
        data: Some(SessionView::from_state(&state)),
        error: None,
    }))
}

/// POST /api/requests/:id/interest - Express interest in a request
pub async fn express_interest(
    State(service): State<Arc<MarketplaceService>>,
    Path(id): Path<i64>,
) -> Json<ApiResponse<SessionView>> {
    let state = service.express_interest(RequestId(id)).await;

    Json(ApiResponse {
        success: true,
        data: Some(SessionView::from_state(&state)),
        error: None,
    })
}

/// POST /api/requests/:id/expand - Open or close a request card
pub async fn toggle_expanded(
    State(service): State<Arc<MarketplaceService>>,
    Path(id): Path<i64>,
) -> Json<ApiResponse<SessionView>> {
    let state = service.toggle_expanded(RequestId(id)).await;

    Json(ApiResponse {
        success: true,
        data: Some(SessionView::from_state(&state)),
        error: None,
    })
}
