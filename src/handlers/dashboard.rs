//! Dashboard API handler

use axum::Json;

use crate::marketplace::Dashboard;
use crate::models::ApiResponse;

/// GET /api/dashboard - Showcase dashboard figures
pub async fn get_dashboard() -> Json<ApiResponse<Dashboard>> {
    Json(ApiResponse {
        success: true,
        data: Some(Dashboard::showcase()),
        error: None,
    })
}
