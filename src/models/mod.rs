//! API data models for LoanHarmony

use serde::{Deserialize, Serialize};

use crate::marketplace::Tab;

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Body of a tab selection
#[derive(Debug, Deserialize)]
pub struct SelectTabRequest {
    pub tab: Tab,
}

/// Query for listing loan requests
#[derive(Debug, Default, Deserialize)]
pub struct ListRequestsQuery {
    /// Skip the session filter and return every request
    #[serde(default)]
    pub all: bool,
}

/// Loan request listing
#[derive(Debug, Serialize)]
pub struct RequestList<T> {
    pub requests: Vec<T>,
    pub total: usize,
    pub filtered: bool,
}
