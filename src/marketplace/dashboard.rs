//! Dashboard figures
//!
//! The marketplace has no history to aggregate, so the dashboard shows a
//! fixed set of showcase numbers.

use serde::Serialize;

use super::model::Purpose;

#[derive(Debug, Clone, Serialize)]
pub struct TopRequest {
    pub purpose: Purpose,
    pub amount: i64,
    pub credit_score: u32,
    pub duration: u32,
    pub success_rate: u32,
    pub karma: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub month: &'static str,
    pub requests: u32,
    pub matches: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Displayed trust score in percent
    pub trust_score: u32,
    pub total_matches: u32,
    pub matches_this_month: u32,
    /// Share of loans successfully funded, in percent
    pub success_rate: u32,
    pub top_requests: Vec<TopRequest>,
    pub trends: Vec<TrendPoint>,
}

impl Dashboard {
    pub fn showcase() -> Self {
        Self {
            trust_score: 85,
            total_matches: 142,
            matches_this_month: 23,
            success_rate: 92,
            top_requests: vec![
                top(Purpose::Education, 5_000, 680, 24, 92, 15),
                top(Purpose::Business, 15_000, 720, 36, 88, 25),
                top(Purpose::Home, 20_000, 750, 60, 95, 30),
                top(Purpose::Medical, 8_000, 650, 18, 85, 20),
            ],
            trends: vec![
                trend("Jan", 150, 120),
                trend("Feb", 180, 145),
                trend("Mar", 210, 170),
                trend("Apr", 195, 160),
                trend("May", 220, 185),
            ],
        }
    }
}

fn top(
    purpose: Purpose,
    amount: i64,
    credit_score: u32,
    duration: u32,
    success_rate: u32,
    karma: u32,
) -> TopRequest {
    TopRequest {
        purpose,
        amount,
        credit_score,
        duration,
        success_rate,
        karma,
    }
}

fn trend(month: &'static str, requests: u32, matches: u32) -> TrendPoint {
    TrendPoint {
        month,
        requests,
        matches,
    }
}
