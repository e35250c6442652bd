//! Application state shared across handlers

use std::sync::Arc;

use crate::config::Config;
use crate::marketplace::MarketplaceService;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub marketplace_service: Arc<MarketplaceService>,
}

impl AppState {
    pub fn new(marketplace_service: Arc<MarketplaceService>) -> Self {
        Self {
            marketplace_service,
        }
    }

    /// Build state for a fresh session from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(MarketplaceService::new(
            config.notification_ttl,
            config.intake_policy,
        ))
    }
}

impl FromRef<AppState> for Arc<MarketplaceService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.marketplace_service.clone()
    }
}
