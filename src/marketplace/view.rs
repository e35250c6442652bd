//! Read model handed to the presentation layer

use serde::Serialize;

use super::filter::filter_requests;
use super::model::{
    FilterCriteria, LoanRequest, Notification, RequestDraft, RequestId, Tab, User, UserType,
};
use super::state::MarketplaceState;

pub const NO_STORY_TEXT: &str = "No story provided";

/// A request as shown in the request grid
#[derive(Debug, Clone, Serialize)]
pub struct RequestCard {
    #[serde(flatten)]
    pub request: LoanRequest,
    pub expanded: bool,
    /// Story text for the expanded card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_text: Option<String>,
}

impl RequestCard {
    fn new(request: LoanRequest, expanded: Option<RequestId>) -> Self {
        let expanded = expanded == Some(request.id);
        let story_text = expanded.then(|| {
            request
                .story
                .clone()
                .unwrap_or_else(|| NO_STORY_TEXT.to_string())
        });

        Self {
            request,
            expanded,
            story_text,
        }
    }
}

/// Everything the page reads from a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub active_tab: Tab,
    pub user: User,
    pub tabs: Vec<Tab>,
    pub requests_tab_label: &'static str,
    pub switch_label: &'static str,
    /// Lenders see the filter panel and the express-interest action
    pub can_filter: bool,
    pub can_express_interest: bool,
    pub filter: FilterCriteria,
    pub total_requests: usize,
    pub requests: Vec<RequestCard>,
    pub expanded: Option<RequestId>,
    pub draft: RequestDraft,
    pub notification: Option<Notification>,
}

impl SessionView {
    pub fn from_state(state: &MarketplaceState) -> Self {
        let user = *state.user;
        let is_lender = user.user_type == UserType::Lender;

        let tabs = match user.user_type {
            UserType::Lender => vec![Tab::Dashboard, Tab::Requests],
            UserType::Borrower => vec![Tab::Dashboard, Tab::Requests, Tab::Submit],
        };

        let requests = filter_requests(&state.requests, &state.filter)
            .into_iter()
            .map(|request| RequestCard::new(request, state.expanded))
            .collect();

        Self {
            active_tab: state.active_tab,
            user,
            tabs,
            requests_tab_label: if is_lender {
                "Browse Requests"
            } else {
                "My Requests"
            },
            switch_label: if is_lender {
                "Switch to Borrower"
            } else {
                "Switch to Lender"
            },
            can_filter: is_lender,
            can_express_interest: is_lender,
            filter: *state.filter,
            total_requests: state.requests.len(),
            requests,
            expanded: state.expanded,
            draft: RequestDraft::clone(&state.draft),
            notification: state.notification.as_deref().cloned(),
        }
    }
}
