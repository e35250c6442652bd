//! Marketplace service layer - owns the live session state

use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::filter::filter_requests;
use super::intake::{self, IntakeError, IntakePolicy};
use super::model::{DraftUpdate, FilterUpdate, LoanRequest, RequestId, Tab};
use super::state::{Action, Effect, MarketplaceState};

/// Default display time of a notification
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

struct Session {
    state: MarketplaceState,
    pending_dismissal: Option<JoinHandle<()>>,
}

/// Marketplace service applying actions to a single in-memory session
pub struct MarketplaceService {
    session: RwLock<Session>,
    notification_ttl: Duration,
    intake_policy: IntakePolicy,
}

impl MarketplaceService {
    /// Create a new marketplace service instance
    pub fn new(notification_ttl: Duration, intake_policy: IntakePolicy) -> Arc<Self> {
        Arc::new(Self {
            session: RwLock::new(Session {
                state: MarketplaceState::new(),
                pending_dismissal: None,
            }),
            notification_ttl,
            intake_policy,
        })
    }

    /// Current state snapshot
    pub async fn snapshot(&self) -> MarketplaceState {
        self.session.read().await.state.clone()
    }

    /// Apply one action and return the resulting state
    pub async fn dispatch(self: &Arc<Self>, action: Action) -> MarketplaceState {
        let mut session = self.session.write().await;
        self.apply_locked(&mut session, action)
    }

    fn apply_locked(self: &Arc<Self>, session: &mut Session, action: Action) -> MarketplaceState {
        let transition = session.state.apply(action, Utc::now());
        session.state = transition.state;

        if let Some(Effect::ScheduleDismissal { generation }) = transition.effect {
            if let Some(pending) = session.pending_dismissal.take() {
                pending.abort();
            }
            session.pending_dismissal = Some(self.schedule_dismissal(generation));
        }

        session.state.clone()
    }

    fn schedule_dismissal(self: &Arc<Self>, generation: u64) -> JoinHandle<()> {
        let service: Weak<Self> = Arc::downgrade(self);
        let ttl = self.notification_ttl;

        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let Some(service) = service.upgrade() else {
                return;
            };

            let mut session = service.session.write().await;
            session.state = session.state.dismiss_notification(generation);
            tracing::debug!(generation, "Notification dismissed");
        })
    }

    pub async fn select_tab(self: &Arc<Self>, tab: Tab) -> MarketplaceState {
        self.dispatch(Action::SelectTab(tab)).await
    }

    pub async fn toggle_user_type(self: &Arc<Self>) -> MarketplaceState {
        let state = self.dispatch(Action::ToggleUserType).await;
        tracing::info!(user_type = ?state.user.user_type, "User type switched");
        state
    }

    pub async fn set_filter(self: &Arc<Self>, update: FilterUpdate) -> MarketplaceState {
        self.dispatch(Action::SetFilter(update)).await
    }

    pub async fn update_draft(self: &Arc<Self>, update: DraftUpdate) -> MarketplaceState {
        self.dispatch(Action::UpdateDraft(update)).await
    }

    pub async fn toggle_expanded(self: &Arc<Self>, id: RequestId) -> MarketplaceState {
        self.dispatch(Action::ToggleExpanded(id)).await
    }

    /// Submit the current draft.
    ///
    /// Under the strict intake policy a rejected draft raises an error
    /// notification and the error is returned to the caller.
    pub async fn submit_request(self: &Arc<Self>) -> Result<MarketplaceState, IntakeError> {
        let mut session = self.session.write().await;

        match intake::accept(&session.state.draft, self.intake_policy) {
            Ok(terms) => {
                let state = self.apply_locked(&mut session, Action::SubmitRequest(terms));
                if let Some(request) = state.requests.last() {
                    tracing::info!(
                        request_id = %request.id,
                        purpose = ?request.purpose,
                        "Loan request submitted"
                    );
                }
                Ok(state)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loan request rejected");
                self.apply_locked(&mut session, Action::RejectSubmission(e.to_string()));
                Err(e)
            }
        }
    }

    /// Record interest in a request. Unknown ids are ignored.
    pub async fn express_interest(self: &Arc<Self>, id: RequestId) -> MarketplaceState {
        let state = self.dispatch(Action::ExpressInterest(id)).await;
        match state.find_request(id) {
            Some(request) => tracing::info!(
                request_id = %id,
                matches = request.matches,
                karma = state.user.karma,
                "Interest recorded"
            ),
            None => tracing::debug!(request_id = %id, "Interest for unknown request ignored"),
        }
        state
    }

    /// Requests visible under the current filter
    pub async fn filtered_requests(&self) -> Vec<LoanRequest> {
        let state = self.snapshot().await;
        filter_requests(&state.requests, &state.filter)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_dismissal.take() {
            pending.abort();
        }
    }
}
