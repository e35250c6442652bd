//! Marketplace session state and its transitions
//!
//! `MarketplaceState` is an immutable snapshot. Every transition builds a new
//! snapshot and reuses the `Arc` of each slice it did not touch, so a caller
//! can tell what changed with `Arc::ptr_eq`.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::intake::LoanTerms;
use super::model::{
    DraftUpdate, FilterCriteria, FilterUpdate, LoanRequest, Notification, NotificationKind,
    RequestDraft, RequestId, RequestStatus, Tab, User, REQUEST_KARMA_AWARD,
};

pub const SUBMITTED_MESSAGE: &str = "Loan request submitted successfully!";
pub const INTEREST_MESSAGE: &str = "+1 Karma! Interest recorded";

/// Actions the presentation layer can perform
#[derive(Debug, Clone)]
pub enum Action {
    SelectTab(Tab),
    ToggleUserType,
    SetFilter(FilterUpdate),
    UpdateDraft(DraftUpdate),
    SubmitRequest(LoanTerms),
    RejectSubmission(String),
    ToggleExpanded(RequestId),
    ExpressInterest(RequestId),
    DismissNotification { generation: u64 },
}

/// Follow-up work a transition asks the controller to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Clear the notification with this generation once its display time is up
    ScheduleDismissal { generation: u64 },
}

/// Result of applying an action
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: MarketplaceState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn quiet(state: MarketplaceState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

/// Snapshot of one marketplace session
#[derive(Debug, Clone, Default)]
pub struct MarketplaceState {
    pub active_tab: Tab,
    pub requests: Arc<Vec<LoanRequest>>,
    pub user: Arc<User>,
    pub filter: Arc<FilterCriteria>,
    pub expanded: Option<RequestId>,
    pub draft: Arc<RequestDraft>,
    pub notification: Option<Arc<Notification>>,
    last_request_id: Option<RequestId>,
    notification_generation: u64,
}

impl MarketplaceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action, producing the next state
    pub fn apply(&self, action: Action, now: DateTime<Utc>) -> Transition {
        match action {
            Action::SelectTab(tab) => Transition::quiet(self.select_tab(tab)),
            Action::ToggleUserType => Transition::quiet(self.toggle_user_type()),
            Action::SetFilter(update) => Transition::quiet(self.set_filter(&update)),
            Action::UpdateDraft(update) => Transition::quiet(self.update_draft(&update)),
            Action::SubmitRequest(terms) => self.submit_request(terms, now),
            Action::RejectSubmission(reason) => self.reject_submission(&reason),
            Action::ToggleExpanded(id) => Transition::quiet(self.toggle_expanded(id)),
            Action::ExpressInterest(id) => self.express_interest(id),
            Action::DismissNotification { generation } => {
                Transition::quiet(self.dismiss_notification(generation))
            }
        }
    }

    pub fn select_tab(&self, tab: Tab) -> Self {
        Self {
            active_tab: tab,
            ..self.clone()
        }
    }

    /// Switch between lender and borrower. Tab, draft and filters stay put.
    pub fn toggle_user_type(&self) -> Self {
        Self {
            user: Arc::new(User {
                user_type: self.user.user_type.toggled(),
                ..*self.user
            }),
            ..self.clone()
        }
    }

    /// Merge filter edits. Inverted ranges are allowed and match nothing.
    pub fn set_filter(&self, update: &FilterUpdate) -> Self {
        Self {
            filter: Arc::new(self.filter.merged(update)),
            ..self.clone()
        }
    }

    pub fn update_draft(&self, update: &DraftUpdate) -> Self {
        let mut draft = RequestDraft::clone(&self.draft);
        let fields = [
            (&mut draft.amount, &update.amount),
            (&mut draft.purpose, &update.purpose),
            (&mut draft.duration, &update.duration),
            (&mut draft.credit_score, &update.credit_score),
            (&mut draft.story, &update.story),
        ];
        for (field, edit) in fields {
            if let Some(value) = edit {
                field.clone_from(value);
            }
        }

        Self {
            draft: Arc::new(draft),
            ..self.clone()
        }
    }

    /// Open a request's card, or close it if it is already open
    pub fn toggle_expanded(&self, id: RequestId) -> Self {
        let expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };

        Self {
            expanded,
            ..self.clone()
        }
    }

    /// Append a new pending request built from the submitted terms
    pub fn submit_request(&self, terms: LoanTerms, now: DateTime<Utc>) -> Transition {
        let id = self.next_request_id(now);

        let request = LoanRequest {
            id,
            amount: terms.amount,
            purpose: terms.purpose,
            duration: terms.duration,
            credit_score: terms.credit_score,
            story: terms.story,
            karma: REQUEST_KARMA_AWARD,
            trust_score: 0,
            matches: 0,
            status: RequestStatus::Pending,
            created_at: now,
        };

        let mut requests = Vec::with_capacity(self.requests.len() + 1);
        requests.extend(self.requests.iter().cloned());
        requests.push(request);

        let next = Self {
            requests: Arc::new(requests),
            draft: Arc::new(RequestDraft::default()),
            last_request_id: Some(id),
            ..self.clone()
        };

        next.notify(NotificationKind::Success, SUBMITTED_MESSAGE.to_string())
    }

    /// Surface an intake rejection. The draft is left for the user to fix.
    pub fn reject_submission(&self, reason: &str) -> Transition {
        self.notify(NotificationKind::Error, reason.to_string())
    }

    /// Record one expression of interest in a request.
    ///
    /// An unknown id changes nothing and raises no notification.
    pub fn express_interest(&self, id: RequestId) -> Transition {
        let Some(position) = self.requests.iter().position(|request| request.id == id) else {
            return Transition::quiet(self.clone());
        };

        let mut requests = Vec::clone(&self.requests);
        if let Some(request) = requests.get_mut(position) {
            request.matches += 1;
        }

        let next = Self {
            requests: Arc::new(requests),
            user: Arc::new(User {
                karma: self.user.karma + 1,
                ..*self.user
            }),
            ..self.clone()
        };

        next.notify(NotificationKind::Success, INTEREST_MESSAGE.to_string())
    }

    /// Clear the notification, but only if it is still the one with `generation`
    pub fn dismiss_notification(&self, generation: u64) -> Self {
        match &self.notification {
            Some(current) if current.generation == generation => Self {
                notification: None,
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    fn notify(&self, kind: NotificationKind, message: String) -> Transition {
        let generation = self.notification_generation + 1;

        let state = Self {
            notification: Some(Arc::new(Notification {
                kind,
                message,
                generation,
            })),
            notification_generation: generation,
            ..self.clone()
        };

        Transition {
            state,
            effect: Some(Effect::ScheduleDismissal { generation }),
        }
    }

    fn next_request_id(&self, now: DateTime<Utc>) -> RequestId {
        let stamp = now.timestamp_millis();
        match self.last_request_id {
            Some(RequestId(last)) if stamp <= last => RequestId(last + 1),
            _ => RequestId(stamp),
        }
    }

    pub fn find_request(&self, id: RequestId) -> Option<&LoanRequest> {
        self.requests.iter().find(|request| request.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::model::{NumericInput, Purpose, UserType};
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn terms(amount: i64) -> LoanTerms {
        LoanTerms {
            amount: NumericInput::Value(amount),
            purpose: Some(Purpose::Home),
            duration: NumericInput::Value(12),
            credit_score: NumericInput::Value(700),
            story: None,
        }
    }

    #[test]
    fn test_initial_state() {
        let state = MarketplaceState::new();
        assert_eq!(state.active_tab, Tab::Dashboard);
        assert_eq!(state.user.user_type, UserType::Lender);
        assert_eq!(state.user.karma, 0);
        assert!(state.requests.is_empty());
        assert!(state.filter.is_unconstrained());
        assert!(state.notification.is_none());
        assert!(state.expanded.is_none());
    }

    #[test]
    fn test_ids_are_unique_within_one_instant() {
        let now = at(1_700_000_000_000);
        let first = MarketplaceState::new().submit_request(terms(1), now).state;
        let second = first.submit_request(terms(2), now).state;
        let third = second.submit_request(terms(3), at(1_600_000_000_000)).state;

        let ids: Vec<i64> = third.requests.iter().map(|r| r.id.0).collect();
        assert_eq!(
            ids,
            vec![1_700_000_000_000, 1_700_000_000_001, 1_700_000_000_002]
        );
    }

    #[test]
    fn test_submit_leaves_unrelated_slices_shared() {
        let state = MarketplaceState::new();
        let next = state.submit_request(terms(100), at(1)).state;

        assert!(Arc::ptr_eq(&state.user, &next.user));
        assert!(Arc::ptr_eq(&state.filter, &next.filter));
        assert!(!Arc::ptr_eq(&state.requests, &next.requests));
        assert!(!Arc::ptr_eq(&state.draft, &next.draft));
    }

    #[test]
    fn test_update_draft_merges_fields() {
        let state = MarketplaceState::new()
            .update_draft(&DraftUpdate {
                amount: Some("5000".to_string()),
                purpose: Some("Education".to_string()),
                ..Default::default()
            })
            .update_draft(&DraftUpdate {
                duration: Some("24".to_string()),
                amount: Some("6000".to_string()),
                ..Default::default()
            });

        assert_eq!(state.draft.amount, "6000");
        assert_eq!(state.draft.purpose, "Education");
        assert_eq!(state.draft.duration, "24");
        assert_eq!(state.draft.credit_score, "");
    }

    #[test]
    fn test_toggle_expanded() {
        let state = MarketplaceState::new();
        let open = state.toggle_expanded(RequestId(4));
        assert_eq!(open.expanded, Some(RequestId(4)));

        let other = open.toggle_expanded(RequestId(5));
        assert_eq!(other.expanded, Some(RequestId(5)));

        let closed = other.toggle_expanded(RequestId(5));
        assert_eq!(closed.expanded, None);
    }

    #[test]
    fn test_toggle_user_type_keeps_everything_else() {
        let state = MarketplaceState::new()
            .select_tab(Tab::Requests)
            .set_filter(&FilterUpdate {
                min_amount: Some("10".to_string()),
                ..Default::default()
            });

        let toggled = state.toggle_user_type();
        assert_eq!(toggled.user.user_type, UserType::Borrower);
        assert_eq!(toggled.user.karma, state.user.karma);
        assert_eq!(toggled.active_tab, Tab::Requests);
        assert!(Arc::ptr_eq(&state.filter, &toggled.filter));
        assert!(Arc::ptr_eq(&state.draft, &toggled.draft));

        assert_eq!(toggled.toggle_user_type().user.user_type, UserType::Lender);
    }

    #[test]
    fn test_notifications_carry_increasing_generations() {
        let first = MarketplaceState::new().submit_request(terms(1), at(1));
        assert_eq!(
            first.effect,
            Some(Effect::ScheduleDismissal { generation: 1 })
        );

        let id = first.state.requests[0].id;
        let second = first.state.express_interest(id);
        assert_eq!(
            second.effect,
            Some(Effect::ScheduleDismissal { generation: 2 })
        );
        let notification = second.state.notification.as_ref().unwrap();
        assert_eq!(notification.message, INTEREST_MESSAGE);
        assert_eq!(notification.generation, 2);
    }

    #[test]
    fn test_stale_dismissal_is_ignored() {
        let first = MarketplaceState::new().submit_request(terms(1), at(1)).state;
        let id = first.requests[0].id;
        let second = first.express_interest(id).state;

        let after_stale = second.dismiss_notification(1);
        assert_eq!(
            after_stale.notification.as_ref().map(|n| n.generation),
            Some(2)
        );

        let after_current = after_stale.dismiss_notification(2);
        assert!(after_current.notification.is_none());
    }

    #[test]
    fn test_reject_submission_keeps_draft() {
        let state = MarketplaceState::new().update_draft(&DraftUpdate {
            amount: Some("-5".to_string()),
            ..Default::default()
        });

        let transition = state.reject_submission("Invalid loan request");
        let notification = transition.state.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(Arc::ptr_eq(&state.draft, &transition.state.draft));
        assert!(transition.state.requests.is_empty());
    }

    #[test]
    fn test_apply_routes_actions() {
        let state = MarketplaceState::new();
        let next = state.apply(Action::SelectTab(Tab::Submit), at(0));
        assert_eq!(next.state.active_tab, Tab::Submit);
        assert!(next.effect.is_none());

        let next = next.state.apply(Action::SubmitRequest(terms(9)), at(5));
        assert_eq!(next.state.requests.len(), 1);
        assert!(next.effect.is_some());
        assert!(next.state.find_request(RequestId(5)).is_some());
    }
}
