//! Loan marketplace domain module
//!
//! Contains the session state, request filtering, form intake, dashboard
//! figures, and the service that drives them.

pub mod dashboard;
pub mod filter;
pub mod intake;
mod model;
pub mod service;
pub mod state;
pub mod view;

pub use dashboard::Dashboard;
pub use filter::filter_requests;
pub use intake::{IntakeError, IntakePolicy, LoanTerms};
pub use model::*;
pub use service::{MarketplaceService, DEFAULT_NOTIFICATION_TTL};
pub use state::{Action, Effect, MarketplaceState, Transition};
pub use view::{RequestCard, SessionView};
