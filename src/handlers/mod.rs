//! API handlers for LoanHarmony

pub mod dashboard;
pub mod requests;
pub mod session;
pub mod system;

pub use dashboard::get_dashboard;
pub use requests::*;
pub use session::*;
pub use system::{health_check, not_found, root};
