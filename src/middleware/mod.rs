//! Middleware for LoanHarmony API

mod tracing;

pub use self::tracing::{request_tracing, REQUEST_ID_HEADER};
