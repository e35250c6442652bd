//! LoanHarmony Backend Library
//!
//! This library exports the marketplace session core and the HTTP surface
//! that serves it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod marketplace;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
