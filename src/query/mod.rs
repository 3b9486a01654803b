//! Canonical collection ownership and derived-view queries.

pub mod engine;
pub mod filter;

pub use engine::QueryEngine;
pub use filter::{matches_search, ExpiryFilter, RiskFilter};
