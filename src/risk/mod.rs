//! Risk classification.
//!
//! The rule table lives in [`classifier`]; [`summary`] aggregates tier
//! counts for display. Both are pure over `(records, now)`.

pub mod classifier;
pub mod summary;

pub use classifier::{classify, RiskLevel, RiskVerdict};
pub use summary::RiskSummary;
