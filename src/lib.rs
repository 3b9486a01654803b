//! # cookiescope
//!
//! A cookie privacy auditing library.
//!
//! `cookiescope` inspects the cookies visible to a browser profile, assigns
//! each a heuristic privacy/security risk verdict, and keeps a filterable
//! view of the collection consistent with that classification.
//!
//! ## Features
//!
//! - **Risk Classification**: one fixed rule table over size, flags, expiry
//!   and third-party status, pure over `(record, now)`
//! - **Query Engine**: canonical collection with conjunctive search, risk
//!   and expiry-bucket filters, single-selection inspection and deletion
//! - **Browser Access**: Chrome and Firefox cookie databases via SQLite
//!   (encrypted values skipped), plus an in-memory store
//! - **Reports**: CSV table and paginated text report over the filtered
//!   view, through the same classifier as the view itself
//!
//! ## Quick Start
//!
//! ```rust
//! use cookiescope::base::SystemClock;
//! use cookiescope::cookies::{CookieRecord, MemoryCookieStore};
//! use cookiescope::query::{QueryEngine, RiskFilter};
//! use cookiescope::risk::RiskLevel;
//!
//! # #[tokio::main]
//! # async fn main() -> cookiescope::base::Result<()> {
//! let store = MemoryCookieStore::new(vec![CookieRecord::from_unix_expiry(
//!     "track_id", "abc123", ".ads.example.com", "/", false, false, None,
//! )]);
//!
//! let mut engine = QueryEngine::new(SystemClock);
//! engine.refresh(&store).await?;
//! engine.set_risk_filter(RiskFilter::Level(RiskLevel::High));
//! assert_eq!(engine.view().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error taxonomy and the injected clock
//! - [`cookies`] - Cookie records and host store access
//! - [`risk`] - The classification rule table and tier aggregates
//! - [`query`] - Canonical collection, filtered view, selection
//! - [`report`] - CSV and paginated text report builders

pub mod base;
pub mod cookies;
pub mod query;
pub mod report;
pub mod risk;
