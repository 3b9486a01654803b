use time::{Duration, OffsetDateTime};

use crate::cookies::record::CookieRecord;
use crate::risk::classifier::{classify, RiskLevel};

/// Risk-level predicate: everything, or one exact tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskFilter {
    #[default]
    All,
    Level(RiskLevel),
}

impl RiskFilter {
    /// The tier is computed at evaluation time; a cookie can change buckets
    /// as its expiry horizon shrinks.
    pub fn matches(&self, record: &CookieRecord, now: OffsetDateTime) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::Level(level) => classify(record, now).level == *level,
        }
    }
}

/// Expiry-bucket predicate.
///
/// `Soon` (under 7 days) and `Long` (over 90 days) are not complements: a
/// cookie expiring in 30 days matches neither, but matches `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryFilter {
    #[default]
    All,
    /// No expiration timestamp.
    Session,
    /// Expires in under 7 days.
    Soon,
    /// Expires in over 90 days.
    Long,
}

impl ExpiryFilter {
    pub fn matches(&self, record: &CookieRecord, now: OffsetDateTime) -> bool {
        match self {
            ExpiryFilter::All => true,
            ExpiryFilter::Session => record.expires.is_none(),
            ExpiryFilter::Soon => record
                .expires
                .is_some_and(|when| when - now < Duration::days(7)),
            ExpiryFilter::Long => record
                .expires
                .is_some_and(|when| when - now > Duration::days(90)),
        }
    }
}

impl From<&str> for ExpiryFilter {
    /// Unrecognized bucket names match everything, mirroring the host UI's
    /// `<select>` fallthrough.
    fn from(value: &str) -> Self {
        match value {
            "session" => ExpiryFilter::Session,
            "soon" => ExpiryFilter::Soon,
            "long" => ExpiryFilter::Long,
            _ => ExpiryFilter::All,
        }
    }
}

/// Case-insensitive substring match against name or domain. An empty query
/// matches everything.
pub fn matches_search(record: &CookieRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    record.name.to_lowercase().contains(&query) || record.domain.to_lowercase().contains(&query)
}
