//! Heuristic cookie risk classification.
//!
//! One fixed rule table, pure over `(record, now)`. Every consumer — view
//! filtering, summary aggregation, report generation — goes through
//! [`classify`]; there is deliberately no second risk computation path.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::cookies::record::CookieRecord;

/// Byte threshold above which a cookie is flagged as oversized.
const LARGE_SIZE_BYTES: usize = 100;

/// Cookies expiring further out than this are flagged as long-lived.
const LONG_EXPIRY: Duration = Duration::days(365);

pub const REASON_LARGE_SIZE: &str = "Large size";
pub const REASON_MISSING_SECURE: &str = "Missing secure flag";
pub const REASON_MISSING_HTTP_ONLY: &str = "Missing HttpOnly flag";
pub const REASON_LONG_EXPIRY: &str = "Expires in more than 1 year";
pub const REASON_THIRD_PARTY: &str = "Third-party cookie → potential tracking";
pub const REASON_FIRST_PARTY_ESSENTIAL: &str =
    "First-party essential cookie → do NOT delete unless you understand the risk";

/// Rationale used when no rule fired.
pub const SAFE_LIMITS_MESSAGE: &str = "Cookie size & expiry are within safe limits.";

/// Risk tier assigned to a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "High (Essential)")]
    HighEssential,
}

impl RiskLevel {
    /// Whether deletion is recommended for this tier.
    ///
    /// Both `High` variants recommend deletion, `HighEssential` included —
    /// even though its rationale text warns against deleting. That tension
    /// is inherited from the source rule set and preserved deliberately; it
    /// looks like an unintended rule conflict, pending product
    /// clarification.
    pub fn recommend_deletion(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::HighEssential)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::HighEssential => "High (Essential)",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification result: a tier plus the ordered rationale behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskVerdict {
    pub level: RiskLevel,
    /// Rule texts in evaluation order. Each rule pushes its constant at most
    /// once, so the sequence is de-duplicated by construction.
    pub reasons: Vec<&'static str>,
}

impl RiskVerdict {
    /// Reasons joined with `"; "`, or the canned safe-limits message when no
    /// rule fired.
    pub fn rationale(&self) -> String {
        if self.reasons.is_empty() {
            SAFE_LIMITS_MESSAGE.to_string()
        } else {
            self.reasons.join("; ")
        }
    }

    pub fn recommend_deletion(&self) -> bool {
        self.level.recommend_deletion()
    }
}

/// Classify one cookie record at the given instant.
///
/// Pure and total over validated records: the same `(record, now)` pair
/// always yields the same verdict. Time is a parameter, not an ambient read,
/// because the long-expiry rule depends on it.
pub fn classify(record: &CookieRecord, now: OffsetDateTime) -> RiskVerdict {
    let first_party = record.is_first_party();
    let mut reasons = Vec::new();

    if record.size_bytes() > LARGE_SIZE_BYTES {
        reasons.push(REASON_LARGE_SIZE);
    }
    if !record.secure {
        reasons.push(REASON_MISSING_SECURE);
    }
    if !record.http_only {
        reasons.push(REASON_MISSING_HTTP_ONLY);
    }
    if let Some(expires) = record.expires {
        if expires - now > LONG_EXPIRY {
            reasons.push(REASON_LONG_EXPIRY);
        }
    }
    if !first_party {
        reasons.push(REASON_THIRD_PARTY);
    }

    // First matching rule wins; the rules are ordered, not merged.
    let missing_flag = !record.secure || !record.http_only;
    let level = if !first_party && missing_flag {
        RiskLevel::High
    } else if !first_party && !reasons.is_empty() {
        RiskLevel::Medium
    } else if first_party && missing_flag {
        reasons.push(REASON_FIRST_PARTY_ESSENTIAL);
        RiskLevel::HighEssential
    } else if !reasons.is_empty() {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    RiskVerdict { level, reasons }
}
