use serde::Serialize;
use time::OffsetDateTime;

use crate::cookies::record::CookieRecord;
use crate::risk::classifier::{classify, RiskLevel};

/// Aggregate risk counts over a view, the shape a renderer's pie chart or
/// summary line consumes. Both `High` variants land in `high`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskSummary {
    /// Count risk tiers across `records` at the given instant, using the
    /// same classifier as everything else.
    pub fn from_records(records: &[CookieRecord], now: OffsetDateTime) -> Self {
        let mut summary = RiskSummary::default();
        for record in records {
            match classify(record, now).level {
                RiskLevel::High | RiskLevel::HighEssential => summary.high += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::Low => summary.low += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}
