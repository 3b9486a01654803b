//! Canonical cookie collection and its derived filtered view.
//!
//! One mutable owner, no globals: the engine holds the last-fetched
//! collection, recomputes the view in full whenever a predicate changes, and
//! carries at most one selected record. Renderers subscribe to explicit
//! view-changed / selection-changed transitions instead of listening
//! ambiently.

use url::Url;

use crate::base::auditerror::{AuditError, Result};
use crate::base::clock::{Clock, SystemClock};
use crate::cookies::record::{CookieKey, CookieRecord};
use crate::cookies::store::CookieStore;
use crate::query::filter::{matches_search, ExpiryFilter, RiskFilter};
use crate::risk::classifier::{classify, RiskVerdict};
use crate::risk::summary::RiskSummary;

type ViewObserver = Box<dyn Fn(&[CookieRecord]) + Send>;
type SelectionObserver = Box<dyn Fn(Option<&CookieRecord>) + Send>;

/// Owns the canonical cookie collection and the derived view.
///
/// The collection is replaced wholesale on every load or refresh, never
/// patched in place; after a deletion the engine re-fetches rather than
/// speculatively editing its local state.
pub struct QueryEngine {
    clock: Box<dyn Clock>,
    records: Vec<CookieRecord>,
    view: Vec<CookieRecord>,
    search: String,
    risk: RiskFilter,
    expiry: ExpiryFilter,
    selection: Option<CookieRecord>,
    view_observers: Vec<ViewObserver>,
    selection_observers: Vec<SelectionObserver>,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl QueryEngine {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            records: Vec::new(),
            view: Vec::new(),
            search: String::new(),
            risk: RiskFilter::All,
            expiry: ExpiryFilter::All,
            selection: None,
            view_observers: Vec::new(),
            selection_observers: Vec::new(),
        }
    }

    /// The canonical collection, as last fetched.
    pub fn records(&self) -> &[CookieRecord] {
        &self.records
    }

    /// The current filtered view.
    pub fn view(&self) -> &[CookieRecord] {
        &self.view
    }

    pub fn selection(&self) -> Option<&CookieRecord> {
        self.selection.as_ref()
    }

    /// Register a callback fired after every view recomputation.
    pub fn on_view_changed(&mut self, observer: impl Fn(&[CookieRecord]) + Send + 'static) {
        self.view_observers.push(Box::new(observer));
    }

    /// Register a callback fired on every selection transition.
    pub fn on_selection_changed(
        &mut self,
        observer: impl Fn(Option<&CookieRecord>) + Send + 'static,
    ) {
        self.selection_observers.push(Box::new(observer));
    }

    /// Replace the canonical collection wholesale. The view is reset to the
    /// full collection; active predicates apply again on their next change.
    ///
    /// Every record is validated before any state is touched — a malformed
    /// snapshot is rejected outright rather than partially applied.
    pub fn load(&mut self, records: Vec<CookieRecord>) -> Result<()> {
        for record in &records {
            record.validate()?;
        }
        tracing::debug!(count = records.len(), "loaded cookie collection");
        self.records = records;
        self.view = self.records.clone();
        self.notify_view();
        Ok(())
    }

    /// Fetch the full collection from the store and load it. On fetch
    /// failure the previous collection stays in place, stale but valid.
    pub async fn refresh(&mut self, store: &dyn CookieStore) -> Result<()> {
        let records = store.fetch_all().await?;
        self.load(records)
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.recompute();
    }

    pub fn set_risk_filter(&mut self, filter: RiskFilter) {
        self.risk = filter;
        self.recompute();
    }

    pub fn set_expiry_filter(&mut self, filter: ExpiryFilter) {
        self.expiry = filter;
        self.recompute();
    }

    /// Select the record with the given identity from the current view.
    /// Selecting outside the view is a contract violation.
    pub fn select(&mut self, key: &CookieKey) -> Result<()> {
        let record = self
            .view
            .iter()
            .find(|r| r.key() == *key)
            .cloned()
            .ok_or(AuditError::PreconditionViolation {
                what: "selected record is not in the current view",
            })?;
        self.selection = Some(record);
        self.notify_selection();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.notify_selection();
        }
    }

    /// Delete the selected cookie through the store, then re-fetch.
    ///
    /// With no selection this is rejected synchronously and the store is
    /// never called. On host failure the collection and selection are left
    /// untouched. A successful deletion clears the selection before the
    /// refresh, so a failed re-fetch still cannot re-delete.
    pub async fn remove_selected(&mut self, store: &dyn CookieStore) -> Result<()> {
        let selected = self
            .selection
            .clone()
            .ok_or(AuditError::PreconditionViolation {
                what: "remove called with no selection",
            })?;

        let url = deletion_url(&selected)?;
        store.delete(&url, &selected.name).await?;
        tracing::info!(name = %selected.name, domain = %selected.domain, "cookie deleted");

        self.selection = None;
        self.notify_selection();
        self.refresh(store).await
    }

    /// Per-record verdicts for the current view, in view order.
    pub fn view_verdicts(&self) -> Vec<RiskVerdict> {
        let now = self.clock.now();
        self.view.iter().map(|r| classify(r, now)).collect()
    }

    /// Aggregate tier counts over the current view.
    pub fn summary(&self) -> RiskSummary {
        RiskSummary::from_records(&self.view, self.clock.now())
    }

    /// Recompute the view from the canonical collection. The three
    /// predicates are conjunctive; the previous view is never patched.
    fn recompute(&mut self) {
        let now = self.clock.now();
        self.view = self
            .records
            .iter()
            .filter(|r| {
                matches_search(r, &self.search)
                    && self.risk.matches(r, now)
                    && self.expiry.matches(r, now)
            })
            .cloned()
            .collect();
        tracing::debug!(
            total = self.records.len(),
            filtered = self.view.len(),
            "recomputed filtered view"
        );
        self.notify_view();
    }

    fn notify_view(&self) {
        for observer in &self.view_observers {
            observer(&self.view);
        }
    }

    fn notify_selection(&self) {
        for observer in &self.selection_observers {
            observer(self.selection.as_ref());
        }
    }
}

/// Deletion target in `chrome.cookies.remove` form: scheme chosen by the
/// secure flag, host without the domain-cookie dot, plus the cookie path.
fn deletion_url(record: &CookieRecord) -> Result<Url> {
    let scheme = if record.secure { "https" } else { "http" };
    let host = record.domain.trim_start_matches('.');
    Url::parse(&format!("{scheme}://{host}{}", record.path))
        .map_err(|_| AuditError::InvalidRecord { field: "domain" })
}
