//! Host cookie-store capability.
//!
//! The audit core never talks to a browser directly; it goes through
//! [`CookieStore`], which exposes exactly the two suspending operations the
//! system needs: a bulk fetch and a keyed delete. [`MemoryCookieStore`] is
//! the in-process implementation, also used as a recording test double.

use std::sync::Mutex;

use futures::future::BoxFuture;
use url::Url;

use crate::base::auditerror::{AuditError, Result};
use crate::cookies::record::CookieRecord;

/// Abstract host cookie store.
///
/// `delete` addresses a cookie the way `chrome.cookies.remove` does: by the
/// URL it is scoped to (scheme chosen by the secure flag, host, path) plus
/// its name.
pub trait CookieStore: Send + Sync {
    /// Fetch the full cookie collection.
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<CookieRecord>>>;

    /// Delete one cookie by scope URL and name.
    fn delete<'a>(&'a self, url: &'a Url, name: &'a str) -> BoxFuture<'a, Result<()>>;
}

/// An in-memory cookie store.
///
/// Suitable for programmatic use and as a test double: every delete call is
/// recorded, and either operation can be made to fail on demand.
#[derive(Default)]
pub struct MemoryCookieStore {
    records: Mutex<Vec<CookieRecord>>,
    deletes: Mutex<Vec<(Url, String)>>,
    fail_fetch: Mutex<Option<String>>,
    fail_delete: Mutex<Option<String>>,
}

impl MemoryCookieStore {
    pub fn new(records: Vec<CookieRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    /// The delete calls seen so far, in order.
    pub fn recorded_deletes(&self) -> Vec<(Url, String)> {
        self.deletes.lock().unwrap().clone()
    }

    /// Make every subsequent `fetch_all` fail with the given reason.
    pub fn fail_fetches(&self, reason: impl Into<String>) {
        *self.fail_fetch.lock().unwrap() = Some(reason.into());
    }

    /// Make every subsequent `delete` fail with the given reason.
    pub fn fail_deletes(&self, reason: impl Into<String>) {
        *self.fail_delete.lock().unwrap() = Some(reason.into());
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieStore for MemoryCookieStore {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<CookieRecord>>> {
        Box::pin(async move {
            if let Some(reason) = self.fail_fetch.lock().unwrap().clone() {
                return Err(AuditError::HostFetchFailed { reason });
            }
            Ok(self.records.lock().unwrap().clone())
        })
    }

    fn delete<'a>(&'a self, url: &'a Url, name: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if let Some(reason) = self.fail_delete.lock().unwrap().clone() {
                return Err(AuditError::HostDeleteFailed { reason });
            }

            self.deletes
                .lock()
                .unwrap()
                .push((url.clone(), name.to_string()));

            let host = url.host_str().unwrap_or_default();
            let path = url.path();
            // A record set on ".example.com" is addressed by the bare host.
            self.records.lock().unwrap().retain(|r| {
                !(r.name == name && r.domain.trim_start_matches('.') == host && r.path == path)
            });
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, domain: &str, path: &str) -> CookieRecord {
        CookieRecord::from_unix_expiry(name, "v", domain, path, true, true, None)
    }

    #[tokio::test]
    async fn test_fetch_returns_all_records() {
        let store = MemoryCookieStore::new(vec![
            record("a", "example.com", "/"),
            record("b", ".example.com", "/"),
        ]);
        let fetched = store.fetch_all().await.unwrap();
        assert_eq!(fetched.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_matches_dotted_domain() {
        let store = MemoryCookieStore::new(vec![
            record("a", ".example.com", "/"),
            record("a", "other.com", "/"),
        ]);
        let url = Url::parse("https://example.com/").unwrap();
        store.delete(&url, "a").await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.recorded_deletes().len(), 1);
        let remaining = store.fetch_all().await.unwrap();
        assert_eq!(remaining[0].domain, "other.com");
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryCookieStore::new(vec![record("a", "example.com", "/")]);
        store.fail_fetches("backend gone");
        assert!(matches!(
            store.fetch_all().await,
            Err(AuditError::HostFetchFailed { .. })
        ));

        store.fail_deletes("backend gone");
        let url = Url::parse("https://example.com/").unwrap();
        assert!(matches!(
            store.delete(&url, "a").await,
            Err(AuditError::HostDeleteFailed { .. })
        ));
        // Failed deletes are not recorded and remove nothing.
        assert!(store.recorded_deletes().is_empty());
        assert_eq!(store.len(), 1);
    }
}
