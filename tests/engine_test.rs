use cookiescope::base::{AuditError, FixedClock};
use cookiescope::cookies::{CookieRecord, MemoryCookieStore};
use cookiescope::query::{ExpiryFilter, QueryEngine, RiskFilter};
use cookiescope::risk::RiskLevel;
use time::{Duration, OffsetDateTime};

fn now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

fn engine() -> QueryEngine {
    QueryEngine::new(FixedClock(now()))
}

fn record(name: &str, domain: &str) -> CookieRecord {
    CookieRecord::from_unix_expiry(name, "value", domain, "/", true, true, None)
}

fn expiring_in(name: &str, days: i64) -> CookieRecord {
    let mut c = record(name, "example.com");
    c.expires = Some(now() + Duration::days(days));
    c
}

/// Four records spanning all tiers, for the composed-filter property.
fn fixture() -> Vec<CookieRecord> {
    let low = record("plain", "example.com");

    let mut medium = record("track_pref", "example.com");
    medium.value = "x".repeat(150); // Large size only

    let mut high = record("track_id", ".ads.net");
    high.secure = false;

    let mut essential = record("session_token", "example.com");
    essential.http_only = false;

    vec![low, medium, high, essential]
}

#[test]
fn test_search_composed_with_risk_filter() {
    let mut engine = engine();
    engine.load(fixture()).unwrap();

    engine.set_search("track");
    assert_eq!(engine.view().len(), 2);

    engine.set_risk_filter(RiskFilter::Level(RiskLevel::High));
    assert_eq!(engine.view().len(), 1);
    assert_eq!(engine.view()[0].name, "track_id");

    // Widening one predicate re-admits records matching the rest.
    engine.set_search("");
    assert_eq!(engine.view().len(), 1);
}

#[test]
fn test_expiry_buckets_on_fixed_clock() {
    let mut engine = engine();
    engine
        .load(vec![
            expiring_in("soon", 3),
            expiring_in("between", 40),
            expiring_in("long", 200),
            record("session", "example.com"),
        ])
        .unwrap();

    engine.set_expiry_filter(ExpiryFilter::Soon);
    let names: Vec<&str> = engine.view().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["soon"]);

    engine.set_expiry_filter(ExpiryFilter::Long);
    let names: Vec<&str> = engine.view().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["long"]);

    // 40 days out matches neither dated bucket, only the default.
    engine.set_expiry_filter(ExpiryFilter::All);
    assert_eq!(engine.view().len(), 4);

    engine.set_expiry_filter(ExpiryFilter::Session);
    let names: Vec<&str> = engine.view().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["session"]);
}

#[tokio::test]
async fn test_remove_without_selection_never_calls_host() {
    let store = MemoryCookieStore::new(vec![record("a", "example.com")]);
    let mut engine = engine();
    engine.refresh(&store).await.unwrap();

    let err = engine.remove_selected(&store).await.unwrap_err();
    assert!(matches!(err, AuditError::PreconditionViolation { .. }));
    assert!(store.recorded_deletes().is_empty());
}

#[tokio::test]
async fn test_successful_remove_refetches_and_clears_selection() {
    let doomed = record("doomed", "example.com");
    let survivor = record("survivor", "other.com");
    let store = MemoryCookieStore::new(vec![doomed.clone(), survivor.clone()]);

    let mut engine = engine();
    engine.refresh(&store).await.unwrap();
    engine.select(&doomed.key()).unwrap();

    engine.remove_selected(&store).await.unwrap();

    assert!(engine.selection().is_none());
    assert_eq!(engine.records().len(), 1);
    assert!(engine.records().iter().all(|r| r.key() != doomed.key()));
    assert_eq!(store.recorded_deletes().len(), 1);
    let (url, name) = &store.recorded_deletes()[0];
    assert_eq!(name, "doomed");
    assert_eq!(url.as_str(), "https://example.com/");
}

#[tokio::test]
async fn test_failed_remove_leaves_state_untouched() {
    let target = record("target", "example.com");
    let store = MemoryCookieStore::new(vec![target.clone()]);

    let mut engine = engine();
    engine.refresh(&store).await.unwrap();
    engine.select(&target.key()).unwrap();

    store.fail_deletes("browser is running");
    let err = engine.remove_selected(&store).await.unwrap_err();
    assert!(matches!(err, AuditError::HostDeleteFailed { .. }));

    // Collection and selection survive a host failure.
    assert_eq!(engine.records().len(), 1);
    assert_eq!(engine.selection().unwrap().key(), target.key());
}

#[tokio::test]
async fn test_failed_fetch_keeps_stale_collection() {
    let store = MemoryCookieStore::new(vec![record("a", "example.com")]);
    let mut engine = engine();
    engine.refresh(&store).await.unwrap();

    store.fail_fetches("backend gone");
    let err = engine.refresh(&store).await.unwrap_err();
    assert!(matches!(err, AuditError::HostFetchFailed { .. }));
    assert_eq!(engine.records().len(), 1);
}

#[test]
fn test_summary_over_current_view_only() {
    let mut engine = engine();
    engine.load(fixture()).unwrap();

    let full = engine.summary();
    assert_eq!(full.high, 2); // High + HighEssential
    assert_eq!(full.medium, 1);
    assert_eq!(full.low, 1);

    engine.set_risk_filter(RiskFilter::Level(RiskLevel::Low));
    let filtered = engine.summary();
    assert_eq!(filtered.total(), 1);
    assert_eq!(filtered.low, 1);
}

#[test]
fn test_view_verdicts_align_with_view_order() {
    let mut engine = engine();
    engine.load(fixture()).unwrap();
    engine.set_search("track_id");

    let verdicts = engine.view_verdicts();
    assert_eq!(verdicts.len(), engine.view().len());
    assert_eq!(verdicts[0].level, RiskLevel::High);
    assert!(verdicts[0].recommend_deletion());
}
