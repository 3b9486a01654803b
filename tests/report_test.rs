//! Report builders stay consistent with the view's classifier.

use cookiescope::base::FixedClock;
use cookiescope::cookies::CookieRecord;
use cookiescope::query::{QueryEngine, RiskFilter};
use cookiescope::report::{csv_report, text_report_pages};
use cookiescope::risk::{classify, RiskLevel, RiskSummary};
use time::OffsetDateTime;

fn now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

fn fixture() -> Vec<CookieRecord> {
    vec![
        CookieRecord::from_unix_expiry("plain", "v", "example.com", "/", true, true, None),
        CookieRecord::from_unix_expiry("track", "v", ".ads.net", "/", false, false, None),
        CookieRecord::from_unix_expiry("token", "v", "example.com", "/", true, false, None),
    ]
}

#[test]
fn test_csv_rows_agree_with_classifier() {
    let records = fixture();
    let csv = csv_report(&records, now());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), records.len() + 1);

    for (record, line) in records.iter().zip(&lines[1..]) {
        let level = classify(record, now()).level;
        assert!(
            line.contains(&format!("\"{}\"", level.as_str())),
            "row for {} should carry {level}",
            record.name
        );
    }
}

#[test]
fn test_text_report_agrees_with_classifier() {
    let pages = text_report_pages(&fixture(), now());
    let body = pages.join("\n");
    assert!(body.contains("Risk: High\n"));
    assert!(body.contains("Risk: High (Essential)\n"));
    assert!(body.contains("Risk: Low\n"));
    assert!(body.contains("Third-party cookie"));
}

#[test]
fn test_summary_and_reports_share_one_risk_path() {
    let records = fixture();
    let summary = RiskSummary::from_records(&records, now());
    assert_eq!(summary.high, 2);
    assert_eq!(summary.low, 1);
    assert_eq!(summary.total(), records.len());

    // The CSV carries exactly the same tier distribution.
    let csv = csv_report(&records, now());
    let highs = csv.matches("\"High\"").count() + csv.matches("\"High (Essential)\"").count();
    assert_eq!(highs, summary.high);
}

#[test]
fn test_reports_follow_the_filtered_view() {
    let mut engine = QueryEngine::new(FixedClock(now()));
    engine.load(fixture()).unwrap();
    engine.set_risk_filter(RiskFilter::Level(RiskLevel::High));

    let csv = csv_report(engine.view(), now());
    assert_eq!(csv.lines().count(), 2); // header + the one High record
    assert!(csv.contains("\"track\""));
    assert!(!csv.contains("\"plain\""));
}
