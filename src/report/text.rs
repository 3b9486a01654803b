use time::OffsetDateTime;

use crate::cookies::record::CookieRecord;
use crate::risk::classifier::classify;

/// Entries per report page.
const PAGE_SIZE: usize = 8;

const TITLE: &str = "Cookie Risk Report";
const SEPARATOR: &str = "------------";

/// Build the paginated text report for a view.
///
/// Each page carries the title, a page indicator, and up to [`PAGE_SIZE`]
/// entries. An empty view yields a single page stating so.
pub fn text_report_pages(records: &[CookieRecord], now: OffsetDateTime) -> Vec<String> {
    if records.is_empty() {
        return vec![format!("{TITLE}\n\nNo cookies in the current view.\n")];
    }

    let total_pages = records.len().div_ceil(PAGE_SIZE);
    records
        .chunks(PAGE_SIZE)
        .enumerate()
        .map(|(page_idx, chunk)| {
            let mut page = format!("{TITLE} - page {} of {total_pages}\n\n", page_idx + 1);
            for record in chunk {
                let verdict = classify(record, now);
                page.push_str(&format!("Name: {}\n", record.name));
                page.push_str(&format!("Domain: {}\n", record.domain));
                page.push_str(&format!("Size: {} bytes\n", record.size_bytes()));
                page.push_str(&format!("Expiry: {}\n", record.expiry_display()));
                page.push_str(&format!("Risk: {}\n", verdict.level));
                page.push_str(&format!("Reason: {}\n", verdict.rationale()));
                page.push_str(SEPARATOR);
                page.push('\n');
            }
            page
        })
        .collect()
}

/// The whole report as one string, pages joined by form feeds.
pub fn text_report(records: &[CookieRecord], now: OffsetDateTime) -> String {
    text_report_pages(records, now).join("\u{c}")
}
