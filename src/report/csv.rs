use time::OffsetDateTime;

use crate::cookies::record::CookieRecord;
use crate::risk::classifier::classify;

/// Column headers of the tabular report.
const HEADER: &[&str] = &["Name", "Domain", "Value", "Size(bytes)", "Expiry", "Risk"];

/// Build the CSV cookie report for a view.
///
/// Risk comes from the one shared classifier; the report can never disagree
/// with what a renderer shows for the same view and instant.
pub fn csv_report(records: &[CookieRecord], now: OffsetDateTime) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        HEADER
            .iter()
            .map(|h| quote(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in records {
        let verdict = classify(record, now);
        let fields = [
            record.name.as_str(),
            record.domain.as_str(),
            record.value.as_str(),
            &record.size_bytes().to_string(),
            &record.expiry_display(),
            verdict.level.as_str(),
        ];
        lines.push(fields.map(quote).join(","));
    }

    lines.join("\n")
}

/// Quote one CSV field, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
