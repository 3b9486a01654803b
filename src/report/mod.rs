//! Report builders consumed by exporter collaborators.
//!
//! Both builders take `(records, now)` and classify through the same rule
//! table as the view; there is no separate risk computation path.

pub mod csv;
pub mod text;

pub use csv::csv_report;
pub use text::{text_report, text_report_pages};
