//! Console output.

use crate::models::CitationSummary;

/// Line announcing the paper about to be queried.
#[must_use]
pub fn format_progress(title: &str) -> String {
    format!("> Obtaining citation counts for \"{title}\"")
}

/// `  Total: 10, Average: 2.5, Organic: 9`, followed by a blank line.
#[must_use]
pub fn format_summary_line(summary: &CitationSummary) -> String {
    let average = summary.average.map_or_else(|| "n/a".to_string(), |avg| format!("{avg:.1}"));
    format!("  Total: {}, Average: {average}, Organic: {}\n", summary.total, summary.organic)
}
