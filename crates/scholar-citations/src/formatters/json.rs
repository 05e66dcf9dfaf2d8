//! JSON lines output.

use serde_json::{Value, json};

use crate::models::CitationSummary;

/// One compact JSON object per paper.
///
/// The average is rounded to two decimals, matching the CSV export.
#[must_use]
pub fn summary_json(summary: &CitationSummary) -> Value {
    json!({
        "title": summary.title,
        "total": summary.total,
        "average": summary.average.map(|avg| (avg * 100.0).round() / 100.0),
        "organic": summary.organic,
    })
}
