//! CSV export.

use std::path::Path;

use crate::error::{CitationError, CitationResult};
use crate::models::CitationSummary;

/// Header row of the export.
pub const CSV_HEADER: &str = "Title,Total,Average,Organic";

/// Accumulates rows and writes them out in one go.
#[derive(Debug, Clone)]
pub struct CsvReport {
    contents: String,
}

impl CsvReport {
    /// Start a report holding only the header.
    #[must_use]
    pub fn new() -> Self {
        Self { contents: format!("{CSV_HEADER}\n") }
    }

    /// Append one paper.
    pub fn push(&mut self, summary: &CitationSummary) {
        self.contents.push_str(&format_csv_row(summary));
    }

    /// The report so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.contents
    }

    /// Write the report, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> CitationResult<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.contents)
            .map_err(|e| CitationError::io(path.display().to_string(), e))
    }
}

impl Default for CsvReport {
    fn default() -> Self {
        Self::new()
    }
}

/// `"Title",10,2.50,9` with a trailing newline.
///
/// The title is always quoted; an unknown average is an empty field.
#[must_use]
pub fn format_csv_row(summary: &CitationSummary) -> String {
    let average = summary.average.map_or_else(String::new, |avg| format!("{avg:.2}"));
    format!(
        "{},{},{average},{}\n",
        quote_field(&summary.title),
        summary.total,
        summary.organic
    )
}

/// Quote a field, doubling embedded quotes.
fn quote_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
