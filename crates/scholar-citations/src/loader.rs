//! Paper list loading.

use std::path::Path;

use crate::error::{CitationError, CitationResult};

/// Read one title per line.
///
/// Trailing `\r` and surrounding whitespace are stripped; blank lines are
/// skipped rather than sent upstream as empty queries.
pub fn read_titles(path: impl AsRef<Path>) -> CitationResult<Vec<String>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CitationError::io(path.display().to_string(), e))?;

    Ok(parse_titles(&contents))
}

/// Split text into non-blank, trimmed lines.
#[must_use]
pub fn parse_titles(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
