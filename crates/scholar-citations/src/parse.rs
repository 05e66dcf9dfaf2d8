//! Text conventions of Google Scholar's free-text fields.
//!
//! Google Scholar exposes neither the publication year nor the author list
//! as structured data, so both are recovered from rendered text:
//!
//! - the year sits right before the last `" -"` of the summary line
//!   (`"authors - venue, 2019 - host"`);
//! - the last citation style (Vancouver) lists surnames and initials,
//!   comma-separated, up to the first `.`.
//!
//! Nothing here panics; degraded parses are reported as [`ParseWarning`]s.

use crate::models::ParseWarning;

/// Delimiter that precedes the hosting site in a summary line.
const SUMMARY_DELIMITER: &str = " -";

/// Separator between names in a Vancouver snippet.
const AUTHOR_SEPARATOR: &str = ", ";

/// Width of the year field before the delimiter.
const YEAR_WIDTH: usize = 4;

/// Read the year from the four characters preceding the last `" -"`.
///
/// Returns `None` when the delimiter is missing, sits fewer than four bytes
/// into the string, splits a multi-byte character, or the four characters
/// are not ASCII digits.
#[must_use]
pub fn year_from_summary(summary: &str) -> Option<i32> {
    let end = summary.rfind(SUMMARY_DELIMITER)?;
    let start = end.checked_sub(YEAR_WIDTH)?;
    let digits = summary.get(start..end)?;

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse().ok()
}

/// Author names recovered from a citation snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAuthors {
    /// Names, in snippet order.
    pub authors: Vec<String>,
    /// Degraded-parse flags.
    pub warnings: Vec<ParseWarning>,
}

/// Split the snippet prefix before the first `.` on `", "`.
///
/// A snippet without any `.` yields the whole snippet as the prefix, which
/// is almost always one long malformed "author"; that case is flagged.
#[must_use]
pub fn authors_from_snippet(snippet: &str) -> ParsedAuthors {
    let mut warnings = Vec::new();

    let prefix = match snippet.find('.') {
        Some(end) => &snippet[..end],
        None => {
            warnings.push(ParseWarning::SnippetWithoutPeriod { snippet: snippet.to_string() });
            snippet
        }
    };

    let authors: Vec<String> = prefix.split(AUTHOR_SEPARATOR).map(str::to_string).collect();

    if authors.iter().any(String::is_empty) {
        warnings.push(ParseWarning::EmptyAuthorName);
    }

    ParsedAuthors { authors, warnings }
}

/// Collapse runs of whitespace and lowercase.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}
