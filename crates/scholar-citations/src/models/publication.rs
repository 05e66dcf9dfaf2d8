//! Records assembled from upstream responses.

use serde::{Deserialize, Serialize};

/// A degraded parse that did not abort the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// The hit had no `publication_info.summary`.
    MissingSummary,

    /// The four characters before the last `" -"` were not a year.
    UnparsableYear {
        /// The offending summary.
        summary: String,
    },

    /// The citation snippet had no `.`, so the whole snippet became the author list.
    SnippetWithoutPeriod {
        /// The offending snippet.
        snippet: String,
    },

    /// The author list contains an empty name.
    EmptyAuthorName,
}

/// One queried work.
///
/// Built fresh from upstream data on every uncached lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationRecord {
    /// The title that was queried.
    pub title: String,

    /// Google Scholar result id. Only meaningful within one run.
    pub result_id: String,

    /// Year read from the summary line.
    pub published_year: Option<i32>,

    /// "Cited by" total, 0 when absent.
    pub citation_count: u64,

    /// Id of the citing-works listing, `None` when uncited.
    pub cites_id: Option<String>,

    /// Author names from the last citation style.
    pub authors: Vec<String>,

    /// Parse-confidence flags.
    pub warnings: Vec<ParseWarning>,
}

impl PublicationRecord {
    /// True when both the year and the author list parsed cleanly.
    #[must_use]
    pub fn is_confident(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Whether a citing-works listing exists.
    #[must_use]
    pub fn has_citing_works(&self) -> bool {
        self.cites_id.is_some()
    }
}

/// Citation statistics for one paper, as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationSummary {
    /// Paper title.
    pub title: String,

    /// Total citations.
    pub total: u64,

    /// Citations per year; `None` when the publication year is unknown.
    pub average: Option<f64>,

    /// Total minus self-citations.
    pub organic: u64,
}
