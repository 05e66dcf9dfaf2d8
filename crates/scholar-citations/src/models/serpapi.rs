//! SerpAPI Google Scholar response schema (the subset this tool reads).

use serde::{Deserialize, Serialize};

/// Response of the `google_scholar` engine, for both title searches and
/// `cites=` listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Search hits, in ranking order.
    #[serde(default)]
    pub organic_results: Option<Vec<OrganicResult>>,

    /// Set by SerpAPI when the search failed or returned nothing.
    #[serde(default)]
    pub error: Option<String>,
}

impl SearchResponse {
    /// The first hit, if any.
    #[must_use]
    pub fn first_result(&self) -> Option<&OrganicResult> {
        self.organic_results.as_deref()?.first()
    }
}

/// One Google Scholar hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganicResult {
    /// Stable id of this hit, the key for the cite engine.
    #[serde(default)]
    pub result_id: Option<String>,

    /// Title as rendered by Google Scholar.
    #[serde(default)]
    pub title: Option<String>,

    /// Author/venue/year line.
    #[serde(default)]
    pub publication_info: Option<PublicationInfo>,

    /// "Cited by", "Related articles", etc.
    #[serde(default)]
    pub inline_links: Option<InlineLinks>,
}

impl OrganicResult {
    /// The free-text summary line, e.g. `"A Vaswani, N Shazeer - Advances in ..., 2017 - proceedings.neurips.cc"`.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.publication_info.as_ref()?.summary.as_deref()
    }

    /// The "Cited by" block, if the hit has recorded citations.
    #[must_use]
    pub fn cited_by(&self) -> Option<&CitedBy> {
        self.inline_links.as_ref()?.cited_by.as_ref()
    }
}

/// Publication info block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationInfo {
    /// Summary text.
    #[serde(default)]
    pub summary: Option<String>,
}

/// Inline links block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InlineLinks {
    /// Present only when the work has been cited.
    #[serde(default)]
    pub cited_by: Option<CitedBy>,
}

/// "Cited by N" link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitedBy {
    /// Total citation count.
    #[serde(default)]
    pub total: Option<u64>,

    /// Id grouping all citing works, used as `cites=`.
    #[serde(default)]
    pub cites_id: Option<String>,
}

/// Response of the `google_scholar_cite` engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CiteResponse {
    /// One entry per citation style (MLA, APA, Chicago, Harvard, Vancouver).
    #[serde(default)]
    pub citations: Option<Vec<CitationStyle>>,

    /// Set by SerpAPI on failure.
    #[serde(default)]
    pub error: Option<String>,
}

/// A single formatted citation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationStyle {
    /// Style name, e.g. `"Vancouver"`.
    #[serde(default)]
    pub title: Option<String>,

    /// The formatted citation.
    #[serde(default)]
    pub snippet: Option<String>,
}
