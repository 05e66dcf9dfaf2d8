//! Data models for SerpAPI responses and derived citation records.
//!
//! Wire models use `#[serde(default)]` throughout; the lookup layer decides
//! which missing fields are fatal.

mod publication;
mod serpapi;

pub use publication::{CitationSummary, ParseWarning, PublicationRecord};
pub use serpapi::{
    CitationStyle, CiteResponse, CitedBy, InlineLinks, OrganicResult, PublicationInfo,
    SearchResponse,
};
