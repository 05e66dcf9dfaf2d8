//! Publication lookup: one title in, one [`PublicationRecord`] out.
//!
//! A lookup costs two upstream queries: a title search (first hit, taken
//! unconditionally) and a cite query for that hit's author list.

use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, warn};

use crate::client::ScholarClient;
use crate::config::Config;
use crate::error::{CitationResult, ShapeError};
use crate::models::{CiteResponse, ParseWarning, PublicationRecord, SearchResponse};
use crate::parse;

/// Where publication records and citing-work listings come from.
///
/// The aggregator only talks to this trait, so tests can substitute an
/// in-memory corpus for the network.
#[async_trait]
pub trait PublicationSource: Send + Sync {
    /// Look up a title and assemble its record.
    async fn lookup(&self, title: &str) -> CitationResult<PublicationRecord>;

    /// Titles of the works listed as citing `cites_id`.
    async fn citing_titles(&self, cites_id: &str) -> CitationResult<Vec<String>>;
}

/// [`PublicationSource`] backed by SerpAPI.
#[derive(Debug, Clone)]
pub struct ScholarLookup {
    client: ScholarClient,

    /// Records keyed by normalized title, `None` when caching is off.
    records: Option<Cache<String, PublicationRecord>>,
}

impl ScholarLookup {
    /// Wrap a client. The record cache follows `config.cache_enabled`.
    #[must_use]
    pub fn new(client: ScholarClient, config: &Config) -> Self {
        let records = config.cache_enabled.then(|| {
            Cache::builder()
                .max_capacity(config.cache_max_size)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Self { client, records }
    }

    async fn fetch(&self, title: &str) -> CitationResult<PublicationRecord> {
        let search = self.client.search_title(title).await?;
        let mut record = record_from_search(title, &search)?;

        let cite = self.client.cite(&record.result_id).await?;
        apply_citation_styles(&mut record, &cite)?;

        for warning in &record.warnings {
            warn!(title, ?warning, "degraded parse");
        }

        Ok(record)
    }
}

#[async_trait]
impl PublicationSource for ScholarLookup {
    async fn lookup(&self, title: &str) -> CitationResult<PublicationRecord> {
        let Some(records) = &self.records else {
            return self.fetch(title).await;
        };

        let key = parse::normalize(title);
        if let Some(mut record) = records.get(&key).await {
            debug!(title, "record cache hit");
            record.title = title.to_string();
            return Ok(record);
        }

        let record = self.fetch(title).await?;
        records.insert(key, record.clone()).await;
        Ok(record)
    }

    async fn citing_titles(&self, cites_id: &str) -> CitationResult<Vec<String>> {
        let response = self.client.citing_works(cites_id).await?;
        Ok(citing_titles_from(cites_id, response)?)
    }
}

/// Fill everything but the authors from the first organic result.
///
/// # Errors
///
/// Fails when there is no organic result or it lacks a `result_id`.
pub fn record_from_search(
    title: &str,
    search: &SearchResponse,
) -> Result<PublicationRecord, ShapeError> {
    let hit = search
        .first_result()
        .ok_or_else(|| ShapeError::NoOrganicResults { query: title.to_string() })?;

    let result_id = hit
        .result_id
        .clone()
        .ok_or_else(|| ShapeError::missing("result_id", format!("first result for \"{title}\"")))?;

    let mut warnings = Vec::new();
    let published_year = match hit.summary() {
        Some(summary) => {
            let year = parse::year_from_summary(summary);
            if year.is_none() {
                warnings.push(ParseWarning::UnparsableYear { summary: summary.to_string() });
            }
            year
        }
        None => {
            warnings.push(ParseWarning::MissingSummary);
            None
        }
    };

    let (citation_count, cites_id) = hit.cited_by().map_or((0, None), |cited_by| {
        (
            cited_by.total.unwrap_or(0),
            cited_by.cites_id.clone().filter(|id| !id.is_empty()),
        )
    });

    Ok(PublicationRecord {
        title: title.to_string(),
        result_id,
        published_year,
        citation_count,
        cites_id,
        authors: Vec::new(),
        warnings,
    })
}

/// Take the authors from the last citation style's snippet.
///
/// # Errors
///
/// Fails when the cite response has no styles or the last one has no snippet.
pub fn apply_citation_styles(
    record: &mut PublicationRecord,
    cite: &CiteResponse,
) -> Result<(), ShapeError> {
    let last = cite
        .citations
        .as_deref()
        .and_then(<[_]>::last)
        .ok_or_else(|| ShapeError::NoCitationStyles { result_id: record.result_id.clone() })?;

    let snippet = last.snippet.as_deref().ok_or_else(|| {
        ShapeError::missing("snippet", format!("citation styles of {}", record.result_id))
    })?;

    let parsed = parse::authors_from_snippet(snippet);
    record.authors = parsed.authors;
    record.warnings.extend(parsed.warnings);
    Ok(())
}

/// Extract titles from a citing-works listing.
///
/// # Errors
///
/// Fails when `organic_results` is absent or an entry has no title.
pub fn citing_titles_from(
    cites_id: &str,
    response: SearchResponse,
) -> Result<Vec<String>, ShapeError> {
    let results = response
        .organic_results
        .ok_or_else(|| ShapeError::NoOrganicResults { query: format!("cites={cites_id}") })?;

    results
        .into_iter()
        .map(|hit| {
            hit.title.ok_or_else(|| ShapeError::missing("title", format!("cites={cites_id}")))
        })
        .collect()
}
