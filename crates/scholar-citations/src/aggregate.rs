//! Citation aggregation: total, per-year average, organic.
//!
//! Each operation performs its own root lookup, so a summary asks for the
//! same title three times; the lookup cache turns the repeats into hits.

use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::error::{CitationError, CitationResult};
use crate::lookup::PublicationSource;
use crate::models::{CitationSummary, PublicationRecord};
use crate::parse;
use crate::pipeline::{CitingWorkStage, SequentialStage};

/// Year the per-year average counts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearBaseline {
    /// The publication year read from the summary line.
    #[default]
    Published,
    /// A caller-supplied year; the summary line is not consulted.
    Fixed(i32),
}

/// How author names are compared when detecting self-citations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorMatch {
    /// Byte-for-byte equality.
    #[default]
    Exact,
    /// Equality after collapsing whitespace and lowercasing.
    Normalized,
}

impl AuthorMatch {
    /// Compare two names. Empty names never match; in normalized mode a
    /// whitespace-only name counts as empty.
    #[must_use]
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            Self::Exact => !a.is_empty() && a == b,
            Self::Normalized => {
                let (a, b) = (parse::normalize(a), parse::normalize(b));
                !a.is_empty() && a == b
            }
        }
    }
}

/// True when any root author also appears among the citing work's authors.
#[must_use]
pub fn is_self_citation(root: &[String], citing: &[String], mode: AuthorMatch) -> bool {
    root.iter().any(|author| citing.iter().any(|other| mode.matches(author, other)))
}

/// Citations per elapsed year.
///
/// Fewer than one elapsed year (same-year or future publication) counts as
/// one, so the average never exceeds the total and is never infinite.
#[must_use]
pub fn average_per_year(total: u64, elapsed_years: i32) -> f64 {
    total as f64 / f64::from(elapsed_years.max(1))
}

/// Citing-works-driven aggregator over a [`PublicationSource`].
pub struct CitationAggregator<S> {
    source: S,
    stage: Box<dyn CitingWorkStage>,
    author_match: AuthorMatch,
    current_year: Option<i32>,
}

impl<S: PublicationSource> CitationAggregator<S> {
    /// Sequential fan-out, exact author matching, wall-clock year.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            stage: Box::new(SequentialStage),
            author_match: AuthorMatch::default(),
            current_year: None,
        }
    }

    /// Replace the citing-work stage.
    #[must_use]
    pub fn with_stage(mut self, stage: Box<dyn CitingWorkStage>) -> Self {
        self.stage = stage;
        self
    }

    /// Replace the author comparison.
    #[must_use]
    pub const fn with_author_match(mut self, author_match: AuthorMatch) -> Self {
        self.author_match = author_match;
        self
    }

    /// Pin the "current" year instead of reading the clock.
    #[must_use]
    pub const fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    /// The underlying source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    fn current_year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| chrono::Local::now().year())
    }

    /// Total citations of the first hit for `title`.
    pub async fn total_citations(&self, title: &str) -> CitationResult<u64> {
        Ok(self.source.lookup(title).await?.citation_count)
    }

    /// Citations per year since `baseline`.
    ///
    /// # Errors
    ///
    /// [`CitationError::YearUnavailable`] when the baseline is the published
    /// year and it could not be parsed; lookup errors otherwise.
    pub async fn average_citations(
        &self,
        title: &str,
        baseline: YearBaseline,
    ) -> CitationResult<f64> {
        let record = self.source.lookup(title).await?;

        let since = match baseline {
            YearBaseline::Fixed(year) => year,
            YearBaseline::Published => record
                .published_year
                .ok_or_else(|| CitationError::YearUnavailable { title: title.to_string() })?,
        };

        let elapsed = self.current_year() - since;
        if elapsed <= 0 {
            debug!(title, since, "less than a year elapsed, average equals total");
        }

        Ok(average_per_year(record.citation_count, elapsed))
    }

    /// Total citations minus citing works that share an author with the root.
    ///
    /// Subtraction is from the reported total, not from the number of listed
    /// citing works; only the first page of the listing is inspected.
    pub async fn organic_citations(&self, title: &str) -> CitationResult<u64> {
        let root = self.source.lookup(title).await?;

        let Some(cites_id) = root.cites_id.as_deref() else {
            return Ok(root.citation_count);
        };

        let self_citations = self.self_citations(&root, cites_id).await?;
        let self_citations = self_citations as u64;

        if self_citations > root.citation_count {
            warn!(
                title,
                total = root.citation_count,
                self_citations,
                "listing has more self-citations than the reported total"
            );
        }

        Ok(root.citation_count.saturating_sub(self_citations))
    }

    /// Number of works listed under `cites_id` that share an author with `root`.
    async fn self_citations(
        &self,
        root: &PublicationRecord,
        cites_id: &str,
    ) -> CitationResult<usize> {
        let titles = self.source.citing_titles(cites_id).await?;
        debug!(title = %root.title, citing = titles.len(), "fetching citing works");

        let citing = self.stage.fetch_all(&self.source, &titles).await?;

        Ok(citing
            .iter()
            .filter(|work| is_self_citation(&root.authors, &work.authors, self.author_match))
            .count())
    }

    /// Total, average and organic for one title, in that order.
    ///
    /// An unavailable publication year leaves `average` empty instead of
    /// failing; every other error is returned.
    pub async fn summarize(
        &self,
        title: &str,
        baseline: YearBaseline,
    ) -> CitationResult<CitationSummary> {
        let total = self.total_citations(title).await?;

        let average = match self.average_citations(title, baseline).await {
            Ok(average) => Some(average),
            Err(err) if !err.is_fatal() => {
                warn!(title, error = %err, "average citations unavailable");
                None
            }
            Err(err) => return Err(err),
        };

        let organic = self.organic_citations(title).await?;

        info!(title, total, ?average, organic, "citation counts");
        Ok(CitationSummary { title: title.to_string(), total, average, organic })
    }
}

impl<S> std::fmt::Debug for CitationAggregator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitationAggregator")
            .field("author_match", &self.author_match)
            .field("current_year", &self.current_year)
            .finish_non_exhaustive()
    }
}
