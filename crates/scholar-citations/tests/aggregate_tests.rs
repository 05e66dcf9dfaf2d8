//! Aggregation tests against an in-memory corpus.
//!
//! No network: a fake source serves fixed records and citing-work listings.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use scholar_citations::error::CitationResult;
use scholar_citations::pipeline::{CitingWorkStage, ConcurrentStage, SequentialStage};
use scholar_citations::{
    AuthorMatch, CitationAggregator, CitationError, PublicationRecord, PublicationSource,
    ShapeError, YearBaseline,
};

#[derive(Default)]
struct FakeScholar {
    records: HashMap<String, PublicationRecord>,
    listings: HashMap<String, Vec<String>>,
    lookups: AtomicUsize,
    listing_queries: AtomicUsize,
}

impl FakeScholar {
    fn with_paper(
        mut self,
        title: &str,
        year: Option<i32>,
        citations: u64,
        cites_id: Option<&str>,
        authors: &[&str],
    ) -> Self {
        self.records.insert(
            title.to_string(),
            PublicationRecord {
                title: title.to_string(),
                result_id: format!("rid-{title}"),
                published_year: year,
                citation_count: citations,
                cites_id: cites_id.map(str::to_string),
                authors: authors.iter().map(|a| (*a).to_string()).collect(),
                warnings: Vec::new(),
            },
        );
        self
    }

    fn with_listing(mut self, cites_id: &str, titles: &[&str]) -> Self {
        self.listings
            .insert(cites_id.to_string(), titles.iter().map(|t| (*t).to_string()).collect());
        self
    }
}

#[async_trait]
impl PublicationSource for FakeScholar {
    async fn lookup(&self, title: &str) -> CitationResult<PublicationRecord> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.records
            .get(title)
            .cloned()
            .ok_or_else(|| ShapeError::NoOrganicResults { query: title.to_string() }.into())
    }

    async fn citing_titles(&self, cites_id: &str) -> CitationResult<Vec<String>> {
        self.listing_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.listings.get(cites_id).cloned().unwrap_or_default())
    }
}

/// Root by Smith and Doe, cited by one Smith paper and one unrelated paper.
fn scenario() -> FakeScholar {
    FakeScholar::default()
        .with_paper("Root", Some(2019), 10, Some("c1"), &["Smith J", "Doe A"])
        .with_paper("Smith follow-up", Some(2021), 0, None, &["Smith J", "Lee K"])
        .with_paper("Independent", Some(2022), 0, None, &["Chen Y"])
        .with_listing("c1", &["Smith follow-up", "Independent"])
}

// =============================================================================
// Organic Citations
// =============================================================================

#[tokio::test]
async fn test_organic_subtracts_self_citations() {
    let aggregator = CitationAggregator::new(scenario());
    assert_eq!(aggregator.organic_citations("Root").await.unwrap(), 9);
    // Root plus one lookup per citing work
    assert_eq!(aggregator.source().lookups.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_organic_counts_each_citer_once() {
    let source = FakeScholar::default()
        .with_paper("Root", Some(2019), 5, Some("c1"), &["Smith J", "Doe A"])
        .with_paper("Both authors", Some(2020), 0, None, &["Doe A", "Smith J"])
        .with_listing("c1", &["Both authors"]);

    let aggregator = CitationAggregator::new(source);
    assert_eq!(aggregator.organic_citations("Root").await.unwrap(), 4);
}

#[tokio::test]
async fn test_organic_equals_total_without_cites_id() {
    let source = FakeScholar::default().with_paper("Uncited", Some(2020), 0, None, &["Smith J"]);
    let aggregator = CitationAggregator::new(source);

    let total = aggregator.total_citations("Uncited").await.unwrap();
    let organic = aggregator.organic_citations("Uncited").await.unwrap();

    assert_eq!(organic, total);
    assert_eq!(aggregator.source().listing_queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_organic_saturates_when_listing_exceeds_total() {
    let source = FakeScholar::default()
        .with_paper("Root", Some(2019), 1, Some("c1"), &["Smith J"])
        .with_paper("A", Some(2020), 0, None, &["Smith J"])
        .with_paper("B", Some(2021), 0, None, &["Smith J"])
        .with_listing("c1", &["A", "B"]);

    let aggregator = CitationAggregator::new(source);
    assert_eq!(aggregator.organic_citations("Root").await.unwrap(), 0);
}

#[tokio::test]
async fn test_organic_exact_match_is_case_sensitive() {
    let source = FakeScholar::default()
        .with_paper("Root", Some(2019), 3, Some("c1"), &["Smith J"])
        .with_paper("Lowercase", Some(2020), 0, None, &["smith j"])
        .with_listing("c1", &["Lowercase"]);

    let exact = CitationAggregator::new(source);
    assert_eq!(exact.organic_citations("Root").await.unwrap(), 3);

    let source = FakeScholar::default()
        .with_paper("Root", Some(2019), 3, Some("c1"), &["Smith J"])
        .with_paper("Lowercase", Some(2020), 0, None, &["smith j"])
        .with_listing("c1", &["Lowercase"]);

    let normalized = CitationAggregator::new(source).with_author_match(AuthorMatch::Normalized);
    assert_eq!(normalized.organic_citations("Root").await.unwrap(), 2);
}

#[tokio::test]
async fn test_organic_fails_when_citing_lookup_fails() {
    let source = FakeScholar::default()
        .with_paper("Root", Some(2019), 3, Some("c1"), &["Smith J"])
        .with_listing("c1", &["Missing paper"]);

    let aggregator = CitationAggregator::new(source);
    let err = aggregator.organic_citations("Root").await.unwrap_err();
    assert!(matches!(err, CitationError::Shape(ShapeError::NoOrganicResults { .. })));
}

#[tokio::test]
async fn test_concurrent_stage_matches_sequential() {
    let sequential = CitationAggregator::new(scenario()).with_stage(Box::new(SequentialStage));
    let concurrent = CitationAggregator::new(scenario()).with_stage(Box::new(ConcurrentStage::new(4)));

    assert_eq!(
        sequential.organic_citations("Root").await.unwrap(),
        concurrent.organic_citations("Root").await.unwrap()
    );
}

/// Each title is its own lookup latency in milliseconds.
struct DelayedSource;

#[async_trait]
impl PublicationSource for DelayedSource {
    async fn lookup(&self, title: &str) -> CitationResult<PublicationRecord> {
        let millis = title.parse().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(PublicationRecord { title: title.to_string(), ..PublicationRecord::default() })
    }

    async fn citing_titles(&self, _cites_id: &str) -> CitationResult<Vec<String>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_concurrent_stage_keeps_listing_order() {
    let titles: Vec<String> = ["50", "10", "30", "1"].iter().map(|t| (*t).to_string()).collect();

    let records = ConcurrentStage::new(4).fetch_all(&DelayedSource, &titles).await.unwrap();

    let returned: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(returned, vec!["50", "10", "30", "1"]);
}

#[test]
fn test_concurrent_stage_limit_is_at_least_one() {
    assert_eq!(ConcurrentStage::new(0).limit(), 1);
    assert_eq!(ConcurrentStage::new(8).limit(), 8);
}

// =============================================================================
// Average Citations
// =============================================================================

#[tokio::test]
async fn test_average_from_published_year() {
    let aggregator = CitationAggregator::new(scenario()).with_current_year(2024);
    let average = aggregator.average_citations("Root", YearBaseline::Published).await.unwrap();
    assert!((average - 2.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_average_from_fixed_baseline_ignores_published_year() {
    let source = FakeScholar::default().with_paper("No year", None, 12, None, &["Smith J"]);
    let aggregator = CitationAggregator::new(source).with_current_year(2024);

    let average = aggregator.average_citations("No year", YearBaseline::Fixed(2020)).await.unwrap();
    assert!((average - 3.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_average_same_year_is_total() {
    let source = FakeScholar::default().with_paper("Fresh", Some(2024), 7, None, &["Smith J"]);
    let aggregator = CitationAggregator::new(source).with_current_year(2024);

    let average = aggregator.average_citations("Fresh", YearBaseline::Published).await.unwrap();
    assert!((average - 7.0).abs() < f64::EPSILON);
    assert!(average.is_finite());
}

#[tokio::test]
async fn test_average_without_year_is_recoverable() {
    let source = FakeScholar::default().with_paper("No year", None, 12, None, &["Smith J"]);
    let aggregator = CitationAggregator::new(source).with_current_year(2024);

    let err = aggregator.average_citations("No year", YearBaseline::Published).await.unwrap_err();
    assert!(matches!(err, CitationError::YearUnavailable { .. }));
    assert!(!err.is_fatal());
}

// =============================================================================
// Summaries
// =============================================================================

#[tokio::test]
async fn test_summarize_scenario() {
    let aggregator = CitationAggregator::new(scenario()).with_current_year(2024);
    let summary = aggregator.summarize("Root", YearBaseline::Published).await.unwrap();

    assert_eq!(summary.title, "Root");
    assert_eq!(summary.total, 10);
    assert_eq!(summary.average, Some(2.0));
    assert_eq!(summary.organic, 9);
}

#[tokio::test]
async fn test_summarize_without_year_leaves_average_empty() {
    let source = FakeScholar::default().with_paper("No year", None, 12, None, &["Smith J"]);
    let aggregator = CitationAggregator::new(source).with_current_year(2024);

    let summary = aggregator.summarize("No year", YearBaseline::Published).await.unwrap();
    assert_eq!(summary.average, None);
    assert_eq!(summary.total, 12);
    assert_eq!(summary.organic, 12);
}

#[tokio::test]
async fn test_summarize_propagates_fatal_errors() {
    let aggregator = CitationAggregator::new(FakeScholar::default());
    let err = aggregator.summarize("Unknown", YearBaseline::Published).await.unwrap_err();
    assert!(err.is_fatal());
}
