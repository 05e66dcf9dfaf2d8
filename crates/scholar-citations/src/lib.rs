//! Scholar Citations
//!
//! Citation statistics for paper titles, backed by SerpAPI's Google Scholar
//! engines. For each title the crate reports:
//!
//! - **Total** citations, as reported by the "Cited by" block
//! - **Average** citations per year since publication (or a fixed baseline year)
//! - **Organic** citations, the total minus citing works that share an author
//!
//! # Example
//!
//! ```no_run
//! use scholar_citations::{CitationAggregator, Config, ScholarClient, ScholarLookup, YearBaseline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new(Config::load_api_key(None, "serpapi.key")?);
//!     let lookup = ScholarLookup::new(ScholarClient::new(&config)?, &config);
//!     let aggregator = CitationAggregator::new(lookup);
//!
//!     let summary = aggregator.summarize("Attention is all you need", YearBaseline::Published).await?;
//!     println!("{} organic citations", summary.organic);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod loader;
pub mod lookup;
pub mod models;
pub mod parse;
pub mod pipeline;

pub use aggregate::{AuthorMatch, CitationAggregator, YearBaseline};
pub use client::ScholarClient;
pub use config::Config;
pub use error::{CitationError, ClientError, ShapeError};
pub use lookup::{PublicationSource, ScholarLookup};
pub use models::{CitationSummary, ParseWarning, PublicationRecord};
