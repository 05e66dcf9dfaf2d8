//! Citing-work fan-out.
//!
//! Every work in a "cited by" listing needs a full lookup of its own before
//! its authors can be compared with the root's. The stage doing that is
//! swappable; the aggregation arithmetic does not care how records arrive,
//! only that they arrive in listing order.

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt, stream};

use crate::error::CitationResult;
use crate::lookup::PublicationSource;
use crate::models::PublicationRecord;

/// Fetches the records of citing works.
#[async_trait]
pub trait CitingWorkStage: Send + Sync {
    /// Look up every title, returning records in the same order.
    ///
    /// Stops at the first failed lookup.
    async fn fetch_all(
        &self,
        source: &dyn PublicationSource,
        titles: &[String],
    ) -> CitationResult<Vec<PublicationRecord>>;
}

/// One lookup at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialStage;

#[async_trait]
impl CitingWorkStage for SequentialStage {
    async fn fetch_all(
        &self,
        source: &dyn PublicationSource,
        titles: &[String],
    ) -> CitationResult<Vec<PublicationRecord>> {
        let mut records = Vec::with_capacity(titles.len());
        for title in titles {
            records.push(source.lookup(title).await?);
        }
        Ok(records)
    }
}

/// Up to `limit` lookups in flight, results kept in listing order.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentStage {
    limit: usize,
}

impl ConcurrentStage {
    /// A limit of zero is treated as one.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit: limit.max(1) }
    }

    /// Maximum in-flight lookups.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

#[async_trait]
impl CitingWorkStage for ConcurrentStage {
    async fn fetch_all(
        &self,
        source: &dyn PublicationSource,
        titles: &[String],
    ) -> CitationResult<Vec<PublicationRecord>> {
        let lookups: Vec<_> = titles.iter().map(|title| source.lookup(title)).collect();
        stream::iter(lookups).buffered(self.limit).try_collect().await
    }
}

/// Pick a stage for a concurrency setting: 1 (or 0) is sequential.
#[must_use]
pub fn stage_for(concurrency: usize) -> Box<dyn CitingWorkStage> {
    if concurrency > 1 {
        Box::new(ConcurrentStage::new(concurrency))
    } else {
        Box::new(SequentialStage)
    }
}
