//! Fuzzing library for scholar-citations.
//!
//! This crate provides fuzzing targets for the Google Scholar free-text
//! parsers and the SerpAPI response models.
//!
//! # Usage
//!
//! ```bash
//! cd crates/sentinel-fuzz
//! cargo +nightly fuzz run fuzz_snippet_parse -- -max_total_time=60
//! ```

pub use scholar_citations::{models, parse};
