//! Configuration for the SerpAPI client.

use std::path::Path;
use std::time::Duration;

use crate::error::{CitationError, CitationResult};

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// SerpAPI search endpoint.
    pub const SEARCH_URL: &str = "https://serpapi.com/search.json";

    /// Engine for title searches and "cited by" listings.
    pub const SCHOLAR_ENGINE: &str = "google_scholar";

    /// Engine returning formatted citations for a result id.
    pub const CITE_ENGINE: &str = "google_scholar_cite";

    /// Interface language requested from Google Scholar.
    pub const LANGUAGE: &str = "en";

    /// Default file holding the API key on its first line.
    pub const KEY_FILE: &str = "serpapi.key";

    /// Environment variable consulted before the key file.
    pub const KEY_ENV: &str = "SERPAPI_API_KEY";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Cache TTL (one run rarely outlives this).
    pub const CACHE_TTL: Duration = Duration::from_secs(3600);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 10_000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Client configuration.
#[derive(Clone)]
pub struct Config {
    /// SerpAPI key.
    pub api_key: String,

    /// Search endpoint (overridden for mock servers).
    pub search_url: String,

    /// Google Scholar interface language (`hl`).
    pub language: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries for transient failures. Zero keeps fail-fast behavior.
    pub max_retries: u32,

    /// Memoize responses and records for the duration of a run.
    pub cache_enabled: bool,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a new configuration for the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            search_url: api::SEARCH_URL.to_string(),
            language: api::LANGUAGE.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: 0,
            cache_enabled: true,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: "test-key".to_string(),
            search_url: format!("{}/search.json", base_url),
            language: api::LANGUAGE.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 0,
            cache_enabled: false, // Every call reaches the mock
            cache_ttl: Duration::from_secs(0),
            cache_max_size: 0,
        }
    }

    /// Resolve the API key.
    ///
    /// An explicit key (flag or `SERPAPI_API_KEY`) wins; otherwise the first
    /// line of `key_file` is used. Surrounding whitespace is stripped.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no non-empty key can be found, or an
    /// I/O error if the key file cannot be read.
    pub fn load_api_key(
        explicit: Option<String>,
        key_file: impl AsRef<Path>,
    ) -> CitationResult<String> {
        if let Some(key) = explicit.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            return Ok(key);
        }

        let path = key_file.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CitationError::io(path.display().to_string(), e))?;

        contents
            .lines()
            .next()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                CitationError::config(format!("API key file {} is empty", path.display()))
            })
    }

    /// Builder-style retry override.
    #[must_use]
    pub const fn with_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Builder-style cache toggle.
    #[must_use]
    pub const fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("search_url", &self.search_url)
            .field("language", &self.language)
            .field("max_retries", &self.max_retries)
            .field("cache_enabled", &self.cache_enabled)
            .finish_non_exhaustive()
    }
}
