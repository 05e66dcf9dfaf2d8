//! SerpAPI Google Scholar client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Optional retry middleware with exponential backoff (off by default)
//! - Run-scoped response caching keyed by query parameters

use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use tracing::debug;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{CiteResponse, SearchResponse};

/// SerpAPI client for the three Google Scholar query shapes.
#[derive(Clone)]
pub struct ScholarClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Response cache, `None` when disabled.
    cache: Option<Cache<String, serde_json::Value>>,

    /// SerpAPI key.
    api_key: String,

    /// Search endpoint.
    search_url: String,

    /// `hl` parameter.
    language: String,
}

impl ScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails or no key is set.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        anyhow::ensure!(!config.api_key.trim().is_empty(), "SerpAPI key is empty");

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let mut builder = ClientBuilder::new(client);
        if config.max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder()
                .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
                .build_with_max_retries(config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }
        let client = builder.build();

        let cache = config.cache_enabled.then(|| {
            Cache::builder()
                .max_capacity(config.cache_max_size)
                .time_to_live(config.cache_ttl)
                .build()
        });

        Ok(Self {
            client,
            cache,
            api_key: config.api_key.clone(),
            search_url: config.search_url.clone(),
            language: config.language.clone(),
        })
    }

    /// Search Google Scholar for an exact title.
    ///
    /// The title is sent quoted so Scholar treats it as a phrase.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or an upstream `error` field.
    pub async fn search_title(&self, title: &str) -> ClientResult<SearchResponse> {
        let params = vec![
            ("engine".to_string(), api::SCHOLAR_ENGINE.to_string()),
            ("q".to_string(), quote_phrase(title)),
            ("hl".to_string(), self.language.clone()),
        ];

        self.get(&params).await
    }

    /// Fetch the formatted citations ("Cite" dialog) for a result id.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or an upstream `error` field.
    pub async fn cite(&self, result_id: &str) -> ClientResult<CiteResponse> {
        let params = vec![
            ("engine".to_string(), api::CITE_ENGINE.to_string()),
            ("q".to_string(), result_id.to_string()),
            ("hl".to_string(), self.language.clone()),
        ];

        self.get(&params).await
    }

    /// List works citing the given cites id (first page only).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or an upstream `error` field.
    pub async fn citing_works(&self, cites_id: &str) -> ClientResult<SearchResponse> {
        let params = vec![
            ("engine".to_string(), api::SCHOLAR_ENGINE.to_string()),
            ("cites".to_string(), cites_id.to_string()),
            ("hl".to_string(), self.language.clone()),
        ];

        self.get(&params).await
    }

    /// Make a GET request against the search endpoint.
    async fn get<T>(&self, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let cache_key = cache_key(params);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                debug!(query = ?params, "response cache hit");
                return serde_json::from_value(cached).map_err(ClientError::from);
            }
        }

        debug!(query = ?params, "querying SerpAPI");

        let response = self
            .client
            .get(&self.search_url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let response = handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        if let Some(message) = value.get("error").and_then(serde_json::Value::as_str) {
            return Err(ClientError::api(message));
        }

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, value.clone()).await;
        }

        serde_json::from_value(value).map_err(ClientError::from)
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient")
            .field("search_url", &self.search_url)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

/// Map non-success status codes onto [`ClientError`].
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(ClientError::rate_limited(retry_after))
        }
        401 | 403 => {
            let text = error_text(response).await;
            Err(ClientError::unauthorized(text))
        }
        400 => {
            let text = error_text(response).await;
            Err(ClientError::bad_request(text))
        }
        500..=599 => {
            let text = error_text(response).await;
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = error_text(response).await;
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}

/// SerpAPI error bodies are `{"error": "..."}`; fall back to the raw text.
async fn error_text(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(str::to_string))
        .unwrap_or(text)
}

/// Wrap a title in double quotes, escaping quotes and backslashes inside it.
#[must_use]
pub fn quote_phrase(title: &str) -> String {
    let mut quoted = String::with_capacity(title.len() + 2);
    quoted.push('"');
    for c in title.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Generate cache key. The API key is not part of the query identity.
fn cache_key(params: &[(String, String)]) -> String {
    use md5::{Digest, Md5};

    let mut hasher = Md5::new();
    for (k, v) in params {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }

    format!("{:x}", hasher.finalize())
}
