//! Error types for the citation tool.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited or out of searches (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// API key rejected (401/403 response)
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message from API
        message: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// The upstream answered 200 but carried an `error` field.
    #[error("SerpAPI error: {message}")]
    Api {
        /// Error message from SerpAPI
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create an unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create an upstream API error.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api { message: message.into() }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// The upstream answered, but not with the shape a lookup depends on.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// `organic_results` missing or empty.
    #[error("no organic results for {query}")]
    NoOrganicResults {
        /// The title or cites id that was queried
        query: String,
    },

    /// `citations` missing or empty in a cite response.
    #[error("no citation styles for result {result_id}")]
    NoCitationStyles {
        /// Result id handed to the cite engine
        result_id: String,
    },

    /// A field required by the lookup is absent.
    #[error("missing field '{field}' in {context}")]
    MissingField {
        /// JSON field name
        field: &'static str,
        /// Where it was expected
        context: String,
    },
}

impl ShapeError {
    /// Create a missing field error.
    #[must_use]
    pub fn missing(field: &'static str, context: impl Into<String>) -> Self {
        Self::MissingField { field, context: context.into() }
    }
}

/// Errors from lookups and citation aggregation.
#[derive(thiserror::Error, Debug)]
pub enum CitationError {
    /// Error from the API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Response did not carry the expected structure
    #[error("Unexpected response shape: {0}")]
    Shape(#[from] ShapeError),

    /// Publication year could not be read from the summary
    #[error("Publication year unavailable for \"{title}\"")]
    YearUnavailable {
        /// Paper title
        title: String,
    },

    /// Local file I/O failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CitationError {
    /// Create an I/O error bound to a path.
    #[must_use]
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error must abort the whole batch.
    ///
    /// Only a missing publication year is recoverable: the report prints
    /// `n/a` for the average and carries on.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::YearUnavailable { .. })
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for lookup and aggregation operations.
pub type CitationResult<T> = Result<T, CitationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_retryable() {
        assert!(ClientError::rate_limited(60).is_retryable());
        assert!(ClientError::server(503, "unavailable").is_retryable());

        assert!(!ClientError::unauthorized("Invalid API key").is_retryable());
        assert!(!ClientError::bad_request("missing q").is_retryable());
        assert!(!ClientError::api("Google hasn't returned any results").is_retryable());
    }

    #[test]
    fn test_client_error_retry_after() {
        let err = ClientError::rate_limited(60);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = ClientError::api("oops");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_only_missing_year_is_recoverable() {
        let err = CitationError::YearUnavailable { title: "Paper".into() };
        assert!(!err.is_fatal());

        let err = CitationError::from(ShapeError::NoOrganicResults { query: "Paper".into() });
        assert!(err.is_fatal());
        assert!(CitationError::config("no key").is_fatal());
    }

    #[test]
    fn test_shape_error_message_names_field() {
        let err = ShapeError::missing("result_id", "first organic result");
        assert_eq!(err.to_string(), "missing field 'result_id' in first organic result");
    }
}
