//! Error types for solarweb-client.

use std::time::Duration;

/// Result type alias for solarweb-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for solarweb-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    ///
    /// For [`ErrorKind::RetriesExhausted`] this is the last transient failure.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if the server rejected the credentials (HTTP 401).
    pub fn is_not_authorized(&self) -> bool {
        matches!(self.kind, ErrorKind::NotAuthorized(_))
    }

    /// Returns true if the requested resource does not exist (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Returns true if the response did not match the expected schema.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation { .. })
    }

    /// Returns true if all retry attempts were used up.
    pub fn is_retries_exhausted(&self) -> bool {
        matches!(self.kind, ErrorKind::RetriesExhausted { .. })
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimited { .. })
    }

    /// Returns the HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Http { status, .. } => Some(*status),
            ErrorKind::NotAuthorized(_) => Some(401),
            ErrorKind::NotFound(_) => Some(404),
            ErrorKind::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Returns the retry-after duration if this is a rate limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match &self.kind {
            ErrorKind::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// The last transient failure wrapped by a [`ErrorKind::RetriesExhausted`] error.
    pub fn last_failure(&self) -> Option<&Error> {
        match self.kind {
            ErrorKind::RetriesExhausted { .. } => self.source.as_ref()?.downcast_ref::<Error>(),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Credentials or token rejected (HTTP 401). Never retried.
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Resource or path does not exist (HTTP 404). Never retried.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected model. Never retried.
    #[error("Validation failed for {model}: {message}")]
    Validation { model: String, message: String },

    /// Any other non-2xx response.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Rate limit exceeded (HTTP 429).
    #[error("Rate limited{}", retry_after.map(|d| format!(", retry after {:?}", d)).unwrap_or_default())]
    RateLimited { retry_after: Option<Duration> },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid client configuration or arguments. Raised before any request is sent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// All retries exhausted. The source holds the last failure.
    #[error("All {attempts} attempts exhausted")]
    RetriesExhausted { attempts: u32 },

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    ///
    /// Everything that reached the network is retried except auth, not-found
    /// and schema failures, which are permanent for a given request.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ErrorKind::NotAuthorized(_)
                | ErrorKind::NotFound(_)
                | ErrorKind::Validation { .. }
                | ErrorKind::Config(_)
                | ErrorKind::RetriesExhausted { .. }
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
