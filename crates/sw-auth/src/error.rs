//! Error types for solarweb-auth.
//!
//! These cover credential loading only. Login and refresh talk to the API and
//! fail with `solarweb_client::Error` like every other call.

/// Result type alias for solarweb-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for solarweb-auth operations.
///
/// Error messages never include credential values.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Invalid credentials configuration.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::EnvVar("SOLARWEB_LOGIN_NAME".to_string());
        assert_eq!(
            err.to_string(),
            "Environment variable not set: SOLARWEB_LOGIN_NAME"
        );

        let err = Error::new(ErrorKind::InvalidCredentials("empty access key id".into()));
        assert_eq!(err.to_string(), "Invalid credentials: empty access key id");
    }
}
