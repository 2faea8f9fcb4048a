//! Client configuration.

use std::time::Duration;

use crate::retry::RetryConfig;

/// HTTP settings for one [`SwHttpClient`](crate::SwHttpClient).
///
/// The base URL is fixed per client; tests point it at a mock server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root without a trailing slash.
    pub base_url: String,
    /// `None` sends every request exactly once.
    pub retry: Option<RetryConfig>,
    /// Ask for gzip/deflate bodies and decompress them.
    pub accept_compressed: bool,
    /// Whole-request timeout, per attempt.
    pub timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// How long an idle pooled connection is kept.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: usize,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Emit a debug event per request and per response.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::SW_BASE_URL.to_string(),
            retry: Some(RetryConfig::default()),
            accept_compressed: true,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 4,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Start from the defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Use another API root, e.g. a wiremock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Retry transient failures with this policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = Some(retry);
        self
    }

    /// Send every request once.
    pub fn without_retry(mut self) -> Self {
        self.config.retry = None;
        self
    }

    /// Toggle gzip/deflate response compression.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Set the per-attempt request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the TCP connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Idle pool settings: how long a connection may sit unused, and how many
    /// may be kept per host.
    pub fn with_pool(mut self, idle_timeout: Duration, max_idle_per_host: usize) -> Self {
        self.config.pool_idle_timeout = idle_timeout;
        self.config.pool_max_idle_per_host = max_idle_per_host;
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable per-request debug events.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_production() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.solarweb.com/swqapi");
        assert_eq!(config.retry.as_ref().map(|r| r.max_attempts), Some(5));
        assert!(config.accept_compressed);
        assert!(config.user_agent.starts_with("solarweb-api/"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder()
            .with_base_url("http://127.0.0.1:8080/swqapi/")
            .with_timeout(Duration::from_secs(60))
            .with_pool(Duration::from_secs(5), 1)
            .without_retry()
            .with_compression(false)
            .with_user_agent("dashboard/1.0")
            .build();

        assert_eq!(config.base_url, "http://127.0.0.1:8080/swqapi");
        assert!(config.retry.is_none());
        assert!(!config.accept_compressed);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.pool_max_idle_per_host, 1);
        assert_eq!(config.user_agent, "dashboard/1.0");
    }
}
