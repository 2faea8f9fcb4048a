//! Core HTTP client: transport, status mapping, retry and validation.

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::Response;
use crate::retry::RetryPolicy;
use crate::validate::validate;

/// HTTP client for the Query API with built-in retry and response validation.
///
/// Cloning is cheap: clones share the underlying connection pool, which is
/// released when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct SwHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SwHttpClient {
    /// Create a new HTTP client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Wrap a caller-owned `reqwest::Client`.
    ///
    /// Timeouts, pooling and the user agent are whatever that client was built with.
    pub fn from_reqwest(inner: reqwest::Client, config: ClientConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;
        Ok(Self { inner, config })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the full URL for an API path such as `/pvsystems`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url).header("Accept", "application/json")
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url).header("Accept", "application/json")
    }

    /// Create a PATCH request builder.
    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Patch, url).header("Accept", "application/json")
    }

    /// Send a request through the full pipeline and validate the body as `T`.
    ///
    /// Transport failures are retried according to the configured policy;
    /// `NotAuthorized`, `NotFound` and validation failures return immediately.
    #[instrument(
        skip(self, request),
        fields(method = ?request.method, url = %request.display_url())
    )]
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.with_retry(|| self.attempt_json::<T>(&request)).await
    }

    /// Send a request exactly once and validate the body as `T`.
    pub async fn send_json_once<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.attempt_json::<T>(&request).await
    }

    /// Run `operation` until it succeeds, fails permanently, or the attempt
    /// budget is spent.
    async fn with_retry<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retry_policy = self
            .config
            .retry
            .as_ref()
            .map(|c| RetryPolicy::new(c.clone()));

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() => {
                    let Some(policy) = retry_policy.as_mut() else {
                        return Err(err);
                    };

                    if let Some(delay) = policy.next_delay(err.retry_after()) {
                        warn!(
                            attempt = policy.attempts_made(),
                            delay_ms = delay.as_millis(),
                            error = %err,
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    warn!(attempts = policy.attempts_made(), error = %err, "Giving up");
                    return Err(Error::with_source(
                        ErrorKind::RetriesExhausted {
                            attempts: policy.attempts_made(),
                        },
                        err,
                    ));
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One pass: send, map status, decode, validate.
    async fn attempt_json<T: DeserializeOwned>(&self, request: &RequestBuilder) -> Result<T> {
        let response = self.execute_once(request).await?;
        let payload = response.json_value().await?;
        validate(payload)
    }

    /// Execute a single request without retry logic.
    async fn execute_once(&self, request: &RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), request.full_url());

        if let Some(ref token) = request.bearer_token {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        if self.config.enable_tracing {
            debug!(
                method = ?request.method,
                url = %request.display_url(),
                "Sending request"
            );
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            let content_length = response.content_length();

            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Response::new(response).error_for_status().await
    }
}
