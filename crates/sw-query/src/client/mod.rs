//! Solar.web Query API client.
//!
//! Wraps `SwHttpClient` from `sw-client` and `AuthManager` from `sw-auth` and
//! provides one typed method per endpoint.

use serde::de::DeserializeOwned;
use tracing::instrument;

use solarweb_auth::{AuthManager, Credentials};
use solarweb_client::{ClientConfig, Error, ErrorKind, RequestBuilder, Result, SwHttpClient};

mod data;
mod devices;
mod info;
mod pvsystems;

/// Default `timezone` for flow data.
pub const DEFAULT_TIMEZONE: &str = "zulu";

/// Default aggregation `period`.
pub const DEFAULT_PERIOD: &str = "total";

/// Solar.web Query API client.
///
/// Every call runs through the same pipeline: auth headers, transport, status
/// mapping, retry, JSON decode and validation into the endpoint's model.
///
/// Cloning is cheap. Clones share the connection pool and the session token.
///
/// # Example
///
/// ```rust,ignore
/// use solarweb_query::{Credentials, SolarWebClient};
///
/// let client = SolarWebClient::new(Credentials::access_key(key_id, key_value))?
///     .with_pv_system_id("20bb600e-019b-4e03-9df3-a0a900cda689");
///
/// let system = client.pv_system(None).await?;
/// let flow = client.flow_data(None, None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SolarWebClient {
    http: SwHttpClient,
    auth: AuthManager,
    pv_system_id: Option<String>,
}

impl SolarWebClient {
    /// Create a client with default HTTP configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = SwHttpClient::new(config)?;
        Ok(Self::from_parts(http, AuthManager::new(credentials)))
    }

    /// Create a client from an existing HTTP client and auth manager.
    pub fn from_parts(http: SwHttpClient, auth: AuthManager) -> Self {
        Self {
            http,
            auth,
            pv_system_id: None,
        }
    }

    /// Create a client from `SOLARWEB_*` environment variables.
    ///
    /// Also picks up `SOLARWEB_PV_SYSTEM_ID` as the default system.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_config(ClientConfig::default())
    }

    /// Like [`SolarWebClient::from_env`] with custom HTTP configuration.
    pub fn from_env_with_config(config: ClientConfig) -> Result<Self> {
        let credentials = Credentials::from_env()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;
        let client = Self::with_config(credentials, config)?;
        Ok(match Credentials::pv_system_id_from_env() {
            Some(id) => client.with_pv_system_id(id),
            None => client,
        })
    }

    /// Set the PV system used when a call gets no explicit id.
    pub fn with_pv_system_id(mut self, pv_system_id: impl Into<String>) -> Self {
        self.pv_system_id = Some(pv_system_id.into());
        self
    }

    /// The configured default PV system.
    pub fn pv_system_id(&self) -> Option<&str> {
        self.pv_system_id.as_deref()
    }

    /// Get the underlying HTTP client.
    pub fn http(&self) -> &SwHttpClient {
        &self.http
    }

    /// Get the auth manager.
    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    /// Log in with login name and password. Session mode only.
    pub async fn login(&self) -> Result<()> {
        self.auth.login(&self.http).await
    }

    /// Rotate the session token with the stored refresh token, falling back
    /// to `refresh_token` when none is stored.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<()> {
        self.auth.refresh(&self.http, refresh_token).await
    }

    /// Resolve the PV system for a per-system call.
    fn system_id<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit.or(self.pv_system_id.as_deref()).ok_or_else(|| {
            Error::new(ErrorKind::Config(
                "no PV system id given and none configured".to_string(),
            ))
        })
    }

    /// Path below `/pvsystems/{id}`.
    fn system_path(&self, explicit: Option<&str>, suffix: &str) -> Result<String> {
        let id = solarweb_client::encode_path_segment(self.system_id(explicit)?);
        Ok(format!("/pvsystems/{id}{suffix}"))
    }

    /// Start a GET request for an API path.
    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.http.url(path))
    }

    /// Attach auth and run the request through the retrying pipeline.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = self.auth.apply(request).await;
        self.http.send_json(request).await
    }
}
