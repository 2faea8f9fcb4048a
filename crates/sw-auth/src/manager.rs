//! Token lifecycle and per-request header selection.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use solarweb_client::{
    encode_path_segment, Error as ClientError, ErrorKind as ClientErrorKind, RequestBuilder,
    Result as ClientResult, SwHttpClient, JSON_PATCH_CONTENT_TYPE,
};

use crate::credentials::{AuthMode, Credentials};
use crate::session::{JwtResponse, SessionToken};

const JWT_PATH: &str = "/iam/jwt";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_id: &'a str,
    password: &'a str,
}

#[derive(Default)]
struct TokenHolder {
    session: Option<SessionToken>,
    /// Refresh token kept after a failed login or refresh dropped the session.
    retained_refresh: Option<String>,
}

impl TokenHolder {
    fn refresh_token(&self) -> Option<String> {
        self.session
            .as_ref()
            .and_then(|s| s.refresh_token().map(str::to_string))
            .or_else(|| self.retained_refresh.clone())
    }

    fn clear_access(&mut self) {
        if let Some(refresh) = self.refresh_token() {
            self.retained_refresh = Some(refresh);
        }
        self.session = None;
    }

    fn store(&mut self, token: SessionToken) {
        self.retained_refresh = None;
        self.session = Some(token);
    }
}

/// Owns the credentials and the session token for one client.
///
/// Clones share the same token state. Login and refresh hold the lock for the
/// whole exchange, so concurrent refreshes run one after the other and
/// requests prepared meanwhile wait for the new token.
#[derive(Clone)]
pub struct AuthManager {
    credentials: Credentials,
    state: Arc<Mutex<TokenHolder>>,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl AuthManager {
    /// Create a manager with no session.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            state: Arc::new(Mutex::new(TokenHolder::default())),
        }
    }

    /// The configured credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The configured authentication mode.
    pub fn mode(&self) -> AuthMode {
        self.credentials.mode()
    }

    /// Returns true for login/password credentials.
    pub fn is_session_mode(&self) -> bool {
        self.mode() == AuthMode::Session
    }

    /// Returns true if a bearer token is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.session.is_some()
    }

    /// A copy of the current session token.
    pub async fn session(&self) -> Option<SessionToken> {
        self.state.lock().await.session.clone()
    }

    /// Expiry of the current bearer token, if known.
    pub async fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.state
            .lock()
            .await
            .session
            .as_ref()
            .and_then(SessionToken::expiry)
    }

    /// Exchange login name and password for a token pair.
    ///
    /// Fails with a configuration error in key mode without sending anything.
    /// Any previously held bearer token is dropped first, so a failed login
    /// leaves the client unauthenticated.
    #[instrument(skip(self, http))]
    pub async fn login(&self, http: &SwHttpClient) -> ClientResult<()> {
        let Credentials::Login { name, password } = &self.credentials else {
            return Err(ClientError::new(ClientErrorKind::Config(
                "login requires login name and password credentials".to_string(),
            )));
        };

        let mut state = self.state.lock().await;
        state.clear_access();

        debug!(login_name = %name, "Requesting JSON web token");
        let request = http
            .post(http.url(JWT_PATH))
            .header("Content-Type", JSON_PATCH_CONTENT_TYPE)
            .json(&LoginRequest {
                user_id: name,
                password,
            })?;

        let response: JwtResponse = http
            .send_json_once(request)
            .await
            .inspect_err(|err| warn!(error = %err, "Login failed"))?;

        let previous = state.refresh_token();
        state.store(SessionToken::from_response(response, previous));
        info!("Logged in to Solar.web");
        Ok(())
    }

    /// Rotate the token pair using the stored refresh token. `refresh_token`
    /// is only used when no refresh token is stored yet.
    ///
    /// Never called automatically; callers do it after a `NotAuthorized` error.
    #[instrument(skip(self, http, refresh_token))]
    pub async fn refresh(
        &self,
        http: &SwHttpClient,
        refresh_token: Option<&str>,
    ) -> ClientResult<()> {
        if !self.is_session_mode() {
            return Err(ClientError::new(ClientErrorKind::Config(
                "token refresh requires login name and password credentials".to_string(),
            )));
        }

        let mut state = self.state.lock().await;
        let Some(refresh) = state
            .refresh_token()
            .or_else(|| refresh_token.map(str::to_string))
        else {
            return Err(ClientError::new(ClientErrorKind::Config(
                "no refresh token available; login first".to_string(),
            )));
        };
        state.clear_access();

        debug!("Obtaining JSON web token using refresh token");
        let request = http
            .patch(http.url(&format!("{JWT_PATH}/{}", encode_path_segment(&refresh))))
            .header("Content-Type", JSON_PATCH_CONTENT_TYPE)
            .sensitive_url();

        let response: JwtResponse = http
            .send_json_once(request)
            .await
            .inspect_err(|err| warn!(error = %err, "Token refresh failed"))?;

        state.store(SessionToken::from_response(response, Some(refresh)));
        info!("Refreshed Solar.web session token");
        Ok(())
    }

    /// Attach authentication to a request.
    ///
    /// A held bearer token wins; otherwise key-mode credentials add the
    /// `AccessKeyId`/`AccessKeyValue` headers. Session mode without a token
    /// leaves the request unauthenticated.
    pub async fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        let state = self.state.lock().await;
        if let Some(session) = state.session.as_ref() {
            return request.bearer_auth(session.jwt_token());
        }
        drop(state);

        self.credentials
            .key_headers()
            .into_iter()
            .fold(request, |req, (name, value)| req.header(name, value))
    }
}
