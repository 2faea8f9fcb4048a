//! JWT session tokens returned by `/iam/jwt`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a successful login or refresh.
#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    /// Bearer token for subsequent requests.
    pub jwt_token: String,
    /// Token to pass to the next refresh, if the server issued one.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for JwtResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtResponse")
            .field("jwt_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// The token pair held by an authenticated session.
///
/// Tokens are redacted in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken {
    jwt_token: String,
    refresh_token: Option<String>,
    expiry: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("jwt_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expiry", &self.expiry)
            .finish()
    }
}

impl SessionToken {
    /// Build a token from a bearer string, reading the expiry from its `exp` claim.
    pub fn new(jwt_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        let jwt_token = jwt_token.into();
        let expiry = jwt_expiry(&jwt_token);
        Self {
            jwt_token,
            refresh_token,
            expiry,
        }
    }

    /// Build the next token from a server response.
    ///
    /// A response without `refreshToken` keeps `previous_refresh`.
    pub(crate) fn from_response(response: JwtResponse, previous_refresh: Option<String>) -> Self {
        Self::new(
            response.jwt_token,
            response.refresh_token.or(previous_refresh),
        )
    }

    /// The bearer token.
    pub fn jwt_token(&self) -> &str {
        &self.jwt_token
    }

    /// The refresh token, if any.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// When the bearer token expires, if it carries an `exp` claim.
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    /// Returns true if the token has a known expiry in the past.
    pub fn is_expired(&self) -> bool {
        self.expiry.is_some_and(|exp| exp <= Utc::now())
    }
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Read the `exp` claim from a JWT payload. The signature is not checked.
fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}
