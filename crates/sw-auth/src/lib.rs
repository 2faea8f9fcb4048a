//! # sw-auth
//!
//! Authentication for the Solar.web Query API.
//!
//! Two mutually exclusive modes:
//!
//! - **Access key**: `AccessKeyId` / `AccessKeyValue` headers on every request.
//!   No token lifecycle.
//! - **Session**: login name and password are exchanged at `/iam/jwt` for a
//!   JWT bearer token and a refresh token. Refresh is explicit; nothing here
//!   refreshes on its own.
//!
//! Passwords, key values and tokens are redacted in Debug output and skipped
//! in tracing spans.
//!
//! ## Example
//!
//! ```rust,ignore
//! use solarweb_auth::{AuthManager, Credentials};
//! use solarweb_client::SwHttpClient;
//!
//! let http = SwHttpClient::default_client()?;
//! let auth = AuthManager::new(Credentials::from_env()?);
//! if auth.is_session_mode() {
//!     auth.login(&http).await?;
//! }
//! let request = auth.apply(http.get(http.url("/pvsystems"))).await;
//! ```

mod credentials;
mod error;
mod manager;
mod session;

pub use credentials::{AuthMode, Credentials, ACCESS_KEY_ID_HEADER, ACCESS_KEY_VALUE_HEADER};
pub use error::{Error, ErrorKind, Result};
pub use manager::AuthManager;
pub use session::{JwtResponse, SessionToken};
