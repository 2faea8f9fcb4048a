//! # solarweb-api
//!
//! A typed async client for the Fronius Solar.web Query API (SWQAPI).
//!
//! ## Security
//!
//! - Passwords, access key values and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error bodies are sanitized before they reach an error message
//!
//! ## Crates
//!
//! - **solarweb-client** - HTTP pipeline: status mapping, retry with jitter, response validation
//! - **solarweb-auth** - Access keys, JWT login and explicit refresh
//! - **solarweb-query** - Typed models and one method per endpoint
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solarweb_api::{Credentials, SolarWebClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SolarWebClient::new(Credentials::login("me@example.com", "password"))?
//!         .with_pv_system_id("20bb600e-019b-4e03-9df3-a0a900cda689");
//!
//!     client.login().await?;
//!
//!     let flow = client.flow_data(None, None).await?;
//!     println!("{flow:?}");
//!
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use solarweb_auth as auth;
#[cfg(feature = "client")]
pub use solarweb_client as client;
#[cfg(feature = "query")]
pub use solarweb_query as query;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use solarweb_auth::{AuthManager, Credentials};
#[cfg(feature = "client")]
pub use solarweb_client::{ClientConfig, Error, ErrorKind, Result, RetryConfig, SwHttpClient};
#[cfg(feature = "query")]
pub use solarweb_query::SolarWebClient;
