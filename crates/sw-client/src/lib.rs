//! # sw-client
//!
//! Core HTTP pipeline for the Fronius Solar.web Query API.
//!
//! Every API call goes through the same steps:
//!
//! ```text
//! request ─► auth headers ─► transport ─► status mapping ─► JSON decode ─► validation
//!    ▲                                                                          │
//!    └──────────────────── retry (transient failures only) ◄────────────────────┘
//! ```
//!
//! - 401 becomes [`ErrorKind::NotAuthorized`], 404 becomes [`ErrorKind::NotFound`];
//!   neither is retried.
//! - Schema mismatches become [`ErrorKind::Validation`] after the payload is logged;
//!   not retried either.
//! - Everything else is retried with exponential backoff and jitter, 5 attempts in
//!   total, after which [`ErrorKind::RetriesExhausted`] wraps the last failure.
//!
//! Auth headers are attached by the caller (see `solarweb-auth`); this crate is
//! credential-agnostic.
//!
//! ## Example
//!
//! ```rust,ignore
//! use solarweb_client::{ClientConfig, SwHttpClient};
//!
//! let http = SwHttpClient::new(ClientConfig::default())?;
//! let release: serde_json::Value = http
//!     .send_json(http.get(http.url("/info/release")).header("AccessKeyId", id))
//!     .await?;
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod retry;
mod validate;

pub use client::SwHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{
    encode_path_segment, encode_query_value, RequestBuilder, RequestMethod,
    JSON_PATCH_CONTENT_TYPE,
};
pub use response::{status_description, Response};
pub use retry::{BackoffStrategy, RetryConfig, RetryPolicy, DEFAULT_MAX_ATTEMPTS};
pub use validate::validate;

/// Base URL of the Solar.web Query API.
pub const SW_BASE_URL: &str = "https://api.solarweb.com/swqapi";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("solarweb-api/", env!("CARGO_PKG_VERSION"));
