//! HTTP request building for the Query API.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::Result;

/// `Content-Type` the token endpoints expect.
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Builder for a single API request.
///
/// Query parameters are kept unencoded until [`RequestBuilder::full_url`]
/// renders them, so list values like `channel=P,E` keep their literal comma.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) bearer_token: Option<String>,
    /// The URL carries a secret (e.g. a refresh token in the path).
    pub(crate) sensitive_url: bool,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            body: None,
            bearer_token: None,
            sensitive_url: false,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The URL without query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL as it may appear in logs.
    pub fn display_url(&self) -> &str {
        if self.sensitive_url {
            "[REDACTED]"
        } else {
            &self.url
        }
    }

    /// Keep the URL out of logs and spans.
    pub fn sensitive_url(mut self) -> Self {
        self.sensitive_url = true;
        self
    }

    /// Look up a header set on this request.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a bearer token is attached.
    pub fn has_bearer(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// The attached bearer token, if any.
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Set the bearer token for authentication.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Set JSON body.
    ///
    /// Sets `Content-Type: application/json` unless a content type was already set.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(value);
        if self.header_value("Content-Type").is_none() {
            self.headers
                .insert("Content-Type".to_string(), "application/json".to_string());
        }
        Ok(self)
    }

    /// The URL with the rendered query string.
    pub fn full_url(&self) -> String {
        if self.query_params.is_empty() {
            return self.url.clone();
        }

        let query = self
            .query_params
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), encode_query_value(value))
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.url, query)
    }
}

/// Percent-encode a query value, leaving `,` list separators literal.
pub fn encode_query_value(value: &str) -> String {
    value
        .split(',')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Percent-encode a single path segment such as a PV system id.
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
