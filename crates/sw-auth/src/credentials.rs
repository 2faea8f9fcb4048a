//! Credential types for the two Solar.web authentication modes.
//!
//! Secrets are redacted in Debug output.

use crate::error::{Error, ErrorKind, Result};

/// Header carrying the access key id in key mode.
pub const ACCESS_KEY_ID_HEADER: &str = "AccessKeyId";
/// Header carrying the access key secret in key mode.
pub const ACCESS_KEY_VALUE_HEADER: &str = "AccessKeyValue";

/// Which authentication mode a set of credentials selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Static `AccessKeyId`/`AccessKeyValue` headers on every request.
    AccessKey,
    /// Login name and password exchanged for a JWT bearer token.
    Session,
}

/// Solar.web credentials. Exactly one mode per client.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API access key pair, e.g. id `FKIA...` (36 chars) and a GUID secret.
    AccessKey { id: String, value: String },
    /// Solar.web login (email) and password.
    Login { name: String, password: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::AccessKey { id, .. } => f
                .debug_struct("AccessKey")
                .field("id", id)
                .field("value", &"[REDACTED]")
                .finish(),
            Credentials::Login { name, .. } => f
                .debug_struct("Login")
                .field("name", name)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

impl Credentials {
    /// Key-mode credentials.
    pub fn access_key(id: impl Into<String>, value: impl Into<String>) -> Self {
        Credentials::AccessKey {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Session-mode credentials.
    pub fn login(name: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Login {
            name: name.into(),
            password: password.into(),
        }
    }

    /// The authentication mode these credentials select.
    pub fn mode(&self) -> AuthMode {
        match self {
            Credentials::AccessKey { .. } => AuthMode::AccessKey,
            Credentials::Login { .. } => AuthMode::Session,
        }
    }

    /// Returns true if the credentials appear to be valid (non-empty).
    pub fn is_valid(&self) -> bool {
        match self {
            Credentials::AccessKey { id, value } => !id.is_empty() && !value.is_empty(),
            Credentials::Login { name, password } => !name.is_empty() && !password.is_empty(),
        }
    }

    /// Static headers for key mode; empty in session mode.
    pub fn key_headers(&self) -> Vec<(&'static str, &str)> {
        match self {
            Credentials::AccessKey { id, value } => vec![
                (ACCESS_KEY_ID_HEADER, id.as_str()),
                (ACCESS_KEY_VALUE_HEADER, value.as_str()),
            ],
            Credentials::Login { .. } => Vec::new(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Key mode is used when both of these are set:
    /// - `SOLARWEB_ACCESS_KEY_ID` (or `ACCESS_KEY_ID`)
    /// - `SOLARWEB_ACCESS_KEY_VALUE` (or `ACCESS_KEY_VALUE`)
    ///
    /// Otherwise session mode requires:
    /// - `SOLARWEB_LOGIN_NAME` (or `LOGIN_NAME`)
    /// - `SOLARWEB_LOGIN_PASSWORD` (or `LOGIN_PASSWORD`)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name: &str| std::env::var(name).ok())
    }

    /// The PV system to target by default, from `SOLARWEB_PV_SYSTEM_ID` (or `PV_SYSTEM_ID`).
    pub fn pv_system_id_from_env() -> Option<String> {
        lookup_either(&|name: &str| std::env::var(name).ok(), "PV_SYSTEM_ID")
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let key_id = lookup_either(&lookup, "ACCESS_KEY_ID");
        let key_value = lookup_either(&lookup, "ACCESS_KEY_VALUE");

        if let (Some(id), Some(value)) = (key_id, key_value) {
            return checked(Self::access_key(id, value));
        }

        let name = lookup_either(&lookup, "LOGIN_NAME")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SOLARWEB_LOGIN_NAME".to_string())))?;
        let password = lookup_either(&lookup, "LOGIN_PASSWORD")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SOLARWEB_LOGIN_PASSWORD".to_string())))?;

        checked(Self::login(name, password))
    }
}

fn lookup_either(lookup: &impl Fn(&str) -> Option<String>, suffix: &str) -> Option<String> {
    lookup(&format!("SOLARWEB_{suffix}"))
        .or_else(|| lookup(suffix))
        .filter(|v| !v.is_empty())
}

fn checked(creds: Credentials) -> Result<Credentials> {
    if creds.is_valid() {
        Ok(creds)
    } else {
        Err(Error::new(ErrorKind::InvalidCredentials(format!(
            "empty {:?} credentials",
            creds.mode()
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::access_key("FKIA0001", "47c076bc-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("FKIA0001"));
        assert!(!debug.contains("47c076bc-secret"));

        let creds = Credentials::login("me@example.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_key_headers() {
        let creds = Credentials::access_key("FKIA0001", "secret");
        assert_eq!(creds.mode(), AuthMode::AccessKey);
        assert_eq!(
            creds.key_headers(),
            vec![("AccessKeyId", "FKIA0001"), ("AccessKeyValue", "secret")]
        );

        let creds = Credentials::login("me", "pw");
        assert_eq!(creds.mode(), AuthMode::Session);
        assert!(creds.key_headers().is_empty());
    }

    #[test]
    fn test_from_lookup_prefers_access_key() {
        let creds = Credentials::from_lookup(env(&[
            ("SOLARWEB_ACCESS_KEY_ID", "FKIA0001"),
            ("SOLARWEB_ACCESS_KEY_VALUE", "secret"),
            ("SOLARWEB_LOGIN_NAME", "me"),
            ("SOLARWEB_LOGIN_PASSWORD", "pw"),
        ]))
        .unwrap();

        assert_eq!(creds, Credentials::access_key("FKIA0001", "secret"));
    }

    #[test]
    fn test_from_lookup_session_with_unprefixed_names() {
        let creds =
            Credentials::from_lookup(env(&[("LOGIN_NAME", "me"), ("LOGIN_PASSWORD", "pw")]))
                .unwrap();

        assert_eq!(creds, Credentials::login("me", "pw"));
    }

    #[test]
    fn test_from_lookup_missing_password() {
        let err = Credentials::from_lookup(env(&[("SOLARWEB_LOGIN_NAME", "me")])).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EnvVar(ref v) if v == "SOLARWEB_LOGIN_PASSWORD"));
    }

    #[test]
    fn test_half_key_pair_falls_back_to_session() {
        let err = Credentials::from_lookup(env(&[("SOLARWEB_ACCESS_KEY_ID", "FKIA0001")]))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EnvVar(_)));
    }

    #[test]
    fn test_is_valid() {
        assert!(!Credentials::access_key("", "x").is_valid());
        assert!(!Credentials::login("me", "").is_valid());
        assert!(Credentials::login("me", "pw").is_valid());
    }
}
