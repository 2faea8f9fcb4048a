//! Response validation: raw JSON in, typed model out.

use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::{Error, ErrorKind, Result};

/// Validate a decoded payload against the model `T`.
///
/// On failure the payload and the serde error are logged and a
/// [`ErrorKind::Validation`] error is returned. There is no partial result.
pub fn validate<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T> {
    match T::deserialize(&payload) {
        Ok(model) => Ok(model),
        Err(err) => {
            let model = short_type_name::<T>();
            error!(
                model,
                payload = %payload,
                error = %err,
                "Unable to validate data received from Solar.web API"
            );
            Err(Error::with_source(
                ErrorKind::Validation {
                    model: model.to_string(),
                    message: err.to_string(),
                },
                err,
            ))
        }
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    // Module paths stripped; generic types keep only the outer name.
    match full.find('<') {
        Some(idx) => full[..idx].rsplit("::").next().unwrap_or(full),
        None => full.rsplit("::").next().unwrap_or(full),
    }
}
