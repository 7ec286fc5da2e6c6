//! Deferred typed results
//!
//! An [`ApiResult`] is returned by every single-resource operation. It holds
//! either the raw outcome of a call whose status was accepted, or the error
//! that prevented or failed the call. Extraction never performs I/O.

use super::types::RawOutcome;
use crate::codec::{decode_into, decode_value};
use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::debug;

/// Deferred result of a single request, decoded on demand into `T`
pub struct ApiResult<T = Value> {
    outcome: Result<RawOutcome>,
    root_key: Option<String>,
    _target: PhantomData<fn() -> T>,
}

/// Result of operations without a meaningful body (delete, actions)
pub type ErrResult = ApiResult<()>;

impl<T> ApiResult<T> {
    /// Classify a transport outcome against the accepted status codes.
    ///
    /// A transport error is kept as-is; a status outside `ok_codes`
    /// becomes [`Error::UnexpectedStatus`] carrying the raw body.
    pub fn from_outcome(outcome: Result<RawOutcome>, ok_codes: &[u16]) -> Self {
        let outcome = outcome.and_then(|raw| {
            if ok_codes.contains(&raw.status) {
                Ok(raw)
            } else {
                debug!(
                    "Unexpected status {} (accepted: {:?})",
                    raw.status, ok_codes
                );
                Err(Error::unexpected_status(raw.status, ok_codes, raw.text()))
            }
        });

        Self {
            outcome,
            root_key: None,
            _target: PhantomData,
        }
    }

    /// Create a result for a call that failed before reaching the network
    pub fn from_error(err: Error) -> Self {
        Self {
            outcome: Err(err),
            root_key: None,
            _target: PhantomData,
        }
    }

    /// Set the envelope key that `extract` unwraps
    #[must_use]
    pub fn with_root_key(mut self, key: impl Into<String>) -> Self {
        self.root_key = Some(key.into());
        self
    }

    /// Reinterpret the result with another target type
    pub fn cast<U>(self) -> ApiResult<U> {
        ApiResult {
            outcome: self.outcome,
            root_key: self.root_key,
            _target: PhantomData,
        }
    }

    /// Whether the call succeeded with an accepted status
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The classified error, if any
    pub fn err(&self) -> Option<&Error> {
        self.outcome.as_ref().err()
    }

    /// The raw outcome of a successful call
    pub fn raw(&self) -> Option<&RawOutcome> {
        self.outcome.as_ref().ok()
    }

    /// HTTP status of the response, including rejected ones
    pub fn status(&self) -> Option<u16> {
        match &self.outcome {
            Ok(raw) => Some(raw.status),
            Err(err) => err.status(),
        }
    }

    /// Response headers of a successful call
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.raw().map(|raw| &raw.headers)
    }

    /// Raw body bytes of a successful call
    pub fn raw_body(&self) -> Option<&[u8]> {
        self.raw().map(|raw| raw.body.as_ref())
    }

    /// `Ok(())` if the call succeeded, otherwise the classified error
    pub fn extract_err(&self) -> Result<()> {
        self.outcome.as_ref().map(|_| ()).map_err(Clone::clone)
    }

    /// Decode the body into an arbitrary type, unwrapping `root_key` if present
    pub fn extract_into<U: DeserializeOwned>(&self, root_key: Option<&str>) -> Result<U> {
        let raw = self.outcome.as_ref().map_err(Clone::clone)?;
        decode_into(&raw.body, root_key)
    }

    /// Decode the response headers (first value per name) into `U`.
    ///
    /// Header names are lowercase keys of a JSON object, so target structs
    /// use `#[serde(rename = "x-container-object-count")]` style names.
    pub fn extract_headers<U: DeserializeOwned>(&self) -> Result<U> {
        let raw = self.outcome.as_ref().map_err(Clone::clone)?;
        decode_value(raw.headers_json(), None)
    }

    /// Consume the result, returning the raw outcome or the error
    pub fn into_raw(self) -> Result<RawOutcome> {
        self.outcome
    }
}

impl<T: DeserializeOwned> ApiResult<T> {
    /// Decode the body into `T`, unwrapping the configured root key.
    ///
    /// A failed call returns its error without looking at the body.
    pub fn extract(&self) -> Result<T> {
        self.extract_into(self.root_key.as_deref())
    }
}

impl<T> Clone for ApiResult<T> {
    fn clone(&self) -> Self {
        Self {
            outcome: self.outcome.clone(),
            root_key: self.root_key.clone(),
            _target: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for ApiResult<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiResult")
            .field("target", &std::any::type_name::<T>())
            .field("root_key", &self.root_key)
            .field("outcome", &self.outcome)
            .finish()
    }
}
