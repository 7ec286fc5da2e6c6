//! Transport abstraction
//!
//! The engine only needs "send this request, give me status, headers and
//! body". Anything implementing [`Transport`] can back a
//! [`ServiceClient`](crate::service::ServiceClient) or a
//! [`Pager`](crate::pagination::Pager): the reqwest-based
//! [`HttpClient`](super::HttpClient), or a stub in tests.

use crate::error::Result;
use crate::response::RawOutcome;
use crate::types::{Method, StringMap};
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

/// A single outgoing request
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Fully qualified target URL
    pub url: Url,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Extra request headers
    pub headers: StringMap,
}

impl Request {
    /// Create a request without body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            headers: StringMap::new(),
        }
    }

    /// Create a GET request
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Set the JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add several headers
    #[must_use]
    pub fn headers(mut self, headers: &StringMap) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

/// Executes HTTP requests on behalf of the engine.
///
/// Implementations own connection handling, authentication and any retry
/// policy. They return the response for every status code; status
/// classification happens in [`ApiResult`](crate::response::ApiResult).
/// An `Err` means no response was received.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and collect the full response
    async fn execute(&self, request: Request) -> Result<RawOutcome>;
}
