//! Service client handle
//!
//! A [`ServiceClient`] binds a transport to the endpoint of one cloud
//! service. It is immutable and cheap to clone; every operation takes it by
//! reference and returns an [`ApiResult`] or a [`Pager`].

use crate::codec::{build_body, BodyOptions, QueryOptions};
use crate::error::{Error, Result};
use crate::http::{Request, Transport};
use crate::pagination::{PageStrategy, Pager};
use crate::response::{ApiResult, ErrResult};
use crate::types::{Method, StringMap};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

// ============================================================================
// Request Options
// ============================================================================

/// Per-call overrides
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Accepted status codes, replacing the per-method defaults
    pub ok_codes: Option<Vec<u16>>,
    /// Extra headers for this call only
    pub headers: StringMap,
}

impl RequestOptions {
    /// No overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept exactly these status codes
    #[must_use]
    pub fn with_ok_codes(mut self, codes: &[u16]) -> Self {
        self.ok_codes = Some(codes.to_vec());
        self
    }

    /// Add a header to this call
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    fn ok_codes_for(&self, method: Method) -> Vec<u16> {
        self.ok_codes
            .clone()
            .unwrap_or_else(|| method.default_ok_codes().to_vec())
    }
}

// ============================================================================
// Service Client
// ============================================================================

/// Handle to one service endpoint
#[derive(Clone)]
pub struct ServiceClient {
    transport: Arc<dyn Transport>,
    endpoint: Url,
    headers: StringMap,
}

impl ServiceClient {
    /// Bind `transport` to `endpoint`.
    ///
    /// The endpoint is normalized to end with `/` so relative resource paths
    /// resolve beneath it.
    pub fn new(transport: Arc<dyn Transport>, endpoint: &str) -> Result<Self> {
        let mut endpoint = Url::parse(endpoint)?;
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Ok(Self {
            transport,
            endpoint,
            headers: StringMap::new(),
        })
    }

    /// Send `key: value` with every request made through this handle
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Service endpoint (always ends with `/`)
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Shared transport
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// URL of a resource below the endpoint, e.g. `["zones", id, "recordsets"]`
    pub fn resource_url(&self, parts: &[&str]) -> Result<Url> {
        let relative = parts
            .iter()
            .map(|part| part.trim_matches('/'))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Ok(self.endpoint.join(&relative)?)
    }

    /// Resolve an absolute URL or a path relative to the endpoint
    fn resolve(&self, path: &str) -> Result<Url> {
        match Url::parse(path) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(self.endpoint.join(path.trim_start_matches('/'))?)
            }
            Err(e) => Err(Error::from(e)),
        }
    }

    // ------------------------------------------------------------------------
    // Single-resource operations
    // ------------------------------------------------------------------------

    /// Send one request and classify its outcome
    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        opts: &RequestOptions,
    ) -> ApiResult<T> {
        let url = match self.resolve(path) {
            Ok(url) => url,
            Err(e) => return ApiResult::from_error(e),
        };

        let mut request = Request::new(method, url)
            .headers(&self.headers)
            .headers(&opts.headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let outcome = self.transport.execute(request).await;
        ApiResult::from_outcome(outcome, &opts.ok_codes_for(method))
    }

    /// GET a resource
    pub async fn get<T>(&self, path: &str, opts: &RequestOptions) -> ApiResult<T> {
        self.request(Method::GET, path, None, opts).await
    }

    /// POST a JSON body
    pub async fn post<T>(&self, path: &str, body: Value, opts: &RequestOptions) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body), opts).await
    }

    /// PUT a JSON body
    pub async fn put<T>(&self, path: &str, body: Value, opts: &RequestOptions) -> ApiResult<T> {
        self.request(Method::PUT, path, Some(body), opts).await
    }

    /// PATCH with a JSON body
    pub async fn patch<T>(&self, path: &str, body: Value, opts: &RequestOptions) -> ApiResult<T> {
        self.request(Method::PATCH, path, Some(body), opts).await
    }

    /// DELETE a resource
    pub async fn delete(&self, path: &str, opts: &RequestOptions) -> ErrResult {
        self.request(Method::DELETE, path, None, opts).await
    }

    /// HEAD a resource; the interesting part is usually the headers
    pub async fn head(&self, path: &str, opts: &RequestOptions) -> ErrResult {
        self.request(Method::HEAD, path, None, opts).await
    }

    /// POST the body built from `options`, wrapped under `root_key`.
    ///
    /// A validation failure is returned without contacting the service.
    pub async fn create<T, O>(
        &self,
        path: &str,
        options: &O,
        root_key: &str,
        opts: &RequestOptions,
    ) -> ApiResult<T>
    where
        O: BodyOptions + ?Sized,
    {
        match build_body(options, root_key) {
            Ok(body) => self.post(path, body, opts).await,
            Err(e) => {
                debug!("Not sending POST {}: {}", path, e);
                ApiResult::from_error(e)
            }
        }
    }

    /// PUT the body built from `options`, wrapped under `root_key`
    pub async fn update<T, O>(
        &self,
        path: &str,
        options: &O,
        root_key: &str,
        opts: &RequestOptions,
    ) -> ApiResult<T>
    where
        O: BodyOptions + ?Sized,
    {
        match build_body(options, root_key) {
            Ok(body) => self.put(path, body, opts).await,
            Err(e) => {
                debug!("Not sending PUT {}: {}", path, e);
                ApiResult::from_error(e)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------------

    /// Pager over the listing at `path`, filtered by `query`.
    ///
    /// Nothing is sent until the pager is iterated; an invalid path or query
    /// surfaces as the pager's setup error.
    pub fn list<S, O>(&self, path: &str, query: &O, strategy: S) -> Pager<S>
    where
        S: PageStrategy,
        O: QueryOptions + ?Sized,
    {
        let pager = match self.resolve(path) {
            Ok(url) => Pager::from_query(self.transport(), url.as_str(), query, strategy),
            Err(e) => Pager::from_error(self.transport(), e, strategy),
        };
        pager.with_headers(self.headers.clone())
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
