//! Pagination types and traits
//!
//! Defines the page strategy abstraction shared by all listing schemes.

use crate::codec::{decode_value, parse_json};
use crate::error::{Error, Result};
use crate::response::RawOutcome;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// One fetched batch: the URL it was requested from and the raw response
#[derive(Debug, Clone)]
pub struct PageResult {
    /// URL the page was fetched from
    pub url: Url,
    /// Raw response
    pub outcome: RawOutcome,
}

impl PageResult {
    /// Create a page result
    pub fn new(url: Url, outcome: RawOutcome) -> Self {
        Self { url, outcome }
    }

    /// Parse the body as JSON (`null` when empty)
    pub fn json(&self) -> Result<Value> {
        parse_json(&self.outcome.body)
    }
}

/// How a listing endpoint packs its records and points at the next page.
///
/// A strategy is bound once per listing call; the pager never inspects
/// which one it holds.
pub trait PageStrategy: Send + Sync {
    /// Records contained in the page
    fn records(&self, page: &PageResult) -> Result<Vec<Value>>;

    /// Whether the page holds zero records (not whether the body is empty)
    fn is_empty(&self, page: &PageResult) -> Result<bool> {
        Ok(self.records(page)?.is_empty())
    }

    /// Where to fetch the next page from, or `None` when this is the last one
    fn next_target(&self, page: &PageResult) -> Result<Option<Url>>;
}

impl<T: PageStrategy + ?Sized> PageStrategy for Box<T> {
    fn records(&self, page: &PageResult) -> Result<Vec<Value>> {
        (**self).records(page)
    }

    fn is_empty(&self, page: &PageResult) -> Result<bool> {
        (**self).is_empty(page)
    }

    fn next_target(&self, page: &PageResult) -> Result<Option<Url>> {
        (**self).next_target(page)
    }
}

impl<T: PageStrategy + ?Sized> PageStrategy for Arc<T> {
    fn records(&self, page: &PageResult) -> Result<Vec<Value>> {
        (**self).records(page)
    }

    fn is_empty(&self, page: &PageResult) -> Result<bool> {
        (**self).is_empty(page)
    }

    fn next_target(&self, page: &PageResult) -> Result<Option<Url>> {
        (**self).next_target(page)
    }
}

/// A fetched page bound to its strategy
pub struct Page<S> {
    result: PageResult,
    strategy: Arc<S>,
}

impl<S> std::fmt::Debug for Page<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.result.url.as_str())
            .field("status", &self.result.outcome.status)
            .finish_non_exhaustive()
    }
}

impl<S: PageStrategy> Page<S> {
    /// Bind a page result to a strategy
    pub fn new(result: PageResult, strategy: Arc<S>) -> Self {
        Self { result, strategy }
    }

    /// URL the page was fetched from
    pub fn url(&self) -> &Url {
        &self.result.url
    }

    /// HTTP status of the page response
    pub fn status(&self) -> u16 {
        self.result.outcome.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.result.outcome.headers
    }

    /// Raw body bytes
    pub fn body(&self) -> &Bytes {
        &self.result.outcome.body
    }

    /// The underlying page result
    pub fn result(&self) -> &PageResult {
        &self.result
    }

    /// Body parsed as JSON
    pub fn json(&self) -> Result<Value> {
        self.result.json()
    }

    /// Untyped records of this page
    pub fn records(&self) -> Result<Vec<Value>> {
        self.strategy.records(&self.result)
    }

    /// Records of this page decoded into `T`
    pub fn extract<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        decode_value(Value::Array(self.records()?), None)
    }

    /// Decode the whole body into `T`, unwrapping `root_key` if present
    pub fn extract_into<T: DeserializeOwned>(&self, root_key: Option<&str>) -> Result<T> {
        decode_value(self.json()?, root_key)
    }

    /// Whether this page holds zero records
    pub fn is_empty(&self) -> Result<bool> {
        self.strategy.is_empty(&self.result)
    }

    /// Target of the following page, if any
    pub fn next_target(&self) -> Result<Option<Url>> {
        self.strategy.next_target(&self.result)
    }

    /// Consume the page, returning the underlying result
    pub fn into_result(self) -> PageResult {
        self.result
    }
}

/// Every record of a listing, merged in page order
#[derive(Debug, Clone, Default)]
pub struct AllPages {
    records: Vec<Value>,
    pages: usize,
}

impl AllPages {
    /// Create from merged records and the number of pages they came from
    pub fn new(records: Vec<Value>, pages: usize) -> Self {
        Self { records, pages }
    }

    /// Merged untyped records
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Consume, returning the merged records
    pub fn into_records(self) -> Vec<Value> {
        self.records
    }

    /// Number of pages fetched
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record was returned
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Decode all records into `T` at once
    pub fn extract<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        decode_value(Value::Array(self.records.clone()), None)
    }
}

/// Read the record array stored under `key` (or the top-level array).
///
/// A missing key or `null` means no records; any other non-array value is
/// a decode error.
pub fn extract_records(body: &Value, key: Option<&str>) -> Result<Vec<Value>> {
    let collection = match key {
        Some(key) => body.get(key).unwrap_or(&Value::Null),
        None => body,
    };

    match collection {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.clone()),
        other => Err(Error::decode(format!(
            "Expected an array of records at '{}', found {}",
            key.unwrap_or("$"),
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
