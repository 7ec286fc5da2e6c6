//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{extract_records, PageResult, PageStrategy};
use crate::error::{Error, Result};
use crate::types::Link;
use serde_json::Value;
use tracing::warn;
use url::Url;

// ============================================================================
// Link Pagination
// ============================================================================

/// Link-following pagination
///
/// The response body carries the URL of the next page.
/// Common patterns:
/// - `{"tenants": [...], "tenants_links": [{"rel": "next", "href": "..."}]}`
/// - `{"recordsets": [...], "links": {"self": "...", "next": "..."}}`
#[derive(Debug, Clone)]
pub struct LinkedPages {
    /// Key of the record array
    pub records_key: String,
    /// Key of the links array (or object)
    pub links_key: String,
}

impl LinkedPages {
    /// Create a link paginator with explicit keys
    pub fn new(records_key: impl Into<String>, links_key: impl Into<String>) -> Self {
        Self {
            records_key: records_key.into(),
            links_key: links_key.into(),
        }
    }

    /// Use the `<collection>_links` naming convention
    pub fn for_collection(records_key: impl Into<String>) -> Self {
        let records_key = records_key.into();
        let links_key = format!("{records_key}_links");
        Self {
            records_key,
            links_key,
        }
    }

    fn next_href(&self, links: &Value) -> Result<Option<String>> {
        match links {
            Value::Null => Ok(None),
            Value::Array(_) => {
                let links: Vec<Link> = serde_json::from_value(links.clone()).map_err(|e| {
                    Error::decode(format!("Malformed links at '{}': {e}", self.links_key))
                })?;
                Ok(Link::find_next(&links).map(str::to_string))
            }
            Value::Object(map) => Ok(map
                .get("next")
                .and_then(Value::as_str)
                .filter(|href| !href.is_empty())
                .map(str::to_string)),
            _ => Err(Error::decode(format!(
                "Expected links at '{}' to be an array or object",
                self.links_key
            ))),
        }
    }
}

impl PageStrategy for LinkedPages {
    fn records(&self, page: &PageResult) -> Result<Vec<Value>> {
        extract_records(&page.json()?, Some(&self.records_key))
    }

    fn next_target(&self, page: &PageResult) -> Result<Option<Url>> {
        let body = page.json()?;
        let links = body.get(&self.links_key).unwrap_or(&Value::Null);

        match self.next_href(links)? {
            Some(href) => Ok(Some(page.url.join(&href)?)),
            None => Ok(None),
        }
    }
}

// ============================================================================
// Marker Pagination
// ============================================================================

/// Marker-based pagination
///
/// The next page is requested with `?marker=<key of the last record>`.
/// Common in object storage and image listings:
/// - `GET /v1/AUTH_x?limit=100&marker=last-container`
/// - `GET /v2/images?marker=<last image id>`
///
/// Relies on the server returning records in a stable order.
#[derive(Debug, Clone)]
pub struct MarkerPages {
    /// Key of the record array, `None` for a top-level array
    pub records_key: Option<String>,
    /// Record field holding the marker value
    pub marker_field: String,
    /// Query parameter carrying the marker
    pub marker_param: String,
}

impl MarkerPages {
    /// Records under `records_key`, marker taken from `marker_field`
    pub fn new(records_key: impl Into<String>, marker_field: impl Into<String>) -> Self {
        Self {
            records_key: Some(records_key.into()),
            marker_field: marker_field.into(),
            marker_param: "marker".to_string(),
        }
    }

    /// Records form the top-level array of the body
    pub fn top_level(marker_field: impl Into<String>) -> Self {
        Self {
            records_key: None,
            marker_field: marker_field.into(),
            marker_param: "marker".to_string(),
        }
    }

    /// Use a different query parameter name
    #[must_use]
    pub fn with_marker_param(mut self, param: impl Into<String>) -> Self {
        self.marker_param = param.into();
        self
    }

    /// Marker value identifying a record
    pub fn marker_of(&self, record: &Value) -> Result<String> {
        let value = match record {
            Value::String(_) => record,
            _ => record.get(&self.marker_field).unwrap_or(&Value::Null),
        };

        match value {
            Value::String(s) if !s.is_empty() => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(Error::decode(format!(
                "Record has no usable marker field '{}'",
                self.marker_field
            ))),
        }
    }

    /// The marker the page was requested with, if any
    fn current_marker(&self, url: &Url) -> Option<String> {
        url.query_pairs()
            .find(|(key, _)| key == self.marker_param.as_str())
            .map(|(_, value)| value.into_owned())
    }

    /// `url` with the marker parameter replaced, other parameters kept in order
    fn with_marker(&self, url: &Url, marker: &str) -> Url {
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != self.marker_param.as_str())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut next = url.clone();
        next.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair(&self.marker_param, marker);
        next
    }
}

impl PageStrategy for MarkerPages {
    fn records(&self, page: &PageResult) -> Result<Vec<Value>> {
        // Plain-text listings return one name per line
        if page.outcome.content_type().as_deref() == Some("text/plain") {
            return Ok(page
                .outcome
                .text()
                .lines()
                .filter(|line| !line.is_empty())
                .map(|line| Value::String(line.to_string()))
                .collect());
        }

        extract_records(&page.json()?, self.records_key.as_deref())
    }

    fn next_target(&self, page: &PageResult) -> Result<Option<Url>> {
        let records = self.records(page)?;
        let Some(last) = records.last() else {
            return Ok(None);
        };

        let marker = self.marker_of(last)?;
        if self.current_marker(&page.url).as_deref() == Some(marker.as_str()) {
            warn!(
                "Server did not advance past marker '{}' at {}, stopping",
                marker, page.url
            );
            return Ok(None);
        }

        Ok(Some(self.with_marker(&page.url, &marker)))
    }
}

// ============================================================================
// Single Page
// ============================================================================

/// No pagination - the first page is the only page
#[derive(Debug, Clone, Default)]
pub struct SinglePage {
    /// Key of the record array, `None` for a top-level array
    pub records_key: Option<String>,
}

impl SinglePage {
    /// Records under `records_key`
    pub fn new(records_key: impl Into<String>) -> Self {
        Self {
            records_key: Some(records_key.into()),
        }
    }

    /// Records form the top-level array of the body
    pub fn top_level() -> Self {
        Self { records_key: None }
    }
}

impl PageStrategy for SinglePage {
    fn records(&self, page: &PageResult) -> Result<Vec<Value>> {
        extract_records(&page.json()?, self.records_key.as_deref())
    }

    fn next_target(&self, _page: &PageResult) -> Result<Option<Url>> {
        Ok(None)
    }
}
