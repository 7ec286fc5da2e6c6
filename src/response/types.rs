//! Raw transport outcome

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};

/// Status, headers and body of one completed HTTP exchange
#[derive(Debug, Clone, Default)]
pub struct RawOutcome {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

impl RawOutcome {
    /// Create a new outcome
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Create an outcome with a JSON body and no headers
    pub fn json(status: u16, body: &Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        Self::new(status, headers, body.to_string())
    }

    /// Body as lossy UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get a header value by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Content type without parameters, lowercased
    pub fn content_type(&self) -> Option<String> {
        self.header("content-type")
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
    }

    /// Headers as a JSON object keyed by lowercase name (first value per name)
    pub fn headers_json(&self) -> Value {
        let mut map = Map::new();
        for name in self.headers.keys() {
            if let Some(value) = self.headers.get(name).and_then(|v| v.to_str().ok()) {
                map.insert(name.as_str().to_string(), Value::String(value.to_string()));
            }
        }
        Value::Object(map)
    }
}
