//! Common types used throughout cloudrest
//!
//! This module contains shared type definitions, type aliases,
//! and the per-method status code defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    HEAD,
}

impl Method {
    /// Status codes accepted by default for this method
    pub fn default_ok_codes(self) -> &'static [u16] {
        match self {
            Method::GET => &[200],
            Method::POST | Method::PUT => &[201, 202],
            Method::PATCH => &[200, 202, 204],
            Method::DELETE => &[202, 204],
            Method::HEAD => &[204],
        }
    }

    /// Status codes accepted by default for a listing page (always a GET)
    pub const PAGE_OK_CODES: &'static [u16] = &[200, 204];

    /// Method name as it appears on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
            Method::HEAD => reqwest::Method::HEAD,
        }
    }
}

// ============================================================================
// Pagination Links
// ============================================================================

/// One entry of a `"<collection>_links"` array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL, `null` on some services for the last page
    #[serde(default)]
    pub href: Option<String>,
    /// Relation, usually "next" or "previous"
    #[serde(default)]
    pub rel: String,
}

impl Link {
    /// Find a non-empty `next` link in a list of links
    pub fn find_next(links: &[Link]) -> Option<&str> {
        links
            .iter()
            .find(|link| link.rel == "next")
            .and_then(|link| link.href.as_deref())
            .filter(|href| !href.is_empty())
    }
}
