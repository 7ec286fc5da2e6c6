//! Error types for cloudrest
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! `Error` is `Clone` so a deferred [`ApiResult`](crate::response::ApiResult)
//! can hand back the same classified failure on every extraction.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// The main error type for cloudrest
#[derive(Error, Debug, Clone)]
pub enum Error {
    // ============================================================================
    // Request Construction Errors
    // ============================================================================
    #[error("Missing required field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Arc<reqwest::Error>>,
    },

    #[error("Unexpected HTTP status {status} (expected one of {expected:?}): {body}")]
    UnexpectedStatus {
        status: u16,
        expected: Vec<u16>,
        body: String,
    },

    #[error("Operation cancelled")]
    Cancelled,

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Listing interrupted after {pages} page(s): {source}")]
    Incomplete {
        pages: usize,
        records: Vec<Value>,
        source: Box<Error>,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error("{0}")]
    Anyhow(Arc<anyhow::Error>),
}

impl Error {
    /// Create a validation error for a required field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing required field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::validation(field, "value is required")
    }

    /// Create a transport error without an underlying HTTP error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(status: u16, expected: &[u16], body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            expected: expected.to_vec(),
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Incomplete { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Check if this error (or the failure behind a partial listing) is a cancellation
    pub fn is_cancelled(&self) -> bool {
        match self {
            Error::Cancelled => true,
            Error::Incomplete { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }

    /// Records accumulated before a listing was interrupted
    pub fn partial_records(&self) -> Option<&[Value]> {
        match self {
            Error::Incomplete { records, .. } => Some(records),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
            source: Some(Arc::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(Arc::new(err))
    }
}

/// Result type alias for cloudrest
pub type Result<T> = std::result::Result<T, Error>;
