// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # cloudrest
//!
//! Request, response and pagination engine for clients of REST-based cloud
//! infrastructure services (images, clusters, zones, shares, containers, ...).
//!
//! ## Features
//!
//! - **Envelope Codec**: Option types become JSON bodies or query strings,
//!   with required-field validation before anything is sent
//! - **Deferred Results**: `ApiResult<T>` decodes the raw response on demand,
//!   unwrapping resource envelopes like `{"zone": {...}}`
//! - **Pagination**: Link-following, marker and single-page listings behind
//!   one `PageStrategy` trait, with early termination and cancellation
//! - **Timestamps**: Tolerant decoding of the formats services actually emit
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cloudrest::{ClientConfig, LinkedPages, RequestOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ClientConfig::from_env()?.build_client()?;
//!
//!     // Single resource
//!     let zone: serde_json::Value = client
//!         .get("zones/a86dba58", &RequestOptions::new())
//!         .await
//!         .with_root_key("zone")
//!         .extract()?;
//!
//!     // Listing
//!     let pager = client.list("tenants", &(), LinkedPages::for_collection("tenants"));
//!     pager
//!         .each_page(|page| {
//!             for record in page.records()? {
//!                 println!("{record}");
//!             }
//!             Ok(true)
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         ServiceClient                           │
//! │  get/post/put/patch/delete/head → ApiResult    list → Pager     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──┬───────────────┬───────────────┐
//! │    Codec     │    Transport     │   Response    │  Pagination   │
//! ├──────────────┼──────────────────┼───────────────┼───────────────┤
//! │ build_body   │ Transport trait  │ RawOutcome    │ LinkedPages   │
//! │ build_query  │ HttpClient       │ ApiResult<T>  │ MarkerPages   │
//! │ decode_into  │ Authenticator    │ ErrResult     │ SinglePage    │
//! │ Timestamp    │                  │               │ Pager<S>      │
//! └──────────────┴──────────────────┴───────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Static credential injection
pub mod auth;

/// Transport trait and reqwest client
pub mod http;

/// Request bodies, query strings, decoding and timestamps
pub mod codec;

/// Raw outcomes and deferred results
pub mod response;

/// Page strategies and the pager
pub mod pagination;

/// Service client handle
pub mod service;

/// Client configuration
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use codec::{
    build_body, build_query, decode_into, BodyFields, BodyOptions, FieldValue, QueryFields,
    QueryOptions, Timestamp,
};
pub use config::ClientConfig;
pub use http::{HttpClient, HttpClientConfig, Request, Transport};
pub use pagination::{
    AllPages, LinkedPages, MarkerPages, Page, PageResult, PageStrategy, Pager, SinglePage,
};
pub use response::{ApiResult, ErrResult, RawOutcome};
pub use service::{RequestOptions, ServiceClient};
pub use tokio_util::sync::CancellationToken;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
