//! HTTP transport module
//!
//! The engine talks to services through the [`Transport`] trait.
//!
//! # Features
//!
//! - **Transport trait**: one async `execute` call returning status, headers and body
//! - **reqwest client**: [`HttpClient`] with timeout, default headers and auth injection
//! - **No hidden policy**: every status is returned to the caller for classification

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use transport::{Request, Transport};
