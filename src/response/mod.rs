//! Response projection module
//!
//! Wraps one transport outcome into a deferred, typed result.
//!
//! # Overview
//!
//! - [`RawOutcome`] is what the transport hands back: status, headers and body bytes
//! - [`ApiResult`] classifies that outcome against the accepted status codes
//!   once, then decodes lazily on every `extract*` call without further I/O

mod result;
mod types;

pub use result::{ApiResult, ErrResult};
pub use types::RawOutcome;

#[cfg(test)]
mod tests;
