//! Authentication module
//!
//! Supports: static token header (`X-Auth-Token` style), Bearer, Basic, Custom Headers
//!
//! The `Authenticator` attaches credentials to every outgoing request.
//! Obtaining or refreshing tokens is left to the caller.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, DEFAULT_TOKEN_HEADER};
