//! Auth configuration types

use std::collections::HashMap;

/// Header used by the services for a pre-issued token
pub const DEFAULT_TOKEN_HEADER: &str = "X-Auth-Token";

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Pre-issued token sent in a named header
    Token {
        /// Header name (e.g., "X-Auth-Token")
        header: String,
        /// The token value
        value: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Custom headers authentication
    CustomHeaders {
        /// Headers to add to each request
        headers: HashMap<String, String>,
    },
}

impl AuthConfig {
    /// Token in the default `X-Auth-Token` header
    pub fn token(value: impl Into<String>) -> Self {
        Self::Token {
            header: DEFAULT_TOKEN_HEADER.to_string(),
            value: value.into(),
        }
    }

    /// Bearer token
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Whether any credentials are configured
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Credentials never reach logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Token { header, .. } => f
                .debug_struct("Token")
                .field("header", header)
                .finish_non_exhaustive(),
            Self::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::CustomHeaders { headers } => f
                .debug_struct("CustomHeaders")
                .field("names", &headers.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}
