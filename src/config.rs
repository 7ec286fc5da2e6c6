//! Client configuration
//!
//! A [`ClientConfig`] names one service endpoint and the static credentials
//! used against it. It can be read from YAML or from `CLOUDREST_*`
//! environment variables and turned into a ready [`ServiceClient`].

use crate::auth::{AuthConfig, DEFAULT_TOKEN_HEADER};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::service::ServiceClient;
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Environment variable holding the service endpoint
pub const ENV_ENDPOINT: &str = "CLOUDREST_ENDPOINT";
/// Environment variable holding the auth token
pub const ENV_TOKEN: &str = "CLOUDREST_TOKEN";
/// Environment variable overriding the auth header name
pub const ENV_AUTH_HEADER: &str = "CLOUDREST_AUTH_HEADER";
/// Environment variable holding the timeout in seconds
pub const ENV_TIMEOUT: &str = "CLOUDREST_TIMEOUT";

// ============================================================================
// Client Config
// ============================================================================

/// Endpoint and credentials for one service
///
/// ```yaml
/// endpoint: "https://dns.example.com/v2"
/// token: "gAAAAAB..."
/// timeout_secs: 60
/// headers:
///   X-Auth-Sudo-Project-Id: "8c2a..."
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service endpoint URL
    pub endpoint: String,

    /// Pre-issued token, if the service needs one
    #[serde(default)]
    pub token: Option<String>,

    /// Header carrying the token
    #[serde(default = "default_auth_header")]
    pub auth_header: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_auth_header() -> String {
    DEFAULT_TOKEN_HEADER.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Config for `endpoint` with defaults everywhere else
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            auth_header: default_auth_header(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            headers: StringMap::new(),
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse client config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read client config '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Read the `CLOUDREST_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source, e.g. a map in tests
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENV_ENDPOINT)
            .ok_or_else(|| Error::config(format!("{ENV_ENDPOINT} is not set")))?;

        let mut config = Self::new(endpoint);
        config.token = lookup(ENV_TOKEN).filter(|token| !token.is_empty());

        if let Some(header) = lookup(ENV_AUTH_HEADER) {
            config.auth_header = header;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::config(format!(
                    "{ENV_TIMEOUT} must be a number of seconds, got '{timeout}'"
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::config("Client endpoint cannot be empty"));
        }

        Url::parse(&self.endpoint).map_err(|e| {
            Error::config(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;

        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }

        if self.token.is_some() && self.auth_header.trim().is_empty() {
            return Err(Error::config("auth_header cannot be empty when a token is set"));
        }

        Ok(())
    }

    /// Credentials derived from `token` and `auth_header`
    pub fn auth(&self) -> AuthConfig {
        match &self.token {
            Some(token) => AuthConfig::Token {
                header: self.auth_header.clone(),
                value: token.clone(),
            },
            None => AuthConfig::None,
        }
    }

    /// Transport settings for [`HttpClient`]
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .auth(self.auth());

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), value.clone());
        }

        builder.build()
    }

    /// Build a service handle backed by an [`HttpClient`]
    pub fn build_client(&self) -> Result<ServiceClient> {
        self.validate()?;
        let http = HttpClient::with_config(self.http_config())?;
        ServiceClient::new(Arc::new(http), &self.endpoint)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("auth_header", &self.auth_header)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("headers", &self.headers)
            .finish()
    }
}
