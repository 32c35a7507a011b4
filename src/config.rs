//! Connector configuration.
//!
//! `ConnectorConfig` controls how a [`Connector`](crate::Connector) talks to a
//! Redfish service: request timeouts, TLS verification, the user agent and the
//! headers sent with every request.
//!
//! `ConnectorConfig` provides sensible defaults via [`Default`], a fluent
//! [`ConnectorConfig::builder()`] with validation, and [`ConnectorConfig::from_env`].
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use redfish_client::ConnectorConfig;
//! let cfg = ConnectorConfig::default();
//! assert!(cfg.verify_tls);
//! assert!(cfg.timeout.is_none());
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use std::time::Duration;
//! use redfish_client::ConnectorConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = ConnectorConfig::builder()
//!     .timeout(Duration::from_secs(30))
//!     .verify_tls(false) // most BMCs ship self-signed certificates
//!     .header("X-Auth-Token", "0123456789abcdef")
//!     .build()?; // returns Result<ConnectorConfig, ConfigError>
//! # Ok(()) }
//! ```
//!
//! # Default headers
//!
//! Every request carries `Accept: application/json`,
//! `Content-Type: application/json` and `OData-Version: 4.0` unless they are
//! replaced or removed through the builder. `Content-Type` is only sent on
//! requests that carry a body. A `User-Agent` set through
//! [`ConnectorConfigBuilder::header`] takes precedence over `user_agent`.
//!
//! # Environment
//!
//! [`ConnectorConfig::from_env`] starts from the defaults and reads:
//! - `REDFISH_TIMEOUT_SECS`: total request timeout in seconds.
//! - `REDFISH_CONNECT_TIMEOUT_SECS`: connect timeout in seconds.
//! - `REDFISH_VERIFY_TLS`: `true`/`false` (also `1`/`0`).
//! - `REDFISH_USER_AGENT`: user agent string.

use std::env;
use std::time::Duration;

use http::header::{HeaderMap, HeaderName, HeaderValue};

const DEFAULT_USER_AGENT: &str = concat!("redfish-client/", env!("CARGO_PKG_VERSION"));

const DEFAULT_HEADERS: [(&str, &str); 3] = [
    ("Accept", "application/json"),
    ("Content-Type", "application/json"),
    ("OData-Version", "4.0"),
];

#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Total time allowed for a single request. `None` means no limit.
    pub timeout: Option<Duration>,
    /// Time allowed to establish a connection. `None` means no limit.
    pub connect_timeout: Option<Duration>,
    /// Verify server certificates on `https` connections.
    pub verify_tls: bool,
    /// User agent sent with every request
    pub user_agent: String,
    /// Headers sent with every request, in insertion order.
    pub headers: Vec<(String, String)>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            verify_tls: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl ConnectorConfig {
    pub fn builder() -> ConnectorConfigBuilder {
        ConnectorConfigBuilder::default()
    }

    /// Loads the configuration from `REDFISH_*` environment variables on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(v) = lookup("REDFISH_TIMEOUT_SECS") {
            builder = builder.timeout(parse_secs("REDFISH_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("REDFISH_CONNECT_TIMEOUT_SECS") {
            builder = builder.connect_timeout(parse_secs("REDFISH_CONNECT_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("REDFISH_VERIFY_TLS") {
            let on = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::InvalidEnv { var: "REDFISH_VERIFY_TLS", value: v }),
            };
            builder = builder.verify_tls(on);
        }
        if let Some(v) = lookup("REDFISH_USER_AGENT") {
            builder = builder.user_agent(v);
        }

        builder.build()
    }

    /// Converts the configured headers into a [`HeaderMap`].
    ///
    /// Later entries replace earlier ones with the same (case-insensitive) name.
    pub fn header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let n = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeaderName(name.clone()))?;
            let v = HeaderValue::from_str(value)
                .map_err(|_| ConfigError::InvalidHeaderValue(name.clone()))?;
            map.insert(n, v);
        }
        Ok(map)
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidEnv { var, value: value.to_string() })
}

/// Builder for [`ConnectorConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConnectorConfigBuilder {
    inner: ConnectorConfig,
}

impl ConnectorConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut ConnectorConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn timeout(self, t: Duration) -> Self { self.map(|c| c.timeout = Some(t)) }
    pub fn connect_timeout(self, t: Duration) -> Self { self.map(|c| c.connect_timeout = Some(t)) }
    pub fn verify_tls(self, on: bool) -> Self { self.map(|c| c.verify_tls = on) }
    pub fn user_agent<S: Into<String>>(self, ua: S) -> Self { self.map(|c| c.user_agent = ua.into()) }

    /// Sets a header sent with every request, replacing any header with the same name.
    pub fn header<K: Into<String>, V: Into<String>>(self, name: K, value: V) -> Self {
        let name = name.into();
        let value = value.into();
        self.map(|c| {
            c.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
            c.headers.push((name, value));
        })
    }

    /// Stops sending the named header, including one of the defaults.
    pub fn remove_header(self, name: &str) -> Self {
        self.map(|c| c.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name)))
    }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut ConnectorConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<ConnectorConfig, ConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),

    #[error("invalid user agent {0:?}")]
    InvalidUserAgent(String),

    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

fn validate(c: &ConnectorConfig) -> Result<(), ConfigError> {
    if c.timeout.is_some_and(|t| t.is_zero()) || c.connect_timeout.is_some_and(|t| t.is_zero()) {
        return Err(ConfigError::ZeroTimeout);
    }
    if HeaderValue::from_str(&c.user_agent).is_err() {
        return Err(ConfigError::InvalidUserAgent(c.user_agent.clone()));
    }
    c.header_map()?;
    Ok(())
}
