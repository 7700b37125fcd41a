//! HTTP configuration types.
//!
//! `HttpConfig` describes how the built-in transport is constructed. Callers that
//! need full control can hand a ready `reqwest::Client` to the client builder instead.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::MlflowError;

/// HTTP configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Overall request timeout enforced by the transport.
    ///
    /// Unset by default; per-call deadlines belong on the `RequestContext`.
    pub timeout: Option<Duration>,
    /// Connection timeout
    pub connect_timeout: Option<Duration>,
    /// Headers sent with every request (e.g. `Authorization`).
    pub headers: HashMap<String, String>,
    /// Proxy URL applied to all schemes.
    pub proxy: Option<String>,
    /// User agent
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: Some(crate::defaults::http::CONNECT_TIMEOUT),
            headers: HashMap::new(),
            proxy: None,
            user_agent: Some(crate::defaults::http::USER_AGENT.to_string()),
        }
    }
}

impl HttpConfig {
    /// Returns a builder for constructing `HttpConfig`
    pub fn builder() -> HttpConfigBuilder {
        HttpConfigBuilder::new()
    }
}

/// Builder for `HttpConfig`.
///
/// Fields left untouched keep the `HttpConfig::default()` values.
#[derive(Debug, Clone, Default)]
pub struct HttpConfigBuilder {
    timeout: Option<Option<Duration>>,
    connect_timeout: Option<Option<Duration>>,
    headers: HashMap<String, String>,
    proxy: Option<String>,
    user_agent: Option<Option<String>>,
}

impl HttpConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Option<Duration>) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: Option<S>) -> Self {
        self.user_agent = Some(user_agent.map(Into::into));
        self
    }

    pub fn proxy<S: Into<String>>(mut self, proxy: S) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Convenience for `Authorization: Bearer <token>`.
    pub fn bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header("Authorization", value)
    }

    pub fn build(self) -> HttpConfig {
        let defaults = HttpConfig::default();
        HttpConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            headers: self.headers,
            proxy: self.proxy,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        }
    }
}

/// Build a `reqwest::Client` from an `HttpConfig`.
pub fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client, MlflowError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }

    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| MlflowError::InvalidConfiguration(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }

    if !config.headers.is_empty() {
        let mut headers = reqwest::header::HeaderMap::new();
        for (k, v) in &config.headers {
            let name = reqwest::header::HeaderName::from_bytes(k.as_bytes()).map_err(|e| {
                MlflowError::InvalidConfiguration(format!("Invalid header name '{k}': {e}"))
            })?;
            let mut value = reqwest::header::HeaderValue::from_str(v).map_err(|e| {
                MlflowError::InvalidConfiguration(format!("Invalid header value for '{k}': {e}"))
            })?;
            if name == reqwest::header::AUTHORIZATION {
                value.set_sensitive(true);
            }
            headers.insert(name, value);
        }
        builder = builder.default_headers(headers);
    }

    builder
        .build()
        .map_err(|e| MlflowError::InvalidConfiguration(format!("Failed to create HTTP client: {e}")))
}
