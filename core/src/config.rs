//! Shared client configuration.
//!
//! # Design
//! One `ClientConfig` is built at startup and shared behind an `Arc` by every
//! request. All mutation (default headers, interceptor registration) happens
//! on `ClientConfigBuilder`; once built the configuration is read-only, so
//! concurrent requests never observe a half-registered interceptor.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::interceptor::{RequestInterceptor, RequestLogger, ResponseInterceptor, ResponseLogger};

/// Base URL of the public test API the demo talks to by default.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Clone, Default)]
pub struct ClientConfig {
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
    timeout: Option<Duration>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn request_interceptors(&self) -> &[Arc<dyn RequestInterceptor>] {
        &self.request_interceptors
    }

    pub fn response_interceptors(&self) -> &[Arc<dyn ResponseInterceptor>] {
        &self.response_interceptors
    }

    /// Resolve `url` against the configured base URL.
    pub fn resolve(&self, url: &str) -> String {
        resolve_url(self.base_url.as_deref(), url)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .field("timeout", &self.timeout)
            .field("request_interceptors", &self.request_interceptors.len())
            .field("response_interceptors", &self.response_interceptors.len())
            .finish()
    }
}

#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.config.base_url = Some(base_url.trim_end_matches('/').to_string());
        self
    }

    /// Set a header sent with every request unless a call overrides it.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.config
            .default_headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.config
            .request_interceptors
            .push(Arc::new(interceptor));
        self
    }

    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.config
            .response_interceptors
            .push(Arc::new(interceptor));
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Demo client settings, usually filled in from command-line flags or the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSettings {
    pub base_url: String,
    /// Sent as `x-auth-token` on every request when set.
    pub auth_token: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: Some("sometoken".to_string()),
            timeout: None,
        }
    }
}

impl DemoSettings {
    /// The demo's shared configuration: base URL, auth default header,
    /// optional timeout, and the logging interceptors.
    pub fn client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder().base_url(&self.base_url);
        if let Some(token) = &self.auth_token {
            builder = builder.default_header("x-auth-token", token.clone());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .request_interceptor(RequestLogger)
            .response_interceptor(ResponseLogger)
            .build()
    }
}

/// Absolute URLs are returned verbatim; relative ones are joined to `base`
/// with exactly one `/` between them.
pub fn resolve_url(base: Option<&str>, url: &str) -> String {
    if is_absolute(url) {
        return url.to_string();
    }
    match base {
        Some(base) if !url.is_empty() => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            url.trim_start_matches('/')
        ),
        Some(base) => base.to_string(),
        None => url.to_string(),
    }
}

fn is_absolute(url: &str) -> bool {
    match url.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => url.starts_with("//"),
    }
}
