//! Per-call request description.
//!
//! # Design
//! `RequestSpec` is what an operation hands to `DemoClient::send`. It starts
//! with whatever the caller supplied (possibly a relative path, only the
//! one-off headers) and is rewritten by the client into the effective spec:
//! URL resolved, defaults merged, interceptors applied. The effective spec is
//! attached to the resulting `ResponseEnvelope` and serialized by the sinks
//! as the request configuration, which is why the closures and the
//! cancellation handle are skipped during serialization.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::cancel::CancellationHandle;
use crate::error::ApiError;
use crate::http::HttpMethod;

type TransformFn = dyn Fn(Value) -> Result<Value, String> + Send + Sync;
type PredicateFn = dyn Fn(u16) -> bool + Send + Sync;

/// A response-body transform, run after the default JSON decoding.
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, data: Value) -> Result<Value, String> {
        (self.0)(data)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform")
    }
}

/// Decides whether a status code counts as success.
#[derive(Clone)]
pub struct StatusPredicate(Arc<PredicateFn>);

impl StatusPredicate {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(u16) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn accepts(&self, status: u16) -> bool {
        (self.0)(status)
    }
}

impl Default for StatusPredicate {
    fn default() -> Self {
        Self::new(|status| (200..300).contains(&status))
    }
}

impl fmt::Debug for StatusPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StatusPredicate")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(rename = "timeout_ms", serialize_with = "serialize_timeout")]
    pub timeout: Option<Duration>,
    #[serde(skip)]
    pub cancel: Option<CancellationHandle>,
    #[serde(skip)]
    pub transforms: Vec<Transform>,
    #[serde(skip)]
    pub validate_status: StatusPredicate,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            data: None,
            timeout: None,
            cancel: None,
            transforms: Vec::new(),
            validate_status: StatusPredicate::default(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Attach a JSON body encoded from `body`.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, ApiError> {
        let data =
            serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.data(data))
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Add a one-off header. Names are stored lower-case.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_with(mut self, handle: CancellationHandle) -> Self {
        self.cancel = Some(handle);
        self
    }

    /// Append a transform to the chain.
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.transforms.push(Transform::new(f));
        self
    }

    pub fn validate_status<F>(mut self, f: F) -> Self
    where
        F: Fn(u16) -> bool + Send + Sync + 'static,
    {
        self.validate_status = StatusPredicate::new(f);
        self
    }
}

fn serialize_timeout<S: Serializer>(timeout: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match timeout {
        Some(d) => s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        None => s.serialize_u64(0),
    }
}
