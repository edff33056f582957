//! The request pipeline.
//!
//! # Design
//! `DemoClient` pairs a shared, read-only `ClientConfig` with a `Transport`.
//! `send` runs one `RequestSpec` through the fixed pipeline:
//!
//! 1. merge default headers, resolve the URL, pick the timeout
//! 2. request interceptors, in registration order
//! 3. cancellation checkpoint, then the transport call raced against the
//!    timeout and the cancellation handle
//! 4. default JSON decoding, then the request's transforms
//! 5. status validation
//! 6. response interceptors, in registration order
//!
//! The losing side of each race is dropped, which abandons in-flight
//! transport work. Once the pipeline finishes the cancellation handle is
//! settled, so a late `cancel` has no effect.

use std::sync::Arc;

use futures_util::future::try_join_all;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::interceptor::{run_request_chain, run_response_chain};
use crate::request::RequestSpec;
use crate::response::ResponseEnvelope;
use crate::transport::Transport;

const ACCEPT: &str = "application/json, text/plain, */*";

#[derive(Debug, Clone)]
pub struct DemoClient<T> {
    config: Arc<ClientConfig>,
    transport: T,
}

impl<T: Transport> DemoClient<T> {
    pub fn new(config: Arc<ClientConfig>, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute one request through the full pipeline.
    pub async fn send(&self, spec: RequestSpec) -> Result<ResponseEnvelope, ApiError> {
        let cancel = spec.cancel.clone();
        let outcome = self.dispatch(spec).await;
        if let Some(handle) = &cancel {
            handle.settle();
        }
        run_response_chain(self.config.response_interceptors(), outcome)
    }

    /// Execute every spec concurrently. Results come back in input order; the
    /// first failure fails the whole batch and drops the rest.
    pub async fn send_all(
        &self,
        specs: Vec<RequestSpec>,
    ) -> Result<Vec<ResponseEnvelope>, ApiError> {
        try_join_all(specs.into_iter().map(|spec| self.send(spec))).await
    }

    async fn dispatch(&self, spec: RequestSpec) -> Result<ResponseEnvelope, ApiError> {
        let spec = self.apply_defaults(spec);
        let mut spec = run_request_chain(self.config.request_interceptors(), spec)?;
        spec.url = self.config.resolve(&spec.url);

        let request = to_http_request(&spec)?;
        if let Some(reason) = spec.cancel.as_ref().and_then(|handle| handle.reason()) {
            return Err(ApiError::cancelled(reason));
        }

        tracing::debug!(method = %request.method, url = %request.url, "dispatching");
        let response = self.transmit(&spec, request).await?;
        settle(spec, response)
    }

    fn apply_defaults(&self, mut spec: RequestSpec) -> RequestSpec {
        let mut headers = self.config.default_headers().clone();
        headers.append(&mut spec.headers);
        headers
            .entry("accept".to_string())
            .or_insert_with(|| ACCEPT.to_string());
        if spec.data.is_some() {
            headers
                .entry("content-type".to_string())
                .or_insert_with(|| "application/json".to_string());
        }
        spec.headers = headers;
        spec.url = self.config.resolve(&spec.url);
        spec.timeout = spec
            .timeout
            .or(self.config.timeout())
            .filter(|limit| !limit.is_zero());
        spec
    }

    async fn transmit(
        &self,
        spec: &RequestSpec,
        request: HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        let exchange = async {
            match spec.timeout {
                Some(limit) => tokio::time::timeout(limit, self.transport.execute(request))
                    .await
                    .unwrap_or_else(|_| Err(ApiError::timeout(limit.as_millis()))),
                None => self.transport.execute(request).await,
            }
        };

        match &spec.cancel {
            Some(handle) => tokio::select! {
                biased;
                reason = handle.cancelled() => Err(ApiError::cancelled(reason)),
                result = exchange => result,
            },
            None => exchange.await,
        }
    }
}

fn to_http_request(spec: &RequestSpec) -> Result<HttpRequest, ApiError> {
    let body = spec
        .data
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method: spec.method,
        url: spec.url.clone(),
        headers: spec
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
        body,
    })
}

/// Decode, transform, then validate the status.
fn settle(spec: RequestSpec, response: HttpResponse) -> Result<ResponseEnvelope, ApiError> {
    let data = spec
        .transforms
        .iter()
        .try_fold(decode_body(&response.body), |data, transform| {
            transform.apply(data)
        })
        .map_err(ApiError::Transform)?;

    let envelope = ResponseEnvelope {
        status: response.status,
        headers: response.headers.into_iter().collect(),
        data,
        config: spec,
    };
    if envelope.config.validate_status.accepts(envelope.status) {
        Ok(envelope)
    } else {
        Err(ApiError::Response(Box::new(envelope)))
    }
}

/// Bodies that are not JSON are kept as a string.
fn decode_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
