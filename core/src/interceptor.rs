//! Request and response interceptors.
//!
//! # Design
//! Interceptors are trait objects registered on `ClientConfig` and run in
//! registration order. Each phase is a chain over a `Result`: a success goes
//! to the next interceptor's `on_request` / `on_response`, a failure goes to
//! the next interceptor's error hook, which may recover or pass it on. The
//! default error hooks pass the error through unchanged.

use std::sync::Arc;

use chrono::Utc;

use crate::error::ApiError;
use crate::request::RequestSpec;
use crate::response::ResponseEnvelope;

pub trait RequestInterceptor: Send + Sync {
    /// Inspect or rewrite the outbound request. Returning `Err` aborts it
    /// before transmission.
    fn on_request(&self, request: RequestSpec) -> Result<RequestSpec, ApiError>;

    fn on_request_error(&self, error: ApiError) -> Result<RequestSpec, ApiError> {
        Err(error)
    }
}

pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, response: ResponseEnvelope) -> Result<ResponseEnvelope, ApiError>;

    /// Substitute a response for `error`, or rethrow it (possibly rewritten).
    fn on_response_error(&self, error: ApiError) -> Result<ResponseEnvelope, ApiError> {
        Err(error)
    }
}

/// Run `request` through `interceptors` in order.
pub(crate) fn run_request_chain(
    interceptors: &[Arc<dyn RequestInterceptor>],
    request: RequestSpec,
) -> Result<RequestSpec, ApiError> {
    interceptors
        .iter()
        .fold(Ok(request), |state, interceptor| match state {
            Ok(request) => interceptor.on_request(request),
            Err(error) => interceptor.on_request_error(error),
        })
}

/// Run a settled outcome through `interceptors` in order.
pub(crate) fn run_response_chain(
    interceptors: &[Arc<dyn ResponseInterceptor>],
    outcome: Result<ResponseEnvelope, ApiError>,
) -> Result<ResponseEnvelope, ApiError> {
    interceptors
        .iter()
        .fold(outcome, |state, interceptor| match state {
            Ok(response) => interceptor.on_response(response),
            Err(error) => interceptor.on_response_error(error),
        })
}

/// Logs every outbound request with its method, resolved URL and timestamp.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLogger;

impl RequestInterceptor for RequestLogger {
    fn on_request(&self, request: RequestSpec) -> Result<RequestSpec, ApiError> {
        tracing::info!(
            method = %request.method,
            url = %request.url,
            at = Utc::now().timestamp_millis(),
            "{} request sent to {}",
            request.method,
            request.url
        );
        Ok(request)
    }
}

/// Logs every settled response, and every error on its way to the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseLogger;

impl ResponseInterceptor for ResponseLogger {
    fn on_response(&self, response: ResponseEnvelope) -> Result<ResponseEnvelope, ApiError> {
        tracing::info!(
            status = response.status,
            url = %response.config.url,
            at = Utc::now().timestamp_millis(),
            "data fetched from {}",
            response.config.url
        );
        Ok(response)
    }

    fn on_response_error(&self, error: ApiError) -> Result<ResponseEnvelope, ApiError> {
        tracing::warn!(at = Utc::now().timestamp_millis(), "request failed: {error}");
        Err(error)
    }
}
