//! The network seam.
//!
//! # Design
//! `DemoClient` never talks to the network directly; it hands a resolved
//! `HttpRequest` to a `Transport` and gets back an `HttpResponse` or a
//! transport-level `ApiError`. Status codes are data at this layer: a 404 or
//! 500 is an `Ok(HttpResponse)`, and status validation happens in the client.
//! `ReqwestTransport` is the production implementation; tests substitute
//! stubs that answer from memory.

use std::future::Future;

use crate::error::{ApiError, TransportKind};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create reqwest client: {e}")))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or("(binary)").to_string(),
                )
            })
            .collect();
        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn transport_error(error: reqwest::Error) -> ApiError {
    tracing::warn!("transport failure: {error}");
    if error.is_timeout() {
        ApiError::Transport {
            kind: TransportKind::Timeout,
            message: error.to_string(),
        }
    } else {
        ApiError::network(format!("Network Error: {error}"))
    }
}
