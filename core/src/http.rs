//! HTTP transport types exchanged with the `Transport` implementation.
//!
//! # Design
//! These types describe a fully resolved request and a raw response as plain
//! data. `DemoClient` produces an `HttpRequest` once defaults, interceptors
//! and URL resolution have been applied, and receives an `HttpResponse`
//! before any status validation or body decoding happens. Keeping the wire
//! shape separate from `RequestSpec` / `ResponseEnvelope` lets tests stub the
//! network with nothing more than a closure over these structs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// A raw HTTP response described as plain data.
///
/// Header names are lower-case. The body is the undecoded text; decoding
/// into JSON is the job of the client's default transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
