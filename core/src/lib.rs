//! Async request demo client for a collection-oriented JSON API.
//!
//! # Overview
//! `RequestDemoController` exposes one operation per user action (list,
//! create, replace, delete, concurrent fetch, custom headers, response
//! transform, relaxed status validation, cancellation). Each operation sends
//! a `RequestSpec` through a `DemoClient` and publishes the result to a
//! `Sink` or, on failure, a `Notifier`.
//!
//! # Design
//! - `ClientConfig` is built once and shared read-only; interceptors and
//!   default headers are registered on its builder.
//! - The network sits behind the `Transport` trait. `ReqwestTransport` is the
//!   real one; tests answer from memory.
//! - Timeouts and cancellation race the transport future inside the client,
//!   so transport implementations stay oblivious to both.
//! - Errors are a tagged enum: a rejected response keeps its envelope, a
//!   missing response says why.

pub mod api;
pub mod cancel;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod notice;
pub mod render;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use cancel::{CancelState, CancellationHandle};
pub use client::DemoClient;
pub use config::{ClientConfig, ClientConfigBuilder, DemoSettings, DEFAULT_BASE_URL};
pub use controller::RequestDemoController;
pub use error::{ApiError, TransportKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use interceptor::{RequestInterceptor, RequestLogger, ResponseInterceptor, ResponseLogger};
pub use notice::Notice;
pub use render::{Notifier, Sink};
pub use request::{RequestSpec, StatusPredicate, Transform};
pub use response::ResponseEnvelope;
pub use transport::{ReqwestTransport, Transport};
pub use types::{NewTodo, Todo, TodoPatch};
