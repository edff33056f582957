//! One operation per user action.
//!
//! # Design
//! Each operation builds its `RequestSpec`, sends it through the shared
//! `DemoClient`, and publishes the outcome: successes go to a sink, failures
//! to the notifier. Basic operations report failures as a plain notice with
//! the error message; the status and cancellation demos classify the error
//! first. Every operation also returns its outcome so a front end can decide
//! on an exit status, and none of them panic.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::api;
use crate::cancel::CancellationHandle;
use crate::client::DemoClient;
use crate::error::ApiError;
use crate::notice::Notice;
use crate::render::{Notifier, Sink};
use crate::request::RequestSpec;
use crate::response::ResponseEnvelope;
use crate::transport::Transport;
use crate::types::{NewTodo, Todo, TodoPatch};

/// Endpoints fetched together by the concurrent demo.
pub const CONCURRENT_ENDPOINTS: [&str; 2] = ["/todos?_limit=5", "/posts?_limit=5"];

pub const CANCEL_REASON: &str = "Request cancelled";

/// One-off headers attached by the custom-headers demo.
pub const DEMO_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Authorization", "Bearer myToken"),
];

pub struct RequestDemoController<T> {
    client: DemoClient<T>,
    primary: Arc<dyn Sink>,
    secondary: Arc<dyn Sink>,
    notifier: Arc<dyn Notifier>,
}

impl<T: Transport> RequestDemoController<T> {
    pub fn new(
        client: DemoClient<T>,
        primary: Arc<dyn Sink>,
        secondary: Arc<dyn Sink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            primary,
            secondary,
            notifier,
        }
    }

    pub fn client(&self) -> &DemoClient<T> {
        &self.client
    }

    pub async fn list_items(
        &self,
        limit: Option<usize>,
        timeout: Option<Duration>,
    ) -> Result<ResponseEnvelope, ApiError> {
        let mut spec = api::build_list_todos(limit);
        if let Some(timeout) = timeout {
            spec = spec.timeout(timeout);
        }
        self.publish(self.client.send(spec).await)
    }

    pub async fn create_item(&self, input: &NewTodo) -> Result<ResponseEnvelope, ApiError> {
        let outcome = self.send_built(api::build_create_todo(input)).await;
        self.publish(outcome)
    }

    pub async fn replace_item(&self, id: u64, todo: &Todo) -> Result<ResponseEnvelope, ApiError> {
        let outcome = self.send_built(api::build_replace_todo(id, todo)).await;
        self.publish(outcome)
    }

    pub async fn patch_item(
        &self,
        id: u64,
        input: &TodoPatch,
    ) -> Result<ResponseEnvelope, ApiError> {
        let outcome = self.send_built(api::build_patch_todo(id, input)).await;
        self.publish(outcome)
    }

    pub async fn delete_item(&self, id: u64) -> Result<ResponseEnvelope, ApiError> {
        self.publish(self.client.send(api::build_delete_todo(id)).await)
    }

    /// GET every endpoint concurrently. The secondary sink is called once,
    /// with responses in `endpoints` order, and only if all of them succeed.
    pub async fn fetch_concurrent(
        &self,
        endpoints: &[&str],
    ) -> Result<Vec<ResponseEnvelope>, ApiError> {
        let specs = endpoints.iter().map(|e| RequestSpec::get(*e)).collect();
        let outcome = self.client.send_all(specs).await;
        match &outcome {
            Ok(responses) => self.secondary.present(responses),
            Err(error) => self.notifier.notify(&Notice::failed(error)),
        }
        outcome
    }

    /// POST with header overrides that apply to this call only.
    pub async fn create_with_headers(
        &self,
        input: &NewTodo,
        headers: &[(&str, &str)],
    ) -> Result<ResponseEnvelope, ApiError> {
        let spec = api::build_create_todo(input).map(|spec| {
            headers
                .iter()
                .fold(spec, |spec, (name, value)| spec.header(name, *value))
        });
        let outcome = self.send_built(spec).await;
        self.publish(outcome)
    }

    /// POST and upper-case the `title` of the response body before it is
    /// delivered.
    pub async fn create_with_transform(
        &self,
        input: &NewTodo,
    ) -> Result<ResponseEnvelope, ApiError> {
        let spec = api::build_create_todo(input).map(|spec| spec.transform(uppercase_title));
        let outcome = self.send_built(spec).await;
        self.publish(outcome)
    }

    /// GET `path` with only statuses >= 500 treated as errors. A 4xx is
    /// delivered as a response and then reported from its status code.
    pub async fn validate_status_demo(&self, path: &str) -> Result<ResponseEnvelope, ApiError> {
        let spec = RequestSpec::get(path).validate_status(|status| status < 500);
        let outcome = self.client.send(spec).await;
        match &outcome {
            Ok(response) => {
                self.primary.present(std::slice::from_ref(response));
                if let Some(notice) = Notice::for_status(response.status) {
                    self.notifier.notify(&notice);
                }
            }
            Err(error) => self.notifier.notify(&Notice::classify(error)),
        }
        outcome
    }

    /// Start a GET and cancel it straight away with `reason`.
    pub async fn cancellable_fetch(&self, reason: &str) -> Result<ResponseEnvelope, ApiError> {
        let handle = CancellationHandle::new();
        let request = self
            .client
            .send(api::build_list_todos(None).cancel_with(handle.clone()));
        handle.cancel(reason);

        let outcome = request.await;
        match &outcome {
            Ok(response) => self.primary.present(std::slice::from_ref(response)),
            Err(error) => self.notifier.notify(&Notice::classify(error)),
        }
        outcome
    }

    async fn send_built(
        &self,
        spec: Result<RequestSpec, ApiError>,
    ) -> Result<ResponseEnvelope, ApiError> {
        self.client.send(spec?).await
    }

    fn publish(
        &self,
        outcome: Result<ResponseEnvelope, ApiError>,
    ) -> Result<ResponseEnvelope, ApiError> {
        match &outcome {
            Ok(response) => self.primary.present(std::slice::from_ref(response)),
            Err(error) => self.notifier.notify(&Notice::failed(error)),
        }
        outcome
    }
}

fn uppercase_title(mut data: Value) -> Result<Value, String> {
    let title = data
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| "response has no string `title`".to_string())?
        .to_uppercase();
    data["title"] = Value::String(title);
    Ok(data)
}
