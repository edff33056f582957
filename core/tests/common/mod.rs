//! In-memory transport and recording sinks shared by the controller tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use demo_core::{
    ApiError, ClientConfig, DemoClient, HttpRequest, HttpResponse, Notice, Notifier,
    RequestDemoController, ResponseEnvelope, Sink, Transport,
};
use serde_json::Value;

pub const BASE_URL: &str = "http://api.test";

#[derive(Clone)]
pub enum Reply {
    Json { status: u16, body: String },
    /// Answer with the request body plus `"id": 201`, like the public API
    /// does for creates.
    Echo { status: u16 },
    Fail(String),
}

#[derive(Clone)]
struct Route {
    reply: Reply,
    delay: Duration,
}

/// Answers from a route table keyed by full URL. Unknown URLs get 404 `{}`.
#[derive(Default)]
pub struct StubTransport {
    routes: HashMap<String, Route>,
    pub seen: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, path: &str, reply: Reply) -> Self {
        self.route_after(path, reply, Duration::ZERO)
    }

    pub fn route_after(mut self, path: &str, reply: Reply, delay: Duration) -> Self {
        self.routes
            .insert(format!("{BASE_URL}{path}"), Route { reply, delay });
        self
    }

    pub fn json(self, path: &str, status: u16, body: &str) -> Self {
        self.route(
            path,
            Reply::Json {
                status,
                body: body.to_string(),
            },
        )
    }
}

impl Transport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.lock().unwrap().push(request.clone());
        let route = self.routes.get(&request.url).cloned().unwrap_or(Route {
            reply: Reply::Json {
                status: 404,
                body: "{}".into(),
            },
            delay: Duration::ZERO,
        });
        tokio::time::sleep(route.delay).await;

        let (status, body) = match route.reply {
            Reply::Json { status, body } => (status, body),
            Reply::Echo { status } => {
                let mut body: Value = request
                    .body
                    .as_deref()
                    .map(|b| serde_json::from_str(b).unwrap())
                    .unwrap_or_else(|| serde_json::json!({}));
                body["id"] = 201.into();
                (status, body.to_string())
            }
            Reply::Fail(message) => return Err(ApiError::network(message)),
        };
        Ok(HttpResponse {
            status,
            headers: vec![(
                "content-type".into(),
                "application/json; charset=utf-8".into(),
            )],
            body,
        })
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub calls: Mutex<Vec<Vec<ResponseEnvelope>>>,
}

impl RecordingSink {
    pub fn calls(&self) -> Vec<Vec<ResponseEnvelope>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Sink for RecordingSink {
    fn present(&self, responses: &[ResponseEnvelope]) {
        self.calls.lock().unwrap().push(responses.to_vec());
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

pub struct Harness {
    pub controller: RequestDemoController<StubTransport>,
    pub primary: Arc<RecordingSink>,
    pub secondary: Arc<RecordingSink>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(transport: StubTransport) -> Harness {
    harness_with(
        ClientConfig::builder()
            .base_url(BASE_URL)
            .default_header("X-Auth-Token", "sometoken")
            .build(),
        transport,
    )
}

pub fn harness_with(config: ClientConfig, transport: StubTransport) -> Harness {
    let primary = Arc::new(RecordingSink::default());
    let secondary = Arc::new(RecordingSink::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = RequestDemoController::new(
        DemoClient::new(Arc::new(config), transport),
        primary.clone(),
        secondary.clone(),
        notifier.clone(),
    );
    Harness {
        controller,
        primary,
        secondary,
        notifier,
    }
}
