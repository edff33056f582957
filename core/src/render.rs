//! Display sinks.
//!
//! A `Sink` is a terminal consumer of settled responses: it receives every
//! envelope an operation produced in one call and updates its display
//! target. `format_envelope` is the shared text layout (status, headers,
//! data, request config) sinks use to render an envelope.

use serde::Serialize;

use crate::notice::Notice;
use crate::response::ResponseEnvelope;

pub trait Sink: Send + Sync {
    fn present(&self, responses: &[ResponseEnvelope]);
}

/// Receives failure notices and caller-side status reports.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

pub fn format_envelope(response: &ResponseEnvelope) -> String {
    let mut out = format!("Status {}\n", response.status);
    section(&mut out, "Headers", &response.headers);
    section(&mut out, "Data", &response.data);
    section(&mut out, "Config", &response.config);
    out
}

/// Render several envelopes in order, separated by a blank line.
pub fn format_all(responses: &[ResponseEnvelope]) -> String {
    responses
        .iter()
        .map(format_envelope)
        .collect::<Vec<_>>()
        .join("\n")
}

fn section<T: Serialize + ?Sized>(out: &mut String, title: &str, value: &T) {
    let body = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("<unrenderable: {e}>"));
    out.push_str(&format!("\n{title}\n{body}\n"));
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::request::RequestSpec;

    fn envelope(status: u16) -> ResponseEnvelope {
        ResponseEnvelope {
            status,
            headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
            data: json!({"id": 1, "title": "delectus aut autem"}),
            config: RequestSpec::get("https://jsonplaceholder.typicode.com/todos/1"),
        }
    }

    #[test]
    fn envelope_renders_every_section() {
        let text = format_envelope(&envelope(200));
        assert!(text.starts_with("Status 200\n"));
        let headers = text.find("\nHeaders\n").unwrap();
        let data = text.find("\nData\n").unwrap();
        let config = text.find("\nConfig\n").unwrap();
        assert!(headers < data && data < config);
        assert!(text.contains("\"title\": \"delectus aut autem\""));
        assert!(text.contains("\"url\": \"https://jsonplaceholder.typicode.com/todos/1\""));
    }

    #[test]
    fn format_all_keeps_order() {
        let text = format_all(&[envelope(200), envelope(201)]);
        assert!(text.find("Status 200").unwrap() < text.find("Status 201").unwrap());
    }
}
