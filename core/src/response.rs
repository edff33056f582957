use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::request::RequestSpec;

/// A settled response: status, headers, decoded (and transformed) body, and
/// the effective request that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub data: Value,
    pub config: RequestSpec,
}
