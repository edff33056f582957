//! Domain DTOs for the todo collection.
//!
//! # Design
//! These types mirror the public test API's schema (`userId`, numeric `id`)
//! but are defined independently of the mock-server crate. Integration tests
//! catch any schema drift between the two.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }
}

/// Request payload for a partial update. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}
