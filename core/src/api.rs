//! Request builders for the collection API.
//!
//! # Design
//! Each builder is a pure function producing a `RequestSpec` with a relative
//! path; the client resolves it against the configured base URL. Builders
//! that encode a body return `Result` so serialization failures surface as
//! `ApiError::Serialization` instead of a panic.

use crate::error::ApiError;
use crate::request::RequestSpec;
use crate::types::{NewTodo, Todo, TodoPatch};

/// GET a collection (`/todos`, `/posts`, `/comments`), optionally capped with
/// `_limit`.
pub fn build_list(collection: &str, limit: Option<usize>) -> RequestSpec {
    let path = format!("/{}", collection.trim_matches('/'));
    match limit {
        Some(limit) => RequestSpec::get(format!("{path}?_limit={limit}")),
        None => RequestSpec::get(path),
    }
}

pub fn build_list_todos(limit: Option<usize>) -> RequestSpec {
    build_list("todos", limit)
}

pub fn build_get_todo(id: u64) -> RequestSpec {
    RequestSpec::get(format!("/todos/{id}"))
}

pub fn build_create_todo(input: &NewTodo) -> Result<RequestSpec, ApiError> {
    RequestSpec::post("/todos").json(input)
}

/// PUT the full object, replacing every field of todo `id`.
pub fn build_replace_todo(id: u64, todo: &Todo) -> Result<RequestSpec, ApiError> {
    RequestSpec::put(format!("/todos/{id}")).json(todo)
}

pub fn build_patch_todo(id: u64, input: &TodoPatch) -> Result<RequestSpec, ApiError> {
    RequestSpec::patch(format!("/todos/{id}")).json(input)
}

pub fn build_delete_todo(id: u64) -> RequestSpec {
    RequestSpec::delete(format!("/todos/{id}"))
}
