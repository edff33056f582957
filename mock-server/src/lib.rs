use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const SEEDED_TODOS: u64 = 20;
pub const SEEDED_POSTS: u64 = 10;
pub const SEEDED_COMMENTS: u64 = 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: u64,
    pub id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Body of POST and PUT: the full writable shape of a todo.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub user_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub user_id: Option<u64>,
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(rename = "_limit")]
    pub limit: Option<usize>,
}

pub struct Store {
    todos: BTreeMap<u64, Todo>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Store {
    /// A deterministic data set shaped like the public test API.
    pub fn seeded() -> Self {
        let todos = (1..=SEEDED_TODOS)
            .map(|id| {
                let todo = Todo {
                    user_id: (id - 1) / 10 + 1,
                    id,
                    title: format!("todo {id}"),
                    completed: id % 3 == 0,
                };
                (id, todo)
            })
            .collect();
        let posts = (1..=SEEDED_POSTS)
            .map(|id| Post {
                user_id: 1,
                id,
                title: format!("post {id}"),
                body: format!("body of post {id}"),
            })
            .collect();
        let comments = (1..=SEEDED_COMMENTS)
            .map(|id| Comment {
                post_id: (id - 1) / 2 + 1,
                id,
                name: format!("comment {id}"),
                email: format!("user{id}@example.com"),
                body: format!("body of comment {id}"),
            })
            .collect();
        Self {
            todos,
            posts,
            comments,
        }
    }

    fn next_todo_id(&self) -> u64 {
        self.todos.keys().next_back().map_or(1, |id| id + 1)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo)
                .put(replace_todo)
                .patch(patch_todo)
                .delete(delete_todo),
        )
        .route("/posts", get(list_posts))
        .route("/comments", get(list_comments))
        .route("/status/{code}", get(status))
        .fallback(not_found)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn limited<T>(items: impl Iterator<Item = T>, limit: Option<usize>) -> Vec<T> {
    items.take(limit.unwrap_or(usize::MAX)).collect()
}

async fn list_todos(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(limited(store.todos.values().cloned(), params.limit))
}

async fn list_posts(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Post>> {
    let store = db.read().await;
    Json(limited(store.posts.iter().cloned(), params.limit))
}

async fn list_comments(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Comment>> {
    let store = db.read().await;
    Json(limited(store.comments.iter().cloned(), params.limit))
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    let todo = Todo {
        user_id: input.user_id.unwrap_or(1),
        id: store.next_todo_id(),
        title: input.title,
        completed: input.completed,
    };
    store.todos.insert(todo.id, todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or_else(missing)
}

async fn replace_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or_else(missing)?;
    *todo = Todo {
        user_id: input.user_id.unwrap_or(todo.user_id),
        id,
        title: input.title,
        completed: input.completed,
    };
    Ok(Json(todo.clone()))
}

async fn patch_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<TodoPatch>,
) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or_else(missing)?;
    if let Some(user_id) = input.user_id {
        todo.user_id = user_id;
    }
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| Json(json!({})))
        .ok_or_else(missing)
}

/// Answer with whatever status the path names.
async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, Json(json!({}))),
        Err(_) => (StatusCode::BAD_REQUEST, Json(json!({}))),
    }
}

async fn not_found() -> (StatusCode, Json<Value>) {
    missing()
}

fn missing() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({})))
}
