use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Comment, Post, Todo, SEEDED_TODOS};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_returns_seeded_items() {
    let resp = app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len() as u64, SEEDED_TODOS);
    assert_eq!(todos[0].id, 1);
}

#[tokio::test]
async fn list_todos_honours_limit() {
    let resp = app()
        .oneshot(empty_request("GET", "/todos?_limit=5"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    let ids: Vec<u64> = todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn list_posts_and_comments() {
    let resp = app()
        .oneshot(empty_request("GET", "/posts?_limit=3"))
        .await
        .unwrap();
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts.len(), 3);

    let resp = app()
        .oneshot(empty_request("GET", "/comments?_limit=2"))
        .await
        .unwrap();
    let comments: Vec<Comment> = body_json(resp).await;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].post_id, 1);
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201_with_next_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/todos",
            r#"{"title":"Learn Axios","completed":false}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.id, SEEDED_TODOS + 1);
    assert_eq!(todo.title, "Learn Axios");
    assert!(!todo.completed);
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/todos/999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({}));
}

#[tokio::test]
async fn get_todo_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/todos/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- replace / patch ---

#[tokio::test]
async fn replace_todo_is_idempotent() {
    use tower::Service;

    let mut app = app().into_service();
    let body = r#"{"userId":1,"id":1,"title":"Learn Axios","completed":true}"#;

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("PUT", "/todos/1", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        bodies.push(body_bytes(resp).await);
    }
    assert_eq!(bodies[0], bodies[1]);

    let todo: Todo = serde_json::from_slice(&bodies[0]).unwrap();
    assert_eq!(todo.title, "Learn Axios");
    assert!(todo.completed);
}

#[tokio::test]
async fn replace_todo_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/todos/999", r#"{"title":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_todo_changes_only_given_fields() {
    let resp = app()
        .oneshot(json_request("PATCH", "/todos/2", r#"{"completed":true}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.title, "todo 2");
    assert!(todo.completed);
}

// --- delete ---

#[tokio::test]
async fn delete_then_get_is_404() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/todos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({}));

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/todos/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- status / fallback ---

#[tokio::test]
async fn status_route_echoes_code() {
    for code in [404u16, 500, 503] {
        let resp = app()
            .oneshot(empty_request("GET", &format!("/status/{code}")))
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), code);
    }
}

#[tokio::test]
async fn unknown_path_is_404() {
    let resp = app()
        .oneshot(empty_request("GET", "/todoss"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
