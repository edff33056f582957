use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt::init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        todos = mock_server::SEEDED_TODOS,
        posts = mock_server::SEEDED_POSTS,
        comments = mock_server::SEEDED_COMMENTS,
        "mock API listening on http://{addr}"
    );
    mock_server::run(listener).await
}
