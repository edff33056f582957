use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use demo_core::controller::{CANCEL_REASON, CONCURRENT_ENDPOINTS, DEMO_HEADERS};
use demo_core::{
    DemoClient, DemoSettings, NewTodo, ReqwestTransport, RequestDemoController, Todo,
    DEFAULT_BASE_URL,
};
use tracing_subscriber::EnvFilter;

mod display;

use display::{AlertNotifier, TerminalSink};

/// Run the todo request demos against a JSON API.
#[derive(Parser, Debug)]
#[command(name = "todo-demo", version, about = "Request demos against a todo JSON API")]
struct Cli {
    /// Base URL every relative path is resolved against
    #[arg(long, env = "DEMO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Value of the x-auth-token header sent with every request
    #[arg(long, env = "DEMO_AUTH_TOKEN", default_value = "sometoken")]
    auth_token: String,

    /// Default timeout for every request, in milliseconds (0 disables it)
    #[arg(long, env = "DEMO_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    trigger: Trigger,
}

#[derive(Subcommand, Debug)]
enum Trigger {
    /// GET /todos
    Get {
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Timeout for this request only, in milliseconds
        #[arg(short, long)]
        timeout_ms: Option<u64>,
    },
    /// POST /todos
    Post {
        #[arg(long, default_value = "Learn Axios")]
        title: String,

        #[arg(long)]
        completed: bool,
    },
    /// PUT /todos/{id} with a full object
    Patch {
        #[arg(long, default_value_t = 1)]
        id: u64,

        #[arg(long, default_value = "Learn Axios")]
        title: String,

        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        completed: bool,
    },
    /// DELETE /todos/{id}
    Delete {
        #[arg(long, default_value_t = 1)]
        id: u64,
    },
    /// GET /todos and /posts concurrently
    Sim,
    /// POST /todos with one-off content-type and bearer headers
    Headers,
    /// POST /todos and upper-case the returned title
    Transform,
    /// GET a path with only 5xx treated as errors
    Error {
        #[arg(default_value = "/todoss")]
        path: String,
    },
    /// GET /todos and cancel it immediately
    Cancel,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = DemoSettings {
        base_url: cli.base_url,
        auth_token: Some(cli.auth_token),
        timeout: cli.timeout_ms.map(Duration::from_millis),
    };

    let controller = RequestDemoController::new(
        DemoClient::new(Arc::new(settings.client_config()), ReqwestTransport::new()?),
        Arc::new(TerminalSink::new("result")),
        Arc::new(TerminalSink::new("output")),
        Arc::new(AlertNotifier),
    );

    if !run(&controller, cli.trigger).await {
        process::exit(1);
    }
    Ok(())
}

/// Dispatch one trigger. Returns whether the operation succeeded; failures
/// have already been reported by the notifier.
async fn run(controller: &RequestDemoController<ReqwestTransport>, trigger: Trigger) -> bool {
    tracing::debug!(?trigger, "dispatching trigger");
    match trigger {
        Trigger::Get { limit, timeout_ms } => controller
            .list_items(Some(limit), timeout_ms.map(Duration::from_millis))
            .await
            .is_ok(),
        Trigger::Post { title, completed } => controller
            .create_item(&NewTodo::new(title, completed))
            .await
            .is_ok(),
        Trigger::Patch {
            id,
            title,
            completed,
        } => {
            let todo = Todo {
                user_id: 1,
                id,
                title,
                completed,
            };
            controller.replace_item(id, &todo).await.is_ok()
        }
        Trigger::Delete { id } => controller.delete_item(id).await.is_ok(),
        Trigger::Sim => controller
            .fetch_concurrent(&CONCURRENT_ENDPOINTS)
            .await
            .is_ok(),
        Trigger::Headers => controller
            .create_with_headers(
                &NewTodo::new("Learning Custom Headers", false),
                &DEMO_HEADERS,
            )
            .await
            .is_ok(),
        Trigger::Transform => controller
            .create_with_transform(&NewTodo::new("Learning Transform Response", false))
            .await
            .is_ok(),
        Trigger::Error { path } => controller.validate_status_demo(&path).await.is_ok(),
        Trigger::Cancel => controller.cancellable_fetch(CANCEL_REASON).await.is_ok(),
    }
}
