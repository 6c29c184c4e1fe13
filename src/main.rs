//! Todo service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use todo_service::api::{create_router, AppState};
use todo_service::config::Config;
use todo_service::metrics::{self, Metrics};
use todo_service::storage::SqliteStore;

/// Small todo CRUD service over SQLite with Prometheus metrics.
#[derive(Parser, Debug)]
#[command(name = "todo-service")]
#[command(about = "HTTP CRUD service for todos, backed by SQLite")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// HTTP port for the todo API.
    #[arg(short, long)]
    port: Option<u16>,

    /// HTTP port for the Prometheus exposition endpoint.
    #[arg(long)]
    metrics_port: Option<u16>,

    /// SQLite database path.
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;

    // Initialize logging, falling back to the configured level when RUST_LOG
    // carries no directives
    let filter = if args.verbose {
        EnvFilter::new("todo_service=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Override with CLI args if provided
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(metrics_port) = args.metrics_port {
        config.metrics_port = metrics_port;
    }
    if let Some(database) = args.database {
        config.database_path = database;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    // Initialize metrics
    let prometheus = PrometheusBuilder::new().install_recorder()?;
    metrics::init_metrics();
    let sink = Metrics::new();

    // Open storage
    let store = SqliteStore::connect(&config.database_path).await?;
    info!("Store initialized at {}", config.database_path);

    let state = AppState::new(Arc::new(store), config.idle_timeout(), sink);

    // Start metrics exposition on its own port
    let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let metrics_listener = TcpListener::bind(metrics_addr).await?;
    info!("Metrics listening on {}", metrics_addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(metrics_listener, metrics_router(prometheus)).await {
            error!("Metrics server error: {}", e);
        }
    });

    // Start the service
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    let router = create_router(state);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Pull-based text exposition of the registered instruments.
fn metrics_router(handle: PrometheusHandle) -> axum::Router {
    axum::Router::new().route(
        "/metrics",
        axum::routing::get(move || std::future::ready(handle.render())),
    )
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
