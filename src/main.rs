use clap::Parser;
use distributed_blobstore::config::{Cli, Command, ControllerConfig, NodeConfig};
use distributed_blobstore::controller::client::HttpNodeClient;
use distributed_blobstore::controller::handlers as controller_handlers;
use distributed_blobstore::controller::service::Controller;
use distributed_blobstore::metadata::store::open_store;
use distributed_blobstore::node::blobs::BlobStore;
use distributed_blobstore::node::handlers as node_handlers;
use distributed_blobstore::node::heartbeat::Heartbeat;
use distributed_blobstore::placement::policy::RandomPlacement;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Controller(config) => run_controller(config).await,
        Command::Node(config) => run_node(config).await,
    }
}

async fn run_controller(config: ControllerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting controller on {}", config.listen);

    // 1. Metadata store:
    let store = open_store(&config.store)?;

    // 2. Controller with random placement and HTTP forwarding:
    let controller = Arc::new(Controller::new(
        store.clone(),
        Arc::new(RandomPlacement),
        Arc::new(HttpNodeClient::new()),
    ));

    let known = controller.nodes()?;
    if !known.is_empty() {
        tracing::info!("Loaded {} known storage node(s)", known.len());
    }

    // 3. HTTP server:
    let app = controller_handlers::routes(controller);
    let result = serve(config.listen, app).await;

    // 4. Persist the last registrations and directory writes:
    if let Err(e) = store.flush() {
        tracing::error!("Failed to flush metadata store: {}", e);
    }
    result
}

async fn run_node(config: NodeConfig) -> anyhow::Result<()> {
    tracing::info!(
        "Starting storage node on {} (announced as {})",
        config.listen,
        config.address
    );
    tracing::info!("Controller: {}", config.controller_url);

    // 1. Local blob storage:
    let blobs = Arc::new(BlobStore::open(&config.storage_dir).await?);

    // 2. Heartbeat (first beat fires immediately):
    let heartbeat = Heartbeat::new(
        &config.address,
        &config.controller_url,
        config.heartbeat_interval(),
    );
    let heartbeat_handle = heartbeat.start();

    // 3. HTTP server:
    let app = node_handlers::routes(blobs);
    let result = serve(config.listen, app).await;

    heartbeat_handle.abort();
    result
}

async fn serve(addr: SocketAddr, app: axum::Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
