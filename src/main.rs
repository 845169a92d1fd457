//! Bookstore Service
//!
//! Main entry point for the bookstore gRPC server. Serves the
//! `endpoints.examples.bookstore.Bookstore` service from an in-memory store.
//!
//! # Flow
//! 1. Loads configuration (`config/application.yml` plus `APP_` environment overrides)
//! 2. Initializes logging
//! 3. Seeds the in-memory store
//! 4. Serves gRPC until Ctrl-C

use std::net::SocketAddr;

use anyhow::Context;
use tonic::transport::Server;
use tracing::info;

use bookstore_grpc::config::Config;
use bookstore_grpc::db::memory::MemoryStore;
use bookstore_grpc::grpc::BookstoreService;
use bookstore_grpc::logging;

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Builds the store and serves the bookstore service.
///
/// # Arguments
/// * `config` - Application configuration
async fn setup_services(config: Config) -> anyhow::Result<()> {
    let bookstore = config.bookstore();

    info!("Initializing in-memory store with {} seed shelves", bookstore.seed.len());
    let store = MemoryStore::with_seed(&bookstore.seed);

    let addr: SocketAddr = bookstore
        .grpc
        .server
        .address()
        .parse()
        .with_context(|| format!("Invalid server address {}", bookstore.grpc.server.address()))?;
    info!("Starting server on {}", addr);

    Server::builder()
        .add_service(BookstoreService::new(store).into_server())
        .serve_with_shutdown(addr, shutdown_signal())
        .await
        .context("gRPC server failed")?;

    info!("Server stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::new().context("Failed to load configuration")?;

    logging::init(&config.logging, std::io::stdout)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")?;
    info!("{} starting up...", config.application.name);

    setup_services(config).await
}
