//! Tabula server
//!
//! Serves the Tabula REST API over a SQLite database.

use std::sync::Arc;

use clap::Parser;
use tabula_rest::{ServerConfig, create_app_with_shared_storage, init_logging};
use tracing::{error, info};

#[cfg(feature = "sqlite")]
use tabula_persistence::backends::sqlite::{SqliteBackend, SqliteBackendConfig};

#[cfg(not(feature = "sqlite"))]
compile_error!(
    "tabula-server needs a storage backend. Build with: cargo build -p tabula-server --features sqlite"
);

/// Creates and initializes a SQLite backend from the server configuration.
#[cfg(feature = "sqlite")]
fn create_sqlite_backend(config: &ServerConfig) -> anyhow::Result<SqliteBackend> {
    let db_path = config.database_url.as_str();
    info!(database = %db_path, "Initializing SQLite backend");

    let backend_config = SqliteBackendConfig {
        max_connections: config.db_max_connections,
        ..Default::default()
    };

    let backend = SqliteBackend::with_config(db_path, backend_config)?;
    backend.init_schema()?;

    Ok(backend)
}

/// Resolves once the process is asked to stop.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install CTRL+C signal handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        database = %config.database_url,
        "Starting Tabula server"
    );

    let backend = Arc::new(create_sqlite_backend(&config)?);
    let app = create_app_with_shared_storage(Arc::clone(&backend), config.clone());
    serve(app, &config).await?;

    // Release the pool only after in-flight requests have drained.
    drop(backend);
    info!("Server stopped");

    Ok(())
}
