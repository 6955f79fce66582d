//! # tabula-rest - Tabula REST API
//!
//! This crate exposes a paginated, filterable REST interface over three
//! related records: accounts, catalog items and purchase orders. Every
//! response, success or failure, uses one JSON envelope.
//!
//! ## Backend Support
//!
//! Storage backends are configured through feature flags:
//!
//! - `sqlite` - SQLite backend (default)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tabula_rest::{create_app, ServerConfig};
//! use tabula_persistence::backends::sqlite::SqliteBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Create a storage backend
//!     let backend = SqliteBackend::open("tabula.db")?;
//!     backend.init_schema()?;
//!
//!     // Create the Axum application
//!     let app = create_app(backend);
//!
//!     // Start the server
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | service index | GET | `/` |
//! | health | GET | `/health` |
//! | list collections | GET | `/api/collections` |
//! | list accounts | GET | `/api/accounts?page=&per_page=` |
//! | read account | GET | `/api/accounts/{id}` |
//! | create account | POST | `/api/accounts` |
//! | list catalog items | GET | `/api/items?page=&per_page=&category=` |
//! | read catalog item | GET | `/api/items/{id}` |
//! | create catalog item | POST | `/api/items` |
//! | list orders | GET | `/api/orders?page=&per_page=&status=` |
//! | read order | GET | `/api/orders/{id}` |
//! | create order | POST | `/api/orders` |
//!
//! ## Response Envelope
//!
//! ```json
//! {"success": true, "data": [...], "pagination": {"page": 1, "per_page": 10, "total": 42, "pages": 5}}
//! {"success": false, "error": "Account 9999 not found"}
//! ```
//!
//! ## Error Handling
//!
//! | HTTP Status | Cause |
//! |-------------|-------|
//! | 400 | Missing or malformed field, invalid JSON, dangling order reference |
//! | 404 | Record not found, or no route matched (`Resource not found`) |
//! | 405 | Method not supported on a known path |
//! | 500 | Storage failure (with its message), or a handler panic (`Internal server error`) |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and status mapping
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration)
//! - [`validation`] - Payload validation and coercion
//! - [`extractors`] - Axum extractors for list parameters, bodies and ids
//! - [`handlers`] - HTTP request handlers
//! - [`responses`] - The response envelope
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;
pub mod validation;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use tabula_persistence::core::RecordStorage;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(storage: S) -> Router
where
    S: RecordStorage + Send + Sync + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_rest::{create_app_with_config, ServerConfig};
/// use tabula_persistence::backends::sqlite::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory()?;
/// let config = ServerConfig {
///     port: 3000,
///     enable_cors: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(backend, config);
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> Router
where
    S: RecordStorage + Send + Sync + 'static,
{
    create_app_with_shared_storage(Arc::new(storage), config)
}

/// Creates the Axum application around an already shared storage handle.
///
/// The caller keeps its own `Arc`, which lets tests and the binary reach the
/// same storage the handlers use.
pub fn create_app_with_shared_storage<S>(storage: Arc<S>, config: ServerConfig) -> Router
where
    S: RecordStorage + Send + Sync + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        storage.backend_name()
    );

    // Create application state
    let state = AppState::new(storage, config.clone());

    // Build the router with all API routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ))
        .layer(CatchPanicLayer::custom(handlers::fallback::panic_response));

    let router = router.layer(DefaultBodyLimit::max(config.max_body_size));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tabula_rest={level},tabula_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
