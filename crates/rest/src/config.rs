//! Server configuration for the Tabula REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TABULA_SERVER_PORT` | 5000 | Server port |
//! | `TABULA_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `TABULA_LOG_LEVEL` | info | Log level |
//! | `TABULA_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `TABULA_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `TABULA_ENABLE_CORS` | true | Enable CORS |
//! | `TABULA_CORS_ORIGINS` | * | Allowed origins |
//! | `TABULA_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `TABULA_CORS_HEADERS` | * | Allowed headers |
//! | `TABULA_DATABASE_URL` | tabula.db | SQLite database path (`:memory:` for in-memory) |
//! | `TABULA_DB_MAX_CONNECTIONS` | 10 | Connection pool size |
//! | `TABULA_DEFAULT_PAGE_SIZE` | 10 | Page size when `per_page` is absent or invalid |
//! | `TABULA_MAX_PAGE_SIZE` | 1000 | Upper bound for `per_page` |
//!
//! # Example
//!
//! ```rust
//! use tabula_rest::ServerConfig;
//!
//! // Create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use clap::Parser;

/// Server configuration for the Tabula REST API.
///
/// This struct can be constructed from command line arguments and `TABULA_*`
/// environment variables using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "tabula")]
#[command(about = "Tabula - paginated REST API over accounts, catalog items and orders")]
#[command(version)]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "TABULA_SERVER_PORT", default_value = "5000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "TABULA_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "TABULA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "TABULA_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "TABULA_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "TABULA_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "TABULA_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "TABULA_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "TABULA_CORS_HEADERS", default_value = "*")]
    pub cors_headers: String,

    /// SQLite database path, or `:memory:` for an in-memory database.
    #[arg(long, env = "TABULA_DATABASE_URL", default_value = "tabula.db")]
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "TABULA_DB_MAX_CONNECTIONS", default_value = "10")]
    pub db_max_connections: u32,

    /// Default page size for list endpoints.
    #[arg(long, env = "TABULA_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: usize,

    /// Maximum page size for list endpoints.
    #[arg(long, env = "TABULA_MAX_PAGE_SIZE", default_value = "1000")]
    pub max_page_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: "*".to_string(),
            database_url: "tabula.db".to_string(),
            db_max_connections: 10,
            default_page_size: 10,
            max_page_size: 1000,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true when the database lives in memory.
    pub fn is_memory_database(&self) -> bool {
        self.database_url == ":memory:"
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if self.db_max_connections == 0 {
            errors.push("Database max connections cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, an in-memory database and disables CORS.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            database_url: ":memory:".to_string(),
            db_max_connections: 1,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}
