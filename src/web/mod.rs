//! Web layer: router assembly and the HTTP server lifecycle.
//!
//! Handlers are thin: they parse path/query input, call into the
//! repositories, and wrap results in the client envelopes. All routes are
//! GET; the catalog surface is read-only.

use anyhow::Result;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::database::Database;
use crate::repositories::{CatalogRepository, CategoryRepository, SearchRepository};

pub mod handlers;
pub mod responses;

pub use responses::{DetailEnvelope, ResultsEnvelope, StatusEnvelope};

/// Application state shared across all handlers; read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub catalog: CatalogRepository,
    pub categories: CategoryRepository,
    pub search: SearchRepository,
}

impl AppState {
    pub fn new(database: Database) -> Self {
        let pool = database.pool();
        Self {
            database,
            catalog: CatalogRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            search: SearchRepository::new(pool),
        }
    }
}

/// Web server configuration and setup.
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, database: Database) -> Result<Self> {
        let app = Self::router(AppState::new(database));
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        Ok(Self { app, addr })
    }

    /// The full route table. Public so integration tests can drive it
    /// without binding a socket.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health::health_check))
            // Home overview lists (top 10, unpaginated)
            .route("/home/movies/:category", get(handlers::home::movies_overview))
            .route("/home/series/:category", get(handlers::home::series_overview))
            // Paginated category lists; the page segment is optional
            .route("/movies/:category", get(handlers::movies::list))
            .route("/movies/:category/:page", get(handlers::movies::list_page))
            .route("/movies/details/:imdb_id", get(handlers::movies::details))
            .route("/series/:category", get(handlers::series::list))
            .route("/series/:category/:page", get(handlers::series::list_page))
            .route("/series/details/:imdb_id", get(handlers::series::details))
            // Search
            .route("/search", get(handlers::search::search))
            .route("/search/categories", get(handlers::search::categories))
            // Middleware (applied in reverse order)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Start the web server, shutting down gracefully on ctrl-c.
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
