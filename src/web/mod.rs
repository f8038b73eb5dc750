//! Web layer module
//!
//! HTTP interface of the preview proxy. Handlers stay thin and delegate the
//! preview pipeline to [`crate::services::EmbedService`].
//!
//! # Architecture
//!
//! - **Handlers**: one module per route family
//! - **Responses**: mapping of [`crate::errors::AppError`] to status codes
//! - **Extractors**: client signature and override flag
//! - **Middleware**: request logging

use anyhow::Result;
use axum::{
    Router,
    routing::{any, get},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

use crate::{config::Config, services::EmbedService};

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod responses;

pub use extractors::ClientContext;

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    /// Build the shared services and router for `config`
    pub fn new(config: Config) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let embed_service = EmbedService::from_config(&config)?;

        let app = create_router(AppState {
            config: Arc::new(config),
            embed_service: Arc::new(embed_service),
        });

        Ok(Self { app, addr })
    }

    /// Serve until SIGINT or SIGTERM, then drain in-flight requests
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.addr, e))?;

        info!("Listening on http://{}", self.addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Web server stopped");
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::embed::project_redirect))
        .route("/health", get(handlers::health::health_check))
        .route("/ohembed", get(handlers::oembed::discovery_document))
        .route("/robots.txt", any(handlers::static_assets::serve_robots))
        .route("/favicon.ico", get(handlers::static_assets::serve_favicon))
        .route("/{*content_path}", get(handlers::embed::render_preview))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_logging_middleware,
        ))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub embed_service: Arc<EmbedService>,
}
