//! Pink Morsel sales dashboard server.
//!
//! Serves the dashboard page and pushes fresh views over a WebSocket when
//! the region filter changes.
//!
//! # Architecture
//!
//! The server consists of:
//! - **Dashboard**: Maps a region filter to the chart, cards and insight
//! - **Page / Chart**: HTML and SVG rendering of a view model
//! - **Protocol**: Defines client/server message types
//! - **Routes**: HTTP and WebSocket handlers

pub mod chart;
pub mod dashboard;
pub mod error;
pub mod page;
pub mod protocol;
pub mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use chrono::NaiveDate;
use morsel_core::{PRICE_INCREASE_DATE, SalesStore};

pub use dashboard::{Dashboard, DashboardUpdate};
pub use error::{ServerError, ServerResult};
pub use protocol::{ClientMessage, ServerMessage};
pub use routes::{AppState, create_router};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// CSV file with the sales records.
    pub data_path: PathBuf,
    /// Date separating the before and after periods.
    pub cutoff: NaiveDate,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            data_path: PathBuf::from("output.csv"),
            cutoff: PRICE_INCREASE_DATE,
        }
    }
}

impl ServerConfig {
    /// Socket address built from host and port.
    pub fn addr(&self) -> ServerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

/// Build the application router over an already loaded store.
pub fn app(store: SalesStore, cutoff: NaiveDate) -> Router {
    let dashboard = Dashboard::new(Arc::new(store), cutoff);
    create_router(Arc::new(AppState { dashboard }))
}

/// Load the sales data and serve the dashboard until Ctrl+C.
pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    // Load before binding: no data means nothing to serve
    let store = SalesStore::load(&config.data_path)?;
    if store.is_empty() {
        tracing::warn!("{} contains no sales records", config.data_path.display());
    }

    let app = app(store, config.cutoff);
    let addr = config.addr()?;

    tracing::info!("Starting dashboard server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Io {
            path: PathBuf::new(),
            message: format!("failed to bind {addr}: {e}"),
        })?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
