//! SiteBuilder for fluent construction of the site server

use super::exposure::HttpExposure;
use super::host::SiteHost;
use crate::catalog::{Catalog, DatasetFeed, DirectoryFeed};
use crate::config::SiteConfig;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the site server
///
/// Datasets are loaded and validated in [`build_host`](Self::build_host).
/// A validation failure aborts the build and lists every violation.
///
/// # Example
///
/// ```ignore
/// let config = SiteConfig::from_yaml_file("site.yaml")?.merge_env()?;
/// SiteBuilder::new()
///     .with_config(config)
///     .serve()
///     .await?;
/// ```
pub struct SiteBuilder {
    config: SiteConfig,
    feed: Option<Arc<dyn DatasetFeed>>,
    custom_routes: Vec<Router>,
}

impl SiteBuilder {
    /// Create a new SiteBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: SiteConfig::default(),
            feed: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Read datasets from `feed` instead of the configured data directory
    pub fn with_feed(mut self, feed: impl DatasetFeed + 'static) -> Self {
        self.feed = Some(Arc::new(feed));
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{Router, routing::get};
    ///
    /// let extra = Router::new().route("/about", get(|| async { "about" }));
    ///
    /// SiteBuilder::new()
    ///     .with_custom_routes(extra)
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Load the catalog and build the shared host
    pub async fn build_host(&mut self) -> Result<SiteHost> {
        let feed: Arc<dyn DatasetFeed> = match self.feed.take() {
            Some(feed) => feed,
            None => Arc::new(DirectoryFeed::new(self.config.data.dir.clone())),
        };

        let catalog = Catalog::load(feed.as_ref())
            .await
            .context("failed to load datasets")?;
        let host = SiteHost::new(self.config.clone(), catalog)?;
        Ok(host)
    }

    /// Build the final router
    pub async fn build(mut self) -> Result<Router> {
        let host = self.build_host().await?;
        let custom_routes = std::mem::take(&mut self.custom_routes);
        Ok(HttpExposure::build_router(host, custom_routes))
    }

    /// Serve the site with graceful shutdown
    ///
    /// This will:
    /// - Load and validate every dataset
    /// - Bind to the configured address
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr()?;
        let app = self.build().await?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
