//! Server host holding the shared, read-only site state
//!
//! The host is built once at startup (after every dataset validated) and
//! cloned into each request as axum state. Everything inside is behind an
//! `Arc` and never mutated, so handlers need no locking.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::core::error::RenderError;
use crate::server::render::Renderer;
use std::sync::Arc;

/// Host context containing all site state
///
/// # Example
///
/// ```rust,ignore
/// let catalog = Catalog::load(&DirectoryFeed::new("data")).await?;
/// let host = SiteHost::new(SiteConfig::default(), catalog)?;
/// let app = HttpExposure::build_router(host, vec![]);
/// ```
#[derive(Debug, Clone)]
pub struct SiteHost {
    pub config: Arc<SiteConfig>,
    pub catalog: Arc<Catalog>,
    pub renderer: Arc<Renderer>,
}

impl SiteHost {
    pub fn new(config: SiteConfig, catalog: Catalog) -> Result<Self, RenderError> {
        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            renderer: Arc::new(Renderer::new()?),
        })
    }

    /// Debounce window handed to the search box script
    pub fn debounce_ms(&self) -> u64 {
        self.config.search.debounce_ms
    }
}
