//! Server module for building the site's HTTP server
//!
//! This module provides a `SiteBuilder` that loads the catalog once and
//! registers:
//! - HTML grid and detail pages
//! - JSON API routes
//! - Health check routes

pub mod builder;
pub mod exposure;
pub mod host;
pub mod render;
pub mod router;

pub use builder::SiteBuilder;
pub use exposure::HttpExposure;
pub use host::SiteHost;
pub use render::Renderer;
