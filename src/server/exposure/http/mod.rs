//! HTTP exposure of the site
//!
//! Consumes a [`SiteHost`] and produces an Axum `Router` serving the HTML
//! pages, the JSON API and the health checks.

pub mod api;
pub mod pages;

use crate::server::host::SiteHost;
use crate::server::router::{build_api_routes, build_page_routes};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// HTTP exposure implementation
pub struct HttpExposure;

impl HttpExposure {
    /// Build the router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The shared site state
    /// * `custom_routes` - Additional routes to merge (must not set a fallback)
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check routes
    /// - JSON API routes
    /// - Custom routes
    /// - HTML page routes (including the not-found fallback)
    pub fn build_router(host: SiteHost, custom_routes: Vec<Router>) -> Router {
        let mut app = Self::health_routes().merge(build_api_routes(host.clone()));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.merge(build_page_routes(host))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "palbook"
        }))
    }
}
