//! Route tables for pages and the JSON API

use crate::server::exposure::http::{api, pages};
use crate::server::host::SiteHost;
use axum::{Router, routing::get};

/// Build the HTML page routes
///
/// - GET / - Index
/// - GET /items, /pals - Grids driven by the query string
/// - GET /items/{id}, /pals/{id} - Detail pages (404 page for unknown ids)
/// - GET /skills - Skill list with search
///
/// Unmatched paths fall back to the not-found page.
pub fn build_page_routes(host: SiteHost) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/items", get(pages::item_grid))
        .route("/items/{id}", get(pages::item_detail))
        .route("/pals", get(pages::pal_grid))
        .route("/pals/{id}", get(pages::pal_detail))
        .route("/skills", get(pages::skill_list))
        .fallback(pages::unknown_page)
        .with_state(host)
}

/// Build the JSON API routes
///
/// - GET /api/items, /api/pals, /api/skills - Filtered views
/// - GET /api/{catalog}/{id} - A single record
pub fn build_api_routes(host: SiteHost) -> Router {
    Router::new()
        .route("/api/items", get(api::list_items))
        .route("/api/pals", get(api::list_pals))
        .route("/api/skills", get(api::list_skills))
        .route("/api/{catalog}/{id}", get(api::get_record))
        .with_state(host)
}
