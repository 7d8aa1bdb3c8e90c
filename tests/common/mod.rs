//! Shared fixtures for integration tests
//!
//! Two catalogs are available:
//! - [`shipped_server`] loads the datasets under `data/`
//! - [`axe_server`] serves a two-item catalog built in memory

#![allow(dead_code)]

use axum_test::TestServer;
use palbook::prelude::*;
use std::path::PathBuf;

/// Directory holding the datasets shipped with the crate
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Build a test server over any catalog
pub fn server_for(catalog: Catalog) -> TestServer {
    let host = SiteHost::new(SiteConfig::default(), catalog).expect("Failed to build host");
    let app = HttpExposure::build_router(host, Vec::new());
    TestServer::try_new(app).expect("Failed to create test server")
}

pub async fn shipped_catalog() -> Catalog {
    Catalog::load(&DirectoryFeed::new(data_dir()))
        .await
        .expect("shipped datasets must load")
}

pub async fn shipped_server() -> TestServer {
    server_for(shipped_catalog().await)
}

/// A feed with every dataset present and empty
pub fn empty_feed() -> StaticFeed {
    StaticFeed::new()
        .with("items", "[]")
        .with("pals", "[]")
        .with("skills", "[]")
        .with("recipes", "[]")
}

/// Axe (price 100) and Great Axe (price 200), both weapons
pub fn axe_feed() -> StaticFeed {
    empty_feed().with_value(
        "items",
        &json!([
            {"id": "axe", "name": "Axe", "typeA": "weapon", "rarity": 0, "price": 100},
            {"id": "great-axe", "name": "Great Axe", "typeA": "weapon", "rarity": 2, "price": 200}
        ]),
    )
}

pub async fn axe_server() -> TestServer {
    let catalog = Catalog::load(&axe_feed())
        .await
        .expect("axe catalog must load");
    server_for(catalog)
}
