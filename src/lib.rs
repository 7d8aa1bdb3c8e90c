//! # Palbook
//!
//! A browsable reference site for game data: items, pals, skills and
//! recipes, rendered from static JSON datasets.
//!
//! ## Features
//!
//! - **Schema-Validated Datasets**: every dataset is checked once at startup;
//!   one bad field anywhere aborts the load and every violation is reported
//! - **URL-Driven Grids**: search, sort, category and rarity filters live in
//!   the query string, with defaults omitted so shared URLs stay short
//! - **Pure Pipeline**: `view(records, state)` sorts, then filters, and can be
//!   tested without rendering anything
//! - **Debounced Search**: a trailing-edge coalescer driven by an explicit clock
//! - **Configuration-Based**: YAML site config with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use palbook::prelude::*;
//!
//! let config = SiteConfig::from_yaml_file("site.yaml")?.merge_env()?;
//! SiteBuilder::new().with_config(config).serve().await?;
//! ```
//!
//! Or drive a grid directly:
//!
//! ```rust,ignore
//! let catalog = Catalog::load(&DirectoryFeed::new("data")).await?;
//! let page = ITEM_GRID.page(catalog.items.records(), "search=axe&sort=price")?;
//! assert!(page.cards.iter().all(|card| card.badge.is_some()));
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        codec::{ParamSpec, ParamValue, QueryString},
        debounce::Debouncer,
        error::{
            ConfigError, DatasetError, PalbookError, QueryError, RecordError, RenderError,
        },
        pipeline::{UnrankedRarity, view, view_with},
        query::{ParamTable, QueryState, SortDirection},
        rarity::Rarity,
        record::{AttrValue, Record},
        session::BrowseSession,
        store::QueryStateStore,
        validation::{FieldSpec, FieldType, Schema, SchemaError, Violation, validate_dataset},
    };

    // === Catalog ===
    pub use crate::catalog::{
        Catalog, Dataset, DatasetFeed, DatasetRecord, DirectoryFeed, GridPage, GridSpec,
        ITEM_GRID, Item, PAL_GRID, Pal, Recipe, Skill, StaticFeed,
    };

    // === Config ===
    pub use crate::config::SiteConfig;

    // === Server ===
    pub use crate::server::{HttpExposure, SiteBuilder, SiteHost};

    // === Re-exports from dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
