//! Dataset feeds
//!
//! A feed hands out the raw JSON text of a named dataset. The site reads each
//! dataset once at startup; feeds are never consulted at request time.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// Source of raw dataset documents
#[async_trait]
pub trait DatasetFeed: Send + Sync {
    /// Raw JSON text of the dataset called `name`
    async fn fetch(&self, name: &str) -> Result<String>;

    /// Human-readable location, used in logs
    fn describe(&self) -> String;
}

/// Reads `<dir>/<name>.json`
#[derive(Debug, Clone)]
pub struct DirectoryFeed {
    dir: PathBuf,
}

impl DirectoryFeed {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl DatasetFeed for DirectoryFeed {
    async fn fetch(&self, name: &str) -> Result<String> {
        let path = self.path_for(name);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// In-memory feed for tests and embedded data
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    datasets: HashMap<String, String>,
}

impl StaticFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset from its JSON text
    pub fn with(mut self, name: &str, json: impl Into<String>) -> Self {
        self.datasets.insert(name.to_string(), json.into());
        self
    }

    /// Register a dataset from a JSON value
    pub fn with_value(self, name: &str, value: &serde_json::Value) -> Self {
        self.with(name, value.to_string())
    }
}

#[async_trait]
impl DatasetFeed for StaticFeed {
    async fn fetch(&self, name: &str) -> Result<String> {
        self.datasets
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("no dataset named '{}'", name))
    }

    fn describe(&self) -> String {
        format!("static feed ({} datasets)", self.datasets.len())
    }
}
