//! Serves the sample datasets under `data/`
//!
//! ```sh
//! cargo run --example site -- demos/site/site.yaml
//! ```
//!
//! `RUST_LOG` takes precedence over the configured log filter.

use palbook::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "demos/site/site.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = SiteConfig::from_yaml_file(&path)?.merge_env()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        config = %path,
        data = %config.data.dir.display(),
        debounce_ms = config.search.debounce_ms,
        "starting palbook"
    );

    SiteBuilder::new().with_config(config).serve().await
}
