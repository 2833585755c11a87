//! Demo catalog server
//!
//! Serves the collections under `data/` and, when configured, a directory
//! listing. Run from the repository root:
//!
//! ```bash
//! cargo run --example demo_server -- demos/demo_server/config.yaml
//! ```
//!
//! Then try:
//!
//! ```bash
//! curl -X POST localhost:44555/api/people \
//!   -d '{"page": 1, "size": 5, "search": "łukasz", "sortBy": "name desc, age asc"}'
//! curl 'localhost:44555/api/colors?page=1&size=3&search=%25'
//! ```

use anyhow::Result;
use kingtable::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kingtable=debug,tower_http=debug")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("KINGTABLE_CONFIG").ok());

    let config = match config_path {
        Some(path) => {
            tracing::info!(path = %path, "loading configuration");
            ServerConfig::from_yaml_file(&path)?
        }
        None => {
            tracing::info!("no configuration given, serving the bundled collections");
            ServerConfig::default_config()
        }
    };

    println!("🚀 KingTable demo server");
    println!("========================\n");
    for collection in &config.collections {
        println!("   - /api/{}  ({})", collection.name, collection.file);
    }
    if let Some(files) = &config.files {
        println!("   - /api/files  ({})", files.root.display());
    }
    println!();

    let addr = config.bind_address();
    ServerBuilder::from_config(config)?.serve(&addr).await
}
