//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::host::CatalogHost;
use super::router::{build_catalog_routes, build_health_routes};
use crate::catalog::{CollectionCatalog, FileCatalog};
use crate::config::ServerConfig;
use crate::core::store::CollectionSource;
use crate::storage::JsonFileSource;
use anyhow::{Result, bail};
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for creating HTTP servers exposing catalog routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::from_config(ServerConfig::from_yaml_file("kingtable.yaml")?)?
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    collections: HashMap<String, CollectionCatalog>,
    files: Option<FileCatalog>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a builder with default settings and no collections
    pub fn new() -> Self {
        Self {
            config: ServerConfig {
                collections: Vec::new(),
                ..ServerConfig::default_config()
            },
            collections: HashMap::new(),
            files: None,
            custom_routes: Vec::new(),
        }
    }

    /// Create a builder registering every collection of the configuration
    ///
    /// Collections are backed by JSON files below `data_dir`; nothing is
    /// read until the first request for a collection.
    pub fn from_config(config: ServerConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Self::new();

        for collection in &config.collections {
            let source = JsonFileSource::new(
                collection.name.clone(),
                config.collection_path(collection),
            );
            let mut catalog =
                CollectionCatalog::new(Arc::new(source)).with_optimize(collection.optimize);
            if let Some(fields) = &collection.search_fields {
                catalog = catalog.with_search_fields(fields.clone());
            }
            builder = builder.register_collection(catalog)?;
        }

        if let Some(files) = &config.files {
            let mut catalog = FileCatalog::new(files.root.clone());
            if let Some(folder) = &files.default_folder {
                catalog = catalog.with_default_folder(folder.clone());
            }
            builder = builder.with_file_catalog(catalog);
        }

        builder.config = config;
        Ok(builder)
    }

    /// Register a collection catalog under its source name
    pub fn register_collection(mut self, catalog: CollectionCatalog) -> Result<Self> {
        let name = catalog.name().to_string();
        if self.collections.contains_key(&name) {
            bail!("Collection '{}' is already registered", name);
        }

        tracing::info!(collection = %name, optimize = catalog.optimize(), "collection registered");
        self.collections.insert(name, catalog);
        Ok(self)
    }

    /// Register a collection source with the default catalog settings
    pub fn register_source(self, source: impl CollectionSource + 'static) -> Result<Self> {
        self.register_collection(CollectionCatalog::new(Arc::new(source)))
    }

    /// Enable the directory listing at `/api/files`
    pub fn with_file_catalog(mut self, catalog: FileCatalog) -> Self {
        tracing::info!(root = %catalog.root().display(), "file listing enabled");
        self.files = Some(catalog);
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the host holding the shared state
    pub fn build_host(self) -> CatalogHost {
        CatalogHost::new(self.config, self.collections, self.files)
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health check routes
    /// - Catalog routes for every registered collection
    /// - The file listing route
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let state: AppState = Arc::new(self.build_host());

        let mut app = build_health_routes(state.clone()).merge(build_catalog_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
