//! Server host holding the state shared by every request
//!
//! The host owns the registered catalogs. Each catalog caches its own
//! collection, so handlers only ever read from it.

use crate::catalog::{CollectionCatalog, FileCatalog};
use crate::config::ServerConfig;
use crate::core::error::{CatalogError, CatalogResult};
use std::collections::HashMap;
use std::sync::Arc;

/// Host context containing all catalog state
pub struct CatalogHost {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Catalogs by collection name
    pub collections: Arc<HashMap<String, CollectionCatalog>>,

    /// Directory listing, when enabled
    pub files: Option<Arc<FileCatalog>>,
}

impl CatalogHost {
    pub fn new(
        config: ServerConfig,
        collections: HashMap<String, CollectionCatalog>,
        files: Option<FileCatalog>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            collections: Arc::new(collections),
            files: files.map(Arc::new),
        }
    }

    /// Look up a collection catalog by name
    pub fn collection(&self, name: &str) -> CatalogResult<&CollectionCatalog> {
        self.collections
            .get(name)
            .ok_or_else(|| CatalogError::UnknownCollection {
                name: name.to_string(),
            })
    }

    /// The directory listing catalog
    pub fn files(&self) -> CatalogResult<&FileCatalog> {
        self.files.as_deref().ok_or(CatalogError::FilesDisabled)
    }

    /// Registered collection names, sorted
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
