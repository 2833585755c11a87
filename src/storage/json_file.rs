//! Collection source backed by a static JSON file

use crate::core::error::SourceError;
use crate::core::record::{Collection, Record};
use crate::core::store::CollectionSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Collection read from a JSON file holding an array of objects
///
/// The file is read on first use and cached for the lifetime of the
/// source. Concurrent first requests wait on the same load.
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
    cache: OnceCell<Collection>,
}

impl JsonFileSource {
    /// Create a source for the given file; nothing is read yet
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            cache: OnceCell::new(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Collection, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::from_io(&self.path, e))?;

        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            collection = %self.name,
            path = %self.path.display(),
            records = records.len(),
            "collection loaded"
        );

        Ok(Arc::new(records))
    }
}

#[async_trait]
impl CollectionSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_all(&self) -> Result<Collection, SourceError> {
        self.cache
            .get_or_try_init(|| self.load())
            .await
            .map(Arc::clone)
            .inspect_err(|e| {
                tracing::warn!(collection = %self.name, error = %e, "failed to load collection")
            })
    }

    fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }
}
