//! Paged views over directory listings
//!
//! Folders are resolved below a configured root. Absolute folders are
//! accepted only when they point inside the root, which lets clients send
//! back the `fullpath` of a directory entry to navigate into it.

use crate::core::engine::{self, PageResult, SearchFields};
use crate::core::error::{CatalogError, CatalogResult, QueryError};
use crate::core::query::FileQueryDescriptor;
use crate::core::response::CatalogPage;
use crate::core::store::CollectionSource;
use crate::storage::filesystem::{DirectorySource, directories_first};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Serves catalog pages for the folders below a root directory
pub struct FileCatalog {
    root: PathBuf,
    default_folder: Option<String>,
    listings: Mutex<HashMap<PathBuf, Arc<DirectorySource>>>,
}

impl FileCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_folder: None,
            listings: Mutex::new(HashMap::new()),
        }
    }

    /// Folder listed when the request names none
    pub fn with_default_folder(mut self, folder: impl Into<String>) -> Self {
        self.default_folder = Some(folder.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a requested folder to a directory below the root
    pub fn resolve_folder(&self, folder: Option<&str>) -> Result<PathBuf, QueryError> {
        let requested = folder.or(self.default_folder.as_deref()).unwrap_or("");
        let mut relative = Path::new(requested);

        if relative.is_absolute() {
            relative = relative
                .strip_prefix(&self.root)
                .map_err(|_| QueryError::invalid("folder", "must be inside the listing root"))?;
        }

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(QueryError::invalid(
                        "folder",
                        "must not leave the listing root",
                    ));
                }
            }
        }

        Ok(resolved)
    }

    /// Cached listing source for a resolved folder
    fn listing(&self, path: PathBuf) -> CatalogResult<Arc<DirectorySource>> {
        let mut listings = self
            .listings
            .lock()
            .map_err(|e| CatalogError::Internal(format!("Failed to acquire listings lock: {}", e)))?;

        Ok(listings
            .entry(path)
            .or_insert_with_key(|path| Arc::new(DirectorySource::new(path.clone())))
            .clone())
    }

    /// Drop a listing that failed to load, so unknown folders are not kept
    fn forget(&self, path: &Path) -> CatalogResult<()> {
        self.listings
            .lock()
            .map_err(|e| CatalogError::Internal(format!("Failed to acquire listings lock: {}", e)))?
            .remove(path);
        Ok(())
    }

    /// Get one page of a folder listing
    ///
    /// The requested sort is applied first; directories are then moved
    /// ahead of files without disturbing either group's order.
    pub async fn get_catalog(&self, request: &FileQueryDescriptor) -> CatalogResult<CatalogPage> {
        let folder = self.resolve_folder(request.folder.as_deref())?;
        let source = self.listing(folder.clone())?;
        let records = match source.get_all().await {
            Ok(records) => records,
            Err(e) => {
                self.forget(&folder)?;
                return Err(e.into());
            }
        };

        let query = &request.query;
        let matched = engine::search(records.iter(), query.search.as_deref(), &SearchFields::All)?;

        let sorted = match &query.sort {
            Some(criteria) => engine::sort_by(matched, criteria),
            None => matched,
        };
        let ordered = directories_first(sorted);

        let total = ordered.len();
        let items = engine::paginate(&ordered, query.offset(), Some(query.limit()))
            .iter()
            .map(|record| (*record).clone())
            .collect();

        tracing::debug!(
            folder = %source.path().display(),
            page = query.page_number,
            size = query.page_size,
            total,
            "file listing served"
        );

        Ok(CatalogPage::from_result(
            PageResult {
                items,
                page_number: query.page_number,
                total,
            },
            false,
        ))
    }
}
