//! Collection source trait

use crate::core::error::SourceError;
use crate::core::record::Collection;
use async_trait::async_trait;

/// A named collection that is loaded once and then served from memory
///
/// Implementations load their backing store on the first call to
/// [`get_all`](CollectionSource::get_all) and return the same shared
/// snapshot afterwards. Concurrent first calls must not load twice.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Name the collection is registered under (e.g. "colors")
    fn name(&self) -> &str;

    /// Get every record of the collection, loading it if needed
    async fn get_all(&self) -> Result<Collection, SourceError>;

    /// Whether the collection has already been loaded
    fn is_loaded(&self) -> bool;
}
