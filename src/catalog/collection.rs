//! Paged views over a registered collection

use crate::core::engine::{self, SearchFields};
use crate::core::error::CatalogResult;
use crate::core::query::QueryDescriptor;
use crate::core::response::CatalogPage;
use crate::core::store::CollectionSource;
use std::sync::Arc;

/// Serves catalog pages for one collection source
///
/// # Example
///
/// ```rust,ignore
/// let colors = CollectionCatalog::new(Arc::new(JsonFileSource::new("colors", "data/colors.json")));
/// let query = QueryDescriptor::from_filters(Some(&json!({ "page": 1, "size": 30 })))?;
/// let page = colors.get_catalog(&query).await?;
/// ```
#[derive(Clone)]
pub struct CollectionCatalog {
    source: Arc<dyn CollectionSource>,
    search_fields: SearchFields,
    optimize: bool,
}

impl CollectionCatalog {
    /// Searches every string field and answers in columnar form by default
    pub fn new(source: Arc<dyn CollectionSource>) -> Self {
        Self {
            source,
            search_fields: SearchFields::All,
            optimize: true,
        }
    }

    /// Answer with plain records (`false`) or the columnar form (`true`)
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Restrict which fields the search term is matched against
    pub fn with_search_fields(mut self, fields: impl Into<SearchFields>) -> Self {
        self.search_fields = fields.into();
        self
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn optimize(&self) -> bool {
        self.optimize
    }

    pub fn source(&self) -> &Arc<dyn CollectionSource> {
        &self.source
    }

    /// Get one page of the collection
    pub async fn get_catalog(&self, query: &QueryDescriptor) -> CatalogResult<CatalogPage> {
        let records = self.source.get_all().await?;
        let result = engine::run(&records, query, &self.search_fields)?;

        tracing::debug!(
            collection = %self.name(),
            page = query.page_number,
            size = query.page_size,
            search = ?query.search,
            total = result.total,
            "catalog page served"
        );

        Ok(CatalogPage::from_result(result, self.optimize))
    }
}
