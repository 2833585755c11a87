//! # KingTable
//!
//! Server side of a paginated, searchable, sortable table view.
//!
//! ## Features
//!
//! - **Literal search**: case-insensitive substring, `"%"` matches a percent sign
//! - **Multi-key sorting**: `"name desc, age asc"`, diacritic-insensitive and stable
//! - **Columnar responses**: header row plus value rows to shrink payloads
//! - **Lazy, shared loading**: each collection is read once and cached
//! - **Directory listings**: folders first, searchable and sortable
//! - **Configuration-Based**: collections declared in YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kingtable::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_yaml_file("kingtable.yaml")?;
//!     let addr = config.bind_address();
//!     ServerBuilder::from_config(config)?.serve(&addr).await
//! }
//! ```
//!
//! The engine can also be used without the server:
//!
//! ```rust
//! use kingtable::prelude::*;
//! use serde_json::json;
//!
//! let records: Vec<Record> = vec![
//!     json!({ "name": "Łukasz", "age": 40 }),
//!     json!({ "name": "Adam", "age": 60 }),
//! ]
//! .into_iter()
//! .filter_map(|v| v.as_object().cloned())
//! .collect();
//!
//! let found = search(&records, Some("łukasz"), &SearchFields::All).unwrap();
//! assert_eq!(found.len(), 1);
//!
//! // "Łukasz" sorts as "Lukasz"
//! let sorted = sort_by(records.iter().collect(), &SortCriteria::parse("name desc"));
//! assert_eq!(sorted[0]["name"], "Łukasz");
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Query pipeline ===
    pub use crate::core::{
        engine::{PageResult, SearchFields, paginate, run, search, sort_by},
        normalize::normalize,
        query::{FileQueryDescriptor, QueryDescriptor},
        record::{Collection, Record},
        response::{CatalogPage, optimize_list},
        sort::{SortCriteria, SortDirection, SortKey},
        store::CollectionSource,
    };

    // === Errors ===
    pub use crate::core::error::{
        CatalogError, CatalogResult, ConfigError, QueryError, SourceError,
    };

    // === Sources and catalogs ===
    pub use crate::catalog::{CollectionCatalog, FileCatalog};
    pub use crate::storage::{DirectorySource, JsonFileSource};

    // === Server ===
    pub use crate::config::{CollectionConfig, FilesConfig, ServerConfig};
    pub use crate::server::{CatalogHost, ServerBuilder};

    pub use async_trait::async_trait;
}
