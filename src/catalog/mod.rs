//! Catalog services tying sources, the query engine and responses together

pub mod collection;
pub mod files;

pub use collection::CollectionCatalog;
pub use files::FileCatalog;
