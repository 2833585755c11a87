//! Core module containing the list query pipeline and its building blocks

pub mod engine;
pub mod error;
pub mod normalize;
pub mod query;
pub mod record;
pub mod response;
pub mod sort;
pub mod store;

pub use engine::{PageResult, SearchFields, paginate, run, search, sort_by};
pub use error::{CatalogError, CatalogResult, ConfigError, QueryError, SourceError};
pub use normalize::normalize;
pub use query::{FileQueryDescriptor, Filters, QueryDescriptor, filters_from_query};
pub use record::{Collection, Record};
pub use response::{CatalogPage, optimize_list};
pub use sort::{SortCriteria, SortDirection, SortKey, parse_sort_by};
pub use store::CollectionSource;
