//! Server module for building the catalog HTTP server
//!
//! `ServerBuilder` registers:
//! - `/api/{collection}` for every configured collection
//! - `/api/files` when a directory listing is configured
//! - Health check routes

pub mod builder;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use host::CatalogHost;
