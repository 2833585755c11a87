//! Typed error handling for catalog requests
//!
//! Errors are split by the stage of the pipeline that produced them, so the
//! HTTP boundary can decide between a client error and a server error
//! without inspecting messages.
//!
//! # Error Categories
//!
//! - [`QueryError`]: the request payload could not be turned into a query
//! - [`SourceError`]: the backing file or directory could not be loaded
//! - [`ConfigError`]: the server configuration is unusable
//!
//! # Example
//!
//! ```rust,ignore
//! use kingtable::prelude::*;
//!
//! match QueryDescriptor::from_filters(None) {
//!     Err(QueryError::MissingFilters) => println!("nothing to query"),
//!     Err(e) => eprintln!("bad request: {}", e),
//!     Ok(query) => println!("page {}", query.page_number),
//! }
//! ```

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Plain-text body returned when a request carries no filters at all
pub const MISSING_FILTERS_MESSAGE: &str = "Missing filters data.";

/// The main error type for catalog operations
#[derive(Debug)]
pub enum CatalogError {
    /// The request payload was missing or malformed
    Query(QueryError),

    /// The collection data could not be loaded
    Source(SourceError),

    /// Configuration errors
    Config(ConfigError),

    /// No collection is registered under this name
    UnknownCollection { name: String },

    /// The file listing was requested but no root folder is configured
    FilesDisabled,

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Query(e) => write!(f, "{}", e),
            CatalogError::Source(e) => write!(f, "{}", e),
            CatalogError::Config(e) => write!(f, "{}", e),
            CatalogError::UnknownCollection { name } => {
                write!(f, "Collection '{}' not found", name)
            }
            CatalogError::FilesDisabled => write!(f, "File listing is not enabled"),
            CatalogError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Query(e) => Some(e),
            CatalogError::Source(e) => Some(e),
            CatalogError::Config(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Query(_) => StatusCode::BAD_REQUEST,
            CatalogError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::UnknownCollection { .. } => StatusCode::NOT_FOUND,
            CatalogError::FilesDisabled => StatusCode::NOT_FOUND,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Query(e) => e.error_code(),
            CatalogError::Source(e) => e.error_code(),
            CatalogError::Config(_) => "CONFIG_ERROR",
            CatalogError::UnknownCollection { .. } => "COLLECTION_NOT_FOUND",
            CatalogError::FilesDisabled => "FILES_DISABLED",
            CatalogError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the failure is on the server side
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Convert to an error response
    ///
    /// Server-side failures carry a generic message; the cause is logged
    /// instead of being sent to the client.
    pub fn to_response(&self) -> ErrorResponse {
        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CatalogError::Query(QueryError::InvalidArgument { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            CatalogError::UnknownCollection { name } => {
                Some(serde_json::json!({ "collection": name }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "catalog request failed");
        }

        if matches!(self, CatalogError::Query(QueryError::MissingFilters)) {
            return (
                status,
                [(header::CONTENT_TYPE, "text/plain")],
                MISSING_FILTERS_MESSAGE,
            )
                .into_response();
        }

        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised while turning a request payload into a query descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No filter data could be extracted from the request at all
    MissingFilters,

    /// A present field could not be coerced to its expected type
    InvalidArgument { field: String, message: String },

    /// The request body is not valid JSON
    InvalidBody { message: String },
}

impl QueryError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::MissingFilters => "MISSING_FILTERS",
            QueryError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            QueryError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::MissingFilters => write!(f, "{}", MISSING_FILTERS_MESSAGE),
            QueryError::InvalidArgument { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
            QueryError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
        }
    }
}

impl std::error::Error for QueryError {}

impl From<QueryError> for CatalogError {
    fn from(err: QueryError) -> Self {
        CatalogError::Query(err)
    }
}

// =============================================================================
// Source Errors
// =============================================================================

/// Errors raised while loading a collection from its backing store
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The backing file or directory does not exist
    #[error("Collection source not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The backing file is not a JSON array of objects
    #[error("Failed to parse collection file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other IO failure while reading the backing store
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Classify an IO error for the given path
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound { path }
        } else {
            SourceError::Io { path, source }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::NotFound { .. } => "SOURCE_NOT_FOUND",
            SourceError::Parse { .. } => "SOURCE_PARSE_ERROR",
            SourceError::Io { .. } => "SOURCE_IO_ERROR",
        }
    }
}

impl From<SourceError> for CatalogError {
    fn from(err: SourceError) -> Self {
        CatalogError::Source(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for CatalogError {
    fn from(err: ConfigError) -> Self {
        CatalogError::Config(err)
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
