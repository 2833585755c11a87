//! HTTP handlers for catalog requests
//!
//! Filters are read from the JSON body when one is sent, otherwise from the
//! query string. A request with neither is answered with `400 Missing
//! filters data.`

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::error::{CatalogError, CatalogResult, QueryError};
use crate::core::query::{FileQueryDescriptor, QueryDescriptor, filters_from_query};
use crate::core::response::CatalogPage;
use crate::server::host::CatalogHost;

/// Application state shared across handlers
pub type AppState = Arc<CatalogHost>;

/// GET|POST /api/{collection}
pub async fn list_collection(
    State(host): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, CatalogError> {
    let catalog = host.collection(&name)?;
    let filters = read_filters(params, &body)?;
    let query = QueryDescriptor::from_filters(filters.as_ref())?;

    let page = catalog.get_catalog(&query).await?;
    json_response(&host.config, &page)
}

/// GET|POST /api/files
pub async fn list_files(
    State(host): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, CatalogError> {
    let files = host.files()?;
    let filters = read_filters(params, &body)?;
    let request = FileQueryDescriptor::from_filters(filters.as_ref())?;

    let page = files.get_catalog(&request).await?;
    json_response(&host.config, &page)
}

/// GET /health
pub async fn health_check(State(host): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "kingtable",
        "collections": host.collection_names(),
        "files": host.files.is_some(),
    }))
}

/// Extract the filter payload from a request
///
/// A blank body or a JSON `null` body falls back to the query string.
pub fn read_filters(
    params: HashMap<String, String>,
    body: &[u8],
) -> Result<Option<Value>, QueryError> {
    if !body.iter().all(u8::is_ascii_whitespace) {
        let value: Value = serde_json::from_slice(body).map_err(|e| QueryError::InvalidBody {
            message: e.to_string(),
        })?;
        if !value.is_null() {
            return Ok(Some(value));
        }
    }

    Ok(filters_from_query(params))
}

fn json_response(config: &ServerConfig, page: &CatalogPage) -> CatalogResult<Response> {
    let body = if config.debug {
        serde_json::to_string_pretty(page)
    } else {
        serde_json::to_string(page)
    }
    .map_err(|e| CatalogError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CACHE_CONTROL,
                format!("max-age={}", config.cache_max_age),
            ),
        ],
        body,
    )
        .into_response())
}
