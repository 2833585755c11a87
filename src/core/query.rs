//! Query descriptors and the filter payload parser
//!
//! A catalog request carries its filters either as a JSON body or as a
//! query string. Both are normalized into a JSON object first (query string
//! values stay strings) and then validated here.
//!
//! # Format
//! ```text
//! { "page": 1, "size": 30, "search": "blue", "sortBy": "name, hue desc" }
//! ```
//!
//! `page` and `size` accept integers or strings holding integers. `sortBy`
//! accepts the string grammar of [`SortCriteria::parse`], or an array of
//! `[field, order]` pairs / `{"field": .., "order": ..}` objects.

use crate::core::error::QueryError;
use crate::core::sort::{SortCriteria, SortDirection, SortKey};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Raw filter payload, as received from the client
pub type Filters = Map<String, Value>;

/// Validated query for a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    /// Page number (starts at 1; zero or negative means "no offset")
    pub page_number: i64,

    /// Number of records per page
    pub page_size: usize,

    /// Optional search term
    pub search: Option<String>,

    /// Optional sort criteria; `None` keeps the source order
    pub sort: Option<SortCriteria>,
}

impl QueryDescriptor {
    /// Build a descriptor from the request filters
    ///
    /// `None` means the request carried no filter data at all.
    pub fn from_filters(filters: Option<&Value>) -> Result<Self, QueryError> {
        let filters = object(filters)?;

        Ok(Self {
            page_number: read_integer(filters, "page")?,
            page_size: read_page_size(filters, "size")?,
            search: read_string(filters, "search")?,
            sort: read_sort_by(filters, "sortBy")?,
        })
    }

    /// Number of records to skip
    pub fn offset(&self) -> usize {
        if self.page_number > 0 {
            usize::try_from(self.page_number - 1)
                .unwrap_or(usize::MAX)
                .saturating_mul(self.page_size)
        } else {
            0
        }
    }

    /// Maximum number of records to return
    pub fn limit(&self) -> usize {
        self.page_size
    }
}

/// Validated query for the directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQueryDescriptor {
    /// Folder to list, relative to the configured root
    pub folder: Option<String>,

    /// Paging, search and sort
    pub query: QueryDescriptor,
}

impl FileQueryDescriptor {
    /// Build a descriptor from the request filters
    ///
    /// Sorting is expressed with `orderBy` (a field name) and `sortOrder`
    /// (a direction word) instead of `sortBy`.
    pub fn from_filters(filters: Option<&Value>) -> Result<Self, QueryError> {
        let filters = object(filters)?;

        let sort = read_string(filters, "orderBy")?
            .filter(|field| !field.trim().is_empty())
            .map(|field| {
                let order = read_string(filters, "sortOrder")?;
                let direction = SortDirection::from_token(order.as_deref());
                Ok::<_, QueryError>(SortCriteria::new(vec![SortKey::new(field.trim(), direction)]))
            })
            .transpose()?;

        Ok(Self {
            folder: read_string(filters, "folder")?.filter(|f| !f.is_empty()),
            query: QueryDescriptor {
                page_number: read_integer(filters, "page")?,
                page_size: read_page_size(filters, "size")?,
                search: read_string(filters, "search")?,
                sort,
            },
        })
    }
}

/// Turn query string pairs into a filter payload
///
/// Returns `None` when the query string is empty.
pub fn filters_from_query(params: HashMap<String, String>) -> Option<Value> {
    if params.is_empty() {
        return None;
    }

    let map: Filters = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    Some(Value::Object(map))
}

fn object(filters: Option<&Value>) -> Result<&Filters, QueryError> {
    match filters {
        None | Some(Value::Null) => Err(QueryError::MissingFilters),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(QueryError::InvalidBody {
            message: "filters must be a JSON object".to_string(),
        }),
    }
}

fn read_integer(filters: &Filters, field: &str) -> Result<i64, QueryError> {
    match filters.get(field) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(whole_i64))
            .ok_or_else(|| QueryError::invalid(field, format!("'{}' is not an integer", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| QueryError::invalid(field, format!("'{}' is not an integer", s))),
        Some(other) => Err(QueryError::invalid(
            field,
            format!("expected an integer, got {}", other),
        )),
        None => Err(QueryError::invalid(field, "is required")),
    }
}

/// A float with no fractional part that fits in `i64`
fn whole_i64(f: f64) -> Option<i64> {
    // 2^63 is exact as f64; the upper bound is exclusive
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}

fn read_page_size(filters: &Filters, field: &str) -> Result<usize, QueryError> {
    let size = read_integer(filters, field)?;
    usize::try_from(size).map_err(|_| QueryError::invalid(field, "must not be negative"))
}

fn read_string(filters: &Filters, field: &str) -> Result<Option<String>, QueryError> {
    match filters.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(QueryError::invalid(
            field,
            format!("expected a string, got {}", other),
        )),
    }
}

fn read_sort_by(filters: &Filters, field: &str) -> Result<Option<SortCriteria>, QueryError> {
    let criteria = match filters.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => SortCriteria::parse(s),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| read_sort_key(item, field))
            .collect::<Result<SortCriteria, _>>()?,
        Some(other) => {
            return Err(QueryError::invalid(
                field,
                format!("expected a string or an array, got {}", other),
            ));
        }
    };

    Ok((!criteria.is_empty()).then_some(criteria))
}

fn read_sort_key(item: &Value, field: &str) -> Result<SortKey, QueryError> {
    let (name, order) = match item {
        Value::Array(pair) => match pair.as_slice() {
            [Value::String(name)] => (name, None),
            [Value::String(name), order] => (name, Some(order)),
            _ => return Err(QueryError::invalid(field, "expected [field, order] pairs")),
        },
        Value::Object(map) => match map.get("field") {
            Some(Value::String(name)) => (name, map.get("order")),
            _ => return Err(QueryError::invalid(field, "sort key is missing 'field'")),
        },
        Value::String(name) => (name, None),
        other => {
            return Err(QueryError::invalid(
                field,
                format!("unsupported sort key {}", other),
            ));
        }
    };

    let direction = match order {
        None | Some(Value::Null) => SortDirection::Asc,
        Some(Value::String(word)) => SortDirection::from_token(Some(word)),
        Some(Value::Number(n)) => SortDirection::from_order(n.as_i64().unwrap_or(1)),
        Some(other) => {
            return Err(QueryError::invalid(
                field,
                format!("unsupported sort order {}", other),
            ));
        }
    };

    Ok(SortKey::new(name.as_str(), direction))
}
