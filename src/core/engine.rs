//! List query engine: search, sort and paginate in-memory records
//!
//! The three operations are independent and are always chained in the same
//! order by [`run`]: search, then sort, then paginate. They work on borrowed
//! records, so a cached collection is never reordered or modified; only the
//! final page is cloned.

use crate::core::error::QueryError;
use crate::core::normalize::normalize;
use crate::core::query::QueryDescriptor;
use crate::core::record::{Record, string_values};
use crate::core::sort::{SortCriteria, SortDirection};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Which fields a search term is matched against
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchFields {
    /// Every string-valued field (`"*"`)
    #[default]
    All,

    /// Only the named fields
    Only(Vec<String>),
}

impl SearchFields {
    fn matches(&self, record: &Record, pattern: &Regex) -> bool {
        match self {
            SearchFields::All => string_values(record).any(|v| pattern.is_match(v)),
            SearchFields::Only(fields) => fields.iter().any(|field| {
                record
                    .get(field)
                    .and_then(Value::as_str)
                    .is_some_and(|v| pattern.is_match(v))
            }),
        }
    }
}

impl From<&str> for SearchFields {
    fn from(s: &str) -> Self {
        if s.trim() == "*" {
            SearchFields::All
        } else {
            SearchFields::Only(
                s.split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(String::from)
                    .collect(),
            )
        }
    }
}

impl From<Vec<String>> for SearchFields {
    fn from(fields: Vec<String>) -> Self {
        SearchFields::Only(fields)
    }
}

/// Keep the records that contain `term` as a case-insensitive substring
///
/// The term is matched literally; regex metacharacters have no special
/// meaning. Non-string field values never match and never fail. An absent
/// or empty term keeps every record in its original order.
pub fn search<'a, I>(
    records: I,
    term: Option<&str>,
    fields: &SearchFields,
) -> Result<Vec<&'a Record>, QueryError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let term = match term {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(records.into_iter().collect()),
    };

    let pattern = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .map_err(|e| QueryError::invalid("search", e.to_string()))?;

    Ok(records
        .into_iter()
        .filter(|record| fields.matches(record, &pattern))
        .collect())
}

/// Order records by the given criteria
///
/// Each key is applied as its own stable sort pass, from the least
/// significant key to the most significant one. Strings compare after
/// diacritic normalization, numbers numerically. Missing and `null` values
/// always sort after present values, whatever the direction.
pub fn sort_by<'a>(records: Vec<&'a Record>, criteria: &SortCriteria) -> Vec<&'a Record> {
    let mut records = records;

    for key in criteria.keys().iter().rev() {
        let mut keyed: Vec<(Option<SortValue<'a>>, &'a Record)> = records
            .into_iter()
            .map(|record| (SortValue::of(record.get(&key.field)), record))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), key.direction));

        records = keyed.into_iter().map(|(_, record)| record).collect();
    }

    records
}

/// Take the window `[offset, offset + limit)`
///
/// `None` as limit means "to the end". Offsets past the end yield an empty
/// slice.
pub fn paginate<T>(records: &[T], offset: usize, limit: Option<usize>) -> &[T] {
    let start = offset.min(records.len());
    let end = match limit {
        Some(limit) => start.saturating_add(limit).min(records.len()),
        None => records.len(),
    };
    &records[start..end]
}

/// Result of running a query over a collection
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// Records of the requested page
    pub items: Vec<Record>,

    /// Requested page number, echoed back
    pub page_number: i64,

    /// Number of records matching the search, before pagination
    pub total: usize,
}

/// Execute search, sort and paginate for a query descriptor
pub fn run(
    records: &[Record],
    query: &QueryDescriptor,
    fields: &SearchFields,
) -> Result<PageResult, QueryError> {
    let matched = search(records, query.search.as_deref(), fields)?;

    let ordered = match &query.sort {
        Some(criteria) if !criteria.is_empty() => sort_by(matched, criteria),
        _ => matched,
    };

    let total = ordered.len();
    let items = paginate(&ordered, query.offset(), Some(query.page_size))
        .iter()
        .map(|record| (*record).clone())
        .collect();

    Ok(PageResult {
        items,
        page_number: query.page_number,
        total,
    })
}

/// Comparable projection of a field value
#[derive(Debug, Clone)]
enum SortValue<'a> {
    Bool(bool),
    Number(f64),
    Text(Cow<'a, str>),
    Other(String),
}

impl<'a> SortValue<'a> {
    fn of(value: Option<&'a Value>) -> Option<Self> {
        match value? {
            Value::Null => None,
            Value::Bool(b) => Some(SortValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(SortValue::Number),
            Value::String(s) => Some(SortValue::Text(normalize(s))),
            other => Some(SortValue::Other(other.to_string())),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Bool(_) => 0,
            SortValue::Number(_) => 1,
            SortValue::Text(_) => 2,
            SortValue::Other(_) => 3,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Bool(a), SortValue::Bool(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Other(a), SortValue::Other(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn compare_keys(a: Option<&SortValue>, b: Option<&SortValue>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = a.compare(b);
            if direction.is_descending() {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}
