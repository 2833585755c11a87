//! Schema-less records and collections

use serde_json::{Map, Value};
use std::sync::Arc;

/// One item of a collection: an open mapping from field name to value
///
/// Field order is the order in which the fields were read, which is what
/// the columnar response uses for its header row.
pub type Record = Map<String, Value>;

/// An immutable, shareable snapshot of a loaded collection
pub type Collection = Arc<Vec<Record>>;

/// Read a field as a string, if it is one
pub fn field_str<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

/// Iterate the string-valued fields of a record
///
/// Numbers, booleans, nulls and nested values are skipped.
pub fn string_values(record: &Record) -> impl Iterator<Item = &str> {
    record.values().filter_map(Value::as_str)
}
