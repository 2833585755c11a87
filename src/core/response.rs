//! Catalog page responses and the columnar ("optimized") layout

use crate::core::engine::PageResult;
use crate::core::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire response of a catalog request
///
/// `subset` holds either the records themselves or their columnar form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Records (or rows) of the requested page
    pub subset: Value,

    /// Requested page number
    pub page: i64,

    /// Number of records matching the search, before pagination
    pub total: usize,
}

impl CatalogPage {
    /// Assemble a response from an engine result
    pub fn from_result(result: PageResult, optimize: bool) -> Self {
        let subset = if optimize {
            optimize_list(result.items)
        } else {
            Value::Array(result.items.into_iter().map(Value::Object).collect())
        };

        Self {
            subset,
            page: result.page_number,
            total: result.total,
        }
    }

    /// Number of pages needed to show every matching record
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            0
        } else {
            self.total.div_ceil(page_size)
        }
    }

    /// Number of entries in `subset`, header row excluded
    pub fn item_count(&self, optimized: bool) -> usize {
        let len = self.subset.as_array().map_or(0, Vec::len);
        if optimized { len.saturating_sub(1) } else { len }
    }
}

/// Transpose records into a header row followed by value rows
///
/// The header is the field order of the first record; every row lists its
/// record's values in header order (`null` where a field is missing). An
/// empty input stays an empty array, without a header.
///
/// # Example
/// ```
/// use kingtable::core::response::optimize_list;
/// use serde_json::json;
///
/// let records = serde_json::from_value(json!([{ "a": 1, "b": 2 }, { "a": 3, "b": 4 }])).unwrap();
/// assert_eq!(optimize_list(records), json!([["a", "b"], [1, 2], [3, 4]]));
/// ```
pub fn optimize_list(records: Vec<Record>) -> Value {
    let Some(first) = records.first() else {
        return Value::Array(Vec::new());
    };

    let header: Vec<String> = first.keys().cloned().collect();

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(Value::Array(
        header.iter().cloned().map(Value::String).collect(),
    ));

    for mut record in records {
        let row = header
            .iter()
            .map(|field| record.remove(field).unwrap_or(Value::Null))
            .collect();
        rows.push(Value::Array(row));
    }

    Value::Array(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_optimize_list() {
        let data = records(json!([{ "a": 1, "b": 2 }, { "a": 3, "b": 4 }]));
        assert_eq!(optimize_list(data), json!([["a", "b"], [1, 2], [3, 4]]));
    }

    #[test]
    fn test_optimize_empty_list() {
        assert_eq!(optimize_list(Vec::new()), json!([]));
    }

    #[test]
    fn test_optimize_uses_first_record_field_order() {
        let data = records(json!([
            { "name": "Aero", "color": "#7CB9E8" },
            { "color": "#B284BE", "name": "African violet", "extra": true },
            { "name": "Alien Armpit" }
        ]));
        assert_eq!(
            optimize_list(data),
            json!([
                ["name", "color"],
                ["Aero", "#7CB9E8"],
                ["African violet", "#B284BE"],
                ["Alien Armpit", null]
            ])
        );
    }

    #[test]
    fn test_from_result_plain() {
        let result = PageResult {
            items: records(json!([{ "a": 1 }])),
            page_number: 1,
            total: 7,
        };
        let page = CatalogPage::from_result(result, false);
        assert_eq!(page.subset, json!([{ "a": 1 }]));
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages(3), 3);
        assert_eq!(page.item_count(false), 1);
    }

    #[test]
    fn test_from_result_optimized_serialization() {
        let result = PageResult {
            items: records(json!([{ "a": 1 }, { "a": 2 }])),
            page_number: 2,
            total: 12,
        };
        let page = CatalogPage::from_result(result, true);
        assert_eq!(page.item_count(true), 2);
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({ "subset": [["a"], [1], [2]], "page": 2, "total": 12 })
        );
    }

    #[test]
    fn test_from_result_optimized_empty_page() {
        let result = PageResult {
            items: Vec::new(),
            page_number: 9,
            total: 0,
        };
        let page = CatalogPage::from_result(result, true);
        assert_eq!(page.subset, json!([]));
        assert_eq!(page.item_count(true), 0);
        assert_eq!(page.total_pages(10), 0);
    }
}
