//! Sort criteria and the `sortBy` string grammar
//!
//! # Format
//! - `name` sorts by `name` ascending
//! - `name desc` sorts by `name` descending
//! - `name, age desc` sorts by `name` ascending, then `age` descending
//!
//! A direction word counts as ascending when it starts with `asc`
//! (case-insensitive). Any other word that is present means descending;
//! no word at all means ascending.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Direction of one sort pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Interpret an optional direction word
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            None | Some("") => SortDirection::Asc,
            Some(word) if word.to_ascii_lowercase().starts_with("asc") => SortDirection::Asc,
            Some(_) => SortDirection::Desc,
        }
    }

    /// Interpret a numeric order (`1` ascending, `-1` descending)
    pub fn from_order(order: i64) -> Self {
        if order < 0 {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortDirection::Desc
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A field to sort by and the direction to sort it in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

/// Ordered sort keys, most significant first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortCriteria(Vec<SortKey>);

impl SortCriteria {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }

    /// Parse a `sortBy` string
    ///
    /// Empty clauses are ignored, so `""` yields empty criteria.
    pub fn parse(s: &str) -> Self {
        let keys = s
            .split(',')
            .filter_map(|clause| {
                let mut words = clause.split_whitespace();
                let field = words.next()?;
                Some(SortKey::new(field, SortDirection::from_token(words.next())))
            })
            .collect();
        Self(keys)
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromStr for SortCriteria {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for SortCriteria {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Vec<SortKey>> for SortCriteria {
    fn from(keys: Vec<SortKey>) -> Self {
        Self(keys)
    }
}

impl FromIterator<SortKey> for SortCriteria {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SortCriteria {
    type Item = &'a SortKey;
    type IntoIter = std::slice::Iter<'a, SortKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for SortCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self.0.iter().map(SortKey::to_string).collect();
        write!(f, "{}", clauses.join(", "))
    }
}

/// Parse a `sortBy` string into criteria
pub fn parse_sort_by(s: &str) -> SortCriteria {
    SortCriteria::parse(s)
}
