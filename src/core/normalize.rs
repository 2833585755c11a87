//! Diacritic-insensitive text normalization
//!
//! Strings are decomposed (NFD) and combining marks are dropped, so
//! "Crème" and "Creme" compare equal. A handful of Latin letters carry their
//! stroke as part of the base character and have no decomposition (`Ł`,
//! `Ø`, `Đ`, ...); those are folded through a small table.
//!
//! This is not linguistic collation: it only removes marks.

use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a string for diacritic-insensitive comparison
///
/// ASCII input is returned borrowed.
///
/// # Example
/// ```
/// use kingtable::core::normalize::normalize;
///
/// assert_eq!(normalize("Łukasz"), "Lukasz");
/// assert_eq!(normalize("Stanisław"), "Stanislaw");
/// assert_eq!(normalize("Roberto"), "Roberto");
/// ```
pub fn normalize(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    for c in s.nfd().filter(|c| !is_combining_mark(*c)) {
        match fold(c) {
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Letters without a canonical decomposition
fn fold(c: char) -> Option<&'static str> {
    let folded = match c {
        'Ł' => "L",
        'ł' => "l",
        'Ø' => "O",
        'ø' => "o",
        'Đ' => "D",
        'đ' => "d",
        'Ħ' => "H",
        'ħ' => "h",
        'ı' => "i",
        'Ŧ' => "T",
        'ŧ' => "t",
        'ß' => "ss",
        'Æ' => "AE",
        'æ' => "ae",
        'Œ' => "OE",
        'œ' => "oe",
        'Þ' => "Th",
        'þ' => "th",
        'Ð' => "D",
        'ð' => "d",
        _ => return None,
    };
    Some(folded)
}
