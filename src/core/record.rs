//! Record model shared by every browsable catalog

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A sortable attribute value
///
/// Records expose their sort keys through [`Record::attribute`]. Numbers and
/// text are the only shapes a grid can sort on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// Get the value as a number if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(_) => None,
        }
    }

    /// Get the value as text if possible
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }

    /// Total order used by the sort stage
    ///
    /// Numbers compare by value (`f64::total_cmp`), text compares
    /// case-sensitively by its UTF-8 bytes, and every number orders before
    /// every text value.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (AttrValue::Number(a), AttrValue::Number(b)) => a.total_cmp(b),
            (AttrValue::Text(a), AttrValue::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            (AttrValue::Number(_), AttrValue::Text(_)) => Ordering::Less,
            (AttrValue::Text(_), AttrValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// Compare two optional attributes; a missing attribute orders first.
pub fn compare_attrs(a: Option<&AttrValue>, b: Option<&AttrValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Number(value as f64)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// An immutable, browsable catalog entry
///
/// Implemented by every dataset type that can be shown in a filterable grid.
/// Records are loaded once and never mutated.
pub trait Record: Send + Sync {
    /// Stable unique identifier, used in detail routes
    fn id(&self) -> &str;

    /// Display name, matched by the text filter
    fn name(&self) -> &str;

    /// Raw rarity tier; only 0..=4 map to a label
    fn rarity(&self) -> i64;

    /// Category label, matched by the category filter
    fn category(&self) -> &str;

    /// Named sort key lookup. Returns `None` for unknown keys.
    fn attribute(&self, key: &str) -> Option<AttrValue>;
}
