//! The Value type - a tree-shaped configuration document.
//!
//! A `Value` is what callers hand to the projector before a bulk write and
//! what they get back after a recursive read.

use std::collections::BTreeMap;

use crate::Path;

/// A tree-shaped value that can be projected onto a key-value namespace.
///
/// # Design Notes
///
/// - Uses `BTreeMap` for deterministic ordering, so flatten emits siblings in
///   key order and two folds of the same listing compare equal
/// - Uses `i64` for integers and `f64` for everything else numeric
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value. On the wire this is a directory marker.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for strings and numbers, the element types a leaf array may hold.
    pub fn is_text_or_number(&self) -> bool {
        matches!(self, Value::String(_) | Value::Integer(_) | Value::Float(_))
    }

    /// True for an array stored as a single value rather than expanded
    /// into per-index paths: every element is a string or a number.
    ///
    /// The empty array qualifies.
    pub fn is_leaf_array(&self) -> bool {
        match self {
            Value::Array(items) => items.iter().all(Value::is_text_or_number),
            _ => false,
        }
    }

    /// Get a reference to a nested value by path.
    ///
    /// Returns `None` if the path doesn't exist or can't be navigated
    /// (e.g., trying to index into a string).
    pub fn get(&self, path: &Path) -> Option<&Value> {
        let mut current = self;
        for component in path.iter() {
            current = match current {
                Value::Map(map) => map.get(component)?,
                Value::Array(arr) => {
                    let index: usize = component.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }
        Some(current)
    }

    /// Short name of the variant, for log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
