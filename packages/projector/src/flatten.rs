//! Flatten: nested value -> ordered (path, value) pairs.

use kvtree_core::{Error, Path, Value};

/// One pair of the flat set produced by [`flatten`].
#[derive(Clone, Debug, PartialEq)]
pub struct FlatEntry {
    /// Full path of the key, namespace included.
    pub path: Path,
    /// The leaf value. `Null` marks a directory.
    pub value: Value,
}

impl FlatEntry {
    /// A directory marker is written under a key with a trailing separator.
    pub fn is_directory(&self) -> bool {
        self.value.is_null()
    }

    /// The transport key this entry is written under.
    pub fn key(&self, separator: char) -> String {
        if self.is_directory() {
            self.path.to_directory_key(separator)
        } else {
            self.path.to_key(separator)
        }
    }
}

/// Flatten `value` into the keys it occupies under `namespace`.
///
/// Depth first, siblings in map order:
/// - maps recurse into one segment per key; an empty map is a leaf
/// - arrays of only strings and numbers stay a single leaf
/// - other arrays recurse into one decimal-index segment per element
/// - `Null` becomes a directory marker
/// - at the root, which has no key, `Null` and the empty map emit nothing
/// - other scalars are leaves
///
/// The namespace is normalized: leading, trailing and doubled separators
/// are dropped. Map keys that are empty or contain the separator are
/// rejected, since they could not be read back into the same shape.
///
/// This performs no I/O.
///
/// # Example
///
/// ```rust
/// use kvtree_core::Value;
/// use kvtree_projector::flatten;
///
/// let value = Value::from_iter([
///     ("db", Value::from_iter([("host", Value::from("x")), ("port", Value::from(5432))])),
///     ("tags", Value::from(vec!["a", "b"])),
/// ]);
///
/// let keys: Vec<String> = flatten("/app/", &value, '/')
///     .unwrap()
///     .iter()
///     .map(|e| e.key('/'))
///     .collect();
/// assert_eq!(keys, ["app/db/host", "app/db/port", "app/tags"]);
/// ```
pub fn flatten(namespace: &str, value: &Value, separator: char) -> Result<Vec<FlatEntry>, Error> {
    let root = Path::parse_with(namespace, separator);
    let mut flat = Vec::new();
    flatten_into(&root, value, separator, &mut flat)?;
    Ok(flat)
}

fn flatten_into(
    path: &Path,
    value: &Value,
    separator: char,
    flat: &mut Vec<FlatEntry>,
) -> Result<(), Error> {
    match value {
        Value::Map(map) if map.is_empty() => {
            if !path.is_empty() {
                push(flat, path, value);
            }
        }
        Value::Map(map) => {
            for (key, child) in map {
                flatten_into(&path.child(key, separator)?, child, separator, flat)?;
            }
        }
        Value::Array(_) if value.is_leaf_array() => push(flat, path, value),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(&path.child(&index.to_string(), separator)?, item, separator, flat)?;
            }
        }
        Value::Null => {
            if !path.is_empty() {
                push(flat, path, value);
            }
        }
        Value::Bool(_) | Value::Integer(_) | Value::Float(_) | Value::String(_) => {
            push(flat, path, value)
        }
    }
    Ok(())
}

fn push(flat: &mut Vec<FlatEntry>, path: &Path, value: &Value) {
    flat.push(FlatEntry {
        path: path.clone(),
        value: value.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(flat: &[FlatEntry]) -> Vec<(String, Value)> {
        flat.iter().map(|e| (e.key('/'), e.value.clone())).collect()
    }

    #[test]
    fn nested_maps_and_leaf_arrays() {
        let value = Value::from_iter([
            (
                "db",
                Value::from_iter([("host", Value::from("x")), ("port", Value::from(5432))]),
            ),
            ("tags", Value::from(vec!["a", "b"])),
        ]);

        assert_eq!(
            pairs(&flatten("app", &value, '/').unwrap()),
            vec![
                ("app/db/host".to_string(), Value::from("x")),
                ("app/db/port".to_string(), Value::from(5432)),
                ("app/tags".to_string(), Value::from(vec!["a", "b"])),
            ]
        );
    }

    #[test]
    fn mixed_arrays_expand_per_index() {
        let value = Value::from_iter([(
            "servers",
            Value::Array(vec![
                Value::from_iter([("name", "a")]),
                Value::from("b"),
                Value::Bool(true),
            ]),
        )]);

        assert_eq!(
            pairs(&flatten("", &value, '/').unwrap()),
            vec![
                ("servers/0/name".to_string(), Value::from("a")),
                ("servers/1".to_string(), Value::from("b")),
                ("servers/2".to_string(), Value::Bool(true)),
            ]
        );
    }

    #[test]
    fn null_becomes_directory_marker() {
        let value = Value::from_iter([("cache", Value::Null), ("name", Value::from("demo"))]);
        let flat = flatten("app", &value, '/').unwrap();

        assert!(flat[0].is_directory());
        assert_eq!(flat[0].key('/'), "app/cache/");
        assert!(!flat[1].is_directory());
        assert_eq!(flat[1].key('/'), "app/name");
    }

    #[test]
    fn root_null_emits_nothing() {
        assert!(flatten("", &Value::Null, '/').unwrap().is_empty());
        assert_eq!(flatten("app", &Value::Null, '/').unwrap()[0].key('/'), "app/");
    }

    #[test]
    fn scalar_at_namespace() {
        let flat = flatten("app/version", &Value::from(3), '/').unwrap();
        assert_eq!(pairs(&flat), vec![("app/version".to_string(), Value::from(3))]);
    }

    #[test]
    fn namespace_is_normalized() {
        let value = Value::from_iter([("k", "v")]);
        assert_eq!(
            flatten("/app//env/", &value, '/').unwrap()[0].key('/'),
            "app/env/k"
        );
    }

    #[test]
    fn empty_containers() {
        // An empty map is stored as a leaf, except at the root
        let flat = flatten("app", &Value::map(), '/').unwrap();
        assert_eq!(pairs(&flat), vec![("app".to_string(), Value::map())]);
        assert!(flatten("", &Value::map(), '/').unwrap().is_empty());

        let value = Value::from_iter([(
            "items",
            Value::Array(vec![Value::map(), Value::Bool(true)]),
        )]);
        assert_eq!(
            pairs(&flatten("app", &value, '/').unwrap()),
            vec![
                ("app/items/0".to_string(), Value::map()),
                ("app/items/1".to_string(), Value::Bool(true)),
            ]
        );
        // An empty array is a leaf array
        let flat = flatten("app", &Value::array(), '/').unwrap();
        assert_eq!(pairs(&flat), vec![("app".to_string(), Value::array())]);
    }

    #[test]
    fn custom_separator() {
        let value = Value::from_iter([("db", Value::from_iter([("host", "x")]))]);
        let flat = flatten("app", &value, '.').unwrap();
        assert_eq!(flat[0].key('.'), "app.db.host");
    }

    #[test]
    fn keys_containing_the_separator_are_rejected() {
        let value = Value::from_iter([("a/b", "v")]);
        let err = flatten("app", &value, '/').unwrap_err();
        assert!(matches!(err, Error::Path(_)));

        let value = Value::from_iter([("", "v")]);
        assert!(flatten("app", &value, '/').is_err());
    }
}
