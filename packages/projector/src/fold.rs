//! Fold: flat listing -> nested value.

use std::collections::BTreeMap;

use kvtree_core::{Codec, Entry, Path, Value};
use tracing::debug;

/// Fold decoded `(key, value)` pairs listed under `base` into one value.
///
/// Each key has `base` and the following separator stripped, is split into
/// segments, wrapped into a single-branch map and deep-merged into the
/// result:
/// - map into map merges keys recursively
/// - anything else replaces what was there, so the later entry in listing
///   order wins a type conflict
/// - a directory marker (key ending in the separator, `Null` value) never
///   displaces content; content arriving after a marker replaces it
///
/// An entry keyed exactly `base` becomes the whole result without wrapping.
/// Keys outside `base` (a prefix listing of `app` also returns `apple/...`)
/// are skipped. Input order does not matter for non-conflicting keys.
///
/// Returns `None` when no entry falls under `base`.
///
/// # Example
///
/// ```rust
/// use kvtree_core::Value;
/// use kvtree_projector::fold;
///
/// let folded = fold(
///     "app",
///     vec![
///         ("app/db/host".to_string(), Value::from("x")),
///         ("app/db/port".to_string(), Value::from("5432")),
///     ],
///     '/',
/// );
///
/// let expected = Value::from_iter([(
///     "db",
///     Value::from_iter([("host", "x"), ("port", "5432")]),
/// )]);
/// assert_eq!(folded, Some(expected));
/// ```
pub fn fold<I>(base: &str, entries: I, separator: char) -> Option<Value>
where
    I: IntoIterator<Item = (String, Value)>,
{
    let base_key = Path::parse_with(base, separator).to_key(separator);
    let mut folded: Option<Value> = None;

    for (key, value) in entries {
        let marker = key.ends_with(separator) && value.is_null();
        let Some(relative) = relative_key(&base_key, &key, separator) else {
            debug!(key = %key, base = %base_key, "skipping key outside namespace");
            continue;
        };

        let branch = wrap(&Path::parse_with(relative, separator), value);

        match folded.as_mut() {
            Some(accumulated) => merge(accumulated, branch, marker),
            None => folded = Some(branch),
        }
    }

    folded
}

/// Decode each listed entry with `codec`, then [`fold`] them.
pub fn fold_entries<C>(base: &str, entries: Vec<Entry>, codec: &C, separator: char) -> Option<Value>
where
    C: Codec + ?Sized,
{
    fold(
        base,
        entries.into_iter().map(|entry| {
            let value = codec.decode(entry.value.as_deref());
            (entry.key, value)
        }),
        separator,
    )
}

/// The part of `key` below `base_key`, or `None` if `key` is not under it.
///
/// `base_key` is a normalized key (no leading or trailing separator).
pub(crate) fn relative_key<'k>(base_key: &str, key: &'k str, separator: char) -> Option<&'k str> {
    if base_key.is_empty() {
        return Some(key.trim_start_matches(separator));
    }
    let rest = key.strip_prefix(base_key)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix(separator)
}

/// Build the single-branch value `{s1: {s2: ... {sn: value}}}`.
fn wrap(path: &Path, value: Value) -> Value {
    path.iter().rev().fold(value, |inner, segment| {
        Value::Map(BTreeMap::from([(segment.clone(), inner)]))
    })
}

/// Deep-merge `incoming` into `into`.
fn merge(into: &mut Value, incoming: Value, marker: bool) {
    match (into, incoming) {
        (Value::Map(existing), Value::Map(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => merge(slot, value, marker),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (_, Value::Null) if marker => {}
        (slot, incoming) => *slot = incoming,
    }
}
