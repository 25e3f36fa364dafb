//! Key listing: immediate child segments under a namespace.

use std::collections::HashSet;

use kvtree_core::{Entry, Path};

use crate::fold::relative_key;

/// Immediate child segments of `base` found in `entries`.
///
/// Segments are deduplicated and keep first-seen listing order. With
/// `skip_directories`, directory markers contribute nothing, so a child
/// that only exists as a marker is not listed; a child with real keys
/// below it is listed either way.
pub fn list_keys(
    base: &str,
    entries: &[Entry],
    skip_directories: bool,
    separator: char,
) -> Vec<String> {
    let base_key = Path::parse_with(base, separator).to_key(separator);
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for entry in entries {
        if skip_directories && entry.is_directory(separator) {
            continue;
        }
        let Some(relative) = relative_key(&base_key, &entry.key, separator) else {
            continue;
        };
        let Some(segment) = relative.split(separator).next().filter(|s| !s.is_empty()) else {
            continue;
        };
        if seen.insert(segment) {
            keys.push(segment.to_string());
        }
    }

    keys
}
