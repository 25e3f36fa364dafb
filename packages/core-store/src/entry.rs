//! Entries as the remote store lists them, and options for writing them.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One stored key as returned by a `get` or `list`.
///
/// `value` holds the wire form of the payload (base64 text), exactly as the
/// remote listing carries it. Use the codec to turn it into a [`crate::Value`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// Full transport key, including a trailing separator for directories.
    pub key: String,
    /// Wire-form payload, or `None` when the key holds no value.
    pub value: Option<Bytes>,
    /// Store revision of the last write to this key. Used for CAS.
    pub modify_index: u64,
    /// Opaque client flags stored alongside the value.
    pub flags: u64,
}

impl Entry {
    /// Create an entry carrying a wire-form value.
    pub fn new(key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Entry {
            key: key.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Create an entry with no value (a bare key or a directory marker).
    pub fn empty(key: impl Into<String>) -> Self {
        Entry {
            key: key.into(),
            ..Default::default()
        }
    }

    /// A directory marker: the key ends with the separator and there is no value.
    pub fn is_directory(&self, separator: char) -> bool {
        self.key.ends_with(separator) && self.value.is_none()
    }
}

/// Options for a single `put`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutOptions {
    /// Only write if the key's modify index equals this value.
    /// `Some(0)` means "only if the key does not exist yet".
    #[serde(default)]
    pub cas: Option<u64>,
    /// Client flags to store with the value.
    #[serde(default)]
    pub flags: Option<u64>,
}

impl PutOptions {
    /// Options for a conditional write.
    pub fn cas(index: u64) -> Self {
        PutOptions {
            cas: Some(index),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_marker_detection() {
        assert!(Entry::empty("app/cache/").is_directory('/'));
        assert!(!Entry::empty("app/cache").is_directory('/'));
        assert!(!Entry::new("app/cache/", "eA==").is_directory('/'));
        assert!(Entry::empty("app.cache.").is_directory('.'));
    }

    #[test]
    fn cas_options() {
        let opts = PutOptions::cas(7);
        assert_eq!(opts.cas, Some(7));
        assert_eq!(opts.flags, None);
        assert_eq!(PutOptions::default().cas, None);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: PutOptions = serde_json::from_str(r#"{"cas": 3}"#).unwrap();
        assert_eq!(opts, PutOptions::cas(3));
    }
}
