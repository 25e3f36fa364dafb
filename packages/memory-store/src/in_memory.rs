//! In-memory transport.

use std::collections::BTreeMap;

use bytes::Bytes;
use kvtree_codec::wire;
use kvtree_core::{Entry, Error, KvTransport, PutOptions, DEFAULT_SEPARATOR};
use tracing::debug;

#[derive(Clone, Debug)]
struct Stored {
    payload: Bytes,
    modify_index: u64,
    flags: u64,
}

/// A key-value store in a `BTreeMap`.
///
/// Listing order is key order, as a real store lists. Stored payloads come
/// back in their wire (base64) form, and empty payloads come back as no
/// value at all.
///
/// # Example
///
/// ```rust
/// use kvtree_core::{KvTransport, PutOptions};
/// use kvtree_memory::MemoryTransport;
///
/// let mut store = MemoryTransport::new();
/// store.put("app/name", b"demo", &PutOptions::default()).unwrap();
///
/// let entry = store.get("app/name").unwrap().unwrap();
/// assert_eq!(entry.value.as_deref(), Some(&b"ZGVtbw=="[..]));
/// ```
#[derive(Debug)]
pub struct MemoryTransport {
    data: BTreeMap<String, Stored>,
    separator: char,
    index: u64,
    puts_remaining: Option<usize>,
    unavailable: bool,
}

impl MemoryTransport {
    /// Create an empty store using `/` to roll up shallow listings.
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Create an empty store with a custom separator.
    pub fn with_separator(separator: char) -> Self {
        Self {
            data: BTreeMap::new(),
            separator,
            index: 0,
            puts_remaining: None,
            unavailable: false,
        }
    }

    /// Accept `count` more puts, then refuse every put with `Ok(false)`.
    pub fn reject_puts_after(&mut self, count: usize) {
        self.puts_remaining = Some(count);
    }

    /// Make every call fail with a transport error (or recover).
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Every stored key, in order.
    pub fn keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// The raw (not wire-encoded) payload stored at `key`.
    pub fn payload(&self, key: &str) -> Option<&[u8]> {
        self.data.get(key).map(|stored| stored.payload.as_ref())
    }

    fn check_available(&self) -> Result<(), Error> {
        if self.unavailable {
            return Err(Error::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "store unavailable",
            )));
        }
        Ok(())
    }

    fn entry(key: &str, stored: &Stored) -> Entry {
        Entry {
            key: key.to_string(),
            value: if stored.payload.is_empty() {
                None
            } else {
                Some(Bytes::from(wire::to_wire(&stored.payload)))
            },
            modify_index: stored.modify_index,
            flags: stored.flags,
        }
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl KvTransport for MemoryTransport {
    fn get(&mut self, key: &str) -> Result<Option<Entry>, Error> {
        self.check_available()?;
        Ok(self.data.get(key).map(|stored| Self::entry(key, stored)))
    }

    fn list(&mut self, prefix: &str, recursive: bool) -> Result<Vec<Entry>, Error> {
        self.check_available()?;
        let matching = self
            .data
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix));

        if recursive {
            return Ok(matching
                .map(|(key, stored)| Self::entry(key, stored))
                .collect());
        }

        // Roll everything deeper than one level up into "<child><sep>".
        let mut entries: Vec<Entry> = Vec::new();
        for (key, stored) in matching {
            let rest = &key[prefix.len()..];
            match rest.find(self.separator) {
                Some(at) if at + self.separator.len_utf8() < rest.len() => {
                    let rolled = &key[..prefix.len() + at + self.separator.len_utf8()];
                    if entries.last().map(|e| e.key.as_str()) != Some(rolled) {
                        entries.push(Entry::empty(rolled));
                    }
                }
                _ => entries.push(Self::entry(key, stored)),
            }
        }
        Ok(entries)
    }

    fn put(&mut self, key: &str, payload: &[u8], options: &PutOptions) -> Result<bool, Error> {
        self.check_available()?;

        if let Some(remaining) = self.puts_remaining.as_mut() {
            if *remaining == 0 {
                debug!(key = %key, "refusing put");
                return Ok(false);
            }
            *remaining -= 1;
        }

        if let Some(cas) = options.cas {
            let current = self.data.get(key).map(|stored| stored.modify_index);
            let allowed = match current {
                None => cas == 0,
                Some(index) => cas == index,
            };
            if !allowed {
                debug!(key = %key, cas, ?current, "cas mismatch");
                return Ok(false);
            }
        }

        self.index += 1;
        self.data.insert(
            key.to_string(),
            Stored {
                payload: Bytes::copy_from_slice(payload),
                modify_index: self.index,
                flags: options.flags.unwrap_or(0),
            },
        );
        Ok(true)
    }

    fn delete(&mut self, key: &str, recursive: bool) -> Result<bool, Error> {
        self.check_available()?;
        if recursive {
            self.data.retain(|stored, _| !stored.starts_with(key));
        } else {
            self.data.remove(key);
        }
        Ok(true)
    }
}
