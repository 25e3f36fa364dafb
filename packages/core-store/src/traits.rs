//! Core traits: KvTransport, Codec.

use bytes::Bytes;

use crate::{Entry, Error, PutOptions, Value};

/// A remote hierarchical key-value store.
///
/// Keys are transport keys: segments joined with the configured separator,
/// with a trailing separator on directory markers. Values travel as bytes;
/// entries returned from `get` and `list` carry the wire (base64) form.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn KvTransport>`.
pub trait KvTransport: Send + Sync {
    /// Fetch a single key.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - The key does not exist.
    /// * `Ok(Some(entry))` - The stored entry.
    /// * `Err(Error)` - The request failed.
    fn get(&mut self, key: &str) -> Result<Option<Entry>, Error>;

    /// List entries whose key starts with `prefix`.
    ///
    /// With `recursive` every matching key is returned. Without it only keys
    /// one level below `prefix` are returned; deeper keys are rolled up into
    /// a single directory key (trailing separator, no value).
    fn list(&mut self, prefix: &str, recursive: bool) -> Result<Vec<Entry>, Error>;

    /// Store `payload` at `key`.
    ///
    /// Returns `Ok(false)` when the store refused the write, e.g. a failed
    /// CAS check.
    fn put(&mut self, key: &str, payload: &[u8], options: &PutOptions) -> Result<bool, Error>;

    /// Delete `key`, or every key under it when `recursive`.
    fn delete(&mut self, key: &str, recursive: bool) -> Result<bool, Error>;
}

/// Codec for converting between Value and stored payloads.
///
/// Unlike a transport, a codec cannot fail: anything that is not structured
/// text decodes to a string, and every `Value` has an encoding.
pub trait Codec: Send + Sync {
    /// Encode a value into the payload written by `put`.
    fn encode(&self, value: &Value) -> Bytes;

    /// Decode the wire form carried by a listed entry.
    ///
    /// `None` (a key without a value) decodes to `Value::Null`.
    fn decode(&self, wire: Option<&[u8]>) -> Value;
}

// Blanket implementations for references and boxes

impl<T: KvTransport + ?Sized> KvTransport for &mut T {
    fn get(&mut self, key: &str) -> Result<Option<Entry>, Error> {
        (**self).get(key)
    }

    fn list(&mut self, prefix: &str, recursive: bool) -> Result<Vec<Entry>, Error> {
        (**self).list(prefix, recursive)
    }

    fn put(&mut self, key: &str, payload: &[u8], options: &PutOptions) -> Result<bool, Error> {
        (**self).put(key, payload, options)
    }

    fn delete(&mut self, key: &str, recursive: bool) -> Result<bool, Error> {
        (**self).delete(key, recursive)
    }
}

impl<T: KvTransport + ?Sized> KvTransport for Box<T> {
    fn get(&mut self, key: &str) -> Result<Option<Entry>, Error> {
        self.as_mut().get(key)
    }

    fn list(&mut self, prefix: &str, recursive: bool) -> Result<Vec<Entry>, Error> {
        self.as_mut().list(prefix, recursive)
    }

    fn put(&mut self, key: &str, payload: &[u8], options: &PutOptions) -> Result<bool, Error> {
        self.as_mut().put(key, payload, options)
    }

    fn delete(&mut self, key: &str, recursive: bool) -> Result<bool, Error> {
        self.as_mut().delete(key, recursive)
    }
}

impl<T: Codec + ?Sized> Codec for Box<T> {
    fn encode(&self, value: &Value) -> Bytes {
        self.as_ref().encode(value)
    }

    fn decode(&self, wire: Option<&[u8]>) -> Value {
        self.as_ref().decode(wire)
    }
}
