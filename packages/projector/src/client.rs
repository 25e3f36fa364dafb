//! The client: projector + codec over a KV transport.

use kvtree_codec::{from_value, to_value, ValueCodec};
use kvtree_core::{Codec, Config, Error, KvTransport, Path, PutOptions, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{flatten, fold_entries, list_keys};

/// Reads and writes nested values through a [`KvTransport`].
///
/// Namespaces are given as keys (`"app/db"`); they are normalized with the
/// configured separator before use.
///
/// # Example
///
/// ```rust
/// use kvtree_core::{Config, Value};
/// use kvtree_memory::MemoryTransport;
/// use kvtree_projector::KvTreeClient;
///
/// let mut client = KvTreeClient::new(MemoryTransport::new(), Config::default());
///
/// let config = Value::from_iter([("db", Value::from_iter([("port", 5432)]))]);
/// client.write_nested("app", &config).unwrap();
///
/// assert_eq!(client.read_nested("app").unwrap(), Some(config));
/// ```
pub struct KvTreeClient<T, C = ValueCodec> {
    transport: T,
    codec: C,
    config: Config,
}

impl<T: KvTransport> KvTreeClient<T> {
    /// Create a client using the default [`ValueCodec`].
    pub fn new(transport: T, config: Config) -> Self {
        Self::with_codec(transport, ValueCodec, config)
    }
}

impl<T: KvTransport, C: Codec> KvTreeClient<T, C> {
    /// Create a client with a custom codec.
    pub fn with_codec(transport: T, codec: C, config: Config) -> Self {
        Self {
            transport,
            codec,
            config,
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the client, returning the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    fn key(&self, namespace: &str) -> String {
        Path::parse_with(namespace, self.config.separator).to_key(self.config.separator)
    }

    /// Read everything under `namespace` as one nested value.
    ///
    /// Lists recursively, decodes each entry and folds the listing. Returns
    /// `None` if nothing is stored under the namespace.
    pub fn read_nested(&mut self, namespace: &str) -> Result<Option<Value>, Error> {
        let key = self.key(namespace);
        let entries = self.transport.list(&key, true)?;
        debug!(namespace = %key, entries = entries.len(), "folding listing");
        Ok(fold_entries(
            &key,
            entries,
            &self.codec,
            self.config.separator,
        ))
    }

    /// Write `value` under `namespace`, one `put` per flattened key.
    ///
    /// Keys are written in flatten order. The first rejected `put` stops the
    /// write with [`Error::WriteRejected`]; keys written before it stay
    /// written. There is no retry and no rollback.
    ///
    /// Returns the number of keys written.
    pub fn write_nested(&mut self, namespace: &str, value: &Value) -> Result<usize, Error> {
        let separator = self.config.separator;
        let flat = flatten(namespace, value, separator)?;

        if flat.iter().any(|entry| entry.path.is_empty()) {
            return Err(Error::InvalidPath {
                message: format!("cannot store a {} at the root namespace", value.kind()),
            });
        }

        let options = PutOptions::default();
        for (written, entry) in flat.iter().enumerate() {
            let key = entry.key(separator);
            let payload = self.codec.encode(&entry.value);
            debug!(key = %key, bytes = payload.len(), "put");

            if !self.transport.put(&key, &payload, &options)? {
                warn!(key = %key, written, "put rejected, aborting bulk write");
                return Err(Error::WriteRejected { key, written });
            }
        }

        Ok(flat.len())
    }

    /// Read a single key.
    ///
    /// When nothing is stored at the key itself, a directory marker at the
    /// key reads back as `Null`, mirroring `put_value(key, &Value::Null, ..)`.
    pub fn get_value(&mut self, key: &str) -> Result<Option<Value>, Error> {
        let path = Path::parse_with(key, self.config.separator);
        let mut entry = self.transport.get(&path.to_key(self.config.separator))?;
        if entry.is_none() && !path.is_empty() {
            entry = self
                .transport
                .get(&path.to_directory_key(self.config.separator))?;
        }
        Ok(entry.map(|entry| self.codec.decode(entry.value.as_deref())))
    }

    /// Write a single key; composites are stored as one JSON value.
    ///
    /// `Null` writes a directory marker. Use `options.cas` for a conditional
    /// write; `Ok(false)` means the store refused it.
    pub fn put_value(
        &mut self,
        key: &str,
        value: &Value,
        options: &PutOptions,
    ) -> Result<bool, Error> {
        let path = Path::parse_with(key, self.config.separator);
        if path.is_empty() {
            return Err(Error::InvalidPath {
                message: "cannot store a value at the root namespace".to_string(),
            });
        }
        let key = if value.is_null() {
            path.to_directory_key(self.config.separator)
        } else {
            path.to_key(self.config.separator)
        };
        let payload = self.codec.encode(value);
        self.transport.put(&key, &payload, options)
    }

    /// Delete `namespace`; with `recursive`, everything below it too.
    pub fn delete(&mut self, namespace: &str, recursive: bool) -> Result<bool, Error> {
        let path = Path::parse_with(namespace, self.config.separator);
        if !recursive {
            return self.transport.delete(&path.to_key(self.config.separator), false);
        }
        if path.is_empty() {
            return self.transport.delete("", true);
        }
        // The directory key keeps a prefix delete from reaching sibling
        // namespaces ("app" would also match "apple").
        let children = self
            .transport
            .delete(&path.to_directory_key(self.config.separator), true)?;
        let own = self.transport.delete(&path.to_key(self.config.separator), false)?;
        Ok(children && own)
    }

    /// Immediate child segments of `namespace`, filtering directory markers
    /// as configured.
    pub fn list_keys(&mut self, namespace: &str) -> Result<Vec<String>, Error> {
        let skip_directories = self.config.skip_directories;
        self.list_keys_with(namespace, skip_directories)
    }

    /// Immediate child segments of `namespace`.
    pub fn list_keys_with(
        &mut self,
        namespace: &str,
        skip_directories: bool,
    ) -> Result<Vec<String>, Error> {
        let key = self.key(namespace);
        let entries = self.transport.list(&key, true)?;
        Ok(list_keys(
            &key,
            &entries,
            skip_directories,
            self.config.separator,
        ))
    }

    /// Read `namespace` into a Rust type.
    pub fn read_as<D: DeserializeOwned>(&mut self, namespace: &str) -> Result<Option<D>, Error> {
        self.read_nested(namespace)?
            .map(from_value::<D>)
            .transpose()
    }

    /// Write a Rust type under `namespace`.
    pub fn write_as<S: Serialize>(&mut self, namespace: &str, data: &S) -> Result<usize, Error> {
        let value = to_value(data)?;
        self.write_nested(namespace, &value)
    }
}
