//! kvtree: nested configuration values over a flat key-value store.
//!
//! A remote store keeps flat, separator-delimited keys (`app/db/host`). kvtree
//! lets a client treat a namespace of such keys as one nested value: write a
//! tree with one `put` per leaf, read it back with a single recursive listing.
//!
//! The pieces live in separate crates, re-exported here:
//! - [`kvtree_core`]: `Path`, `Value`, `Entry`, `Config`, errors, the `KvTransport` and `Codec` traits
//! - [`kvtree_codec`]: how values become payload bytes and back
//! - [`kvtree_projector`]: flatten, fold, key listing and the [`KvTreeClient`]
//! - [`http`] (feature `http`, on by default): a blocking HTTP transport
//! - [`memory`] (feature `memory`): an in-memory transport for tests
//!
//! # Example
//!
//! ```ignore
//! use kvtree::{Config, KvTreeClient, Value};
//! use kvtree::http::HttpTransport;
//!
//! let config = Config::default();
//! let mut client = KvTreeClient::new(HttpTransport::new(&config)?, config);
//!
//! let db = Value::from_iter([("host", Value::from("x")), ("port", Value::from(5432))]);
//! client.write_nested("app/db", &db)?;
//! assert_eq!(client.read_nested("app/db")?, Some(db));
//! ```

pub use kvtree_codec;
pub use kvtree_core;
pub use kvtree_projector;

#[cfg(feature = "http")]
pub use kvtree_http as http;

#[cfg(feature = "memory")]
pub use kvtree_memory as memory;

pub use kvtree_codec::{from_value, to_value, ValueCodec};
pub use kvtree_core::{Codec, Config, Entry, Error, KvTransport, Path, PutOptions, Value};
pub use kvtree_projector::{flatten, fold, fold_entries, list_keys, KvTreeClient};
