//! Hierarchy Projector for kvtree
//!
//! Maps nested configuration values onto the flat, separator-delimited key
//! space of a remote key-value store and back:
//! - [`flatten`]: nested value -> ordered `(path, value)` pairs, for bulk write
//! - [`fold`] / [`fold_entries`]: recursive listing -> one nested value
//! - [`list_keys`]: immediate child segments of a namespace
//! - [`KvTreeClient`]: the above wired to a codec and a [`KvTransport`]
//!
//! Flatten and fold are pure and synchronous; every I/O call happens in the
//! transport. A bulk write is not transactional: if a `put` fails part way,
//! the keys written before it remain.
//!
//! [`KvTransport`]: kvtree_core::KvTransport

mod client;
mod flatten;
mod fold;
mod keys;

pub use client::KvTreeClient;
pub use flatten::{flatten, FlatEntry};
pub use fold::{fold, fold_entries};
pub use keys::list_keys;

// Re-export core types for convenience
pub use kvtree_codec::ValueCodec;
pub use kvtree_core::{Codec, Config, Entry, Error, KvTransport, Path, PutOptions, Value};
