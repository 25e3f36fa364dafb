//! Core kvtree types
//!
//! The vocabulary shared by every kvtree layer:
//! - `Path`: ordered segments rendered with a configurable separator
//! - `Value`: a configuration tree (the nested side of the projection)
//! - `Entry`: a stored key as the remote store lists it (the flat side)
//! - `Config`: explicit client configuration
//! - `KvTransport`: the seam to the remote store
//! - `Codec`: the seam between `Value` and stored payloads
//!
//! # Example
//!
//! ```rust
//! use kvtree_core::{KvTransport, Entry, Error};
//!
//! fn fetch(store: &mut dyn KvTransport) -> Result<Option<Entry>, Error> {
//!     store.get("app/db/host")
//! }
//! ```

pub use bytes::Bytes;

mod config;
mod entry;
mod error;
mod path;
mod traits;
mod value;

pub use config::{Config, ENV_ADDRESS, ENV_TOKEN};
pub use entry::{Entry, PutOptions};
pub use error::Error;
pub use path::{Path, PathError, DEFAULT_SEPARATOR};
pub use traits::{Codec, KvTransport};
pub use value::Value;
