//! Value Codec for kvtree
//!
//! This layer turns `Value`s into the bytes a key-value store holds and back:
//! - `ValueCodec`: canonical text payloads, decoded with a JSON-then-string policy
//! - `wire`: the base64 transform stored values travel in
//! - `to_value` / `from_value`: typed access through serde
//!
//! # Example
//!
//! ```rust
//! use kvtree_codec::{wire, Codec, ValueCodec};
//! use kvtree_core::Value;
//!
//! let codec = ValueCodec;
//!
//! let payload = codec.encode(&Value::from(5432));
//! assert_eq!(&payload[..], b"5432");
//!
//! // Listings carry base64; decode undoes that first
//! let listed = wire::to_wire(&payload);
//! assert_eq!(codec.decode(Some(listed.as_bytes())), Value::from(5432));
//! ```

pub use bytes::Bytes;

mod codec;
mod convert;
pub mod wire;

pub use codec::{decode_payload, ValueCodec};
pub use convert::{from_value, json_to_value, to_value, value_to_json};

// Re-export core types for convenience
pub use kvtree_core::{Codec, Error, Value};
