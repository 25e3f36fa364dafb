//! In-memory KV transport for kvtree.
//!
//! Behaves like a remote hierarchical key-value store held in a `BTreeMap`:
//! prefix listings, CAS by modify index, base64 values in listings. It can
//! also be told to refuse writes or fail outright, for exercising the
//! partial-failure paths of a bulk write.

mod in_memory;

pub use in_memory::MemoryTransport;
