//! # kvtree-http
//!
//! A blocking [`KvTransport`] for key-value stores that speak the Consul
//! style `/v1/kv/` HTTP API:
//!
//! - `get(key)` → `GET /v1/kv/{key}` (404 means absent)
//! - `list(prefix, true)` → `GET /v1/kv/{prefix}?recurse`
//! - `list(prefix, false)` → `GET /v1/kv/{prefix}?keys&separator={sep}`
//! - `put(key, payload, opts)` → `PUT /v1/kv/{key}?cas=..&flags=..` with the raw payload
//! - `delete(key, recursive)` → `DELETE /v1/kv/{key}[?recurse]`
//!
//! Listed values arrive base64 encoded and are passed on in that form.
//!
//! ```ignore
//! use kvtree_core::Config;
//! use kvtree_http::HttpTransport;
//! use kvtree_projector::KvTreeClient;
//!
//! let config = Config::default().with_env(|k| std::env::var(k).ok());
//! let mut client = KvTreeClient::new(HttpTransport::new(&config)?, config);
//! let app = client.read_nested("app")?;
//! ```
//!
//! [`KvTransport`]: kvtree_core::KvTransport

pub mod error;
mod transport;

pub use error::Error;
pub use transport::{HttpTransport, TOKEN_HEADER};
