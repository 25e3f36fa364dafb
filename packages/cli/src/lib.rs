//! kvtree command-line front end.
//!
//! The binary is a thin layer over [`KvTreeClient`]: [`settings`] resolves a
//! [`Config`] from file, environment and flags, and [`commands`] runs one
//! operation against any [`KvTransport`].
//!
//! [`KvTreeClient`]: kvtree_projector::KvTreeClient
//! [`Config`]: kvtree_core::Config
//! [`KvTransport`]: kvtree_core::KvTransport

pub mod commands;
pub mod error;
pub mod settings;

pub use error::Error;
