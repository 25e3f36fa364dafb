//! The operations behind each subcommand.
//!
//! Every function takes the client and its output stream explicitly, so the
//! binary and the tests run the same code against different transports.

use std::io::{Read, Write};

use kvtree_codec::{json_to_value, value_to_json};
use kvtree_core::KvTransport;
use kvtree_projector::KvTreeClient;
use tracing::info;

use crate::Error;

/// Print the value stored under `namespace` as pretty JSON.
pub fn get<T: KvTransport>(
    client: &mut KvTreeClient<T>,
    namespace: &str,
    out: &mut impl Write,
) -> Result<(), Error> {
    let value = client
        .read_nested(namespace)?
        .ok_or_else(|| Error::NotFound {
            namespace: namespace.to_string(),
        })?;
    let json = serde_json::to_string_pretty(&value_to_json(value))?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Read a JSON document from `input` and write it under `namespace`.
pub fn put<T: KvTransport>(
    client: &mut KvTreeClient<T>,
    namespace: &str,
    input: impl Read,
    out: &mut impl Write,
) -> Result<usize, Error> {
    let json: serde_json::Value = serde_json::from_reader(input)?;
    let written = client.write_nested(namespace, &json_to_value(json))?;
    info!(namespace, written, "wrote keys");
    writeln!(out, "wrote {} keys under {}", written, namespace)?;
    Ok(written)
}

/// Print the immediate children of `namespace`, one per line.
pub fn keys<T: KvTransport>(
    client: &mut KvTreeClient<T>,
    namespace: &str,
    include_directories: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let keys = if include_directories {
        client.list_keys_with(namespace, false)?
    } else {
        client.list_keys(namespace)?
    };
    for key in keys {
        writeln!(out, "{}", key)?;
    }
    Ok(())
}

/// Delete `namespace`, and with `recursive` everything below it.
pub fn delete<T: KvTransport>(
    client: &mut KvTreeClient<T>,
    namespace: &str,
    recursive: bool,
) -> Result<(), Error> {
    if client.delete(namespace, recursive)? {
        Ok(())
    } else {
        Err(Error::DeleteRefused {
            namespace: namespace.to_string(),
        })
    }
}
