//! The wire transform.
//!
//! Remote listings are JSON documents, which cannot carry arbitrary bytes,
//! so stored payloads come back base64 encoded. This module is the only
//! place that knows about it.

use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode a payload into its wire form.
pub fn to_wire(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

/// Decode a wire-form value.
pub fn from_wire(wire: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(wire)
}

/// Decode a wire-form value, taking the bytes verbatim when they are not
/// valid base64.
///
/// Some transports hand back raw payloads; this keeps decoding total.
pub fn from_wire_or_verbatim(wire: &[u8]) -> Cow<'_, [u8]> {
    match from_wire(wire) {
        Ok(payload) => Cow::Owned(payload),
        Err(_) => Cow::Borrowed(wire),
    }
}
