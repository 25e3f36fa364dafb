//! The value codec.

use bytes::Bytes;
use kvtree_core::{Codec, Value};

use crate::convert::{json_to_value, value_to_json};
use crate::wire;

/// The codec kvtree uses for every stored value.
///
/// Encoding writes canonical text:
/// - scalars as their textual form (`true`, `5432`, `2.5`, `hello`)
/// - arrays of strings and numbers, and any other composite, as JSON
/// - `Null` as an empty payload (it is only ever written as a directory marker)
///
/// A string whose text would itself read back as JSON (`"5432"`, `"true"`,
/// `""`) is written as a JSON string literal so it decodes to a string again.
///
/// Decoding undoes the base64 wire transform, then tries JSON and falls back
/// to the text as a plain string. It never fails.
///
/// # Example
///
/// ```rust
/// use kvtree_codec::{decode_payload, Codec, ValueCodec};
/// use kvtree_core::Value;
///
/// let codec = ValueCodec;
/// assert_eq!(&codec.encode(&Value::from("x"))[..], b"x");
/// assert_eq!(&codec.encode(&Value::from(vec!["a", "b"]))[..], br#"["a","b"]"#);
///
/// assert_eq!(decode_payload(b"{not json"), Value::from("{not json"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueCodec;

impl Codec for ValueCodec {
    fn encode(&self, value: &Value) -> Bytes {
        match value {
            Value::Null => Bytes::new(),
            Value::Bool(b) => Bytes::from(b.to_string()),
            Value::Integer(i) => Bytes::from(i.to_string()),
            Value::Float(f) => Bytes::from(float_text(*f)),
            Value::String(s) => Bytes::from(string_text(s)),
            Value::Array(_) | Value::Map(_) => {
                Bytes::from(value_to_json(value.clone()).to_string())
            }
        }
    }

    fn decode(&self, wire: Option<&[u8]>) -> Value {
        match wire {
            None => Value::Null,
            Some(wire) => decode_payload(&wire::from_wire_or_verbatim(wire)),
        }
    }
}

/// Decode a payload that has already left its wire form.
///
/// Two stages: parse as JSON; if that fails, the (lossily UTF-8 decoded)
/// text is the value.
pub fn decode_payload(payload: &[u8]) -> Value {
    let text = String::from_utf8_lossy(payload);
    match parse_structured(&text) {
        Some(value) => value,
        None => Value::String(text.into_owned()),
    }
}

fn parse_structured(text: &str) -> Option<Value> {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .map(json_to_value)
}

fn float_text(f: f64) -> String {
    // serde_json keeps a fractional part on whole floats ("1.0"), so the
    // value reads back as a float rather than an integer.
    match serde_json::Number::from_f64(f) {
        Some(n) => n.to_string(),
        None => f.to_string(),
    }
}

fn string_text(s: &str) -> String {
    if s.is_empty() || parse_structured(s).is_some() {
        serde_json::Value::String(s.to_string()).to_string()
    } else {
        s.to_string()
    }
}
