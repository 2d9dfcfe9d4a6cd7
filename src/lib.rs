//! # map2xml
//!
//! Encode dynamic JSON-like value trees as XML, and forward MQTT message
//! payloads to a database entry point in that form.
//!
//! ## Conventions
//!
//! A [`Value`] tree (usually a parsed JSON object) maps onto markup like this:
//!
//! - **Attributes**: keys starting with `-` become attributes of the enclosing
//!   element, with the `-` removed
//! - **Inline text**: a `#text` key that is the element's only non-attribute
//!   key becomes its text content
//! - **Children**: all other keys become child elements, written in key order
//! - **Arrays**: an array value repeats its key's element once per entry,
//!   without a wrapping list element
//! - **Empty values**: `null`, empty strings and attribute-only objects become
//!   empty elements (`<tag/>`, or `<tag></tag>` when configured)
//!
//! Output depends only on the tree's contents and the options: attribute and
//! child order is derived by sorting key names, never from insertion order.
//!
//! ## Quick Start
//!
//! ```rust
//! use map2xml::{from_json_str, to_string, to_string_with_root};
//!
//! let reading = from_json_str(r#"{"temperature": 23.5, "-unit": "C"}"#).unwrap();
//! assert_eq!(
//!     to_string_with_root(&reading, "reading").unwrap(),
//!     r#"<reading unit="C"><temperature>23.5</temperature></reading>"#
//! );
//!
//! // Without an explicit root, a lone array of objects names the root itself
//! let batch = from_json_str(r#"{"items": [{"a": 1}, {"a": 2}]}"#).unwrap();
//! assert_eq!(
//!     to_string(&batch).unwrap(),
//!     "<items><a>1</a></items><items><a>2</a></items>"
//! );
//! ```
//!
//! ### Encoding Rust types
//!
//! ```rust
//! use map2xml::{to_string_with_root, to_value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(to_string_with_root(&value, "point").unwrap(), "<point><x>1</x><y>2</y></point>");
//! ```
//!
//! ## Errors
//!
//! The structural errors are an attribute key holding an array, object or
//! null ([`Error::InvalidAttributeKind`]) and a bare `-` key with no attribute
//! name ([`Error::EmptyAttributeName`]). By default either aborts the whole
//! document wherever it occurs; [`ErrorMode::BestEffort`] instead drops the
//! offending nested element and keeps its siblings.
//!
//! ## Bridge
//!
//! [`bridge::Bridge`] applies the encoder to inbound `(topic, payload)`
//! messages and hands the result to a [`bridge::Sink`]; [`config::BridgeConfig`]
//! loads its settings from a JSON file and [`logging::init`] routes the
//! process log to stderr or a rolling file.

pub mod bridge;
pub mod config;
pub mod encoder;
pub mod error;
mod format;
pub mod logging;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use encoder::Encoder;
pub use error::{Error, Result};
pub use format::escape;
pub use map::Map;
pub use options::{EncoderOptions, ErrorMode, FloatMode};
pub use ser::ValueSerializer;
pub use value::Value;

use serde::Serialize;
use std::io;

/// Encode a document with default options, inferring the root tag.
///
/// # Examples
///
/// ```rust
/// use map2xml::{to_string, value};
///
/// let tree = value!({ "items": [1, 2, 3] });
/// assert_eq!(
///     to_string(&tree).unwrap(),
///     "<doc><items>1</items><items>2</items><items>3</items></doc>"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if `value` is not an object or an attribute holds a non-scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, EncoderOptions::default(), None)
}

/// Encode a document with default options under the explicit root tag `root`.
///
/// # Examples
///
/// ```rust
/// use map2xml::{to_string_with_root, value};
///
/// let note = value!({ "#text": "Hello", "-id": "7" });
/// assert_eq!(to_string_with_root(&note, "note").unwrap(), r#"<note id="7">Hello</note>"#);
/// ```
///
/// # Errors
///
/// Returns an error if `value` is not an object or an attribute holds a non-scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_root(value: &Value, root: &str) -> Result<String> {
    to_string_with_options(value, EncoderOptions::default(), Some(root))
}

/// Encode a document with custom options; `root` of `None` infers the root tag.
///
/// # Examples
///
/// ```rust
/// use map2xml::{to_string_with_options, value, EncoderOptions};
///
/// let tree = value!({ "flag": null });
/// let options = EncoderOptions::new()
///     .with_declaration(true)
///     .with_empty_element_long_form(true);
/// assert_eq!(
///     to_string_with_options(&tree, options, None).unwrap(),
///     r#"<?xml version="1.0" encoding="utf-8"?><doc><flag></flag></doc>"#
/// );
/// ```
///
/// # Errors
///
/// Returns an error if `value` is not an object or an attribute holds a non-scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(
    value: &Value,
    options: EncoderOptions,
    root: Option<&str>,
) -> Result<String> {
    let mut encoder = Encoder::new(options);
    encoder.encode_document(value, root)?;
    Ok(encoder.into_inner())
}

/// Encode a document with default options into UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if `value` is not an object or an attribute holds a non-scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(value: &Value) -> Result<Vec<u8>> {
    to_string(value).map(String::into_bytes)
}

/// Encode a document with custom options into UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if `value` is not an object or an attribute holds a non-scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options(
    value: &Value,
    options: EncoderOptions,
    root: Option<&str>,
) -> Result<Vec<u8>> {
    to_string_with_options(value, options, root).map(String::into_bytes)
}

/// Encode a document with default options to a writer.
///
/// The document is built completely before anything is written.
///
/// # Examples
///
/// ```rust
/// use map2xml::{to_writer, value};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &value!({ "a": 1 })).unwrap();
/// assert_eq!(buffer, b"<doc><a>1</a></doc>");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, value, EncoderOptions::default(), None)
}

/// Encode a document with custom options to a writer.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(
    mut writer: W,
    value: &Value,
    options: EncoderOptions,
    root: Option<&str>,
) -> Result<()>
where
    W: io::Write,
{
    let xml = to_string_with_options(value, options, root)?;
    writer
        .write_all(xml.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use map2xml::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if a map key is not a scalar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Parse a JSON document into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::InvalidPayload`] if `s` is not valid JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_json_str(s: &str) -> Result<Value> {
    serde_json::from_str(s).map_err(Error::invalid_payload)
}

/// Parse a JSON document from bytes into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::InvalidPayload`] if the bytes are not valid UTF-8 JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_json_slice(v: &[u8]) -> Result<Value> {
    serde_json::from_slice(v).map_err(Error::invalid_payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Reading {
        #[serde(rename = "-unit")]
        unit: String,
        temperature: f64,
    }

    #[test]
    fn test_struct_to_xml() {
        let value = to_value(&Reading {
            unit: "C".to_string(),
            temperature: 23.5,
        })
        .unwrap();
        assert_eq!(
            to_string_with_root(&value, "reading").unwrap(),
            r#"<reading unit="C"><temperature>23.5</temperature></reading>"#
        );
    }

    #[test]
    fn test_to_vec_matches_string() {
        let value = from_json_str(r#"{"a": "x & y"}"#).unwrap();
        assert_eq!(
            to_vec(&value).unwrap(),
            to_string(&value).unwrap().into_bytes()
        );
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            from_json_str("{"),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(
            from_json_slice(b"\xff"),
            Err(Error::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_writer_with_options() {
        let value = from_json_str(r#"{"v": 1.5}"#).unwrap();
        let mut out = Vec::new();
        to_writer_with_options(
            &mut out,
            &value,
            EncoderOptions::new().with_float_mode(FloatMode::Scientific),
            Some("m"),
        )
        .unwrap();
        assert_eq!(out, b"<m><v>1.500000e+00</v></m>");
    }
}
