//! XML encoding of value trees.
//!
//! This module provides the [`Encoder`], which turns a [`Value`] tree into
//! markup following a small set of key conventions:
//!
//! - **Attributes**: an object key starting with `-` becomes an attribute of
//!   the element rendered for that object (`"-id": 7` → `id="7"`)
//! - **Inline text**: a `#text` key that is the only non-attribute key becomes
//!   the element's text content
//! - **Children**: every other key becomes a child element; an array value
//!   repeats the element once per array element, without a wrapper
//! - **Ordering**: attributes and children are written sorted by name, so the
//!   output depends only on the tree's contents
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use map2xml::{from_json_str, to_string, to_string_with_root};
//!
//! let note = from_json_str(r##"{"#text": "Hello", "-id": "7"}"##).unwrap();
//! assert_eq!(to_string_with_root(&note, "note").unwrap(), r#"<note id="7">Hello</note>"#);
//!
//! let items = from_json_str(r#"{"items": [1, 2, 3]}"#).unwrap();
//! assert_eq!(
//!     to_string(&items).unwrap(),
//!     "<doc><items>1</items><items>2</items><items>3</items></doc>"
//! );
//! ```
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use map2xml::{value, Encoder, EncoderOptions};
//!
//! let mut encoder = Encoder::new(EncoderOptions::new());
//! encoder.encode_element("flag", &value!(null)).unwrap();
//! encoder.encode_element("count", &value!(3)).unwrap();
//! assert_eq!(encoder.into_inner(), "<flag/><count>3</count>");
//! ```

use crate::format::escape_into;
use crate::{EncoderOptions, Error, ErrorMode, Map, Result, Value};
use tracing::warn;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const UNKNOWN_MARKER: &str = "UNKNOWN";
const TEXT_KEY: &str = "#text";
const ATTRIBUTE_PREFIX: char = '-';

/// The XML encoder.
///
/// Appends markup to an internal buffer; [`Encoder::into_inner`] returns it.
/// After an error the buffer content is unspecified and should be discarded.
pub struct Encoder {
    output: String,
    options: EncoderOptions,
}

impl Encoder {
    pub fn new(options: EncoderOptions) -> Self {
        Encoder {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Encodes a whole document rooted at `value`, which must be an object.
    ///
    /// With an explicit `root`, the object is encoded under that tag. Without
    /// one, a single-key object whose value is an object, or a non-empty
    /// array of objects, is encoded using the key itself as the tag; every
    /// other object is wrapped in the configured default root tag.
    ///
    /// # Errors
    ///
    /// [`Error::RootNotObject`] when `value` is not an object, and any error
    /// raised while encoding its elements.
    pub fn encode_document(&mut self, value: &Value, root: Option<&str>) -> Result<()> {
        let map = value
            .as_object()
            .ok_or(Error::RootNotObject(value.kind_name()))?;

        if self.options.emit_declaration {
            self.output.push_str(DECLARATION);
        }

        match root {
            Some(tag) => self.encode_element(tag, value),
            None => match single_element_entry(map) {
                Some((key, inner)) => self.encode_element(key, inner),
                None => {
                    let tag = self.options.default_root_tag.clone();
                    self.encode_element(&tag, value)
                }
            },
        }
    }

    /// Appends the markup for `value` under the element name `tag`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAttributeKind`] when an attribute key of this element,
    /// or (in [`ErrorMode::Strict`]) of any descendant, holds a non-scalar;
    /// [`Error::EmptyAttributeName`] for a bare `-` key in the same places.
    pub fn encode_element(&mut self, tag: &str, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => self.encode_object(tag, map),
            Value::Array(elements) => {
                for element in elements {
                    self.encode_child(tag, element)?;
                }
                Ok(())
            }
            Value::Null => {
                self.open_tag(tag);
                self.close_empty(tag);
                Ok(())
            }
            Value::Opaque(_) => {
                self.open_tag(tag);
                if self.options.skip_unknown {
                    self.close_empty(tag);
                } else {
                    self.output.push('>');
                    self.output.push_str(UNKNOWN_MARKER);
                    self.close_tag(tag);
                }
                Ok(())
            }
            scalar => {
                self.open_tag(tag);
                let mark = self.output.len();
                self.output.push('>');
                self.write_scalar(scalar);
                if self.output.len() == mark + 1 {
                    self.output.truncate(mark);
                    self.close_empty(tag);
                } else {
                    self.close_tag(tag);
                }
                Ok(())
            }
        }
    }

    fn encode_object(&mut self, tag: &str, map: &Map) -> Result<()> {
        let (mut attributes, mut content): (Vec<_>, Vec<_>) =
            map.iter().partition(|(key, _)| key.starts_with(ATTRIBUTE_PREFIX));
        attributes.sort_unstable_by(|a, b| a.0.cmp(b.0));

        self.open_tag(tag);
        for (key, value) in attributes {
            let name = key.strip_prefix(ATTRIBUTE_PREFIX).unwrap_or(key);
            self.write_attribute(name, value)?;
        }

        if content.is_empty() {
            self.close_empty(tag);
            return Ok(());
        }

        if let [(key, text)] = content.as_slice() {
            if key.as_str() == TEXT_KEY {
                self.output.push('>');
                self.write_inline_text(text);
                self.close_tag(tag);
                return Ok(());
            }
        }

        content.sort_unstable_by(|a, b| a.0.cmp(b.0));
        self.output.push('>');
        for (key, value) in content {
            self.encode_child(key, value)?;
        }
        self.close_tag(tag);
        Ok(())
    }

    /// Encodes a nested element, dropping it in best-effort mode if it fails.
    fn encode_child(&mut self, tag: &str, value: &Value) -> Result<()> {
        let mark = self.output.len();
        match self.encode_element(tag, value) {
            Err(err) if self.options.error_mode == ErrorMode::BestEffort => {
                warn!(element = tag, error = %err, "dropping element that failed to encode");
                self.output.truncate(mark);
                Ok(())
            }
            result => result,
        }
    }

    fn write_attribute(&mut self, name: &str, value: &Value) -> Result<()> {
        if name.is_empty() {
            return Err(Error::EmptyAttributeName);
        }
        if !value.is_scalar() {
            return Err(Error::invalid_attribute(name, value.kind_name()));
        }
        self.output.push(' ');
        self.output.push_str(name);
        self.output.push_str("=\"");
        self.write_scalar(value);
        self.output.push('"');
        Ok(())
    }

    fn write_inline_text(&mut self, value: &Value) {
        if self.write_scalar(value) || value.is_null() || self.options.skip_unknown {
            return;
        }
        self.output.push_str(UNKNOWN_MARKER);
    }

    /// Writes the text form of a scalar; returns `false` for anything else.
    fn write_scalar(&mut self, value: &Value) -> bool {
        match value {
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => self.output.push_str(&i.to_string()),
            Value::Float(f) => {
                let text = self.options.float_mode.format(*f);
                self.output.push_str(&text);
            }
            Value::Text(s) => self.write_text(s),
            Value::Bytes(b) => self.write_text(&String::from_utf8_lossy(b)),
            Value::Date(dt) => self.output.push_str(&dt.to_rfc3339()),
            Value::BigInt(bi) => self.output.push_str(&bi.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) | Value::Opaque(_) => return false,
        }
        true
    }

    #[inline]
    fn write_text(&mut self, s: &str) {
        if self.options.escape_text {
            escape_into(&mut self.output, s);
        } else {
            self.output.push_str(s);
        }
    }

    #[inline]
    fn open_tag(&mut self, tag: &str) {
        self.output.push('<');
        self.output.push_str(tag);
    }

    #[inline]
    fn close_tag(&mut self, tag: &str) {
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push('>');
    }

    /// Terminates an opened tag that has no content.
    #[inline]
    fn close_empty(&mut self, tag: &str) {
        if self.options.empty_element_long_form {
            self.output.push('>');
            self.close_tag(tag);
        } else {
            self.output.push_str("/>");
        }
    }
}

/// The sole entry of `map` when it can serve as the document root itself.
fn single_element_entry(map: &Map) -> Option<(&str, &Value)> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    if key.starts_with(ATTRIBUTE_PREFIX) || key == TEXT_KEY {
        return None;
    }
    let element_like = match value {
        Value::Object(_) => true,
        Value::Array(elements) => !elements.is_empty() && elements.iter().all(Value::is_object),
        _ => false,
    };
    element_like.then_some((key.as_str(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    fn encode(tag: &str, value: &Value) -> String {
        let mut encoder = Encoder::new(EncoderOptions::new());
        encoder.encode_element(tag, value).unwrap();
        encoder.into_inner()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(encode("b", &value!(true)), "<b>true</b>");
        assert_eq!(encode("i", &value!(42)), "<i>42</i>");
        assert_eq!(encode("f", &value!(23.5)), "<f>23.5</f>");
        assert_eq!(encode("t", &value!("hi")), "<t>hi</t>");
        assert_eq!(encode("r", &Value::Bytes(b"a<b".to_vec())), "<r>a&lt;b</r>");
    }

    #[test]
    fn test_empty_text_is_empty_element() {
        assert_eq!(encode("t", &value!("")), "<t/>");
        assert_eq!(encode("r", &Value::Bytes(Vec::new())), "<r/>");
    }

    #[test]
    fn test_empty_object_is_empty_element() {
        assert_eq!(encode("e", &value!({})), "<e/>");
    }

    #[test]
    fn test_empty_array_emits_nothing() {
        assert_eq!(encode("x", &value!([])), "");
    }

    #[test]
    fn test_attributes_only() {
        assert_eq!(
            encode("p", &value!({ "-b": 2, "-a": 1 })),
            r#"<p a="1" b="2"/>"#
        );
    }

    #[test]
    fn test_children_sorted() {
        assert_eq!(
            encode("p", &value!({ "z": 1, "a": 2, "m": null })),
            "<p><a>2</a><m/><z>1</z></p>"
        );
    }

    #[test]
    fn test_inline_text_kinds() {
        assert_eq!(encode("n", &value!({ "#text": 5 })), "<n>5</n>");
        assert_eq!(encode("n", &value!({ "#text": "" })), "<n></n>");
        assert_eq!(encode("n", &value!({ "#text": null })), "<n></n>");
        assert_eq!(encode("n", &value!({ "#text": [1] })), "<n>UNKNOWN</n>");
    }

    #[test]
    fn test_text_key_beside_children_is_a_child() {
        assert_eq!(
            encode("n", &value!({ "#text": "t", "a": 1 })),
            "<n><#text>t</#text><a>1</a></n>"
        );
    }

    #[test]
    fn test_opaque_marker_and_skip() {
        let opaque = Value::Opaque("channel".to_string());
        assert_eq!(encode("x", &opaque), "<x>UNKNOWN</x>");

        let mut encoder = Encoder::new(EncoderOptions::new().with_skip_unknown(true));
        encoder.encode_element("x", &opaque).unwrap();
        assert_eq!(encoder.into_inner(), "<x/>");
    }

    #[test]
    fn test_extension_scalars() {
        let big = Value::from(u64::MAX);
        assert_eq!(encode("n", &big), "<n>18446744073709551615</n>");

        let date = chrono::DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        assert_eq!(
            encode("d", &Value::Date(date)),
            "<d>2024-01-15T10:30:00+00:00</d>"
        );
    }

    #[test]
    fn test_attribute_rejects_null_and_opaque() {
        let mut encoder = Encoder::new(EncoderOptions::new());
        let err = encoder
            .encode_element("x", &value!({ "-a": null }))
            .unwrap_err();
        assert_eq!(err, Error::invalid_attribute("a", "null"));

        let mut tree = Map::new();
        tree.insert("-a".to_string(), Value::Opaque("fn".to_string()));
        let mut encoder = Encoder::new(EncoderOptions::new());
        assert!(encoder.encode_element("x", &Value::Object(tree)).is_err());
    }

    #[test]
    fn test_empty_attribute_name_rejected() {
        let mut encoder = Encoder::new(EncoderOptions::new());
        let err = encoder
            .encode_element("doc", &value!({ "-": "x", "a": 1 }))
            .unwrap_err();
        assert_eq!(err, Error::EmptyAttributeName);
    }

    #[test]
    fn test_empty_attribute_name_dropped_in_best_effort() {
        let options = EncoderOptions::new().with_error_mode(ErrorMode::BestEffort);
        let mut encoder = Encoder::new(options);
        encoder
            .encode_element("doc", &value!({ "a": 1, "b": { "-": "x" } }))
            .unwrap();
        assert_eq!(encoder.into_inner(), "<doc><a>1</a></doc>");
    }

    #[test]
    fn test_single_element_entry() {
        let obj = value!({ "a": { "b": 1 } });
        assert_eq!(
            single_element_entry(obj.as_object().unwrap()).map(|(k, _)| k),
            Some("a")
        );

        for not_element in [
            value!({ "a": 1 }),
            value!({ "a": null }),
            value!({ "a": [] }),
            value!({ "a": [{}, 1] }),
            value!({ "-a": { "b": 1 } }),
            value!({ "a": {}, "b": {} }),
        ] {
            assert!(single_element_entry(not_element.as_object().unwrap()).is_none());
        }
    }

    #[test]
    fn test_root_must_be_object() {
        let mut encoder = Encoder::new(EncoderOptions::new());
        let err = encoder.encode_document(&value!([1]), None).unwrap_err();
        assert_eq!(err, Error::RootNotObject("array"));
    }
}
