//! Configuration options for XML encoding.
//!
//! This module provides types to customize the encoder's output:
//!
//! - [`EncoderOptions`]: Main configuration struct
//! - [`FloatMode`]: How floating-point numbers are written
//! - [`ErrorMode`]: Whether errors inside nested elements abort the document
//!
//! Options are plain values: build one, then pass it to every encode call.
//! They also deserialize from JSON with every field optional, so they can sit
//! inside the bridge configuration file.
//!
//! ## Examples
//!
//! ```rust
//! use map2xml::{from_json_str, to_string_with_options, EncoderOptions, FloatMode};
//!
//! let value = from_json_str(r#"{"-unit": "C", "temperature": 23.5}"#).unwrap();
//!
//! let options = EncoderOptions::new().with_float_mode(FloatMode::Fixed);
//! let xml = to_string_with_options(&value, options, Some("reading")).unwrap();
//! assert_eq!(
//!     xml,
//!     r#"<reading unit="C"><temperature>23.500000</temperature></reading>"#
//! );
//! ```

use serde::Deserialize;

/// Rendering of `Float` values.
///
/// # Examples
///
/// ```rust
/// use map2xml::FloatMode;
///
/// assert_eq!(FloatMode::Scientific.format(1234567.0), "1.234567e+06");
/// assert_eq!(FloatMode::Fixed.format(0.5), "0.500000");
/// assert_eq!(FloatMode::Default.format(23.5), "23.5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatMode {
    /// Shortest representation, switching to exponent form for very large or small values
    #[default]
    Default,
    /// Exponent form with six fractional digits
    Scientific,
    /// Fixed-point with six fractional digits
    Fixed,
}

impl FloatMode {
    /// Formats `value` according to this mode.
    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            FloatMode::Default => crate::format::float_shortest(value),
            FloatMode::Scientific => crate::format::float_scientific(value),
            FloatMode::Fixed => crate::format::float_fixed(value),
        }
    }
}

/// What happens when a nested element fails to encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// The first error anywhere in the tree aborts the whole document.
    #[default]
    Strict,
    /// A failing child or array element is dropped and its siblings are kept.
    ///
    /// Errors on the root element itself are still returned.
    BestEffort,
}

/// Configuration options for XML encoding.
///
/// # Examples
///
/// ```rust
/// use map2xml::{EncoderOptions, ErrorMode};
///
/// // Defaults: escaping on, self-closing empty elements, root tag "doc"
/// let options = EncoderOptions::new();
/// assert!(options.escape_text);
/// assert_eq!(options.default_root_tag, "doc");
///
/// let options = EncoderOptions::new()
///     .with_empty_element_long_form(true)
///     .with_declaration(true)
///     .with_error_mode(ErrorMode::BestEffort);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Escape `& < > " '` in text content and attribute values.
    pub escape_text: bool,
    pub float_mode: FloatMode,
    /// Write empty elements as `<tag></tag>` rather than `<tag/>`.
    pub empty_element_long_form: bool,
    /// Leave elements of unrenderable kinds empty instead of writing `UNKNOWN`.
    pub skip_unknown: bool,
    /// Prepend `<?xml version="1.0" encoding="utf-8"?>`.
    pub emit_declaration: bool,
    pub default_root_tag: String,
    pub error_mode: ErrorMode,
    /// Reserved for array-expansion compatibility; currently has no effect on output.
    pub extend_array: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            escape_text: true,
            float_mode: FloatMode::default(),
            empty_element_long_form: false,
            skip_unknown: false,
            emit_declaration: false,
            default_root_tag: "doc".to_string(),
            error_mode: ErrorMode::default(),
            extend_array: false,
        }
    }
}

impl EncoderOptions {
    /// Creates default options.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use map2xml::EncoderOptions;
    ///
    /// let options = EncoderOptions::new();
    /// assert!(!options.emit_declaration);
    /// assert!(!options.empty_element_long_form);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables escaping of text and attribute values.
    ///
    /// Disabling escaping can produce malformed markup for values containing
    /// `<` or `&`; only do so for trusted, pre-escaped input.
    #[must_use]
    pub fn with_escape_text(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }

    /// Sets the float rendering mode.
    #[must_use]
    pub fn with_float_mode(mut self, mode: FloatMode) -> Self {
        self.float_mode = mode;
        self
    }

    /// Chooses `<tag></tag>` (true) or `<tag/>` (false) for empty elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use map2xml::{to_string_with_options, value, EncoderOptions};
    ///
    /// let tree = value!({ "flag": null, "-v": 1 });
    /// let options = EncoderOptions::new().with_empty_element_long_form(true);
    /// let xml = to_string_with_options(&tree, options, Some("s")).unwrap();
    /// assert_eq!(xml, r#"<s v="1"><flag></flag></s>"#);
    /// ```
    #[must_use]
    pub fn with_empty_element_long_form(mut self, long_form: bool) -> Self {
        self.empty_element_long_form = long_form;
        self
    }

    /// Leaves elements of unrenderable kinds empty instead of writing `UNKNOWN`.
    #[must_use]
    pub fn with_skip_unknown(mut self, skip: bool) -> Self {
        self.skip_unknown = skip;
        self
    }

    /// Prepends the XML declaration to every document.
    #[must_use]
    pub fn with_declaration(mut self, emit: bool) -> Self {
        self.emit_declaration = emit;
        self
    }

    /// Sets the root tag used when no explicit root is given and none can be inferred.
    #[must_use]
    pub fn with_default_root_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_root_tag = tag.into();
        self
    }

    /// Sets how errors in nested elements are handled.
    #[must_use]
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Sets the reserved array-expansion flag.
    #[must_use]
    pub fn with_extend_array(mut self, extend: bool) -> Self {
        self.extend_array = extend;
        self
    }
}
