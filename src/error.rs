//! Error types for encoding value trees and running the bridge.
//!
//! The encoder itself defines a single structural error,
//! [`Error::InvalidAttributeKind`]: an attribute key (`-name`) whose value is
//! not a scalar. Everything else in this enum belongs to the boundaries around
//! the encoder: payload parsing, configuration loading, and the database sink.
//!
//! ## Examples
//!
//! ```rust
//! use map2xml::{from_json_str, to_string, Error};
//!
//! let value = from_json_str(r#"{"-child": {"x": 1}}"#).unwrap();
//! let err = to_string(&value).unwrap_err();
//! assert!(matches!(err, Error::InvalidAttributeKind { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the encoder and the bridge.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An attribute key maps to a value that cannot be rendered as an attribute
    #[error("invalid attribute value for \"-{attribute}\": {kind} is not a scalar")]
    InvalidAttributeKind { attribute: String, kind: &'static str },

    /// An attribute key is the bare `-` marker with no name after it
    #[error("attribute key \"-\" has an empty name")]
    EmptyAttributeName,

    /// The top-level value handed to document encoding is not an object
    #[error("document root must be an object, found {0}")]
    RootNotObject(&'static str),

    /// The inbound payload could not be parsed into a value tree
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// The database entry point call failed
    #[error("entry point call failed: {0}")]
    Sink(String),

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an attribute error for the attribute `name` (without its `-` marker).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use map2xml::Error;
    ///
    /// let err = Error::invalid_attribute("child", "object");
    /// assert!(err.to_string().contains("\"-child\""));
    /// ```
    pub fn invalid_attribute(name: &str, kind: &'static str) -> Self {
        Error::InvalidAttributeKind {
            attribute: name.to_string(),
            kind,
        }
    }

    /// Creates a payload error from any displayable parse failure.
    pub fn invalid_payload<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidPayload(msg.to_string())
    }

    /// Creates a configuration error.
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Creates a sink error, used by [`Sink`](crate::bridge::Sink) implementations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use map2xml::Error;
    ///
    /// let err = Error::sink("login timeout expired");
    /// assert_eq!(err.to_string(), "entry point call failed: login timeout expired");
    /// ```
    pub fn sink<T: fmt::Display>(msg: T) -> Self {
        Error::Sink(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
