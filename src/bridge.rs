//! Per-message glue between the message source and the database.
//!
//! The transport layer (subscription, reconnects) and the database client
//! (pooling, statement execution) live outside this crate. The transport
//! calls [`Bridge::handle_message`] for every inbound `(topic, payload)`;
//! the bridge parses the payload, renders it, and hands it to a [`Sink`].
//!
//! ## Examples
//!
//! ```rust
//! use map2xml::bridge::{Bridge, EntryPointCall, Sink};
//! use map2xml::config::BridgeConfig;
//! use std::sync::Mutex;
//!
//! #[derive(Default)]
//! struct Recorder(Mutex<Vec<String>>);
//!
//! impl Sink for Recorder {
//!     fn call_entry_point(&self, call: &EntryPointCall<'_>) -> map2xml::Result<()> {
//!         self.0.lock().unwrap().push(call.payload.to_string());
//!         Ok(())
//!     }
//! }
//!
//! let mut config = BridgeConfig::default();
//! config.database.entry_point = "dbo.ingest".to_string();
//! config.database.to_xml = true;
//!
//! let bridge = Bridge::new(&config, Recorder::default());
//! bridge.handle_message("sensors/1", br#"{"t": 21}"#).unwrap();
//! assert_eq!(bridge.sink().0.lock().unwrap()[0], "<doc><t>21</t></doc>");
//! ```

use crate::config::BridgeConfig;
use crate::{from_json_slice, to_string_with_options, EncoderOptions, Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// One database entry point invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPointCall<'a> {
    pub entry_point: &'a str,
    pub topic: &'a str,
    pub payload: &'a str,
    /// Deadline for the whole call, from the database section.
    pub timeout: Duration,
}

/// Receiver of rendered payloads, usually a database client.
pub trait Sink {
    /// Performs the call, returning [`Error::Sink`] on failure.
    fn call_entry_point(&self, call: &EntryPointCall<'_>) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &S {
    fn call_entry_point(&self, call: &EntryPointCall<'_>) -> Result<()> {
        (**self).call_entry_point(call)
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn call_entry_point(&self, call: &EntryPointCall<'_>) -> Result<()> {
        (**self).call_entry_point(call)
    }
}

/// Converts inbound messages and forwards them to a [`Sink`].
///
/// The bridge holds only immutable configuration, so one instance can serve
/// concurrent messages when its sink allows it.
pub struct Bridge<S> {
    entry_point: String,
    to_xml: bool,
    root: Option<String>,
    timeout: Duration,
    debug: bool,
    options: EncoderOptions,
    sink: S,
}

impl<S: Sink> Bridge<S> {
    pub fn new(config: &BridgeConfig, sink: S) -> Self {
        Bridge {
            entry_point: config.database.entry_point.clone(),
            to_xml: config.database.to_xml,
            root: config.database.root_tag().map(str::to_string),
            timeout: config.database.timeout(),
            debug: config.debug,
            options: config.encoder_options(),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Parses `payload` as a JSON object and renders it for the entry point:
    /// XML when conversion is enabled, compact JSON otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPayload`] when the payload is not a JSON object, and
    /// any encoding error.
    pub fn render(&self, payload: &[u8]) -> Result<String> {
        let value = from_json_slice(payload)?;
        if !value.is_object() {
            return Err(Error::invalid_payload(format!(
                "expected a JSON object, found {}",
                value.kind_name()
            )));
        }
        if self.to_xml {
            to_string_with_options(&value, self.options.clone(), self.root.as_deref())
        } else {
            serde_json::to_string(&value).map_err(Error::custom)
        }
    }

    /// Renders one message and calls the entry point with `(topic, payload)`.
    ///
    /// Failures are logged and returned; nothing is retried.
    ///
    /// # Errors
    ///
    /// Payload and encoding errors from [`Bridge::render`] (the sink is not
    /// called), or the sink's own error.
    pub fn handle_message(&self, topic: &str, payload: &[u8]) -> Result<()> {
        let rendered = self.render(payload).map_err(|err| {
            error!(topic, error = %err, "can't convert message payload");
            err
        })?;

        if self.debug {
            debug!(topic, payload = %rendered, "rendered payload");
        }

        let call = EntryPointCall {
            entry_point: &self.entry_point,
            topic,
            payload: &rendered,
            timeout: self.timeout,
        };
        self.sink.call_entry_point(&call).map_err(|err| {
            error!(topic, entry_point = %self.entry_point, error = %err, "entry point call failed");
            err
        })
    }
}
