//! Bridge configuration file.
//!
//! The bridge reads one JSON document with a section per collaborator:
//!
//! ```json
//! {
//!   "mqtt": { "host": "broker.local", "port": 8883, "ssl": true, "ca_cert": "/etc/ca.pem" },
//!   "database": { "host": "sql.local", "dbname": "telemetry", "entry_point": "dbo.ingest",
//!                 "to_xml": true, "xml_root": "msg" },
//!   "encoder": { "float_mode": "fixed" },
//!   "file_log": { "enable": true, "directory": "/var/log/bridge", "max_backups": 3 },
//!   "debug": false
//! }
//! ```
//!
//! Every field is optional; missing fields keep the defaults documented on
//! each type.

use crate::{EncoderOptions, Error, Result};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::time::Duration;
use tracing::info;

/// How the bridge authenticates against the MQTT broker.
///
/// Unrecognized names deserialize as [`AuthType::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    #[default]
    None,
    /// Username and password
    Basic,
    /// Client certificate
    Cert,
}

impl AuthType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthType::None => "none",
            AuthType::Basic => "basic",
            AuthType::Cert => "cert",
        }
    }
}

impl<'de> Deserialize<'de> for AuthType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(match name.as_str() {
            "basic" => AuthType::Basic,
            "cert" => AuthType::Cert,
            _ => AuthType::None,
        })
    }
}

/// MQTT broker connection settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MqttOptions {
    pub host: String,
    pub port: u16,
    pub ssl: bool,
    pub auth_type: AuthType,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ca_cert: Option<String>,
    pub client_cert: Option<String>,
    pub client_key: Option<String>,
    /// Skip broker certificate verification.
    pub insecure: bool,
    /// Seconds.
    pub keep_alive: u64,
    /// Seconds.
    pub connect_timeout: u64,
    /// Seconds.
    pub max_reconnect_interval: u64,
    pub qos: u8,
    pub topic: String,
}

impl Default for MqttOptions {
    fn default() -> Self {
        MqttOptions {
            host: "127.0.0.1".to_string(),
            port: 1883,
            ssl: false,
            auth_type: AuthType::None,
            username: None,
            password: None,
            ca_cert: None,
            client_cert: None,
            client_key: None,
            insecure: false,
            keep_alive: 30,
            connect_timeout: 30,
            max_reconnect_interval: 60,
            qos: 0,
            topic: "#".to_string(),
        }
    }
}

impl MqttOptions {
    /// Broker URL; TLS is used only when `ssl` is set and a CA certificate is configured.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use map2xml::config::MqttOptions;
    ///
    /// let mut mqtt = MqttOptions::default();
    /// assert_eq!(mqtt.broker_url(), "tcp://127.0.0.1:1883");
    ///
    /// mqtt.ssl = true;
    /// mqtt.ca_cert = Some("/etc/ca.pem".to_string());
    /// assert_eq!(mqtt.broker_url(), "ssl://127.0.0.1:1883");
    /// ```
    #[must_use]
    pub fn broker_url(&self) -> String {
        let scheme = if self.uses_tls() { "ssl" } else { "tcp" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    #[must_use]
    pub fn uses_tls(&self) -> bool {
        self.ssl && non_empty(&self.ca_cert).is_some()
    }

    /// Username and password for basic authentication; either may be empty,
    /// and `None` is returned only when neither is set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.auth_type != AuthType::Basic {
            return None;
        }
        let username = self.username.as_deref().unwrap_or("");
        let password = self.password.as_deref().unwrap_or("");
        if username.is_empty() && password.is_empty() {
            return None;
        }
        Some((username, password))
    }

    /// Client certificate and key paths, present only for certificate authentication over TLS.
    #[must_use]
    pub fn client_identity(&self) -> Option<(&str, &str)> {
        if self.auth_type != AuthType::Cert || !self.uses_tls() {
            return None;
        }
        Some((non_empty(&self.client_cert)?, non_empty(&self.client_key)?))
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn max_reconnect_interval(&self) -> Duration {
        Duration::from_secs(self.max_reconnect_interval)
    }
}

/// Database connection and entry point settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatabaseOptions {
    pub host: String,
    /// `0` leaves the port out of the connection string.
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    /// Seconds, applied to every entry point call.
    pub timeout: u64,
    /// Name of the procedure called with `(topic, payload)`.
    pub entry_point: String,
    /// Convert payloads to XML before the call; otherwise compact JSON is passed.
    pub to_xml: bool,
    /// Explicit root tag for converted payloads; empty infers one.
    pub xml_root: String,
    pub xml_ext_array: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        DatabaseOptions {
            host: "127.0.0.1".to_string(),
            port: 1433,
            dbname: "master".to_string(),
            user: "sa".to_string(),
            password: String::new(),
            timeout: 30,
            entry_point: String::new(),
            to_xml: false,
            xml_root: "doc".to_string(),
            xml_ext_array: false,
        }
    }
}

impl DatabaseOptions {
    /// SQL Server style connection string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use map2xml::config::DatabaseOptions;
    ///
    /// let db = DatabaseOptions { port: 0, ..DatabaseOptions::default() };
    /// assert_eq!(
    ///     db.connection_string(),
    ///     "server=127.0.0.1;user id=sa;password=;database=master;"
    /// );
    /// ```
    #[must_use]
    pub fn connection_string(&self) -> String {
        if self.port == 0 {
            format!(
                "server={};user id={};password={};database={};",
                self.host, self.user, self.password, self.dbname
            )
        } else {
            format!(
                "server={};user id={};password={};port={};database={};",
                self.host, self.user, self.password, self.port, self.dbname
            )
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Root tag handed to the encoder, `None` when empty.
    #[must_use]
    pub fn root_tag(&self) -> Option<&str> {
        Some(self.xml_root.as_str()).filter(|root| !root.is_empty())
    }
}

/// Log file settings, see [`crate::logging::init`].
///
/// Files roll over daily. `max_backups` and `max_age` together bound how many
/// rolled files are kept. `max_size` is accepted for compatibility with
/// existing configuration files but is not enforced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileLogOptions {
    pub enable: bool,
    /// Created on setup when missing.
    pub directory: String,
    pub filename: String,
    /// Megabytes.
    pub max_size: u64,
    pub max_backups: usize,
    /// Days.
    pub max_age: usize,
}

impl Default for FileLogOptions {
    fn default() -> Self {
        FileLogOptions {
            enable: false,
            directory: default_log_directory(),
            filename: format!("{}.log", env!("CARGO_PKG_NAME")),
            max_size: 25,
            max_backups: 7,
            max_age: 10,
        }
    }
}

impl FileLogOptions {
    /// Number of log files kept on disk, the active one included.
    ///
    /// `0` for either limit means that limit is not applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use map2xml::config::FileLogOptions;
    ///
    /// assert_eq!(FileLogOptions::default().retained_files(), Some(8));
    /// let unbounded = FileLogOptions { max_backups: 0, max_age: 0, ..FileLogOptions::default() };
    /// assert_eq!(unbounded.retained_files(), None);
    /// ```
    #[must_use]
    pub fn retained_files(&self) -> Option<usize> {
        let by_backups = Some(self.max_backups + 1).filter(|_| self.max_backups > 0);
        let by_age = Some(self.max_age).filter(|age| *age > 0);
        match (by_backups, by_age) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(windows)]
fn default_log_directory() -> String {
    std::env::current_dir()
        .map(|dir| dir.join("log").to_string_lossy().into_owned())
        .unwrap_or_else(|_| "log".to_string())
}

#[cfg(not(windows))]
fn default_log_directory() -> String {
    "/var/log".to_string()
}

/// Complete bridge configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub mqtt: MqttOptions,
    pub database: DatabaseOptions,
    pub encoder: EncoderOptions,
    pub file_log: FileLogOptions,
    /// Log every rendered payload at debug level.
    pub debug: bool,
}

impl BridgeConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the document is not valid JSON or a field has the wrong type.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(Error::config)
    }

    /// Loads the configuration file at `path`; a blank path yields the defaults.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self> {
        if path.trim().is_empty() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("can't read {}: {}", path, e)))?;
        let config = Self::from_json_str(&text)?;
        info!(
            path,
            broker = %config.mqtt.broker_url(),
            entry_point = %config.database.entry_point,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Encoder options with the database section's array flag folded in.
    #[must_use]
    pub fn encoder_options(&self) -> EncoderOptions {
        let extend = self.encoder.extend_array || self.database.xml_ext_array;
        self.encoder.clone().with_extend_array(extend)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FloatMode;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.mqtt.host, "127.0.0.1");
        assert_eq!(config.mqtt.port, 1883);
        assert_eq!(config.mqtt.topic, "#");
        assert_eq!(config.mqtt.keep_alive(), Duration::from_secs(30));
        assert_eq!(config.mqtt.max_reconnect_interval(), Duration::from_secs(60));
        assert_eq!(config.database.port, 1433);
        assert_eq!(config.database.dbname, "master");
        assert_eq!(config.database.root_tag(), Some("doc"));
        assert!(!config.database.to_xml);
        assert!(!config.file_log.enable);
        assert_eq!(config.file_log.filename, "map2xml.log");
        assert_eq!(config.file_log.max_size, 25);
        assert_eq!(config.file_log.max_backups, 7);
        assert_eq!(config.file_log.max_age, 10);
        assert!(!config.debug);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_default_log_directory() {
        assert_eq!(FileLogOptions::default().directory, "/var/log");
    }

    #[test]
    fn test_file_log_section_parsed() {
        let config = BridgeConfig::from_json_str(
            r#"{"file_log": {"enable": true, "directory": "/tmp/bridge", "filename": "b.log", "max_size": 50}}"#,
        )
        .unwrap();
        assert_ne!(config, BridgeConfig::default());
        assert!(config.file_log.enable);
        assert_eq!(config.file_log.directory, "/tmp/bridge");
        assert_eq!(config.file_log.filename, "b.log");
        assert_eq!(config.file_log.max_size, 50);
        assert_eq!(config.file_log.max_backups, 7);
        assert_eq!(config.file_log.max_age, 10);
    }

    #[test]
    fn test_retained_files() {
        let options = FileLogOptions {
            max_backups: 30,
            ..FileLogOptions::default()
        };
        assert_eq!(options.retained_files(), Some(10));

        let options = FileLogOptions {
            max_age: 0,
            max_backups: 2,
            ..FileLogOptions::default()
        };
        assert_eq!(options.retained_files(), Some(3));
    }

    #[test]
    fn test_basic_credentials_with_password_only() {
        let mqtt = MqttOptions {
            auth_type: AuthType::Basic,
            password: Some("pw".to_string()),
            ..MqttOptions::default()
        };
        assert_eq!(mqtt.credentials(), Some(("", "pw")));

        let anonymous = MqttOptions {
            auth_type: AuthType::Basic,
            ..MqttOptions::default()
        };
        assert_eq!(anonymous.credentials(), None);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = BridgeConfig::from_json_str(
            r#"{
                "mqtt": {"host": "broker.local", "auth_type": "basic", "username": "u"},
                "database": {"entry_point": "dbo.ingest", "to_xml": true, "xml_root": ""},
                "encoder": {"float_mode": "fixed"},
                "debug": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.mqtt.host, "broker.local");
        assert_eq!(config.mqtt.port, 1883);
        assert_eq!(config.mqtt.credentials(), Some(("u", "")));
        assert_eq!(config.database.entry_point, "dbo.ingest");
        assert_eq!(config.database.root_tag(), None);
        assert_eq!(config.encoder.float_mode, FloatMode::Fixed);
        assert!(config.debug);
    }

    #[test]
    fn test_unknown_auth_type_is_none() {
        let mqtt: MqttOptions = serde_json::from_str(r#"{"auth_type": "kerberos"}"#).unwrap();
        assert_eq!(mqtt.auth_type, AuthType::None);
        assert_eq!(mqtt.credentials(), None);
    }

    #[test]
    fn test_client_identity_requires_tls() {
        let mut mqtt = MqttOptions {
            auth_type: AuthType::Cert,
            client_cert: Some("c.pem".to_string()),
            client_key: Some("k.pem".to_string()),
            ..MqttOptions::default()
        };
        assert_eq!(mqtt.client_identity(), None);

        mqtt.ssl = true;
        mqtt.ca_cert = Some("ca.pem".to_string());
        assert_eq!(mqtt.client_identity(), Some(("c.pem", "k.pem")));
    }

    #[test]
    fn test_connection_string_with_port() {
        let db = DatabaseOptions {
            password: "secret".to_string(),
            ..DatabaseOptions::default()
        };
        assert_eq!(
            db.connection_string(),
            "server=127.0.0.1;user id=sa;password=secret;port=1433;database=master;"
        );
    }

    #[test]
    fn test_ext_array_folds_into_encoder() {
        let mut config = BridgeConfig::default();
        assert!(!config.encoder_options().extend_array);
        config.database.xml_ext_array = true;
        assert!(config.encoder_options().extend_array);
    }

    #[test]
    fn test_blank_path_yields_defaults() {
        assert_eq!(BridgeConfig::load("  ").unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = BridgeConfig::load("/nonexistent/map2xml.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        let err = BridgeConfig::from_json_str(r#"{"mqtt": {"port": "high"}}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
