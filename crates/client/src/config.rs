//! Sender configuration
//!
//! TOML-based configuration loading with sensible defaults. Only the
//! gateway section and one form of auth need to be specified; everything
//! else has a default.
//!
//! # Example Minimal Config
//!
//! ```toml
//! [gateway]
//! url = "https://gw.example.com/ingest"
//! schema_id = "evt-v1"
//! schema_path = "schemas/event.avsc"
//!
//! [auth]
//! token = "pre-issued-token"
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [gateway]
//! url = "https://gw.example.com/ingest"
//! schema_id = "evt-v1"
//! schema = '''{"type": "record", "name": "E", "fields": []}'''
//!
//! [auth]
//! url = "https://auth.example.com"
//! billing_id = "billing-1"
//! client_id = "client-1"
//! client_secret = "secret"
//!
//! [http]
//! timeout = "10s"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Main sender configuration
///
/// Immutable after construction; owned by the sender. No runtime
/// reconfiguration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SenderConfig {
    /// Gateway endpoint and schema
    pub gateway: GatewayConfig,
    /// Credentials for the bearer header
    pub auth: AuthConfig,
    /// HTTP client settings
    pub http: HttpConfig,
}

impl SenderConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        contents.parse()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the gateway URL does not parse, the schema id is
    /// empty, no schema is configured, or no usable auth is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.url.is_empty() {
            return Err(ConfigError::MissingField("gateway.url"));
        }
        parse_url("gateway.url", &self.gateway.url)?;

        if self.gateway.schema_id.is_empty() {
            return Err(ConfigError::MissingField("gateway.schema_id"));
        }

        if self.gateway.schema.is_none() && self.gateway.schema_path.is_none() {
            return Err(ConfigError::MissingField("gateway.schema"));
        }

        if self.auth.token.is_none() {
            if self.auth.credentials().is_none() {
                return Err(ConfigError::MissingCredentials);
            }
            parse_url("auth.url", &self.auth.url)?;
        }

        Ok(())
    }
}

impl FromStr for SenderConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Parse a URL field, mapping failures to a config error
pub(crate) fn parse_url(field: &'static str, url: &str) -> Result<Url, ConfigError> {
    Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        field,
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Gateway endpoint and schema configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Absolute URL of the ingestion endpoint
    /// Default: "http://localhost:8080/event"
    pub url: String,

    /// Schema id attached to every outbound event
    pub schema_id: String,

    /// Inline Avro schema definition (JSON); takes precedence over
    /// `schema_path`
    pub schema: Option<String>,

    /// Path to an Avro schema file (.avsc)
    pub schema_path: Option<PathBuf>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/event".to_string(),
            schema_id: String::new(),
            schema: None,
            schema_path: None,
        }
    }
}

impl GatewayConfig {
    /// Resolve the schema definition, reading `schema_path` if needed
    ///
    /// # Errors
    ///
    /// Returns error if neither form is configured or the file cannot be
    /// read.
    pub fn schema_definition(&self) -> Result<String, ConfigError> {
        if let Some(schema) = &self.schema {
            return Ok(schema.clone());
        }
        match &self.schema_path {
            Some(path) => fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
            None => Err(ConfigError::MissingField("gateway.schema")),
        }
    }
}

/// Authentication configuration
///
/// Either a pre-issued `token`, or the full credential triple for the
/// auth service. A token takes precedence when both are present.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Auth service base URL
    /// Default: "http://localhost:8081"
    pub url: String,

    /// Pre-issued bearer token
    pub token: Option<String>,

    /// Billing account id
    pub billing_id: Option<String>,

    /// Client id
    pub client_id: Option<String>,

    /// Client secret
    pub client_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8081".to_string(),
            token: None,
            billing_id: None,
            client_id: None,
            client_secret: None,
        }
    }
}

impl AuthConfig {
    /// The credential triple, if fully configured
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.billing_id, &self.client_id, &self.client_secret) {
            (Some(billing_id), Some(client_id), Some(client_secret)) => Some(Credentials {
                billing_id: billing_id.clone(),
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            _ => None,
        }
    }
}

/// HTTP client configuration
///
/// # Example
///
/// ```toml
/// [http]
/// timeout = "30s"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout for every outbound call
    /// Default: 10 seconds
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}
