//! Client error types
//!
//! One enum per concern: configuration (construction time), auth (token
//! acquisition), transport (the outbound POST), and the sender-level
//! union. A non-2xx gateway response is NOT an error - it is returned to
//! the caller for inspection.

use thiserror::Error;

use strm_protocol::ProtocolError;

/// Errors raised while loading or validating sender configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration or schema file
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A URL field does not parse
    #[error("invalid {field} '{url}': {message}")]
    InvalidUrl {
        /// Config field name
        field: &'static str,
        /// The offending value
        url: String,
        /// Parser message
        message: String,
    },

    /// Required field missing or empty
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A field has an unusable value
    #[error("invalid {field}: {message}")]
    InvalidValue {
        /// Config field name
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// The configured event schema does not parse
    #[error("invalid event schema: {0}")]
    Schema(#[source] ProtocolError),

    /// Neither a static token nor full credentials were supplied
    #[error("auth requires either a token or billing_id, client_id, and client_secret")]
    MissingCredentials,
}

/// Errors raised while obtaining or refreshing a bearer token
#[derive(Debug, Error)]
pub enum AuthError {
    /// Auth service request failed
    #[error("auth request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Auth service rejected the credentials
    #[error("auth service rejected credentials with status {status}")]
    Rejected {
        /// HTTP status returned by the auth service
        status: u16,
    },

    /// Token response could not be parsed
    #[error("malformed token response: {0}")]
    MalformedResponse(String),

    /// Token contains bytes that cannot appear in a header value
    #[error("token is not a valid header value")]
    InvalidToken,
}

/// Errors raised while performing the outbound POST
///
/// Propagated unchanged from the transport - the sender never intercepts,
/// retries, or reinterprets them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Connection could not be established (DNS, refused, TLS)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other request failure
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// Bearer token could not be obtained
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
}

impl TransportError {
    /// Classify a reqwest failure
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Errors surfaced by [`Sender`](crate::Sender) operations
#[derive(Debug, Error)]
pub enum SenderError {
    /// Configuration rejected at construction
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Event does not conform to the configured schema
    ///
    /// Raised before any network I/O - nothing was sent.
    #[error("encoding failed: {0}")]
    Encoding(#[from] ProtocolError),

    /// The outbound POST failed
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),
}
