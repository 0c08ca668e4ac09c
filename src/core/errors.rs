//! Error types for connection URI handling
//! Provides structured error handling using thiserror for better error reporting

use thiserror::Error;

/// Error returned by the URI parser, the DSN converter and the multi-host splitter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The input could not be decomposed as a URI
    #[error("malformed connection URI: {message}")]
    MalformedUri { message: String },

    /// The scheme is well-formed but is not a PostgreSQL scheme
    #[error("invalid connection protocol: {scheme}")]
    InvalidProtocol { scheme: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Result type alias for convenience
pub type UrlResult<T> = std::result::Result<T, UrlError>;

impl UrlError {
    /// Create a malformed URI error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedUri {
            message: message.into(),
        }
    }

    /// Create an invalid protocol error carrying the scheme as written
    pub fn invalid_protocol<S: Into<String>>(scheme: S) -> Self {
        Self::InvalidProtocol {
            scheme: scheme.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<url::ParseError> for UrlError {
    fn from(err: url::ParseError) -> Self {
        Self::malformed(err.to_string())
    }
}

impl From<std::str::Utf8Error> for UrlError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::malformed(format!("percent-decoded text is not UTF-8: {}", err))
    }
}
