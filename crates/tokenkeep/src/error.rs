//! Error types for the tokenkeep library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, protocol, input validation and configuration
//! errors.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for tokenkeep operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, body decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (unsupported login, unusable token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-2xx responses from the token endpoint).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (origin, base URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Bootstrap configuration errors.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns the HTTP status carried by this error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Protocol(err) => Some(err.status),
            _ => None,
        }
    }

    /// True when the failure may mean the server-side session is gone.
    ///
    /// A request that got no response at all, or a response with status 0,
    /// falls in this bucket. A response whose body failed to decode did get
    /// an answer and does not. Callers only log it; retry behavior is the
    /// same.
    pub fn may_indicate_session_end(&self) -> bool {
        match self {
            Error::Transport(TransportError::Decode { .. }) => false,
            Error::Transport(_) => true,
            Error::Protocol(err) => err.status == 0,
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Response body could not be decoded.
    #[error("malformed response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// This strategy never performs credential-based login.
    #[error("login is not supported by this authentication strategy")]
    LoginUnsupported,

    /// The held token cannot be placed in an HTTP header.
    #[error("token contains characters not allowed in a header value")]
    InvalidToken,
}

/// Protocol-level errors from token endpoint responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if the body carried one.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid origin.
    #[error("invalid origin '{value}': {reason}")]
    Origin { value: String, reason: String },

    /// Invalid document base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },
}

/// Bootstrap configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bootstrap file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bootstrap document is not valid JSON or misses a field.
    #[error("malformed bootstrap document: {0}")]
    Parse(#[from] serde_json::Error),
}
