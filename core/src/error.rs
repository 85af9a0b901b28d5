use std::fmt;
use thiserror::Error;

/// The error type for urlsign operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    field: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The credential provider has no value for a required key
    /// (`client_email` or `private_key`).
    ConfigNotFound,

    /// Private key decoding or RSA signing failed.
    SignatureFailure,

    /// The request to sign is invalid (empty bucket, unsupported verb,
    /// expiration out of range, etc.)
    ValidationFailure,

    /// Unexpected errors (I/O, malformed credential files, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the name of the config key or request field this error is about.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the config key or request field this error is about, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

// Convenience constructors
impl Error {
    /// Create a config not found error for the given key.
    pub fn config_not_found(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(ErrorKind::ConfigNotFound, format!("{key} is not configured")).with_field(key)
    }

    /// Create a signature failure error
    pub fn signature_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SignatureFailure, message)
    }

    /// Create a validation failure error for the given field.
    pub fn validation_failure(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationFailure, message).with_field(field)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigNotFound => write!(f, "config not found"),
            ErrorKind::SignatureFailure => write!(f, "signature failure"),
            ErrorKind::ValidationFailure => write!(f, "validation failure"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
