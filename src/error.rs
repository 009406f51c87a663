//! Error types for the Uzum Payments client

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type alias for Uzum Payments operations
pub type Result<T> = std::result::Result<T, UzumError>;

/// Main error type for Uzum Payments operations
#[derive(Error, Debug)]
pub enum UzumError {
    /// Network failure: DNS, connect, TLS, or timeout
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The remote service rejected the call
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// A success response could not be decoded
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Request parameters failed local validation; nothing was sent
    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Request signing failed
    #[error("Signing error: {message}")]
    Signing { message: String },

    /// The client has been closed
    #[error("Client is closed")]
    Closed,
}

impl UzumError {
    /// Create a decode error without an underlying serde error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid parameters error
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a signing error
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// True for network-level failures, including timeouts
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// True when the HTTP exchange ran past the configured timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// The remote error, if the service rejected the call
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(remote) => Some(remote),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UzumError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            return Self::config(format!("Failed to build request: {}", error));
        }
        Self::Transport(error)
    }
}

impl From<serde_json::Error> for UzumError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

/// Category of a remote failure, derived from the HTTP status first and the
/// envelope `errorCode` second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// HTTP 400
    BadRequest,
    /// HTTP 401, the `X-Signature` header was rejected
    Signature,
    /// HTTP 403, the mTLS fingerprint was rejected
    Fingerprint,
    /// HTTP 422 or `errorCode` in 2000..3000
    Validation,
    /// HTTP 500
    InternalServer,
    /// `errorCode` >= 5000
    Internal,
    /// `errorCode` in 3000..5000
    Payment,
    /// `errorCode` in 1000..2000
    Authentication,
    /// Anything else
    Unexpected,
}

impl RemoteErrorKind {
    /// Classify a failed response
    pub fn classify(status: u16, error_code: Option<i64>) -> Self {
        match status {
            400 => return Self::BadRequest,
            401 => return Self::Signature,
            403 => return Self::Fingerprint,
            422 => return Self::Validation,
            500 => return Self::InternalServer,
            _ => {}
        }

        match error_code {
            Some(code) if code >= 5000 => Self::Internal,
            Some(code) if code >= 3000 => Self::Payment,
            Some(code) if code >= 2000 => Self::Validation,
            Some(code) if code >= 1000 => Self::Authentication,
            _ => Self::Unexpected,
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad request",
            Self::Signature => "signature rejected",
            Self::Fingerprint => "fingerprint rejected",
            Self::Validation => "validation failed",
            Self::InternalServer => "internal server error",
            Self::Internal => "internal error",
            Self::Payment => "payment error",
            Self::Authentication => "authentication failed",
            Self::Unexpected => "unexpected error",
        };
        f.write_str(name)
    }
}

/// A call the remote service answered with a failure
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
    /// Failure category
    pub kind: RemoteErrorKind,
    /// HTTP status code
    pub status: u16,
    /// `errorCode` from the response envelope, when present
    pub error_code: Option<i64>,
    /// `message` from the response envelope, when present
    pub message: Option<String>,
    /// Raw response body
    pub body: String,
    /// Parsed response body, when it was JSON
    pub payload: Option<Value>,
}

impl RemoteError {
    /// Build a remote error from a response status and body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let payload: Option<Value> = serde_json::from_str(&body).ok();
        let error_code = payload.as_ref().and_then(error_code_of);
        let message = payload
            .as_ref()
            .and_then(|p| p.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            kind: RemoteErrorKind::classify(status, error_code),
            status,
            error_code,
            message,
            body,
            payload,
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {}", self.kind, self.status)?;
        if let Some(code) = self.error_code {
            write!(f, ", errorCode {}", code)?;
        }
        f.write_str(")")?;
        match &self.message {
            Some(message) => write!(f, ": {}", message),
            None if !self.body.is_empty() => write!(f, ": {}", self.body),
            None => Ok(()),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Non-zero `errorCode` of a response envelope
pub(crate) fn error_code_of(payload: &Value) -> Option<i64> {
    payload
        .get("errorCode")
        .and_then(parse_error_code)
        .filter(|code| *code != 0)
}

/// Read an error code sent as an integer, a whole float or a numeric string.
///
/// A present but unreadable code is reported as `-1`, so it still counts as a
/// failure rather than a success.
pub(crate) fn parse_error_code(value: &Value) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::Number(number) => Some(
            number
                .as_i64()
                .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .unwrap_or(-1),
        ),
        Value::String(raw) if raw.trim().is_empty() => None,
        Value::String(raw) => Some(raw.trim().parse::<i64>().unwrap_or(-1)),
        _ => Some(-1),
    }
}
