//! Error types for remote method calls.
//!
//! Three failure sources exist, and [`Error`] keeps them apart:
//!
//! - [`TransportError`]: the request never produced a body (connect failure,
//!   timeout, non-2xx status). Produced by the [`Transport`](crate::Transport)
//!   and passed through untouched.
//! - [`ApiError`]: the platform answered with an `{"error": {...}}` envelope.
//! - [`DecodeError`]: the payload did not have the shape the operation
//!   expects. This indicates an API version mismatch, not a transient fault.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// The category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The request timed out.
    Timeout,
    /// Connection could not be established (DNS, refused, TLS).
    Connection,
    /// The server answered with a non-success HTTP status.
    Status,
    /// The request was cancelled before completion.
    Cancelled,
    /// The response body could not be read.
    Body,
    /// Any other transport failure.
    Other,
}

impl TransportErrorKind {
    /// Returns true if a caller may reasonably retry the call.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connection | Self::Body)
    }

    /// Returns a stable name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connection => "connection",
            Self::Status => "status",
            Self::Cancelled => "cancelled",
            Self::Body => "body",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A failure of the transport collaborator.
#[derive(Debug, Error)]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
    /// HTTP status, for [`TransportErrorKind::Status`].
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error of the given kind.
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connection, message)
    }

    /// Creates an HTTP status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(TransportErrorKind::Status, message);
        err.status = Some(status);
        err
    }

    /// Creates a cancellation error.
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Cancelled, message)
    }

    /// Creates a body read error.
    pub fn body(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Body, message)
    }

    /// Creates an uncategorized transport error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }

    /// Sets the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status, if the failure carried one.
    pub fn http_status(&self) -> Option<u16> {
        self.status
    }

    /// Returns true if a caller may reasonably retry the call.
    pub fn is_retryable(&self) -> bool {
        match self.status {
            Some(status) => status == 429 || status >= 500,
            None => self.kind.is_retryable(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport {}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " ({})", status)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// An error reported by the platform in an `{"error": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("API error {code}: {message}")]
pub struct ApiError {
    #[serde(rename = "error_code")]
    pub code: i64,
    #[serde(rename = "error_msg", default)]
    pub message: String,
    /// The parameters the platform received, echoed back.
    #[serde(default)]
    pub request_params: Vec<RequestParam>,
}

impl ApiError {
    /// Code 5: the access token is invalid or expired.
    pub const AUTH_FAILED: i64 = 5;
    /// Code 6: too many requests per second.
    pub const TOO_MANY_REQUESTS: i64 = 6;
    /// Code 9: flood control.
    pub const FLOOD_CONTROL: i64 = 9;
    /// Code 14: captcha required.
    pub const CAPTCHA_NEEDED: i64 = 14;
    /// Code 15: access denied.
    pub const ACCESS_DENIED: i64 = 15;
    /// Code 29: method rate limit reached.
    pub const RATE_LIMIT_REACHED: i64 = 29;

    /// Creates an API error without echoed parameters.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_params: Vec::new(),
        }
    }

    /// Returns true if the session must be re-authorized.
    pub fn is_auth_failure(&self) -> bool {
        self.code == Self::AUTH_FAILED
    }

    /// Returns true for the rate-limiting family of codes.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self.code,
            Self::TOO_MANY_REQUESTS | Self::FLOOD_CONTROL | Self::RATE_LIMIT_REACHED
        )
    }

    /// Returns true if the caller lacks access to the object.
    pub fn is_access_denied(&self) -> bool {
        self.code == Self::ACCESS_DENIED
    }

    /// Returns true if the platform asks for a captcha.
    pub fn is_captcha_needed(&self) -> bool {
        self.code == Self::CAPTCHA_NEEDED
    }

    /// Returns the echoed value of a request parameter.
    pub fn request_param(&self, key: &str) -> Option<&str> {
        self.request_params
            .iter()
            .find(|param| param.key == key)
            .map(|param| param.value.as_str())
    }
}

/// A request parameter echoed back in an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestParam {
    pub key: String,
    pub value: String,
}

/// A payload whose shape contradicts what the operation expects.
#[derive(Debug, Error)]
pub struct DecodeError {
    /// Where decoding failed, e.g. `"envelope"` or a remote method name.
    context: String,
    message: String,
    #[source]
    source: Option<serde_json::Error>,
}

impl DecodeError {
    /// Creates a decode error for a rule violation.
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a decode error from a `serde_json` failure.
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            context: context.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Returns where decoding failed.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to decode {}: {}", self.context, self.message)
    }
}

/// Any failure of a client operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The caller passed an argument the operation cannot encode.
    /// Raised before any transport call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns the API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// A specialized Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_kind_retryable() {
        assert!(TransportErrorKind::Timeout.is_retryable());
        assert!(TransportErrorKind::Connection.is_retryable());
        assert!(!TransportErrorKind::Cancelled.is_retryable());
        assert!(!TransportErrorKind::Other.is_retryable());
    }

    #[test]
    fn status_retryable_by_code() {
        assert!(TransportError::status(503, "unavailable").is_retryable());
        assert!(TransportError::status(429, "slow down").is_retryable());
        assert!(!TransportError::status(404, "not found").is_retryable());
    }

    #[test]
    fn transport_display() {
        let err = TransportError::status(502, "bad gateway");
        assert_eq!(err.to_string(), "transport status (502): bad gateway");
        assert_eq!(err.http_status(), Some(502));

        let err = TransportError::timeout("request timeout");
        assert_eq!(err.to_string(), "transport timeout: request timeout");
    }

    #[test]
    fn transport_with_source() {
        use std::error::Error as _;
        let io_err = std::io::Error::other("reset by peer");
        let err = TransportError::connection("connection lost").with_source(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn parse_api_error() {
        let json = r#"{
            "error_code": 15,
            "error_msg": "Access denied",
            "request_params": [
                {"key": "method", "value": "wall.get"},
                {"key": "owner_id", "value": "-1"}
            ]
        }"#;

        let err: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(err.code, 15);
        assert!(err.is_access_denied());
        assert!(!err.is_rate_limited());
        assert_eq!(err.request_param("owner_id"), Some("-1"));
        assert_eq!(err.to_string(), "API error 15: Access denied");
    }

    #[test]
    fn api_error_families() {
        assert!(ApiError::new(6, "Too many requests per second").is_rate_limited());
        assert!(ApiError::new(29, "Rate limit reached").is_rate_limited());
        assert!(ApiError::new(5, "User authorization failed").is_auth_failure());
        assert!(ApiError::new(14, "Captcha needed").is_captcha_needed());
    }

    #[test]
    fn decode_error_keeps_source() {
        use std::error::Error as _;
        let source = serde_json::from_str::<i64>("\"x\"").unwrap_err();
        let err = DecodeError::json("wall.post", source);
        assert_eq!(err.context(), "wall.post");
        assert!(err.to_string().starts_with("failed to decode wall.post: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn error_is_transparent() {
        let err: Error = ApiError::new(15, "Access denied").into();
        assert_eq!(err.to_string(), "API error 15: Access denied");
        assert_eq!(err.as_api().map(|e| e.code), Some(15));
    }
}
