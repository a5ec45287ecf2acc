//! Error types for the transcribe client.
//!
//! Every operation fails with a single [`Error`] type whose [`ErrorKind`]
//! belongs to a closed taxonomy:
//! - service faults (`bad-request`, `not-found`, `limit-exceeded`,
//!   `conflict`, `internal-failure`)
//! - local failures (`transport-failure`, `unexpected-response`)
//! - misuse of a client after [`shutdown`](crate::Client::shutdown)
//!
//! Each operation only ever reports the service kinds it declares; anything
//! else the service sends back surfaces as [`ErrorKind::UnexpectedResponse`].

use std::fmt;

/// Result type alias for transcribe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The request failed validation: malformed or missing field, unsupported value.
    BadRequest,
    /// The referenced resource does not exist.
    NotFound,
    /// An account or service quota was exceeded.
    LimitExceeded,
    /// The request conflicts with existing resource state, e.g. a duplicate name.
    Conflict,
    /// Server-side fault.
    InternalFailure,
    /// Local or network failure before a service response was obtained.
    Transport,
    /// The response did not match the shape expected for the operation.
    UnexpectedResponse,
    /// The client was used after it had been shut down.
    ClientShutdown,
}

impl ErrorKind {
    /// Maps a service fault code to its kind.
    ///
    /// Returns `None` for codes outside the taxonomy; callers must treat
    /// those as unexpected responses rather than guess a kind.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "BadRequestException" => Some(Self::BadRequest),
            "NotFoundException" => Some(Self::NotFound),
            "LimitExceededException" => Some(Self::LimitExceeded),
            "ConflictException" => Some(Self::Conflict),
            "InternalFailureException" => Some(Self::InternalFailure),
            _ => None,
        }
    }

    /// The service fault code for this kind, if it is a service kind.
    #[must_use]
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::BadRequest => Some("BadRequestException"),
            Self::NotFound => Some("NotFoundException"),
            Self::LimitExceeded => Some("LimitExceededException"),
            Self::Conflict => Some("ConflictException"),
            Self::InternalFailure => Some("InternalFailureException"),
            Self::Transport | Self::UnexpectedResponse | Self::ClientShutdown => None,
        }
    }

    /// Kebab-case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad-request",
            Self::NotFound => "not-found",
            Self::LimitExceeded => "limit-exceeded",
            Self::Conflict => "conflict",
            Self::InternalFailure => "internal-failure",
            Self::Transport => "transport-failure",
            Self::UnexpectedResponse => "unexpected-response",
            Self::ClientShutdown => "client-shutdown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by every client operation.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Error {
    /// The error kind.
    pub kind: ErrorKind,
    /// The operation that failed, when known.
    pub operation: Option<&'static str>,
    /// Human-readable message.
    pub message: String,
    /// Fault code reported by the service.
    pub code: Option<String>,
    /// Request id assigned by the service.
    pub request_id: Option<String>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            operation: None,
            message: message.into(),
            code: None,
            request_id: None,
        }
    }

    /// Create a bad request error, typically from local validation.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a limit exceeded error.
    #[must_use]
    pub fn limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LimitExceeded, message)
    }

    /// Create a conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal failure error.
    #[must_use]
    pub fn internal_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalFailure, message)
    }

    /// Create a transport failure error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an unexpected response error.
    #[must_use]
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedResponse, message)
    }

    /// Create the error returned by a client that has been shut down.
    #[must_use]
    pub fn client_shutdown() -> Self {
        Self::new(
            ErrorKind::ClientShutdown,
            "client has been shut down and cannot issue requests",
        )
    }

    /// Create a service fault error from a fault code the service reported.
    ///
    /// Codes outside the taxonomy become [`ErrorKind::UnexpectedResponse`]
    /// with the code preserved.
    #[must_use]
    pub fn from_service(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        let kind = ErrorKind::from_code(&code).unwrap_or(ErrorKind::UnexpectedResponse);
        Self {
            kind,
            operation: None,
            message: message.into(),
            code: Some(code),
            request_id: None,
        }
    }

    /// Attach the failing operation name.
    #[must_use]
    pub const fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Attach the service-assigned request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// The error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether the failure is retryable by convention.
    ///
    /// The client itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InternalFailure | ErrorKind::Transport
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = self.operation {
            write!(f, "[{operation}] ")?;
        }
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(code) = &self.code {
            write!(f, " (code: {code})")?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request id: {request_id})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// Failure raised by a [`Transport`](crate::transport::Transport) before a
/// response was obtained.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport has been shut down.
    #[error("transport is closed")]
    Closed,

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match &err {
            TransportError::Http(inner) if inner.is_timeout() => {
                Self::transport(format!("request timed out: {inner}"))
            }
            TransportError::Http(inner) if inner.is_connect() => {
                Self::transport(format!("connection failed: {inner}"))
            }
            _ => Self::transport(err.to_string()),
        }
    }
}

/// Errors that can occur while building a [`Client`](crate::Client).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientBuilderError {
    /// HTTP client construction failed.
    #[error("reqwest error: {0}")]
    HttpError(
        #[from]
        #[source]
        reqwest::Error,
    ),

    /// No region was configured and none could be inferred.
    #[error("region is required")]
    MissingRegion,

    /// Invalid property configuration.
    #[error("invalid {property}: {reason}")]
    InvalidProperty {
        /// The offending property.
        property: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ClientBuilderError {
    pub(crate) fn invalid(property: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            property,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for kind in [
            ErrorKind::BadRequest,
            ErrorKind::NotFound,
            ErrorKind::LimitExceeded,
            ErrorKind::Conflict,
            ErrorKind::InternalFailure,
        ] {
            let code = kind.code().unwrap();
            assert_eq!(ErrorKind::from_code(code), Some(kind));
        }
        assert_eq!(ErrorKind::Transport.code(), None);
        assert_eq!(ErrorKind::from_code("ThrottlingException"), None);
    }

    #[test]
    fn test_unknown_service_code_is_unexpected() {
        let err = Error::from_service("AccessDeniedException", "nope");
        assert_eq!(err.kind(), ErrorKind::UnexpectedResponse);
        assert_eq!(err.code.as_deref(), Some("AccessDeniedException"));
    }

    #[test]
    fn test_display() {
        let err = Error::from_service("ConflictException", "name taken")
            .with_operation("CreateVocabulary")
            .with_request_id(Some("req-1".into()));
        assert_eq!(
            err.to_string(),
            "[CreateVocabulary] conflict: name taken (code: ConflictException) (request id: req-1)"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(Error::internal_failure("boom").is_retryable());
        assert!(Error::transport("reset").is_retryable());
        assert!(!Error::bad_request("bad").is_retryable());
        assert!(!Error::client_shutdown().is_retryable());
    }

    #[test]
    fn test_transport_error_conversion() {
        let err: Error = TransportError::Closed.into();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.message, "transport is closed");
    }
}
