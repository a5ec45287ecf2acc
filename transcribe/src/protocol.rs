//! JSON 1.1 envelope used by the transcription control plane.
//!
//! Every call is a `POST /` whose `X-Amz-Target` header names the operation
//! and whose body is the serialized request. Faults come back as a non-2xx
//! status with a `{"__type": ..., "message": ...}` body.

use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{Error, Result},
    operation::Operation,
};

/// Content type of every request body.
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Header naming the target operation.
pub const TARGET_HEADER: &str = "x-amz-target";

/// Header carrying the service-assigned request id.
pub const REQUEST_ID_HEADER: &str = "x-amzn-requestid";

/// Header carrying the fault code when the body does not.
pub const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// Prefix of every target header value.
pub const TARGET_PREFIX: &str = "Transcribe";

/// `X-Amz-Target` value for an operation.
#[must_use]
pub fn target(operation: &str) -> String {
    format!("{TARGET_PREFIX}.{operation}")
}

/// A serialized request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// Operation name, e.g. `GetVocabulary`.
    pub operation: &'static str,
    /// Value of the `X-Amz-Target` header.
    pub target: String,
    /// JSON body.
    pub body: String,
}

impl WireRequest {
    /// Serialize an operation's request.
    pub fn encode<O: Operation>(request: &O) -> Result<Self> {
        let body = serde_json::to_string(request)
            .map_err(|e| Error::bad_request(format!("request could not be serialized: {e}")))?;
        Ok(Self {
            operation: O::NAME,
            target: target(O::NAME),
            body,
        })
    }
}

/// A raw response as received from the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the request id header.
    pub request_id: Option<String>,
    /// Value of the error type header.
    pub error_type: Option<String>,
    /// Raw body.
    pub body: Vec<u8>,
}

impl WireResponse {
    /// A 200 response with the given JSON body.
    #[must_use]
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            ..Self::default()
        }
    }

    /// A 400 fault response carrying `code` and `message`.
    #[must_use]
    pub fn fault(code: &str, message: &str) -> Self {
        let status = if code == "InternalFailureException" { 500 } else { 400 };
        let body = serde_json::json!({ "__type": code, "message": message }).to_string();
        Self {
            status,
            body: body.into_bytes(),
            ..Self::default()
        }
    }

    /// Attach a request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode a successful body into the operation's output.
    ///
    /// An empty body decodes as `{}`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let body = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"{}".as_slice()
        } else {
            self.body.as_slice()
        };
        serde_json::from_slice(body).map_err(|e| {
            Error::unexpected_response(format!("response body did not match the expected shape: {e}"))
        })
    }

    /// Decode a fault body into an error.
    ///
    /// Unknown codes and undecodable bodies become unexpected responses.
    #[must_use]
    pub fn decode_fault(&self) -> Error {
        let envelope: FaultEnvelope = serde_json::from_slice(&self.body).unwrap_or_default();
        let code = envelope
            .code
            .as_deref()
            .or(self.error_type.as_deref())
            .map(normalize_code)
            .filter(|code| !code.is_empty());
        let message = envelope
            .message
            .or(envelope.message_upper)
            .unwrap_or_else(|| format!("service returned status {}", self.status));

        let err = match code {
            Some(code) => Error::from_service(code, message),
            None => Error::unexpected_response(format!(
                "service returned status {} without a fault code: {message}",
                self.status
            )),
        };
        err.with_request_id(self.request_id.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FaultEnvelope {
    #[serde(rename = "__type")]
    code: Option<String>,
    message: Option<String>,
    #[serde(rename = "Message")]
    message_upper: Option<String>,
}

/// Strip any `namespace#` prefix and `:suffix` from a fault code.
fn normalize_code(raw: &str) -> &str {
    let code = raw.split(':').next().unwrap_or(raw);
    code.rsplit('#').next().unwrap_or(code).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, model::GetVocabularyRequest};

    #[test]
    fn test_encode_sets_target() {
        let wire = WireRequest::encode(&GetVocabularyRequest::new("v1")).unwrap();
        assert_eq!(wire.operation, "GetVocabulary");
        assert_eq!(wire.target, "Transcribe.GetVocabulary");
        assert_eq!(wire.body, r#"{"VocabularyName":"v1"}"#);
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("NotFoundException"), "NotFoundException");
        assert_eq!(
            normalize_code("com.amazonaws.transcribe#ConflictException"),
            "ConflictException"
        );
        assert_eq!(
            normalize_code("BadRequestException:http://internal.amazon.com/"),
            "BadRequestException"
        );
    }

    #[test]
    fn test_decode_fault_body() {
        let response = WireResponse::fault("NotFoundException", "no such vocabulary")
            .with_request_id("req-1");
        let err = response.decode_fault();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "no such vocabulary");
        assert_eq!(err.code.as_deref(), Some("NotFoundException"));
        assert_eq!(err.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_decode_fault_header_fallback() {
        let response = WireResponse {
            status: 400,
            request_id: None,
            error_type: Some("LimitExceededException:extra".into()),
            body: br#"{"Message":"slow down"}"#.to_vec(),
        };
        let err = response.decode_fault();
        assert_eq!(err.kind, ErrorKind::LimitExceeded);
        assert_eq!(err.message, "slow down");
    }

    #[test]
    fn test_decode_fault_without_code() {
        let response = WireResponse {
            status: 502,
            body: b"<html>bad gateway</html>".to_vec(),
            ..WireResponse::default()
        };
        assert_eq!(response.decode_fault().kind, ErrorKind::UnexpectedResponse);
    }

    #[test]
    fn test_decode_unknown_code() {
        let err = WireResponse::fault("ThrottlingException", "nope").decode_fault();
        assert_eq!(err.kind, ErrorKind::UnexpectedResponse);
        assert_eq!(err.code.as_deref(), Some("ThrottlingException"));
    }

    #[test]
    fn test_decode_empty_body() {
        let out: crate::NoOutput = WireResponse::ok(Vec::new()).decode().unwrap();
        assert_eq!(out, crate::NoOutput {});
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let err = WireResponse::ok(r#"{"Vocabularies": 3}"#)
            .decode::<crate::model::ListVocabulariesResponse>()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedResponse);
    }
}
