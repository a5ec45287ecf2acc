//! Transports that carry encoded requests to the service.
//!
//! [`HttpTransport`] is the production transport. Tests and offline tools
//! can supply any other [`Transport`], such as
//! [`MockTranscribe`](crate::mock::MockTranscribe).

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::{
    error::{ClientBuilderError, TransportError},
    protocol::{self, WireRequest, WireResponse},
};

/// Sends one encoded request and returns the raw response.
///
/// Implementations must not retry and must not interpret fault bodies;
/// only failures that prevented a response from being obtained are errors.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send a request to the service.
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError>;

    /// Release resources. Called once when a client that created this
    /// transport shuts down. Transports handed to
    /// [`ClientBuilder::transport`](crate::ClientBuilder::transport) are
    /// never closed by the client.
    fn shutdown(&self) {}
}

/// HTTP transport over a pooled [`reqwest::Client`].
#[derive(Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    endpoint: Arc<str>,
    closed: Arc<AtomicBool>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport posting to `endpoint`.
    pub fn new(
        endpoint: impl Into<Arc<str>>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ClientBuilderError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self::with_client(http_client, endpoint))
    }

    /// Create a transport from an existing HTTP client.
    #[must_use]
    pub fn with_client(http_client: reqwest::Client, endpoint: impl Into<Arc<str>>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The endpoint requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(target: &str) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(protocol::CONTENT_TYPE));
        let target = HeaderValue::from_str(target)
            .map_err(|e| TransportError::Other(format!("invalid target header: {e}")))?;
        headers.insert(protocol::TARGET_HEADER, target);
        Ok(headers)
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::Closed);
        }

        let url = format!("{}/", self.endpoint.trim_end_matches('/'));
        debug!(operation = request.operation, %url, "Sending request");

        let response = self
            .http_client
            .post(&url)
            .headers(Self::headers(&request.target)?)
            .body(request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let request_id = header(response.headers(), protocol::REQUEST_ID_HEADER);
        let error_type = header(response.headers(), protocol::ERROR_TYPE_HEADER);
        let body = response.bytes().await?.to_vec();

        debug!(status, request_id = ?request_id, bytes = body.len(), "Received response");

        Ok(WireResponse {
            status,
            request_id,
            error_type,
            body,
        })
    }

    fn shutdown(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        let headers = HttpTransport::headers("Transcribe.ListVocabularies").unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/x-amz-json-1.1");
        assert_eq!(headers["x-amz-target"], "Transcribe.ListVocabularies");
    }

    #[test]
    fn test_debug_shows_endpoint() {
        let transport =
            HttpTransport::with_client(reqwest::Client::new(), "https://transcribe.example");
        let debug = format!("{transport:?}");
        assert!(debug.contains("https://transcribe.example"));
    }

    #[tokio::test]
    async fn test_send_after_shutdown() {
        let transport =
            HttpTransport::with_client(reqwest::Client::new(), "https://transcribe.example");
        transport.shutdown();
        let request = WireRequest {
            operation: "ListVocabularies",
            target: protocol::target("ListVocabularies"),
            body: "{}".into(),
        };
        assert!(matches!(
            transport.send(request).await,
            Err(TransportError::Closed)
        ));
    }
}
