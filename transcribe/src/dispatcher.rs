//! The single remote-call routine behind every client operation.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{debug, instrument, warn};

use crate::{
    error::{Error, Result},
    metadata::{ResponseMetadata, ResponseMetadataCache},
    operation::Operation,
    protocol::WireRequest,
    transport::Transport,
};

/// Validates, encodes, sends and decodes operations over a [`Transport`].
#[derive(Debug)]
pub(crate) struct Dispatcher {
    transport: Arc<dyn Transport>,
    /// Whether shutdown also closes the transport.
    owns_transport: bool,
    shutdown: AtomicBool,
    metadata: ResponseMetadataCache,
}

impl Dispatcher {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        owns_transport: bool,
        metadata_cache_capacity: usize,
    ) -> Self {
        Self {
            transport,
            owns_transport,
            shutdown: AtomicBool::new(false),
            metadata: ResponseMetadataCache::new(metadata_cache_capacity),
        }
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub(crate) const fn owns_transport(&self) -> bool {
        self.owns_transport
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Mark the dispatcher shut down. An owned transport is closed once;
    /// a shared one is left open for its other users.
    pub(crate) fn shutdown(&self) {
        if !self.shutdown.swap(true, Ordering::AcqRel) {
            debug!(owns_transport = self.owns_transport, "Shutting down transcribe client");
            if self.owns_transport {
                self.transport.shutdown();
            }
        }
    }

    pub(crate) fn cached_metadata<O: Operation>(&self, request: &O) -> Option<ResponseMetadata> {
        let wire = WireRequest::encode(request).ok()?;
        self.metadata.get(O::NAME, &wire.body)
    }

    /// Invoke one remote operation.
    ///
    /// Service faults whose kind the operation does not declare are
    /// reported as [`ErrorKind::UnexpectedResponse`](crate::ErrorKind::UnexpectedResponse).
    #[instrument(name = "transcribe.call", skip_all, fields(operation = O::NAME))]
    pub(crate) async fn call<O: Operation>(&self, request: &O) -> Result<O::Output> {
        if self.is_shutdown() {
            return Err(Error::client_shutdown().with_operation(O::NAME));
        }

        request.validate().map_err(|e| {
            debug!(error = %e, "Request rejected before sending");
            e.with_operation(O::NAME)
        })?;

        let wire = WireRequest::encode(request).map_err(|e| e.with_operation(O::NAME))?;
        let body = wire.body.clone();

        let response = self.transport.send(wire).await.map_err(|e| {
            let err = Error::from(e).with_operation(O::NAME);
            debug!(error = %err, "Transport failure");
            err
        })?;

        self.metadata.insert(
            O::NAME,
            &body,
            ResponseMetadata {
                operation: O::NAME,
                request_id: response.request_id.clone(),
                status: response.status,
            },
        );

        if response.is_success() {
            let output = response.decode::<O::Output>().map_err(|e| {
                warn!(error = %e, "Response did not match the operation's result shape");
                e.with_request_id(response.request_id.clone())
                    .with_operation(O::NAME)
            })?;
            debug!(status = response.status, request_id = ?response.request_id, "Call succeeded");
            return Ok(output);
        }

        let err = response.decode_fault();
        if err.kind.code().is_some() && !O::declares(err.kind) {
            warn!(
                kind = %err.kind,
                code = ?err.code,
                "Service reported an error kind the operation does not declare"
            );
            let mut unexpected = Error::unexpected_response(format!(
                "{} does not report {}: {}",
                O::NAME,
                err.kind,
                err.message
            ));
            unexpected.code = err.code;
            unexpected.request_id = err.request_id;
            return Err(unexpected.with_operation(O::NAME));
        }

        if err.kind.code().is_some() {
            debug!(kind = %err.kind, request_id = ?err.request_id, "Service fault");
        } else {
            warn!(code = ?err.code, status = response.status, "Unrecognised service fault");
        }
        Err(err.with_operation(O::NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ErrorKind,
        error::TransportError,
        model::{
            DeleteTranscriptionJobRequest, GetVocabularyRequest, GetVocabularyResponse,
            ListVocabulariesRequest,
        },
        protocol::WireResponse,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a fixed response and records what it was sent.
    #[derive(Debug)]
    struct Canned {
        response: WireResponse,
        sent: Mutex<Vec<WireRequest>>,
        closed: AtomicBool,
    }

    impl Canned {
        fn new(response: WireResponse) -> Arc<Self> {
            Arc::new(Self {
                response,
                sent: Mutex::new(Vec::new()),
                closed: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn send(
            &self,
            request: WireRequest,
        ) -> std::result::Result<WireResponse, TransportError> {
            self.sent.lock().unwrap().push(request);
            Ok(self.response.clone())
        }

        fn shutdown(&self) {
            self.closed.store(true, Ordering::Release);
        }
    }

    #[tokio::test]
    async fn test_success_decodes_output() {
        let transport = Canned::new(
            WireResponse::ok(r#"{"VocabularyName":"v1","VocabularyState":"READY"}"#)
                .with_request_id("req-9"),
        );
        let dispatcher = Dispatcher::new(transport.clone(), true, 10);
        let request = GetVocabularyRequest::new("v1");
        let output: GetVocabularyResponse = dispatcher.call(&request).await.unwrap();
        assert_eq!(output.vocabulary_name.as_deref(), Some("v1"));

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].target, "Transcribe.GetVocabulary");

        let meta = dispatcher.cached_metadata(&request).unwrap();
        assert_eq!(meta.request_id.as_deref(), Some("req-9"));
        assert_eq!(meta.status, 200);
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let transport = Canned::new(WireResponse::ok("{}"));
        let dispatcher = Dispatcher::new(transport.clone(), true, 10);
        let err = dispatcher
            .call(&GetVocabularyRequest::new(""))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.operation, Some("GetVocabulary"));
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undeclared_fault_is_unexpected() {
        let transport = Canned::new(WireResponse::fault("NotFoundException", "gone"));
        let dispatcher = Dispatcher::new(transport, true, 10);
        let err = dispatcher
            .call(&DeleteTranscriptionJobRequest::new("job1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedResponse);
        assert_eq!(err.code.as_deref(), Some("NotFoundException"));
    }

    #[tokio::test]
    async fn test_declared_fault_passes_through() {
        let transport = Canned::new(WireResponse::fault("LimitExceededException", "slow"));
        let dispatcher = Dispatcher::new(transport, true, 10);
        let err = dispatcher
            .call(&ListVocabulariesRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::LimitExceeded);
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let transport = Canned::new(WireResponse::ok("{}"));
        let dispatcher = Dispatcher::new(transport.clone(), true, 10);
        dispatcher.shutdown();
        dispatcher.shutdown();
        let err = dispatcher
            .call(&ListVocabulariesRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ClientShutdown);
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_shutdown_closes_only_owned_transport() {
        let owned = Canned::new(WireResponse::ok("{}"));
        Dispatcher::new(owned.clone(), true, 10).shutdown();
        assert!(owned.closed.load(Ordering::Acquire));

        let shared = Canned::new(WireResponse::ok("{}"));
        Dispatcher::new(shared.clone(), false, 10).shutdown();
        assert!(!shared.closed.load(Ordering::Acquire));
    }
}
