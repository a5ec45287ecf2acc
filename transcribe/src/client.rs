//! The client facade.
//!
//! [`Client`] exposes one async method per remote operation. Each method
//! validates the request, sends it through the configured transport and
//! returns the decoded result or a typed [`Error`](crate::Error) whose kind
//! is one the operation declares.

use std::sync::Arc;

use crate::{
    config::{ClientBuilder, ClientConfig, normalize_endpoint},
    dispatcher::Dispatcher,
    error::{ClientBuilderError, Result},
    metadata::ResponseMetadata,
    model::*,
    operation::{NoOutput, Operation},
    transport::Transport,
};

/// Client for the transcription control plane.
///
/// Cloning is cheap and clones share the same transport, shutdown state and
/// response metadata.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: ClientConfig,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.inner.config.endpoint)
            .field("region", &self.inner.config.region)
            .field("shutdown", &self.is_shutdown())
            .finish_non_exhaustive()
    }
}

impl From<NoOutput> for () {
    fn from(_: NoOutput) -> Self {}
}

impl Client {
    /// Create a new [`ClientBuilder`].
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Fails when the environment holds no usable region or an invalid
    /// override. See [`ClientBuilder::from_env`].
    pub fn from_env() -> std::result::Result<Self, ClientBuilderError> {
        ClientBuilder::from_env()?.build()
    }

    pub(crate) fn from_parts(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        http_owned: bool,
    ) -> Self {
        let dispatcher = Dispatcher::new(transport, http_owned, config.metadata_cache_capacity);
        Self {
            inner: Arc::new(ClientInner { config, dispatcher }),
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Create a client with the same configuration and a different endpoint.
    ///
    /// The new client has its own shutdown state and metadata. An HTTP
    /// transport is created afresh for the new endpoint. A custom transport
    /// supplied through [`ClientBuilder::transport`] is shared with the new
    /// client and does its own routing, so the endpoint is only recorded in
    /// the configuration. Shutting down either client never closes a custom
    /// transport.
    ///
    /// # Errors
    ///
    /// Fails when the endpoint is not a valid http or https URL, or when
    /// the HTTP transport cannot be created.
    pub fn with_endpoint(
        &self,
        endpoint: impl AsRef<str>,
    ) -> std::result::Result<Self, ClientBuilderError> {
        let config = ClientConfig {
            endpoint: normalize_endpoint(endpoint.as_ref())?,
            ..self.inner.config.clone()
        };
        if self.inner.dispatcher.owns_transport() {
            let transport = Arc::new(config.http_transport()?);
            Ok(Self::from_parts(config, transport, true))
        } else {
            let transport = Arc::clone(self.inner.dispatcher.transport());
            Ok(Self::from_parts(config, transport, false))
        }
    }

    /// Shut the client down.
    ///
    /// Later calls on this client and its clones fail with
    /// [`ErrorKind::ClientShutdown`](crate::ErrorKind::ClientShutdown).
    /// Calling this more than once has no further effect.
    pub fn shutdown(&self) {
        self.inner.dispatcher.shutdown();
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.inner.dispatcher.is_shutdown()
    }

    /// Metadata of the most recent response to an identical request.
    ///
    /// Returns `None` if the request was never sent, never produced a
    /// response, or has been evicted.
    #[must_use]
    pub fn cached_response_metadata<O: Operation>(&self, request: &O) -> Option<ResponseMetadata> {
        self.inner.dispatcher.cached_metadata(request)
    }

    /// Invoke any operation by its request type.
    ///
    /// # Errors
    ///
    /// Returns an error whose kind is declared by `O`, or one of the local
    /// kinds: transport failure, unexpected response or client shutdown.
    pub async fn call<O: Operation>(&self, request: &O) -> Result<O::Output> {
        self.inner.dispatcher.call(request).await
    }
}

/// Generates one facade method per operation.
macro_rules! operations {
    ($(
        $(#[$meta:meta])*
        $method:ident($request:ty) -> $output:ty;
    )*) => {
        impl Client {
            $(
                $(#[$meta])*
                ///
                /// # Errors
                ///
                /// Fails with one of the kinds the operation declares, or
                /// with a local transport, response or shutdown error.
                pub async fn $method(&self, request: &$request) -> Result<$output> {
                    self.call(request).await.map(Into::into)
                }
            )*
        }
    };
}

operations! {
    /// Create a custom vocabulary.
    create_vocabulary(CreateVocabularyRequest) -> CreateVocabularyResponse;
    /// Get a custom vocabulary.
    get_vocabulary(GetVocabularyRequest) -> GetVocabularyResponse;
    /// List custom vocabularies.
    list_vocabularies(ListVocabulariesRequest) -> ListVocabulariesResponse;
    /// Replace the contents of a custom vocabulary.
    update_vocabulary(UpdateVocabularyRequest) -> UpdateVocabularyResponse;
    /// Delete a custom vocabulary.
    delete_vocabulary(DeleteVocabularyRequest) -> ();

    /// Create a vocabulary filter.
    create_vocabulary_filter(CreateVocabularyFilterRequest) -> CreateVocabularyFilterResponse;
    /// Get a vocabulary filter.
    get_vocabulary_filter(GetVocabularyFilterRequest) -> GetVocabularyFilterResponse;
    /// List vocabulary filters.
    list_vocabulary_filters(ListVocabularyFiltersRequest) -> ListVocabularyFiltersResponse;
    /// Replace the words of a vocabulary filter.
    update_vocabulary_filter(UpdateVocabularyFilterRequest) -> UpdateVocabularyFilterResponse;
    /// Delete a vocabulary filter.
    delete_vocabulary_filter(DeleteVocabularyFilterRequest) -> ();

    /// Create a medical vocabulary.
    create_medical_vocabulary(CreateMedicalVocabularyRequest) -> CreateMedicalVocabularyResponse;
    /// Get a medical vocabulary.
    get_medical_vocabulary(GetMedicalVocabularyRequest) -> GetMedicalVocabularyResponse;
    /// List medical vocabularies.
    list_medical_vocabularies(ListMedicalVocabulariesRequest) -> ListMedicalVocabulariesResponse;
    /// Replace the contents of a medical vocabulary.
    update_medical_vocabulary(UpdateMedicalVocabularyRequest) -> UpdateMedicalVocabularyResponse;
    /// Delete a medical vocabulary.
    delete_medical_vocabulary(DeleteMedicalVocabularyRequest) -> ();

    /// Train a custom language model.
    create_language_model(CreateLanguageModelRequest) -> CreateLanguageModelResponse;
    /// Describe a custom language model.
    describe_language_model(DescribeLanguageModelRequest) -> DescribeLanguageModelResponse;
    /// List custom language models.
    list_language_models(ListLanguageModelsRequest) -> ListLanguageModelsResponse;
    /// Delete a custom language model.
    delete_language_model(DeleteLanguageModelRequest) -> ();

    /// Start a transcription job.
    start_transcription_job(StartTranscriptionJobRequest) -> StartTranscriptionJobResponse;
    /// Get a transcription job.
    get_transcription_job(GetTranscriptionJobRequest) -> GetTranscriptionJobResponse;
    /// List transcription jobs.
    list_transcription_jobs(ListTranscriptionJobsRequest) -> ListTranscriptionJobsResponse;
    /// Delete a transcription job.
    delete_transcription_job(DeleteTranscriptionJobRequest) -> ();

    /// Start a medical transcription job.
    start_medical_transcription_job(StartMedicalTranscriptionJobRequest)
        -> StartMedicalTranscriptionJobResponse;
    /// Get a medical transcription job.
    get_medical_transcription_job(GetMedicalTranscriptionJobRequest)
        -> GetMedicalTranscriptionJobResponse;
    /// List medical transcription jobs.
    list_medical_transcription_jobs(ListMedicalTranscriptionJobsRequest)
        -> ListMedicalTranscriptionJobsResponse;
    /// Delete a medical transcription job.
    delete_medical_transcription_job(DeleteMedicalTranscriptionJobRequest) -> ();

    /// Create a call analytics category.
    create_call_analytics_category(CreateCallAnalyticsCategoryRequest)
        -> CreateCallAnalyticsCategoryResponse;
    /// Get a call analytics category.
    get_call_analytics_category(GetCallAnalyticsCategoryRequest)
        -> GetCallAnalyticsCategoryResponse;
    /// List call analytics categories.
    list_call_analytics_categories(ListCallAnalyticsCategoriesRequest)
        -> ListCallAnalyticsCategoriesResponse;
    /// Replace the rules of a call analytics category.
    update_call_analytics_category(UpdateCallAnalyticsCategoryRequest)
        -> UpdateCallAnalyticsCategoryResponse;
    /// Delete a call analytics category.
    delete_call_analytics_category(DeleteCallAnalyticsCategoryRequest) -> ();

    /// Start a call analytics job.
    start_call_analytics_job(StartCallAnalyticsJobRequest) -> StartCallAnalyticsJobResponse;
    /// Get a call analytics job.
    get_call_analytics_job(GetCallAnalyticsJobRequest) -> GetCallAnalyticsJobResponse;
    /// List call analytics jobs.
    list_call_analytics_jobs(ListCallAnalyticsJobsRequest) -> ListCallAnalyticsJobsResponse;
    /// Delete a call analytics job.
    delete_call_analytics_job(DeleteCallAnalyticsJobRequest) -> ();

    /// Start a medical scribe job.
    start_medical_scribe_job(StartMedicalScribeJobRequest) -> StartMedicalScribeJobResponse;
    /// Get a medical scribe job.
    get_medical_scribe_job(GetMedicalScribeJobRequest) -> GetMedicalScribeJobResponse;
    /// List medical scribe jobs.
    list_medical_scribe_jobs(ListMedicalScribeJobsRequest) -> ListMedicalScribeJobsResponse;
    /// Delete a medical scribe job.
    delete_medical_scribe_job(DeleteMedicalScribeJobRequest) -> ();

    /// Add or overwrite tags on a resource.
    tag_resource(TagResourceRequest) -> ();
    /// Remove tags from a resource.
    untag_resource(UntagResourceRequest) -> ();
    /// List the tags on a resource.
    list_tags_for_resource(ListTagsForResourceRequest) -> ListTagsForResourceResponse;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ErrorKind,
        error::TransportError,
        mock::MockTranscribe,
        protocol::{WireRequest, WireResponse},
    };
    use std::sync::atomic::{AtomicBool, Ordering};

    fn client() -> (Client, Arc<MockTranscribe>) {
        let mock = Arc::new(MockTranscribe::new());
        let client = Client::builder()
            .region("us-east-1")
            .transport(mock.clone())
            .build()
            .unwrap();
        (client, mock)
    }

    fn vocabulary(name: &str) -> CreateVocabularyRequest {
        CreateVocabularyRequest::with_phrases(name, "en-US", ["alpha", "beta"])
    }

    /// Forwards to the in-memory service until its own shutdown is called.
    #[derive(Debug)]
    struct Closing {
        service: MockTranscribe,
        closed: AtomicBool,
    }

    #[async_trait::async_trait]
    impl Transport for Closing {
        async fn send(
            &self,
            request: WireRequest,
        ) -> std::result::Result<WireResponse, TransportError> {
            if self.closed.load(Ordering::Acquire) {
                return Err(TransportError::Closed);
            }
            self.service.send(request).await
        }

        fn shutdown(&self) {
            self.closed.store(true, Ordering::Release);
        }
    }

    #[tokio::test]
    async fn test_vocabulary_lifecycle() {
        let (client, _) = client();
        let created = client.create_vocabulary(&vocabulary("v1")).await.unwrap();
        assert_eq!(created.vocabulary_name.as_deref(), Some("v1"));
        assert_eq!(created.vocabulary_state, Some(VocabularyState::Ready));

        let got = client
            .get_vocabulary(&GetVocabularyRequest::new("v1"))
            .await
            .unwrap();
        assert_eq!(got.language_code.as_deref(), Some("en-US"));
        assert!(got.download_uri.is_some());

        client
            .delete_vocabulary(&DeleteVocabularyRequest::new("v1"))
            .await
            .unwrap();
        let err = client
            .get_vocabulary(&GetVocabularyRequest::new("v1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.operation, Some("GetVocabulary"));
        assert!(err.request_id.is_some());

        let err = client
            .delete_vocabulary(&DeleteVocabularyRequest::new("v1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_endpoint_survives_first_use() {
        let mock = Arc::new(MockTranscribe::new());
        let client = Client::builder()
            .region("us-east-1")
            .endpoint("transcribe.us-east-1.example")
            .transport(mock)
            .build()
            .unwrap();
        client
            .list_vocabularies(&ListVocabulariesRequest::default())
            .await
            .unwrap();
        assert_eq!(client.config().endpoint, "https://transcribe.us-east-1.example");
    }

    #[tokio::test]
    async fn test_job_without_language_selection() {
        let (client, mock) = client();
        let request = StartTranscriptionJobRequest {
            transcription_job_name: "job1".into(),
            media: Media::new("s3://bucket/audio.wav"),
            ..Default::default()
        };
        let err = client.start_transcription_job(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let (client, _) = client();
        client.create_vocabulary(&vocabulary("v1")).await.unwrap();
        let err = client.create_vocabulary(&vocabulary("v1")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.code.as_deref(), Some("ConflictException"));
    }

    #[tokio::test]
    async fn test_invalid_request_never_sent() {
        let (client, mock) = client();
        let err = client
            .create_vocabulary(&CreateVocabularyRequest {
                vocabulary_name: "v1".into(),
                language_code: "en-US".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let (client, _) = client();
        for name in ["c", "a", "b"] {
            client.create_vocabulary(&vocabulary(name)).await.unwrap();
        }
        let first = client
            .list_vocabularies(&ListVocabulariesRequest {
                max_results: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = first
            .vocabularies
            .iter()
            .filter_map(|v| v.vocabulary_name.as_deref())
            .collect();
        assert_eq!(names, ["a", "b"]);
        assert!(first.next_token.is_some());

        let second = client
            .list_vocabularies(&ListVocabulariesRequest {
                max_results: Some(2),
                next_token: first.next_token,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second.vocabularies.len(), 1);
        assert_eq!(second.next_token, None);
    }

    #[tokio::test]
    async fn test_delete_missing_job_is_bad_request() {
        let (client, _) = client();
        let err = client
            .delete_transcription_job(&DeleteTranscriptionJobRequest::new("nope"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_undeclared_kind_becomes_unexpected() {
        let (client, mock) = client();
        mock.fail_next("NotFoundException", "gone").await;
        let err = client
            .list_vocabularies(&ListVocabulariesRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedResponse);
        assert_eq!(err.code.as_deref(), Some("NotFoundException"));
    }

    #[tokio::test]
    async fn test_internal_failure_is_retryable() {
        let (client, mock) = client();
        mock.fail_next("InternalFailureException", "try later").await;
        let err = client
            .list_language_models(&ListLanguageModelsRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InternalFailure);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let (client, mock) = client();
        mock.fail_transport_next("connection reset").await;
        let err = client
            .list_vocabulary_filters(&ListVocabularyFiltersRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transport);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_shutdown_rejects_calls() {
        let (client, mock) = client();
        let clone = client.clone();
        client.shutdown();
        client.shutdown();
        assert!(clone.is_shutdown());
        let err = clone
            .list_vocabularies(&ListVocabulariesRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ClientShutdown);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_with_endpoint_is_independent() {
        let (client, mock) = client();
        let other = client.with_endpoint("http://localhost:9000/").unwrap();
        assert_eq!(other.config().endpoint, "http://localhost:9000");
        assert_eq!(other.config().region, "us-east-1");
        assert_eq!(client.config().endpoint, "https://transcribe.us-east-1.amazonaws.com");

        client.shutdown();
        assert!(!other.is_shutdown());
        other
            .list_vocabularies(&ListVocabulariesRequest::default())
            .await
            .unwrap();
        assert_eq!(mock.request_count(), 1);
        assert!(client.with_endpoint("ftp://example").is_err());
    }

    #[tokio::test]
    async fn test_shutdown_leaves_shared_transport_open() {
        let transport = Arc::new(Closing {
            service: MockTranscribe::new(),
            closed: AtomicBool::new(false),
        });
        let original = Client::builder()
            .region("us-east-1")
            .transport(transport.clone())
            .build()
            .unwrap();
        let moved = original.with_endpoint("http://localhost:9000").unwrap();

        original.shutdown();
        assert!(!transport.closed.load(Ordering::Acquire));
        moved.create_vocabulary(&vocabulary("v1")).await.unwrap();
        assert_eq!(transport.service.request_count(), 1);

        moved.shutdown();
        assert!(!transport.closed.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn test_unknown_enum_value_never_sent() {
        let (client, mock) = client();
        let mut request =
            StartTranscriptionJobRequest::new("job1", "s3://bucket/call.wav", "en-US");
        request.media_format = Some(MediaFormat::Unknown);
        let err = client.start_transcription_job(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert!(err.message.contains("MediaFormat"));

        let err = client
            .list_vocabularies(&ListVocabulariesRequest {
                state_equals: Some(VocabularyState::Unknown),
                ..ListVocabulariesRequest::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_on_clones() {
        const CALLS: usize = 8;
        let (client, mock) = client();
        let requests: Vec<_> = (0..CALLS).map(|i| vocabulary(&format!("v{i}"))).collect();

        let handles: Vec<_> = requests
            .iter()
            .cloned()
            .map(|request| {
                let client = client.clone();
                tokio::spawn(async move { client.create_vocabulary(&request).await })
            })
            .collect();
        for handle in handles {
            let created = handle.await.unwrap().unwrap();
            assert_eq!(created.vocabulary_state, Some(VocabularyState::Ready));
        }

        assert_eq!(mock.request_count(), CALLS);
        for request in &requests {
            let meta = client.cached_response_metadata(request).unwrap();
            assert_eq!(meta.status, 200);
            assert!(meta.request_id.is_some());
        }
        let listed = client
            .list_vocabularies(&ListVocabulariesRequest {
                max_results: Some(100),
                ..ListVocabulariesRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.vocabularies.len(), CALLS);
    }

    #[tokio::test]
    async fn test_cached_response_metadata() {
        let (client, _) = client();
        let request = GetVocabularyRequest::new("missing");
        assert!(client.cached_response_metadata(&request).is_none());

        let _ = client.get_vocabulary(&request).await;
        let meta = client.cached_response_metadata(&request).unwrap();
        assert_eq!(meta.operation, "GetVocabulary");
        assert_eq!(meta.status, 400);
        assert!(meta.request_id.is_some());
        assert!(
            client
                .cached_response_metadata(&GetVocabularyRequest::new("other"))
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_language_model_lifecycle() {
        let (client, _) = client();
        let request = CreateLanguageModelRequest::new(
            "clm1",
            "en-US",
            BaseModelName::WideBand,
            "s3://bucket/train/",
            "arn:aws:iam::123456789012:role/Clm",
        );
        let created = client.create_language_model(&request).await.unwrap();
        assert_eq!(created.model_status, Some(ModelStatus::InProgress));

        let described = client
            .describe_language_model(&DescribeLanguageModelRequest::new("clm1"))
            .await
            .unwrap();
        let model = described.language_model.unwrap();
        assert_eq!(model.model_name.as_deref(), Some("clm1"));
        assert_eq!(model.base_model_name, Some(BaseModelName::WideBand));
        assert_eq!(
            model.input_data_config.map(|c| c.s3_uri).as_deref(),
            Some("s3://bucket/train/")
        );

        client
            .delete_language_model(&DeleteLanguageModelRequest::new("clm1"))
            .await
            .unwrap();
        let listed = client
            .list_language_models(&ListLanguageModelsRequest::default())
            .await
            .unwrap();
        assert!(listed.models.is_empty());
    }

    #[tokio::test]
    async fn test_transcription_job_lifecycle() {
        let (client, _) = client();
        let request = StartTranscriptionJobRequest::new("job1", "s3://bucket/audio.wav", "en-US");
        let started = client.start_transcription_job(&request).await.unwrap();
        let job = started.transcription_job.unwrap();
        assert_eq!(job.transcription_job_status, Some(JobStatus::InProgress));

        let listed = client
            .list_transcription_jobs(&ListTranscriptionJobsRequest {
                status: Some(JobStatus::InProgress),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(listed.transcription_job_summaries.len(), 1);

        let err = client.start_transcription_job(&request).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        client
            .delete_transcription_job(&DeleteTranscriptionJobRequest::new("job1"))
            .await
            .unwrap();
        let err = client
            .get_transcription_job(&GetTranscriptionJobRequest::new("job1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_category_update_keeps_input_type() {
        let (client, _) = client();
        let rules = vec![Rule::TranscriptFilter(TranscriptFilter::exact(["refund"]))];
        client
            .create_call_analytics_category(&CreateCallAnalyticsCategoryRequest::new(
                "refunds",
                rules.clone(),
            ))
            .await
            .unwrap();

        let err = client
            .update_call_analytics_category(&UpdateCallAnalyticsCategoryRequest {
                category_name: "refunds".into(),
                rules: rules.clone(),
                input_type: Some(InputType::RealTime),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::BadRequest);

        let err = client
            .update_call_analytics_category(&UpdateCallAnalyticsCategoryRequest {
                category_name: "missing".into(),
                rules,
                input_type: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_tagging() {
        let (client, mock) = client();
        client.create_vocabulary(&vocabulary("v1")).await.unwrap();
        let arn = mock.arn("vocabulary", "v1").await;

        client
            .tag_resource(&TagResourceRequest::new(
                arn.clone(),
                vec![Tag::new("team", "speech"), Tag::new("env", "dev")],
            ))
            .await
            .unwrap();
        client
            .untag_resource(&UntagResourceRequest::new(arn.clone(), ["env"]))
            .await
            .unwrap();

        let listed = client
            .list_tags_for_resource(&ListTagsForResourceRequest::new(arn))
            .await
            .unwrap();
        assert_eq!(listed.tags, vec![Tag::new("team", "speech")]);

        let missing = mock.arn("vocabulary", "nope").await;
        let err = client
            .list_tags_for_resource(&ListTagsForResourceRequest::new(missing))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_debug_hides_internals() {
        let (client, _) = client();
        let debug = format!("{client:?}");
        assert!(debug.contains("us-east-1"));
        assert!(debug.contains(".."));
    }
}
