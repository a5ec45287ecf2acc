//! In-memory stand-in for the transcription service.
//!
//! [`MockTranscribe`] implements [`Transport`] by decoding each request and
//! applying it to an in-memory store, replying exactly as the service would:
//! JSON bodies on success, `{"__type", "message"}` faults otherwise. It is
//! meant for tests and offline development.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use transcribe::{Client, mock::MockTranscribe};
//!
//! let mock = Arc::new(MockTranscribe::new());
//! let client = Client::builder()
//!     .region("us-east-1")
//!     .transport(mock.clone())
//!     .build()?;
//! ```

use std::{
    collections::{BTreeMap, VecDeque},
    sync::atomic::{AtomicUsize, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tracing::trace;
use uuid::Uuid;

use crate::{
    error::TransportError,
    model::*,
    operation::NoOutput,
    protocol::{WireRequest, WireResponse},
    transport::Transport,
};

/// Page size used when a list request does not set `MaxResults`.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// A fault returned by the in-memory service.
#[derive(Debug, Clone)]
struct Fault {
    code: String,
    message: String,
}

impl Fault {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_owned(),
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BadRequestException", message)
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new("NotFoundException", message)
    }

    fn conflict(message: impl Into<String>) -> Self {
        Self::new("ConflictException", message)
    }
}

type Reply = Result<String, Fault>;

#[derive(Debug)]
enum Injected {
    Service(Fault),
    Transport(String),
}

/// Language and modification time of a vocabulary-like resource.
#[derive(Debug, Clone)]
struct Lexicon {
    language_code: String,
    last_modified_time: f64,
}

#[derive(Debug, Default)]
struct Store {
    region: String,
    account_id: String,
    vocabularies: BTreeMap<String, Lexicon>,
    vocabulary_filters: BTreeMap<String, Lexicon>,
    medical_vocabularies: BTreeMap<String, Lexicon>,
    language_models: BTreeMap<String, LanguageModel>,
    categories: BTreeMap<String, CategoryProperties>,
    transcription_jobs: BTreeMap<String, TranscriptionJob>,
    medical_jobs: BTreeMap<String, MedicalTranscriptionJob>,
    call_analytics_jobs: BTreeMap<String, CallAnalyticsJob>,
    scribe_jobs: BTreeMap<String, MedicalScribeJob>,
    tags: BTreeMap<String, Vec<Tag>>,
    injected: VecDeque<Injected>,
}

/// In-memory transcription service.
#[derive(Debug)]
pub struct MockTranscribe {
    store: Mutex<Store>,
    requests: AtomicUsize,
}

impl Default for MockTranscribe {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscribe {
    /// A service in `us-east-1` owned by account `123456789012`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_account("us-east-1", "123456789012")
    }

    /// A service in the given region and account.
    #[must_use]
    pub fn with_account(region: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            store: Mutex::new(Store {
                region: region.into(),
                account_id: account_id.into(),
                ..Store::default()
            }),
            requests: AtomicUsize::new(0),
        }
    }

    /// ARN of a resource held by this service.
    ///
    /// `resource_type` is one of `vocabulary`, `vocabulary-filter`,
    /// `medical-vocabulary`, `language-model`, `call-analytics-category`,
    /// `transcription-job`, `medical-transcription-job`,
    /// `call-analytics-job` or `medical-scribe-job`.
    pub async fn arn(&self, resource_type: &str, name: &str) -> String {
        self.store.lock().await.arn(resource_type, name)
    }

    /// Fail the next request with a service fault.
    pub async fn fail_next(&self, code: impl Into<String>, message: impl Into<String>) {
        let fault = Fault {
            code: code.into(),
            message: message.into(),
        };
        self.store
            .lock()
            .await
            .injected
            .push_back(Injected::Service(fault));
    }

    /// Fail the next request before any response is produced.
    pub async fn fail_transport_next(&self, message: impl Into<String>) {
        self.store
            .lock()
            .await
            .injected
            .push_back(Injected::Transport(message.into()));
    }

    /// Number of requests received, including failed ones.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTranscribe {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock().await;
        trace!(operation = request.operation, body = %request.body, "Mock request");

        let reply = match store.injected.pop_front() {
            Some(Injected::Transport(message)) => return Err(TransportError::Other(message)),
            Some(Injected::Service(fault)) => Err(fault),
            None => store.handle(request.operation, &request.body),
        };

        let response = match reply {
            Ok(body) => WireResponse::ok(body),
            Err(fault) => WireResponse::fault(&fault.code, &fault.message),
        };
        Ok(response.with_request_id(Uuid::new_v4().to_string()))
    }
}

fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}

fn run<Req, Resp>(body: &str, handler: impl FnOnce(Req) -> Result<Resp, Fault>) -> Reply
where
    Req: DeserializeOwned,
    Resp: Serialize,
{
    let request = serde_json::from_str(body)
        .map_err(|e| Fault::bad_request(format!("malformed request body: {e}")))?;
    let response = handler(request)?;
    serde_json::to_string(&response)
        .map_err(|e| Fault::new("InternalFailureException", e.to_string()))
}

/// One page of `items` and the token of the next page.
fn paginate<T>(
    items: Vec<T>,
    next_token: Option<&str>,
    max_results: Option<u32>,
) -> Result<(Vec<T>, Option<String>), Fault> {
    let start = match next_token {
        Some(token) => token
            .parse::<usize>()
            .map_err(|_| Fault::bad_request("NextToken is not valid"))?,
        None => 0,
    };
    let size = match max_results {
        None => DEFAULT_PAGE_SIZE,
        Some(n) if crate::validate::MAX_RESULTS_RANGE.contains(&n) => n as usize,
        Some(n) => return Err(Fault::bad_request(format!("MaxResults {n} is out of range"))),
    };
    let total = items.len();
    let page: Vec<T> = items.into_iter().skip(start).take(size).collect();
    let end = start.saturating_add(size);
    let next = (end < total).then(|| end.to_string());
    Ok((page, next))
}

fn matches_name(name: &str, filter: Option<&str>) -> bool {
    filter.is_none_or(|f| name.contains(f))
}

fn conflict(kind: &str, name: &str) -> Fault {
    Fault::conflict(format!("{kind} {name} already exists"))
}

fn missing(kind: &str, name: &str) -> Fault {
    Fault::not_found(format!("{kind} {name} was not found"))
}

/// Deletes of models and jobs report a missing name as a bad request.
fn missing_on_delete(kind: &str, name: &str) -> Fault {
    Fault::bad_request(format!("{kind} {name} does not exist"))
}

impl Store {
    fn arn(&self, resource_type: &str, name: &str) -> String {
        format!(
            "arn:aws:transcribe:{}:{}:{resource_type}/{name}",
            self.region, self.account_id
        )
    }

    fn tag_on_create(&mut self, resource_type: &str, name: &str, tags: Option<Vec<Tag>>) {
        if let Some(tags) = tags {
            let arn = self.arn(resource_type, name);
            self.tags.insert(arn, tags);
        }
    }

    fn untag_all(&mut self, resource_type: &str, name: &str) {
        let arn = self.arn(resource_type, name);
        self.tags.remove(&arn);
    }

    fn handle(&mut self, operation: &str, body: &str) -> Reply {
        match operation {
            "CreateVocabulary" => run(body, |r| self.create_vocabulary(r)),
            "GetVocabulary" => run(body, |r| self.get_vocabulary(r)),
            "ListVocabularies" => run(body, |r| self.list_vocabularies(r)),
            "UpdateVocabulary" => run(body, |r| self.update_vocabulary(r)),
            "DeleteVocabulary" => run(body, |r| self.delete_vocabulary(r)),
            "CreateVocabularyFilter" => run(body, |r| self.create_vocabulary_filter(r)),
            "GetVocabularyFilter" => run(body, |r| self.get_vocabulary_filter(r)),
            "ListVocabularyFilters" => run(body, |r| self.list_vocabulary_filters(r)),
            "UpdateVocabularyFilter" => run(body, |r| self.update_vocabulary_filter(r)),
            "DeleteVocabularyFilter" => run(body, |r| self.delete_vocabulary_filter(r)),
            "CreateMedicalVocabulary" => run(body, |r| self.create_medical_vocabulary(r)),
            "GetMedicalVocabulary" => run(body, |r| self.get_medical_vocabulary(r)),
            "ListMedicalVocabularies" => run(body, |r| self.list_medical_vocabularies(r)),
            "UpdateMedicalVocabulary" => run(body, |r| self.update_medical_vocabulary(r)),
            "DeleteMedicalVocabulary" => run(body, |r| self.delete_medical_vocabulary(r)),
            "CreateLanguageModel" => run(body, |r| self.create_language_model(r)),
            "DescribeLanguageModel" => run(body, |r| self.describe_language_model(r)),
            "ListLanguageModels" => run(body, |r| self.list_language_models(r)),
            "DeleteLanguageModel" => run(body, |r| self.delete_language_model(r)),
            "StartTranscriptionJob" => run(body, |r| self.start_transcription_job(r)),
            "GetTranscriptionJob" => run(body, |r| self.get_transcription_job(r)),
            "ListTranscriptionJobs" => run(body, |r| self.list_transcription_jobs(r)),
            "DeleteTranscriptionJob" => run(body, |r| self.delete_transcription_job(r)),
            "StartMedicalTranscriptionJob" => run(body, |r| self.start_medical_job(r)),
            "GetMedicalTranscriptionJob" => run(body, |r| self.get_medical_job(r)),
            "ListMedicalTranscriptionJobs" => run(body, |r| self.list_medical_jobs(r)),
            "DeleteMedicalTranscriptionJob" => run(body, |r| self.delete_medical_job(r)),
            "CreateCallAnalyticsCategory" => run(body, |r| self.create_category(r)),
            "GetCallAnalyticsCategory" => run(body, |r| self.get_category(r)),
            "ListCallAnalyticsCategories" => run(body, |r| self.list_categories(r)),
            "UpdateCallAnalyticsCategory" => run(body, |r| self.update_category(r)),
            "DeleteCallAnalyticsCategory" => run(body, |r| self.delete_category(r)),
            "StartCallAnalyticsJob" => run(body, |r| self.start_call_analytics_job(r)),
            "GetCallAnalyticsJob" => run(body, |r| self.get_call_analytics_job(r)),
            "ListCallAnalyticsJobs" => run(body, |r| self.list_call_analytics_jobs(r)),
            "DeleteCallAnalyticsJob" => run(body, |r| self.delete_call_analytics_job(r)),
            "StartMedicalScribeJob" => run(body, |r| self.start_scribe_job(r)),
            "GetMedicalScribeJob" => run(body, |r| self.get_scribe_job(r)),
            "ListMedicalScribeJobs" => run(body, |r| self.list_scribe_jobs(r)),
            "DeleteMedicalScribeJob" => run(body, |r| self.delete_scribe_job(r)),
            "TagResource" => run(body, |r| self.tag_resource(r)),
            "UntagResource" => run(body, |r| self.untag_resource(r)),
            "ListTagsForResource" => run(body, |r| self.list_tags_for_resource(r)),
            other => Err(Fault::new(
                "UnknownOperationException",
                format!("operation {other} is not supported"),
            )),
        }
    }

    // Vocabularies

    fn create_vocabulary(
        &mut self,
        r: CreateVocabularyRequest,
    ) -> Result<CreateVocabularyResponse, Fault> {
        if self.vocabularies.contains_key(&r.vocabulary_name) {
            return Err(conflict("vocabulary", &r.vocabulary_name));
        }
        let entry = Lexicon {
            language_code: r.language_code,
            last_modified_time: now(),
        };
        let response = CreateVocabularyResponse {
            vocabulary_name: Some(r.vocabulary_name.clone()),
            language_code: Some(entry.language_code.clone()),
            vocabulary_state: Some(VocabularyState::Ready),
            last_modified_time: Some(entry.last_modified_time),
            failure_reason: None,
        };
        self.tag_on_create("vocabulary", &r.vocabulary_name, r.tags);
        self.vocabularies.insert(r.vocabulary_name, entry);
        Ok(response)
    }

    fn get_vocabulary(&self, r: GetVocabularyRequest) -> Result<GetVocabularyResponse, Fault> {
        let entry = self
            .vocabularies
            .get(&r.vocabulary_name)
            .ok_or_else(|| missing("vocabulary", &r.vocabulary_name))?;
        Ok(GetVocabularyResponse {
            download_uri: Some(format!(
                "https://s3.{}.amazonaws.com/vocabularies/{}",
                self.region, r.vocabulary_name
            )),
            language_code: Some(entry.language_code.clone()),
            vocabulary_state: Some(VocabularyState::Ready),
            last_modified_time: Some(entry.last_modified_time),
            failure_reason: None,
            vocabulary_name: Some(r.vocabulary_name),
        })
    }

    fn list_vocabularies(
        &self,
        r: ListVocabulariesRequest,
    ) -> Result<ListVocabulariesResponse, Fault> {
        let items: Vec<VocabularyInfo> = self
            .vocabularies
            .iter()
            .filter(|(name, _)| matches_name(name, r.name_contains.as_deref()))
            .filter(|_| r.state_equals.is_none_or(|s| s == VocabularyState::Ready))
            .map(|(name, entry)| VocabularyInfo {
                vocabulary_name: Some(name.clone()),
                language_code: Some(entry.language_code.clone()),
                last_modified_time: Some(entry.last_modified_time),
                vocabulary_state: Some(VocabularyState::Ready),
            })
            .collect();
        let (vocabularies, next_token) =
            paginate(items, r.next_token.as_deref(), r.max_results)?;
        Ok(ListVocabulariesResponse {
            status: r.state_equals,
            next_token,
            vocabularies,
        })
    }

    fn update_vocabulary(
        &mut self,
        r: UpdateVocabularyRequest,
    ) -> Result<UpdateVocabularyResponse, Fault> {
        let entry = self
            .vocabularies
            .get_mut(&r.vocabulary_name)
            .ok_or_else(|| missing("vocabulary", &r.vocabulary_name))?;
        entry.language_code = r.language_code;
        entry.last_modified_time = now();
        Ok(UpdateVocabularyResponse {
            language_code: Some(entry.language_code.clone()),
            last_modified_time: Some(entry.last_modified_time),
            vocabulary_state: Some(VocabularyState::Ready),
            vocabulary_name: Some(r.vocabulary_name),
        })
    }

    fn delete_vocabulary(&mut self, r: DeleteVocabularyRequest) -> Result<NoOutput, Fault> {
        self.vocabularies
            .remove(&r.vocabulary_name)
            .ok_or_else(|| missing("vocabulary", &r.vocabulary_name))?;
        self.untag_all("vocabulary", &r.vocabulary_name);
        Ok(NoOutput {})
    }

    // Vocabulary filters

    fn create_vocabulary_filter(
        &mut self,
        r: CreateVocabularyFilterRequest,
    ) -> Result<CreateVocabularyFilterResponse, Fault> {
        if self.vocabulary_filters.contains_key(&r.vocabulary_filter_name) {
            return Err(conflict("vocabulary filter", &r.vocabulary_filter_name));
        }
        let entry = Lexicon {
            language_code: r.language_code,
            last_modified_time: now(),
        };
        let response = CreateVocabularyFilterResponse {
            vocabulary_filter_name: Some(r.vocabulary_filter_name.clone()),
            language_code: Some(entry.language_code.clone()),
            last_modified_time: Some(entry.last_modified_time),
        };
        self.tag_on_create("vocabulary-filter", &r.vocabulary_filter_name, r.tags);
        self.vocabulary_filters
            .insert(r.vocabulary_filter_name, entry);
        Ok(response)
    }

    fn get_vocabulary_filter(
        &self,
        r: GetVocabularyFilterRequest,
    ) -> Result<GetVocabularyFilterResponse, Fault> {
        let entry = self
            .vocabulary_filters
            .get(&r.vocabulary_filter_name)
            .ok_or_else(|| missing("vocabulary filter", &r.vocabulary_filter_name))?;
        Ok(GetVocabularyFilterResponse {
            download_uri: Some(format!(
                "https://s3.{}.amazonaws.com/vocabulary-filters/{}",
                self.region, r.vocabulary_filter_name
            )),
            language_code: Some(entry.language_code.clone()),
            last_modified_time: Some(entry.last_modified_time),
            vocabulary_filter_name: Some(r.vocabulary_filter_name),
        })
    }

    fn list_vocabulary_filters(
        &self,
        r: ListVocabularyFiltersRequest,
    ) -> Result<ListVocabularyFiltersResponse, Fault> {
        let items: Vec<VocabularyFilterInfo> = self
            .vocabulary_filters
            .iter()
            .filter(|(name, _)| matches_name(name, r.name_contains.as_deref()))
            .map(|(name, entry)| VocabularyFilterInfo {
                vocabulary_filter_name: Some(name.clone()),
                language_code: Some(entry.language_code.clone()),
                last_modified_time: Some(entry.last_modified_time),
            })
            .collect();
        let (vocabulary_filters, next_token) =
            paginate(items, r.next_token.as_deref(), r.max_results)?;
        Ok(ListVocabularyFiltersResponse {
            next_token,
            vocabulary_filters,
        })
    }

    fn update_vocabulary_filter(
        &mut self,
        r: UpdateVocabularyFilterRequest,
    ) -> Result<UpdateVocabularyFilterResponse, Fault> {
        let entry = self
            .vocabulary_filters
            .get_mut(&r.vocabulary_filter_name)
            .ok_or_else(|| missing("vocabulary filter", &r.vocabulary_filter_name))?;
        entry.last_modified_time = now();
        Ok(UpdateVocabularyFilterResponse {
            language_code: Some(entry.language_code.clone()),
            last_modified_time: Some(entry.last_modified_time),
            vocabulary_filter_name: Some(r.vocabulary_filter_name),
        })
    }

    fn delete_vocabulary_filter(
        &mut self,
        r: DeleteVocabularyFilterRequest,
    ) -> Result<NoOutput, Fault> {
        self.vocabulary_filters
            .remove(&r.vocabulary_filter_name)
            .ok_or_else(|| missing("vocabulary filter", &r.vocabulary_filter_name))?;
        self.untag_all("vocabulary-filter", &r.vocabulary_filter_name);
        Ok(NoOutput {})
    }

    // Medical vocabularies

    fn create_medical_vocabulary(
        &mut self,
        r: CreateMedicalVocabularyRequest,
    ) -> Result<CreateMedicalVocabularyResponse, Fault> {
        if self.medical_vocabularies.contains_key(&r.vocabulary_name) {
            return Err(conflict("medical vocabulary", &r.vocabulary_name));
        }
        let entry = Lexicon {
            language_code: r.language_code,
            last_modified_time: now(),
        };
        let response = CreateMedicalVocabularyResponse {
            vocabulary_name: Some(r.vocabulary_name.clone()),
            language_code: Some(entry.language_code.clone()),
            vocabulary_state: Some(VocabularyState::Ready),
            last_modified_time: Some(entry.last_modified_time),
            failure_reason: None,
        };
        self.tag_on_create("medical-vocabulary", &r.vocabulary_name, r.tags);
        self.medical_vocabularies.insert(r.vocabulary_name, entry);
        Ok(response)
    }

    fn get_medical_vocabulary(
        &self,
        r: GetMedicalVocabularyRequest,
    ) -> Result<GetMedicalVocabularyResponse, Fault> {
        let entry = self
            .medical_vocabularies
            .get(&r.vocabulary_name)
            .ok_or_else(|| missing("medical vocabulary", &r.vocabulary_name))?;
        Ok(GetMedicalVocabularyResponse {
            download_uri: Some(format!(
                "https://s3.{}.amazonaws.com/medical-vocabularies/{}",
                self.region, r.vocabulary_name
            )),
            language_code: Some(entry.language_code.clone()),
            vocabulary_state: Some(VocabularyState::Ready),
            last_modified_time: Some(entry.last_modified_time),
            failure_reason: None,
            vocabulary_name: Some(r.vocabulary_name),
        })
    }

    fn list_medical_vocabularies(
        &self,
        r: ListMedicalVocabulariesRequest,
    ) -> Result<ListMedicalVocabulariesResponse, Fault> {
        let items: Vec<VocabularyInfo> = self
            .medical_vocabularies
            .iter()
            .filter(|(name, _)| matches_name(name, r.name_contains.as_deref()))
            .filter(|_| r.state_equals.is_none_or(|s| s == VocabularyState::Ready))
            .map(|(name, entry)| VocabularyInfo {
                vocabulary_name: Some(name.clone()),
                language_code: Some(entry.language_code.clone()),
                last_modified_time: Some(entry.last_modified_time),
                vocabulary_state: Some(VocabularyState::Ready),
            })
            .collect();
        let (vocabularies, next_token) =
            paginate(items, r.next_token.as_deref(), r.max_results)?;
        Ok(ListMedicalVocabulariesResponse {
            status: r.state_equals,
            next_token,
            vocabularies,
        })
    }

    fn update_medical_vocabulary(
        &mut self,
        r: UpdateMedicalVocabularyRequest,
    ) -> Result<UpdateMedicalVocabularyResponse, Fault> {
        let entry = self
            .medical_vocabularies
            .get_mut(&r.vocabulary_name)
            .ok_or_else(|| missing("medical vocabulary", &r.vocabulary_name))?;
        entry.last_modified_time = now();
        Ok(UpdateMedicalVocabularyResponse {
            language_code: Some(entry.language_code.clone()),
            last_modified_time: Some(entry.last_modified_time),
            vocabulary_state: Some(VocabularyState::Ready),
            vocabulary_name: Some(r.vocabulary_name),
        })
    }

    fn delete_medical_vocabulary(
        &mut self,
        r: DeleteMedicalVocabularyRequest,
    ) -> Result<NoOutput, Fault> {
        self.medical_vocabularies
            .remove(&r.vocabulary_name)
            .ok_or_else(|| missing("medical vocabulary", &r.vocabulary_name))?;
        self.untag_all("medical-vocabulary", &r.vocabulary_name);
        Ok(NoOutput {})
    }

    // Language models

    fn create_language_model(
        &mut self,
        r: CreateLanguageModelRequest,
    ) -> Result<CreateLanguageModelResponse, Fault> {
        if self.language_models.contains_key(&r.model_name) {
            return Err(conflict("language model", &r.model_name));
        }
        let time = now();
        let model = LanguageModel {
            model_name: Some(r.model_name.clone()),
            create_time: Some(time),
            last_modified_time: Some(time),
            language_code: Some(r.language_code),
            base_model_name: Some(r.base_model_name),
            model_status: Some(ModelStatus::InProgress),
            upgrade_availability: Some(false),
            failure_reason: None,
            input_data_config: Some(r.input_data_config),
        };
        let response = CreateLanguageModelResponse {
            language_code: model.language_code.clone(),
            base_model_name: model.base_model_name,
            model_name: model.model_name.clone(),
            input_data_config: model.input_data_config.clone(),
            model_status: model.model_status,
        };
        self.tag_on_create("language-model", &r.model_name, r.tags);
        self.language_models.insert(r.model_name, model);
        Ok(response)
    }

    fn describe_language_model(
        &self,
        r: DescribeLanguageModelRequest,
    ) -> Result<DescribeLanguageModelResponse, Fault> {
        let model = self
            .language_models
            .get(&r.model_name)
            .ok_or_else(|| missing("language model", &r.model_name))?;
        Ok(DescribeLanguageModelResponse {
            language_model: Some(model.clone()),
        })
    }

    fn list_language_models(
        &self,
        r: ListLanguageModelsRequest,
    ) -> Result<ListLanguageModelsResponse, Fault> {
        let items: Vec<LanguageModel> = self
            .language_models
            .iter()
            .filter(|(name, _)| matches_name(name, r.name_contains.as_deref()))
            .filter(|(_, m)| r.status_equals.is_none_or(|s| m.model_status == Some(s)))
            .map(|(_, m)| m.clone())
            .collect();
        let (models, next_token) = paginate(items, r.next_token.as_deref(), r.max_results)?;
        Ok(ListLanguageModelsResponse { next_token, models })
    }

    fn delete_language_model(&mut self, r: DeleteLanguageModelRequest) -> Result<NoOutput, Fault> {
        self.language_models
            .remove(&r.model_name)
            .ok_or_else(|| missing_on_delete("language model", &r.model_name))?;
        self.untag_all("language-model", &r.model_name);
        Ok(NoOutput {})
    }

    // Transcription jobs

    fn start_transcription_job(
        &mut self,
        r: StartTranscriptionJobRequest,
    ) -> Result<StartTranscriptionJobResponse, Fault> {
        if self.transcription_jobs.contains_key(&r.transcription_job_name) {
            return Err(conflict("transcription job", &r.transcription_job_name));
        }
        let time = now();
        let job = TranscriptionJob {
            transcription_job_name: Some(r.transcription_job_name.clone()),
            transcription_job_status: Some(JobStatus::InProgress),
            language_code: r.language_code,
            media_sample_rate_hertz: r.media_sample_rate_hertz,
            media_format: r.media_format,
            media: Some(r.media),
            start_time: Some(time),
            creation_time: Some(time),
            settings: r.settings,
            model_settings: r.model_settings,
            job_execution_settings: r.job_execution_settings,
            content_redaction: r.content_redaction,
            identify_language: r.identify_language,
            identify_multiple_languages: r.identify_multiple_languages,
            language_options: r.language_options,
            subtitles: r.subtitles,
            tags: r.tags.clone(),
            ..TranscriptionJob::default()
        };
        self.tag_on_create("transcription-job", &r.transcription_job_name, r.tags);
        self.transcription_jobs
            .insert(r.transcription_job_name, job.clone());
        Ok(StartTranscriptionJobResponse {
            transcription_job: Some(job),
        })
    }

    fn get_transcription_job(
        &self,
        r: GetTranscriptionJobRequest,
    ) -> Result<GetTranscriptionJobResponse, Fault> {
        let job = self
            .transcription_jobs
            .get(&r.transcription_job_name)
            .ok_or_else(|| missing("transcription job", &r.transcription_job_name))?;
        Ok(GetTranscriptionJobResponse {
            transcription_job: Some(job.clone()),
        })
    }

    fn list_transcription_jobs(
        &self,
        r: ListTranscriptionJobsRequest,
    ) -> Result<ListTranscriptionJobsResponse, Fault> {
        let items: Vec<TranscriptionJobSummary> = self
            .transcription_jobs
            .iter()
            .filter(|(name, _)| matches_name(name, r.job_name_contains.as_deref()))
            .filter(|(_, j)| r.status.is_none_or(|s| j.transcription_job_status == Some(s)))
            .map(|(name, j)| TranscriptionJobSummary {
                transcription_job_name: Some(name.clone()),
                creation_time: j.creation_time,
                start_time: j.start_time,
                completion_time: j.completion_time,
                language_code: j.language_code.clone(),
                transcription_job_status: j.transcription_job_status,
                failure_reason: j.failure_reason.clone(),
                model_settings: j.model_settings.clone(),
                identify_language: j.identify_language,
                identify_multiple_languages: j.identify_multiple_languages,
            })
            .collect();
        let (transcription_job_summaries, next_token) =
            paginate(items, r.next_token.as_deref(), r.max_results)?;
        Ok(ListTranscriptionJobsResponse {
            status: r.status,
            next_token,
            transcription_job_summaries,
        })
    }

    fn delete_transcription_job(
        &mut self,
        r: DeleteTranscriptionJobRequest,
    ) -> Result<NoOutput, Fault> {
        self.transcription_jobs
            .remove(&r.transcription_job_name)
            .ok_or_else(|| missing_on_delete("transcription job", &r.transcription_job_name))?;
        self.untag_all("transcription-job", &r.transcription_job_name);
        Ok(NoOutput {})
    }

    // Medical transcription jobs

    fn start_medical_job(
        &mut self,
        r: StartMedicalTranscriptionJobRequest,
    ) -> Result<StartMedicalTranscriptionJobResponse, Fault> {
        let name = r.medical_transcription_job_name;
        if self.medical_jobs.contains_key(&name) {
            return Err(conflict("medical transcription job", &name));
        }
        let time = now();
        let job = MedicalTranscriptionJob {
            medical_transcription_job_name: Some(name.clone()),
            transcription_job_status: Some(JobStatus::InProgress),
            language_code: Some(r.language_code),
            media_sample_rate_hertz: r.media_sample_rate_hertz,
            media_format: r.media_format,
            media: Some(r.media),
            start_time: Some(time),
            creation_time: Some(time),
            settings: r.settings,
            content_identification_type: r.content_identification_type,
            specialty: Some(r.specialty),
            transcription_type: Some(r.transcription_type),
            tags: r.tags.clone(),
            ..MedicalTranscriptionJob::default()
        };
        self.tag_on_create("medical-transcription-job", &name, r.tags);
        self.medical_jobs.insert(name, job.clone());
        Ok(StartMedicalTranscriptionJobResponse {
            medical_transcription_job: Some(job),
        })
    }

    fn get_medical_job(
        &self,
        r: GetMedicalTranscriptionJobRequest,
    ) -> Result<GetMedicalTranscriptionJobResponse, Fault> {
        let name = &r.medical_transcription_job_name;
        let job = self
            .medical_jobs
            .get(name)
            .ok_or_else(|| missing("medical transcription job", name))?;
        Ok(GetMedicalTranscriptionJobResponse {
            medical_transcription_job: Some(job.clone()),
        })
    }

    fn list_medical_jobs(
        &self,
        r: ListMedicalTranscriptionJobsRequest,
    ) -> Result<ListMedicalTranscriptionJobsResponse, Fault> {
        let items: Vec<MedicalTranscriptionJobSummary> = self
            .medical_jobs
            .iter()
            .filter(|(name, _)| matches_name(name, r.job_name_contains.as_deref()))
            .filter(|(_, j)| r.status.is_none_or(|s| j.transcription_job_status == Some(s)))
            .map(|(name, j)| MedicalTranscriptionJobSummary {
                medical_transcription_job_name: Some(name.clone()),
                creation_time: j.creation_time,
                start_time: j.start_time,
                completion_time: j.completion_time,
                language_code: j.language_code.clone(),
                transcription_job_status: j.transcription_job_status,
                failure_reason: j.failure_reason.clone(),
                specialty: j.specialty,
                transcription_type: j.transcription_type,
            })
            .collect();
        let (medical_transcription_job_summaries, next_token) =
            paginate(items, r.next_token.as_deref(), r.max_results)?;
        Ok(ListMedicalTranscriptionJobsResponse {
            status: r.status,
            next_token,
            medical_transcription_job_summaries,
        })
    }

    fn delete_medical_job(
        &mut self,
        r: DeleteMedicalTranscriptionJobRequest,
    ) -> Result<NoOutput, Fault> {
        let name = &r.medical_transcription_job_name;
        self.medical_jobs
            .remove(name)
            .ok_or_else(|| missing_on_delete("medical transcription job", name))?;
        self.untag_all("medical-transcription-job", name);
        Ok(NoOutput {})
    }

    // Call analytics categories

    fn create_category(
        &mut self,
        r: CreateCallAnalyticsCategoryRequest,
    ) -> Result<CreateCallAnalyticsCategoryResponse, Fault> {
        if self.categories.contains_key(&r.category_name) {
            return Err(conflict("category", &r.category_name));
        }
        let time = now();
        let category = CategoryProperties {
            category_name: Some(r.category_name.clone()),
            rules: r.rules,
            create_time: Some(time),
            last_update_time: Some(time),
            tags: r.tags.clone(),
            input_type: Some(r.input_type.unwrap_or(InputType::PostCall)),
        };
        self.tag_on_create("call-analytics-category", &r.category_name, r.tags);
        self.categories.insert(r.category_name, category.clone());
        Ok(CreateCallAnalyticsCategoryResponse {
            category_properties: Some(category),
        })
    }

    fn get_category(
        &self,
        r: GetCallAnalyticsCategoryRequest,
    ) -> Result<GetCallAnalyticsCategoryResponse, Fault> {
        let category = self
            .categories
            .get(&r.category_name)
            .ok_or_else(|| missing("category", &r.category_name))?;
        Ok(GetCallAnalyticsCategoryResponse {
            category_properties: Some(category.clone()),
        })
    }

    fn list_categories(
        &self,
        r: ListCallAnalyticsCategoriesRequest,
    ) -> Result<ListCallAnalyticsCategoriesResponse, Fault> {
        let items: Vec<CategoryProperties> = self.categories.values().cloned().collect();
        let (categories, next_token) = paginate(items, r.next_token.as_deref(), r.max_results)?;
        Ok(ListCallAnalyticsCategoriesResponse {
            next_token,
            categories,
        })
    }

    fn update_category(
        &mut self,
        r: UpdateCallAnalyticsCategoryRequest,
    ) -> Result<UpdateCallAnalyticsCategoryResponse, Fault> {
        let category = self
            .categories
            .get_mut(&r.category_name)
            .ok_or_else(|| missing("category", &r.category_name))?;
        if r.input_type.is_some() && r.input_type != category.input_type {
            return Err(Fault::bad_request(
                "InputType cannot be changed on an existing category",
            ));
        }
        category.rules = r.rules;
        category.last_update_time = Some(now());
        Ok(UpdateCallAnalyticsCategoryResponse {
            category_properties: Some(category.clone()),
        })
    }

    fn delete_category(
        &mut self,
        r: DeleteCallAnalyticsCategoryRequest,
    ) -> Result<NoOutput, Fault> {
        self.categories
            .remove(&r.category_name)
            .ok_or_else(|| missing("category", &r.category_name))?;
        self.untag_all("call-analytics-category", &r.category_name);
        Ok(NoOutput {})
    }

    // Call analytics jobs

    fn start_call_analytics_job(
        &mut self,
        r: StartCallAnalyticsJobRequest,
    ) -> Result<StartCallAnalyticsJobResponse, Fault> {
        let name = r.call_analytics_job_name;
        if self.call_analytics_jobs.contains_key(&name) {
            return Err(conflict("call analytics job", &name));
        }
        let time = now();
        let job = CallAnalyticsJob {
            call_analytics_job_name: Some(name.clone()),
            call_analytics_job_status: Some(JobStatus::InProgress),
            media: Some(r.media),
            start_time: Some(time),
            creation_time: Some(time),
            data_access_role_arn: r.data_access_role_arn,
            settings: r.settings,
            channel_definitions: r.channel_definitions,
            ..CallAnalyticsJob::default()
        };
        self.tag_on_create("call-analytics-job", &name, r.tags);
        self.call_analytics_jobs.insert(name, job.clone());
        Ok(StartCallAnalyticsJobResponse {
            call_analytics_job: Some(job),
        })
    }

    fn get_call_analytics_job(
        &self,
        r: GetCallAnalyticsJobRequest,
    ) -> Result<GetCallAnalyticsJobResponse, Fault> {
        let job = self
            .call_analytics_jobs
            .get(&r.call_analytics_job_name)
            .ok_or_else(|| missing("call analytics job", &r.call_analytics_job_name))?;
        Ok(GetCallAnalyticsJobResponse {
            call_analytics_job: Some(job.clone()),
        })
    }

    fn list_call_analytics_jobs(
        &self,
        r: ListCallAnalyticsJobsRequest,
    ) -> Result<ListCallAnalyticsJobsResponse, Fault> {
        let items: Vec<CallAnalyticsJobSummary> = self
            .call_analytics_jobs
            .iter()
            .filter(|(name, _)| matches_name(name, r.job_name_contains.as_deref()))
            .filter(|(_, j)| r.status.is_none_or(|s| j.call_analytics_job_status == Some(s)))
            .map(|(name, j)| CallAnalyticsJobSummary {
                call_analytics_job_name: Some(name.clone()),
                creation_time: j.creation_time,
                start_time: j.start_time,
                completion_time: j.completion_time,
                language_code: j.language_code.clone(),
                call_analytics_job_status: j.call_analytics_job_status,
                failure_reason: j.failure_reason.clone(),
            })
            .collect();
        let (call_analytics_job_summaries, next_token) =
            paginate(items, r.next_token.as_deref(), r.max_results)?;
        Ok(ListCallAnalyticsJobsResponse {
            status: r.status,
            next_token,
            call_analytics_job_summaries,
        })
    }

    fn delete_call_analytics_job(
        &mut self,
        r: DeleteCallAnalyticsJobRequest,
    ) -> Result<NoOutput, Fault> {
        let name = &r.call_analytics_job_name;
        self.call_analytics_jobs
            .remove(name)
            .ok_or_else(|| missing_on_delete("call analytics job", name))?;
        self.untag_all("call-analytics-job", name);
        Ok(NoOutput {})
    }

    // Medical scribe jobs

    fn start_scribe_job(
        &mut self,
        r: StartMedicalScribeJobRequest,
    ) -> Result<StartMedicalScribeJobResponse, Fault> {
        let name = r.medical_scribe_job_name;
        if self.scribe_jobs.contains_key(&name) {
            return Err(conflict("medical scribe job", &name));
        }
        let time = now();
        let job = MedicalScribeJob {
            medical_scribe_job_name: Some(name.clone()),
            medical_scribe_job_status: Some(JobStatus::InProgress),
            language_code: Some(MEDICAL_LANGUAGE_CODE.to_owned()),
            media: Some(r.media),
            start_time: Some(time),
            creation_time: Some(time),
            settings: Some(r.settings),
            data_access_role_arn: Some(r.data_access_role_arn),
            channel_definitions: r.channel_definitions,
            tags: r.tags.clone(),
            ..MedicalScribeJob::default()
        };
        self.tag_on_create("medical-scribe-job", &name, r.tags);
        self.scribe_jobs.insert(name, job.clone());
        Ok(StartMedicalScribeJobResponse {
            medical_scribe_job: Some(job),
        })
    }

    fn get_scribe_job(
        &self,
        r: GetMedicalScribeJobRequest,
    ) -> Result<GetMedicalScribeJobResponse, Fault> {
        let job = self
            .scribe_jobs
            .get(&r.medical_scribe_job_name)
            .ok_or_else(|| missing("medical scribe job", &r.medical_scribe_job_name))?;
        Ok(GetMedicalScribeJobResponse {
            medical_scribe_job: Some(job.clone()),
        })
    }

    fn list_scribe_jobs(
        &self,
        r: ListMedicalScribeJobsRequest,
    ) -> Result<ListMedicalScribeJobsResponse, Fault> {
        let items: Vec<MedicalScribeJobSummary> = self
            .scribe_jobs
            .iter()
            .filter(|(name, _)| matches_name(name, r.job_name_contains.as_deref()))
            .filter(|(_, j)| r.status.is_none_or(|s| j.medical_scribe_job_status == Some(s)))
            .map(|(name, j)| MedicalScribeJobSummary {
                medical_scribe_job_name: Some(name.clone()),
                creation_time: j.creation_time,
                start_time: j.start_time,
                completion_time: j.completion_time,
                language_code: j.language_code.clone(),
                medical_scribe_job_status: j.medical_scribe_job_status,
                failure_reason: j.failure_reason.clone(),
            })
            .collect();
        let (medical_scribe_job_summaries, next_token) =
            paginate(items, r.next_token.as_deref(), r.max_results)?;
        Ok(ListMedicalScribeJobsResponse {
            status: r.status,
            next_token,
            medical_scribe_job_summaries,
        })
    }

    fn delete_scribe_job(&mut self, r: DeleteMedicalScribeJobRequest) -> Result<NoOutput, Fault> {
        let name = &r.medical_scribe_job_name;
        self.scribe_jobs
            .remove(name)
            .ok_or_else(|| missing_on_delete("medical scribe job", name))?;
        self.untag_all("medical-scribe-job", name);
        Ok(NoOutput {})
    }

    // Tagging

    fn resource_exists(&self, arn: &str) -> bool {
        let prefix = format!("arn:aws:transcribe:{}:{}:", self.region, self.account_id);
        let Some((resource_type, name)) = arn
            .strip_prefix(&prefix)
            .and_then(|resource| resource.split_once('/'))
        else {
            return false;
        };
        match resource_type {
            "vocabulary" => self.vocabularies.contains_key(name),
            "vocabulary-filter" => self.vocabulary_filters.contains_key(name),
            "medical-vocabulary" => self.medical_vocabularies.contains_key(name),
            "language-model" => self.language_models.contains_key(name),
            "call-analytics-category" => self.categories.contains_key(name),
            "transcription-job" => self.transcription_jobs.contains_key(name),
            "medical-transcription-job" => self.medical_jobs.contains_key(name),
            "call-analytics-job" => self.call_analytics_jobs.contains_key(name),
            "medical-scribe-job" => self.scribe_jobs.contains_key(name),
            _ => false,
        }
    }

    fn existing_arn(&self, arn: &str) -> Result<(), Fault> {
        if self.resource_exists(arn) {
            Ok(())
        } else {
            Err(Fault::not_found(format!("resource {arn} was not found")))
        }
    }

    fn tag_resource(&mut self, r: TagResourceRequest) -> Result<NoOutput, Fault> {
        self.existing_arn(&r.resource_arn)?;
        let mut merged = self.tags.get(&r.resource_arn).cloned().unwrap_or_default();
        for tag in r.tags {
            match merged.iter_mut().find(|t| t.key == tag.key) {
                Some(existing) => existing.value = tag.value,
                None => merged.push(tag),
            }
        }
        if merged.len() > crate::validate::MAX_TAGS {
            return Err(Fault::new(
                "LimitExceededException",
                "resource cannot hold more tags",
            ));
        }
        self.tags.insert(r.resource_arn, merged);
        Ok(NoOutput {})
    }

    fn untag_resource(&mut self, r: UntagResourceRequest) -> Result<NoOutput, Fault> {
        self.existing_arn(&r.resource_arn)?;
        if let Some(tags) = self.tags.get_mut(&r.resource_arn) {
            tags.retain(|t| !r.tag_keys.contains(&t.key));
        }
        Ok(NoOutput {})
    }

    fn list_tags_for_resource(
        &self,
        r: ListTagsForResourceRequest,
    ) -> Result<ListTagsForResourceResponse, Fault> {
        self.existing_arn(&r.resource_arn)?;
        let tags = self.tags.get(&r.resource_arn).cloned().unwrap_or_default();
        Ok(ListTagsForResourceResponse {
            resource_arn: Some(r.resource_arn),
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol;

    fn wire(operation: &'static str, body: &str) -> WireRequest {
        WireRequest {
            operation,
            target: protocol::target(operation),
            body: body.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_replies_with_request_id() {
        let mock = MockTranscribe::new();
        let response = mock
            .send(wire("ListVocabularies", "{}"))
            .await
            .unwrap();
        assert!(response.is_success());
        assert!(response.request_id.is_some());
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let mock = MockTranscribe::new();
        let response = mock.send(wire("Transcribe", "{}")).await.unwrap();
        assert_eq!(response.status, 400);
        assert_eq!(
            response.decode_fault().code.as_deref(),
            Some("UnknownOperationException")
        );
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mock = MockTranscribe::new();
        let response = mock.send(wire("GetVocabulary", "[]")).await.unwrap();
        assert_eq!(
            response.decode_fault().code.as_deref(),
            Some("BadRequestException")
        );
    }

    #[tokio::test]
    async fn test_injected_faults_are_one_shot() {
        let mock = MockTranscribe::new();
        mock.fail_next("InternalFailureException", "boom").await;
        mock.fail_transport_next("reset").await;

        let response = mock.send(wire("ListVocabularies", "{}")).await.unwrap();
        assert_eq!(response.status, 500);
        assert!(mock.send(wire("ListVocabularies", "{}")).await.is_err());
        assert!(
            mock.send(wire("ListVocabularies", "{}"))
                .await
                .unwrap()
                .is_success()
        );
        assert_eq!(mock.request_count(), 3);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (0..7).collect();
        let (page, next) = paginate(items.clone(), None, Some(3)).unwrap();
        assert_eq!(page, vec![0, 1, 2]);
        assert_eq!(next.as_deref(), Some("3"));
        let (page, next) = paginate(items.clone(), Some("6"), Some(3)).unwrap();
        assert_eq!(page, vec![6]);
        assert_eq!(next, None);
        assert!(paginate(items.clone(), Some("abc"), None).is_err());
        let err = paginate(items.clone(), None, Some(0)).unwrap_err();
        assert_eq!(err.code, "BadRequestException");
        assert!(paginate(items, None, Some(101)).is_err());
    }

    #[tokio::test]
    async fn test_tag_limit_leaves_tags_unchanged() {
        let mock = MockTranscribe::new();
        mock.send(wire(
            "CreateVocabulary",
            r#"{"VocabularyName":"v1","LanguageCode":"en-US","Phrases":["a"]}"#,
        ))
        .await
        .unwrap();
        let arn = mock.arn("vocabulary", "v1").await;
        let tag_request = |range: std::ops::Range<usize>| {
            let tags: Vec<Tag> = range.map(|i| Tag::new(format!("k{i}"), "v")).collect();
            let body = serde_json::to_string(&TagResourceRequest::new(arn.clone(), tags)).unwrap();
            wire("TagResource", &body)
        };

        let response = mock.send(tag_request(0..150)).await.unwrap();
        assert!(response.is_success());
        let response = mock.send(tag_request(150..250)).await.unwrap();
        assert_eq!(response.decode_fault().kind, crate::ErrorKind::LimitExceeded);

        let body = serde_json::to_string(&ListTagsForResourceRequest::new(arn.clone())).unwrap();
        let listed: ListTagsForResourceResponse = mock
            .send(wire("ListTagsForResource", &body))
            .await
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(listed.tags.len(), 150);
    }

    #[tokio::test]
    async fn test_arn_format() {
        let mock = MockTranscribe::with_account("eu-west-1", "000000000000");
        assert_eq!(
            mock.arn("vocabulary", "v1").await,
            "arn:aws:transcribe:eu-west-1:000000000000:vocabulary/v1"
        );
    }
}
