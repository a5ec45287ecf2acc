//! Standard transcription jobs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    ContentRedaction, JobStatus, Media, MediaFormat, Tag, Transcript, VocabularyFilterMethod,
    validate_filter_method,
};
use crate::{
    error::{Error, Result},
    operation::{NoOutput, declared, operation},
    validate::{self, Validate},
};

/// Valid media sample rates.
pub const SAMPLE_RATE_RANGE: std::ops::RangeInclusive<u32> = 8_000..=48_000;

/// Optional transcription features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    /// Custom vocabulary to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    /// Partition speakers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_speaker_labels: Option<bool>,
    /// Maximum number of speakers, 2..=30; requires speaker labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speaker_labels: Option<u32>,
    /// Transcribe each channel separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_identification: Option<bool>,
    /// Include alternative transcriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alternatives: Option<bool>,
    /// Number of alternatives, 2..=10; requires alternatives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_alternatives: Option<u32>,
    /// Vocabulary filter to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    /// How filtered words are treated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_method: Option<VocabularyFilterMethod>,
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.vocabulary_name {
            validate::name("Settings.VocabularyName", name)?;
        }
        let speaker_labels = self.show_speaker_labels.unwrap_or(false);
        if speaker_labels && self.channel_identification.unwrap_or(false) {
            return Err(Error::bad_request(
                "ShowSpeakerLabels and ChannelIdentification cannot both be enabled",
            ));
        }
        if self.max_speaker_labels.is_some() && !speaker_labels {
            return Err(Error::bad_request(
                "MaxSpeakerLabels requires ShowSpeakerLabels",
            ));
        }
        validate::in_range("MaxSpeakerLabels", self.max_speaker_labels, 2..=30)?;
        if self.max_alternatives.is_some() && !self.show_alternatives.unwrap_or(false) {
            return Err(Error::bad_request(
                "MaxAlternatives requires ShowAlternatives",
            ));
        }
        validate::in_range("MaxAlternatives", self.max_alternatives, 2..=10)?;
        validate_filter_method(
            self.vocabulary_filter_method,
            self.vocabulary_filter_name.as_deref(),
        )
    }
}

/// Custom language model to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelSettings {
    /// Name of the custom language model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_model_name: Option<String>,
}

/// Scheduling options for the job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobExecutionSettings {
    /// Queue the job when the concurrency limit is reached instead of failing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_deferred_execution: Option<bool>,
    /// Role used while the job is deferred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
}

/// Subtitle file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SubtitleFormat {
    /// WebVTT.
    Vtt,
    /// SubRip.
    Srt,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Subtitle generation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Subtitles {
    /// Formats to produce.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<SubtitleFormat>>,
    /// Index of the first caption, 0 or 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_start_index: Option<u32>,
}

/// Starts an asynchronous transcription job.
///
/// Exactly one of `language_code`, `identify_language` or
/// `identify_multiple_languages` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartTranscriptionJobRequest {
    /// Unique name for the job.
    pub transcription_job_name: String,
    /// Language spoken in the media.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// Sample rate of the media in hertz.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_sample_rate_hertz: Option<u32>,
    /// Container format of the media.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_format: Option<MediaFormat>,
    /// The media to transcribe.
    pub media: Media,
    /// Bucket for the transcript; a service-managed bucket when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_bucket_name: Option<String>,
    /// Key or prefix for the transcript.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_key: Option<String>,
    /// KMS key used to encrypt the output.
    #[serde(
        rename = "OutputEncryptionKMSKeyId",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_encryption_kms_key_id: Option<String>,
    /// KMS encryption context.
    #[serde(rename = "KMSEncryptionContext", skip_serializing_if = "Option::is_none")]
    pub kms_encryption_context: Option<HashMap<String, String>>,
    /// Optional features.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    /// Custom language model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_settings: Option<ModelSettings>,
    /// Scheduling options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_execution_settings: Option<JobExecutionSettings>,
    /// Redaction options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_redaction: Option<ContentRedaction>,
    /// Detect the dominant language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identify_language: Option<bool>,
    /// Detect every language spoken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identify_multiple_languages: Option<bool>,
    /// Candidate languages for identification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_options: Option<Vec<String>>,
    /// Subtitle output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Subtitles>,
    /// Tags attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl StartTranscriptionJobRequest {
    /// A job transcribing `media_file_uri` in the given language.
    #[must_use]
    pub fn new(
        transcription_job_name: impl Into<String>,
        media_file_uri: impl Into<String>,
        language_code: impl Into<String>,
    ) -> Self {
        Self {
            transcription_job_name: transcription_job_name.into(),
            media: Media::new(media_file_uri),
            language_code: Some(language_code.into()),
            ..Self::default()
        }
    }

    /// A job that detects the dominant language of `media_file_uri`.
    #[must_use]
    pub fn identify_language(
        transcription_job_name: impl Into<String>,
        media_file_uri: impl Into<String>,
    ) -> Self {
        Self {
            transcription_job_name: transcription_job_name.into(),
            media: Media::new(media_file_uri),
            identify_language: Some(true),
            ..Self::default()
        }
    }
}

impl Validate for StartTranscriptionJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name("TranscriptionJobName", &self.transcription_job_name)?;
        self.media.validate()?;
        validate::exactly_one(&[
            ("LanguageCode", self.language_code.is_some()),
            ("IdentifyLanguage", self.identify_language == Some(true)),
            (
                "IdentifyMultipleLanguages",
                self.identify_multiple_languages == Some(true),
            ),
        ])?;
        if let Some(code) = &self.language_code {
            validate::required("LanguageCode", Some(code.as_str()))?;
        }
        if self.language_options.is_some() && self.language_code.is_some() {
            return Err(Error::bad_request(
                "LanguageOptions requires language identification",
            ));
        }
        validate::in_range(
            "MediaSampleRateHertz",
            self.media_sample_rate_hertz,
            SAMPLE_RATE_RANGE,
        )?;
        validate::not_unknown("MediaFormat", self.media_format)?;
        if let Some(bucket) = &self.output_bucket_name {
            validate::required("OutputBucketName", Some(bucket.as_str()))?;
        }
        if self.output_key.is_some() && self.output_bucket_name.is_none() {
            return Err(Error::bad_request("OutputKey requires OutputBucketName"));
        }
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        if let Some(name) = self
            .model_settings
            .as_ref()
            .and_then(|m| m.language_model_name.as_deref())
        {
            validate::name("ModelSettings.LanguageModelName", name)?;
        }
        if let Some(execution) = &self.job_execution_settings {
            if execution.allow_deferred_execution == Some(true)
                && execution.data_access_role_arn.is_none()
            {
                return Err(Error::bad_request(
                    "AllowDeferredExecution requires DataAccessRoleArn",
                ));
            }
            if let Some(arn) = &execution.data_access_role_arn {
                validate::role_arn("JobExecutionSettings.DataAccessRoleArn", arn)?;
            }
        }
        if let Some(redaction) = &self.content_redaction {
            redaction.validate()?;
        }
        if let Some(subtitles) = &self.subtitles {
            subtitles
                .formats
                .iter()
                .flatten()
                .try_for_each(|&f| validate::not_unknown("Subtitles.Formats", Some(f)))?;
            validate::in_range("Subtitles.OutputStartIndex", subtitles.output_start_index, 0..=1)?;
        }
        validate::tags(self.tags.as_deref())
    }
}

/// A transcription job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptionJob {
    /// Name of the job.
    pub transcription_job_name: Option<String>,
    /// Processing state.
    pub transcription_job_status: Option<JobStatus>,
    /// Language of the media.
    pub language_code: Option<String>,
    /// Sample rate of the media.
    pub media_sample_rate_hertz: Option<u32>,
    /// Container format of the media.
    pub media_format: Option<MediaFormat>,
    /// The media.
    pub media: Option<Media>,
    /// Output location, once completed.
    pub transcript: Option<Transcript>,
    /// Processing start time.
    pub start_time: Option<f64>,
    /// Request time.
    pub creation_time: Option<f64>,
    /// Completion time.
    pub completion_time: Option<f64>,
    /// Why the job failed, when it did.
    pub failure_reason: Option<String>,
    /// Optional features.
    pub settings: Option<Settings>,
    /// Custom language model.
    pub model_settings: Option<ModelSettings>,
    /// Scheduling options.
    pub job_execution_settings: Option<JobExecutionSettings>,
    /// Redaction options.
    pub content_redaction: Option<ContentRedaction>,
    /// Whether dominant-language identification was requested.
    pub identify_language: Option<bool>,
    /// Whether multi-language identification was requested.
    pub identify_multiple_languages: Option<bool>,
    /// Candidate languages for identification.
    pub language_options: Option<Vec<String>>,
    /// Confidence of the identified language.
    pub identified_language_score: Option<f32>,
    /// Subtitle output.
    pub subtitles: Option<Subtitles>,
    /// Tags attached to the job.
    pub tags: Option<Vec<Tag>>,
}

/// Result of [`StartTranscriptionJobRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartTranscriptionJobResponse {
    /// The job.
    pub transcription_job: Option<TranscriptionJob>,
}

/// Fetches a transcription job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetTranscriptionJobRequest {
    /// Name of the job.
    pub transcription_job_name: String,
}

impl GetTranscriptionJobRequest {
    /// Request for the named job.
    #[must_use]
    pub fn new(transcription_job_name: impl Into<String>) -> Self {
        Self {
            transcription_job_name: transcription_job_name.into(),
        }
    }
}

impl Validate for GetTranscriptionJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name("TranscriptionJobName", &self.transcription_job_name)
    }
}

/// Result of [`GetTranscriptionJobRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetTranscriptionJobResponse {
    /// The job.
    pub transcription_job: Option<TranscriptionJob>,
}

/// Lists transcription jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTranscriptionJobsRequest {
    /// Only jobs in this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    /// Only jobs whose name contains this string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name_contains: Option<String>,
    /// Token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Page size, 1..=100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl Validate for ListTranscriptionJobsRequest {
    fn validate(&self) -> Result<()> {
        validate::max_results(self.max_results)?;
        validate::not_unknown("Status", self.status)?;
        validate::name_filter("JobNameContains", self.job_name_contains.as_deref())
    }
}

/// Summary of a job in a list result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptionJobSummary {
    /// Name of the job.
    pub transcription_job_name: Option<String>,
    /// Request time.
    pub creation_time: Option<f64>,
    /// Processing start time.
    pub start_time: Option<f64>,
    /// Completion time.
    pub completion_time: Option<f64>,
    /// Language of the media.
    pub language_code: Option<String>,
    /// Processing state.
    pub transcription_job_status: Option<JobStatus>,
    /// Why the job failed, when it did.
    pub failure_reason: Option<String>,
    /// Custom language model.
    pub model_settings: Option<ModelSettings>,
    /// Whether dominant-language identification was requested.
    pub identify_language: Option<bool>,
    /// Whether multi-language identification was requested.
    pub identify_multiple_languages: Option<bool>,
}

/// Result of [`ListTranscriptionJobsRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTranscriptionJobsResponse {
    /// State filter that was applied.
    pub status: Option<JobStatus>,
    /// Token for the next page, if any.
    pub next_token: Option<String>,
    /// Matching jobs.
    #[serde(default)]
    pub transcription_job_summaries: Vec<TranscriptionJobSummary>,
}

/// Deletes a transcription job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteTranscriptionJobRequest {
    /// Name of the job.
    pub transcription_job_name: String,
}

impl DeleteTranscriptionJobRequest {
    /// Request deleting the named job.
    #[must_use]
    pub fn new(transcription_job_name: impl Into<String>) -> Self {
        Self {
            transcription_job_name: transcription_job_name.into(),
        }
    }
}

impl Validate for DeleteTranscriptionJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name("TranscriptionJobName", &self.transcription_job_name)
    }
}

operation!(StartTranscriptionJobRequest => StartTranscriptionJobResponse, "StartTranscriptionJob", declared::CREATE);
operation!(GetTranscriptionJobRequest => GetTranscriptionJobResponse, "GetTranscriptionJob", declared::LOOKUP);
operation!(ListTranscriptionJobsRequest => ListTranscriptionJobsResponse, "ListTranscriptionJobs", declared::LIST);
operation!(DeleteTranscriptionJobRequest => NoOutput, "DeleteTranscriptionJob", declared::LIST);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ErrorKind,
        model::{RedactionOutput, RedactionType},
    };

    fn request() -> StartTranscriptionJobRequest {
        StartTranscriptionJobRequest::new("job1", "s3://bucket/call.wav", "en-US")
    }

    #[test]
    fn test_language_selection_is_required() {
        let mut request = request();
        request.language_code = None;
        let err = request.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(err.message.contains("LanguageCode"));
    }

    #[test]
    fn test_language_selection_is_exclusive() {
        let mut request = request();
        request.identify_language = Some(true);
        assert!(request.validate().is_err());

        let identify = StartTranscriptionJobRequest::identify_language("job1", "s3://bucket/a.wav");
        assert!(identify.validate().is_ok());
    }

    #[test]
    fn test_identify_false_does_not_count() {
        let mut request = request();
        request.identify_multiple_languages = Some(false);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_sample_rate_bounds() {
        let mut request = request();
        request.media_sample_rate_hertz = Some(4_000);
        assert!(request.validate().is_err());
        request.media_sample_rate_hertz = Some(16_000);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_speaker_settings() {
        let mut request = request();
        request.settings = Some(Settings {
            max_speaker_labels: Some(4),
            ..Settings::default()
        });
        assert!(request.validate().is_err());

        request.settings = Some(Settings {
            show_speaker_labels: Some(true),
            max_speaker_labels: Some(4),
            ..Settings::default()
        });
        assert!(request.validate().is_ok());

        request.settings = Some(Settings {
            show_speaker_labels: Some(true),
            channel_identification: Some(true),
            ..Settings::default()
        });
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_filter_method_needs_filter() {
        let mut request = request();
        request.settings = Some(Settings {
            vocabulary_filter_method: Some(VocabularyFilterMethod::Mask),
            ..Settings::default()
        });
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_values_rejected() {
        let mut request = request();
        request.media_format = Some(MediaFormat::Unknown);
        assert!(request.validate().is_err());
        request.media_format = Some(MediaFormat::Wav);
        assert!(request.validate().is_ok());

        request.subtitles = Some(Subtitles {
            formats: Some(vec![SubtitleFormat::Srt, SubtitleFormat::Unknown]),
            output_start_index: None,
        });
        assert!(request.validate().is_err());
        request.subtitles = None;

        request.content_redaction = Some(ContentRedaction {
            redaction_type: RedactionType::Pii,
            redaction_output: RedactionOutput::Unknown,
            pii_entity_types: None,
        });
        assert!(request.validate().is_err());

        let list = ListTranscriptionJobsRequest {
            status: Some(JobStatus::Unknown),
            ..ListTranscriptionJobsRequest::default()
        };
        assert!(list.validate().is_err());
    }

    #[test]
    fn test_kms_wire_names() {
        let mut request = request();
        request.output_bucket_name = Some("out".into());
        request.output_encryption_kms_key_id = Some("key".into());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["OutputEncryptionKMSKeyId"], "key");
        assert_eq!(json["Media"]["MediaFileUri"], "s3://bucket/call.wav");
        assert!(json.get("IdentifyLanguage").is_none());
    }
}
