//! Medical transcription jobs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    JobStatus, MEDICAL_LANGUAGE_CODE, Media, MediaFormat, SAMPLE_RATE_RANGE, Tag, Transcript,
};
use crate::{
    error::{Error, Result},
    operation::{NoOutput, declared, operation},
    validate::{self, Validate},
};

/// Medical specialty of the audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Specialty {
    /// Primary care.
    #[serde(rename = "PRIMARYCARE")]
    PrimaryCare,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Kind of medical audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum MedicalTranscriptionType {
    /// A conversation between clinician and patient.
    Conversation,
    /// A clinician dictating notes.
    Dictation,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Optional medical transcription features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalTranscriptionSetting {
    /// Partition speakers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_speaker_labels: Option<bool>,
    /// Maximum number of speakers, 2..=30.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speaker_labels: Option<u32>,
    /// Transcribe each channel separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_identification: Option<bool>,
    /// Include alternative transcriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alternatives: Option<bool>,
    /// Number of alternatives, 2..=10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_alternatives: Option<u32>,
    /// Medical vocabulary to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
}

impl Validate for MedicalTranscriptionSetting {
    fn validate(&self) -> Result<()> {
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
        if let Some(name) = &self.vocabulary_name {
            validate::name("Settings.VocabularyName", name)?;
        }
        Ok(())
    }
}

/// Starts an asynchronous medical transcription job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMedicalTranscriptionJobRequest {
    /// Unique name for the job.
    pub medical_transcription_job_name: String,
    /// Language of the media; must be `en-US`.
    pub language_code: String,
    /// Sample rate of the media in hertz.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_sample_rate_hertz: Option<u32>,
    /// Container format of the media.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_format: Option<MediaFormat>,
    /// The media to transcribe.
    pub media: Media,
    /// Bucket for the transcript.
    pub output_bucket_name: String,
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
    pub settings: Option<MedicalTranscriptionSetting>,
    /// Set to `PHI` to label protected health information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_identification_type: Option<String>,
    /// Medical specialty.
    pub specialty: Specialty,
    /// Conversation or dictation.
    #[serde(rename = "Type")]
    pub transcription_type: MedicalTranscriptionType,
    /// Tags attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl StartMedicalTranscriptionJobRequest {
    /// A primary-care job writing its transcript to `output_bucket_name`.
    #[must_use]
    pub fn new(
        medical_transcription_job_name: impl Into<String>,
        media_file_uri: impl Into<String>,
        output_bucket_name: impl Into<String>,
        transcription_type: MedicalTranscriptionType,
    ) -> Self {
        Self {
            medical_transcription_job_name: medical_transcription_job_name.into(),
            language_code: MEDICAL_LANGUAGE_CODE.into(),
            media_sample_rate_hertz: None,
            media_format: None,
            media: Media::new(media_file_uri),
            output_bucket_name: output_bucket_name.into(),
            output_key: None,
            output_encryption_kms_key_id: None,
            kms_encryption_context: None,
            settings: None,
            content_identification_type: None,
            specialty: Specialty::PrimaryCare,
            transcription_type,
            tags: None,
        }
    }
}

impl Validate for StartMedicalTranscriptionJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name(
            "MedicalTranscriptionJobName",
            &self.medical_transcription_job_name,
        )?;
        if self.language_code != MEDICAL_LANGUAGE_CODE {
            return Err(Error::bad_request(format!(
                "LanguageCode must be {MEDICAL_LANGUAGE_CODE} for medical transcription"
            )));
        }
        self.media.validate()?;
        validate::required("OutputBucketName", Some(self.output_bucket_name.as_str()))?;
        validate::in_range(
            "MediaSampleRateHertz",
            self.media_sample_rate_hertz,
            SAMPLE_RATE_RANGE,
        )?;
        validate::not_unknown("MediaFormat", self.media_format)?;
        validate::not_unknown("Specialty", Some(self.specialty))?;
        validate::not_unknown("Type", Some(self.transcription_type))?;
        if let Some(kind) = &self.content_identification_type {
            if kind != "PHI" {
                return Err(Error::bad_request("ContentIdentificationType must be PHI"));
            }
        }
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        validate::tags(self.tags.as_deref())
    }
}

/// A medical transcription job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalTranscriptionJob {
    /// Name of the job.
    pub medical_transcription_job_name: Option<String>,
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
    pub settings: Option<MedicalTranscriptionSetting>,
    /// Whether PHI labelling was requested.
    pub content_identification_type: Option<String>,
    /// Medical specialty.
    pub specialty: Option<Specialty>,
    /// Conversation or dictation.
    #[serde(rename = "Type")]
    pub transcription_type: Option<MedicalTranscriptionType>,
    /// Tags attached to the job.
    pub tags: Option<Vec<Tag>>,
}

/// Result of [`StartMedicalTranscriptionJobRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMedicalTranscriptionJobResponse {
    /// The job.
    pub medical_transcription_job: Option<MedicalTranscriptionJob>,
}

/// Fetches a medical transcription job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalTranscriptionJobRequest {
    /// Name of the job.
    pub medical_transcription_job_name: String,
}

impl GetMedicalTranscriptionJobRequest {
    /// Request for the named job.
    #[must_use]
    pub fn new(medical_transcription_job_name: impl Into<String>) -> Self {
        Self {
            medical_transcription_job_name: medical_transcription_job_name.into(),
        }
    }
}

impl Validate for GetMedicalTranscriptionJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name(
            "MedicalTranscriptionJobName",
            &self.medical_transcription_job_name,
        )
    }
}

/// Result of [`GetMedicalTranscriptionJobRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalTranscriptionJobResponse {
    /// The job.
    pub medical_transcription_job: Option<MedicalTranscriptionJob>,
}

/// Lists medical transcription jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalTranscriptionJobsRequest {
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

impl Validate for ListMedicalTranscriptionJobsRequest {
    fn validate(&self) -> Result<()> {
        validate::max_results(self.max_results)?;
        validate::not_unknown("Status", self.status)?;
        validate::name_filter("JobNameContains", self.job_name_contains.as_deref())
    }
}

/// Summary of a medical job in a list result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalTranscriptionJobSummary {
    /// Name of the job.
    pub medical_transcription_job_name: Option<String>,
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
    /// Medical specialty.
    pub specialty: Option<Specialty>,
    /// Conversation or dictation.
    #[serde(rename = "Type")]
    pub transcription_type: Option<MedicalTranscriptionType>,
}

/// Result of [`ListMedicalTranscriptionJobsRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalTranscriptionJobsResponse {
    /// State filter that was applied.
    pub status: Option<JobStatus>,
    /// Token for the next page, if any.
    pub next_token: Option<String>,
    /// Matching jobs.
    #[serde(default)]
    pub medical_transcription_job_summaries: Vec<MedicalTranscriptionJobSummary>,
}

/// Deletes a medical transcription job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMedicalTranscriptionJobRequest {
    /// Name of the job.
    pub medical_transcription_job_name: String,
}

impl DeleteMedicalTranscriptionJobRequest {
    /// Request deleting the named job.
    #[must_use]
    pub fn new(medical_transcription_job_name: impl Into<String>) -> Self {
        Self {
            medical_transcription_job_name: medical_transcription_job_name.into(),
        }
    }
}

impl Validate for DeleteMedicalTranscriptionJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name(
            "MedicalTranscriptionJobName",
            &self.medical_transcription_job_name,
        )
    }
}

operation!(StartMedicalTranscriptionJobRequest => StartMedicalTranscriptionJobResponse, "StartMedicalTranscriptionJob", declared::CREATE);
operation!(GetMedicalTranscriptionJobRequest => GetMedicalTranscriptionJobResponse, "GetMedicalTranscriptionJob", declared::LOOKUP);
operation!(ListMedicalTranscriptionJobsRequest => ListMedicalTranscriptionJobsResponse, "ListMedicalTranscriptionJobs", declared::LIST);
operation!(DeleteMedicalTranscriptionJobRequest => NoOutput, "DeleteMedicalTranscriptionJob", declared::LIST);

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> StartMedicalTranscriptionJobRequest {
        StartMedicalTranscriptionJobRequest::new(
            "med-job",
            "s3://bucket/visit.wav",
            "out-bucket",
            MedicalTranscriptionType::Conversation,
        )
    }

    #[test]
    fn test_valid() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_requires_output_bucket() {
        let mut request = request();
        request.output_bucket_name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["Type"], "CONVERSATION");
        assert_eq!(json["Specialty"], "PRIMARYCARE");
    }
}
