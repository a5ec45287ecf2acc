//! Medical scribe jobs.

use serde::{Deserialize, Serialize};

use super::{JobStatus, Media, Tag, VocabularyFilterMethod, validate_filter_method};
use crate::{
    error::{Error, Result},
    operation::{NoOutput, declared, operation},
    validate::{self, Validate},
};

/// Who speaks on a medical scribe channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum MedicalScribeParticipantRole {
    /// The patient.
    Patient,
    /// The clinician.
    Clinician,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Maps an audio channel to a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeChannelDefinition {
    /// Channel index, 0 or 1.
    pub channel_id: u32,
    /// Who speaks on the channel.
    pub participant_role: MedicalScribeParticipantRole,
}

/// How the conversation is partitioned.
///
/// Exactly one of `show_speaker_labels` and `channel_identification` must be
/// enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeSettings {
    /// Partition speakers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_speaker_labels: Option<bool>,
    /// Maximum number of speakers, 2..=30; required with speaker labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speaker_labels: Option<u32>,
    /// Transcribe each channel separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_identification: Option<bool>,
    /// Custom vocabulary to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    /// Vocabulary filter to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    /// How filtered words are treated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_method: Option<VocabularyFilterMethod>,
}

impl MedicalScribeSettings {
    /// Speaker partitioning with at most `max_speakers` speakers.
    #[must_use]
    pub fn speaker_labels(max_speakers: u32) -> Self {
        Self {
            show_speaker_labels: Some(true),
            max_speaker_labels: Some(max_speakers),
            ..Self::default()
        }
    }

    /// Channel partitioning.
    #[must_use]
    pub fn channel_identification() -> Self {
        Self {
            channel_identification: Some(true),
            ..Self::default()
        }
    }
}

impl Validate for MedicalScribeSettings {
    fn validate(&self) -> Result<()> {
        let speaker_labels = self.show_speaker_labels.unwrap_or(false);
        validate::exactly_one(&[
            ("ShowSpeakerLabels", speaker_labels),
            (
                "ChannelIdentification",
                self.channel_identification.unwrap_or(false),
            ),
        ])?;
        if speaker_labels {
            if self.max_speaker_labels.is_none() {
                return Err(Error::bad_request(
                    "MaxSpeakerLabels is required with ShowSpeakerLabels",
                ));
            }
            validate::in_range("MaxSpeakerLabels", self.max_speaker_labels, 2..=30)?;
        }
        if let Some(name) = &self.vocabulary_name {
            validate::name("Settings.VocabularyName", name)?;
        }
        validate_filter_method(
            self.vocabulary_filter_method,
            self.vocabulary_filter_name.as_deref(),
        )
    }
}

/// Starts an asynchronous medical scribe job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMedicalScribeJobRequest {
    /// Unique name for the job.
    pub medical_scribe_job_name: String,
    /// The consultation recording.
    pub media: Media,
    /// Bucket for the transcript and clinical notes.
    pub output_bucket_name: String,
    /// KMS key used to encrypt the output.
    #[serde(
        rename = "OutputEncryptionKMSKeyId",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_encryption_kms_key_id: Option<String>,
    /// Role the service assumes to read and write S3.
    pub data_access_role_arn: String,
    /// Partitioning and vocabulary settings.
    pub settings: MedicalScribeSettings,
    /// Channel to participant mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_definitions: Option<Vec<MedicalScribeChannelDefinition>>,
    /// Tags attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl StartMedicalScribeJobRequest {
    /// A job writing to `output_bucket_name` with the given settings.
    #[must_use]
    pub fn new(
        medical_scribe_job_name: impl Into<String>,
        media_file_uri: impl Into<String>,
        output_bucket_name: impl Into<String>,
        data_access_role_arn: impl Into<String>,
        settings: MedicalScribeSettings,
    ) -> Self {
        Self {
            medical_scribe_job_name: medical_scribe_job_name.into(),
            media: Media::new(media_file_uri),
            output_bucket_name: output_bucket_name.into(),
            output_encryption_kms_key_id: None,
            data_access_role_arn: data_access_role_arn.into(),
            settings,
            channel_definitions: None,
            tags: None,
        }
    }
}

impl Validate for StartMedicalScribeJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name("MedicalScribeJobName", &self.medical_scribe_job_name)?;
        self.media.validate()?;
        validate::required("OutputBucketName", Some(self.output_bucket_name.as_str()))?;
        validate::required(
            "DataAccessRoleArn",
            Some(self.data_access_role_arn.as_str()),
        )?;
        validate::role_arn("DataAccessRoleArn", &self.data_access_role_arn)?;
        self.settings.validate()?;
        if let Some(channels) = &self.channel_definitions {
            if channels.len() > 2 || channels.iter().any(|c| c.channel_id > 1) {
                return Err(Error::bad_request(
                    "ChannelDefinitions must map channels 0 and 1 at most once each",
                ));
            }
            channels.iter().try_for_each(|c| {
                validate::not_unknown(
                    "ChannelDefinitions.ParticipantRole",
                    Some(c.participant_role),
                )
            })?;
            if let [a, b] = channels.as_slice() {
                if a.channel_id == b.channel_id {
                    return Err(Error::bad_request(
                        "ChannelDefinitions must use distinct channel ids",
                    ));
                }
            }
        }
        validate::tags(self.tags.as_deref())
    }
}

/// Where a finished scribe job's output can be downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeOutput {
    /// Location of the transcript.
    pub transcript_file_uri: Option<String>,
    /// Location of the generated clinical note.
    pub clinical_document_uri: Option<String>,
}

/// A medical scribe job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeJob {
    /// Name of the job.
    pub medical_scribe_job_name: Option<String>,
    /// Processing state.
    pub medical_scribe_job_status: Option<JobStatus>,
    /// Language of the consultation.
    pub language_code: Option<String>,
    /// The consultation recording.
    pub media: Option<Media>,
    /// Output locations, once completed.
    pub medical_scribe_output: Option<MedicalScribeOutput>,
    /// Processing start time.
    pub start_time: Option<f64>,
    /// Request time.
    pub creation_time: Option<f64>,
    /// Completion time.
    pub completion_time: Option<f64>,
    /// Why the job failed, when it did.
    pub failure_reason: Option<String>,
    /// Partitioning and vocabulary settings.
    pub settings: Option<MedicalScribeSettings>,
    /// Role used by the job.
    pub data_access_role_arn: Option<String>,
    /// Channel to participant mapping.
    pub channel_definitions: Option<Vec<MedicalScribeChannelDefinition>>,
    /// Tags attached to the job.
    pub tags: Option<Vec<Tag>>,
}

/// Result of [`StartMedicalScribeJobRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartMedicalScribeJobResponse {
    /// The job.
    pub medical_scribe_job: Option<MedicalScribeJob>,
}

/// Fetches a medical scribe job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalScribeJobRequest {
    /// Name of the job.
    pub medical_scribe_job_name: String,
}

impl GetMedicalScribeJobRequest {
    /// Request for the named job.
    #[must_use]
    pub fn new(medical_scribe_job_name: impl Into<String>) -> Self {
        Self {
            medical_scribe_job_name: medical_scribe_job_name.into(),
        }
    }
}

impl Validate for GetMedicalScribeJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name("MedicalScribeJobName", &self.medical_scribe_job_name)
    }
}

/// Result of [`GetMedicalScribeJobRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalScribeJobResponse {
    /// The job.
    pub medical_scribe_job: Option<MedicalScribeJob>,
}

/// Lists medical scribe jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalScribeJobsRequest {
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

impl Validate for ListMedicalScribeJobsRequest {
    fn validate(&self) -> Result<()> {
        validate::max_results(self.max_results)?;
        validate::not_unknown("Status", self.status)?;
        validate::name_filter("JobNameContains", self.job_name_contains.as_deref())
    }
}

/// Summary of a scribe job in a list result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MedicalScribeJobSummary {
    /// Name of the job.
    pub medical_scribe_job_name: Option<String>,
    /// Request time.
    pub creation_time: Option<f64>,
    /// Processing start time.
    pub start_time: Option<f64>,
    /// Completion time.
    pub completion_time: Option<f64>,
    /// Language of the consultation.
    pub language_code: Option<String>,
    /// Processing state.
    pub medical_scribe_job_status: Option<JobStatus>,
    /// Why the job failed, when it did.
    pub failure_reason: Option<String>,
}

/// Result of [`ListMedicalScribeJobsRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalScribeJobsResponse {
    /// State filter that was applied.
    pub status: Option<JobStatus>,
    /// Token for the next page, if any.
    pub next_token: Option<String>,
    /// Matching jobs.
    #[serde(default)]
    pub medical_scribe_job_summaries: Vec<MedicalScribeJobSummary>,
}

/// Deletes a medical scribe job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMedicalScribeJobRequest {
    /// Name of the job.
    pub medical_scribe_job_name: String,
}

impl DeleteMedicalScribeJobRequest {
    /// Request deleting the named job.
    #[must_use]
    pub fn new(medical_scribe_job_name: impl Into<String>) -> Self {
        Self {
            medical_scribe_job_name: medical_scribe_job_name.into(),
        }
    }
}

impl Validate for DeleteMedicalScribeJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name("MedicalScribeJobName", &self.medical_scribe_job_name)
    }
}

operation!(StartMedicalScribeJobRequest => StartMedicalScribeJobResponse, "StartMedicalScribeJob", declared::CREATE);
operation!(GetMedicalScribeJobRequest => GetMedicalScribeJobResponse, "GetMedicalScribeJob", declared::LOOKUP);
operation!(ListMedicalScribeJobsRequest => ListMedicalScribeJobsResponse, "ListMedicalScribeJobs", declared::LIST);
operation!(DeleteMedicalScribeJobRequest => NoOutput, "DeleteMedicalScribeJob", declared::LIST);

#[cfg(test)]
mod tests {
    use super::*;

    const ROLE: &str = "arn:aws:iam::123456789012:role/Scribe";

    fn request(settings: MedicalScribeSettings) -> StartMedicalScribeJobRequest {
        StartMedicalScribeJobRequest::new(
            "scribe1",
            "s3://bucket/visit.wav",
            "out-bucket",
            ROLE,
            settings,
        )
    }

    #[test]
    fn test_exactly_one_partitioning() {
        assert!(request(MedicalScribeSettings::speaker_labels(2)).validate().is_ok());
        assert!(request(MedicalScribeSettings::channel_identification()).validate().is_ok());

        let err = request(MedicalScribeSettings::default()).validate().unwrap_err();
        assert_eq!(
            err.message,
            "one of ShowSpeakerLabels, ChannelIdentification is required"
        );

        let mut both = MedicalScribeSettings::speaker_labels(2);
        both.channel_identification = Some(true);
        assert!(request(both).validate().is_err());
    }

    #[test]
    fn test_speaker_label_bounds() {
        assert!(request(MedicalScribeSettings::speaker_labels(1)).validate().is_err());
        assert!(request(MedicalScribeSettings::speaker_labels(30)).validate().is_ok());
        assert!(request(MedicalScribeSettings::speaker_labels(31)).validate().is_err());

        let mut missing = MedicalScribeSettings::speaker_labels(2);
        missing.max_speaker_labels = None;
        assert!(request(missing).validate().is_err());
    }

    #[test]
    fn test_requires_role_and_bucket() {
        let mut req = request(MedicalScribeSettings::channel_identification());
        req.data_access_role_arn = String::new();
        assert!(req.validate().is_err());

        let mut req = request(MedicalScribeSettings::channel_identification());
        req.output_bucket_name = String::new();
        assert!(req.validate().is_err());
    }
}
