//! Request and result types for every operation.
//!
//! Field names serialize to the service's PascalCase wire names. Timestamps
//! are seconds since the Unix epoch. Enum values the client does not know
//! deserialize to an `Unknown` variant instead of failing the call.

mod call_analytics;
mod language_model;
mod medical_scribe;
mod medical_transcription_job;
mod medical_vocabulary;
mod tagging;
mod transcription_job;
mod vocabulary;
mod vocabulary_filter;

pub use call_analytics::*;
pub use language_model::*;
pub use medical_scribe::*;
pub use medical_transcription_job::*;
pub use medical_vocabulary::*;
pub use tagging::*;
pub use transcription_job::*;
pub use vocabulary::*;
pub use vocabulary_filter::*;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    validate::{self, Validate},
};

/// Location of the input media file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Media {
    /// S3 location of the media file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_file_uri: Option<String>,
    /// S3 location of media to redact, for call analytics jobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacted_media_file_uri: Option<String>,
}

impl Media {
    /// Media stored at the given S3 location.
    #[must_use]
    pub fn new(media_file_uri: impl Into<String>) -> Self {
        Self {
            media_file_uri: Some(media_file_uri.into()),
            redacted_media_file_uri: None,
        }
    }
}

impl Validate for Media {
    fn validate(&self) -> Result<()> {
        validate::required("Media.MediaFileUri", self.media_file_uri.as_deref())?;
        if let Some(uri) = &self.media_file_uri {
            validate::uri("Media.MediaFileUri", uri)?;
        }
        Ok(())
    }
}

/// A key/value label attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl Tag {
    /// Create a tag.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Where a finished job's transcript can be downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transcript {
    /// Location of the transcript.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_file_uri: Option<String>,
    /// Location of the redacted transcript, when redaction was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redacted_transcript_file_uri: Option<String>,
}

/// Input media container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum MediaFormat {
    /// MP3 audio.
    Mp3,
    /// MP4 audio or video.
    Mp4,
    /// WAV audio.
    Wav,
    /// FLAC audio.
    Flac,
    /// OGG audio.
    Ogg,
    /// AMR audio.
    Amr,
    /// WebM audio or video.
    Webm,
    /// M4A audio.
    M4a,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Processing state shared by every job flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum JobStatus {
    /// Waiting for capacity.
    Queued,
    /// Being processed.
    InProgress,
    /// Processing failed; see the job's failure reason.
    Failed,
    /// Output is available.
    Completed,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// How filtered words are treated in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum VocabularyFilterMethod {
    /// Drop the words.
    Remove,
    /// Replace the words with `***`.
    Mask,
    /// Keep the words and tag them.
    Tag,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Redaction applied to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RedactionType {
    /// Personally identifiable information.
    #[serde(rename = "PII")]
    Pii,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Which transcripts are produced when redacting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum RedactionOutput {
    /// Only the redacted transcript.
    Redacted,
    /// Both redacted and unredacted transcripts.
    RedactedAndUnredacted,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Content redaction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentRedaction {
    /// Category of content to redact.
    pub redaction_type: RedactionType,
    /// Which transcripts to produce.
    pub redaction_output: RedactionOutput,
    /// Entity types to redact; all types when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pii_entity_types: Option<Vec<String>>,
}

/// Who is speaking on a call-analytics channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ParticipantRole {
    /// The agent.
    Agent,
    /// The customer.
    Customer,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

impl Validate for ContentRedaction {
    fn validate(&self) -> Result<()> {
        validate::not_unknown("ContentRedaction.RedactionType", Some(self.redaction_type))?;
        validate::not_unknown("ContentRedaction.RedactionOutput", Some(self.redaction_output))
    }
}

macro_rules! known {
    ($($ty:ty),* $(,)?) => {
        $(
            impl validate::Known for $ty {
                fn is_unknown(self) -> bool {
                    matches!(self, Self::Unknown)
                }
            }
        )*
    };
}

known!(
    MediaFormat,
    JobStatus,
    VocabularyFilterMethod,
    RedactionType,
    RedactionOutput,
    ParticipantRole,
    InputType,
    SentimentValue,
    TranscriptFilterType,
    BaseModelName,
    ModelStatus,
    MedicalScribeParticipantRole,
    Specialty,
    MedicalTranscriptionType,
    SubtitleFormat,
    VocabularyState,
);

pub(crate) fn validate_filter_method(
    method: Option<VocabularyFilterMethod>,
    filter_name: Option<&str>,
) -> Result<()> {
    validate::not_unknown("VocabularyFilterMethod", method)?;
    if method.is_some() && filter_name.is_none() {
        return Err(crate::Error::bad_request(
            "VocabularyFilterMethod requires VocabularyFilterName",
        ));
    }
    if let Some(name) = filter_name {
        validate::name("VocabularyFilterName", name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_enum_values() {
        let status: JobStatus = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(status, JobStatus::Unknown);
        let status: JobStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(status, JobStatus::InProgress);
    }

    #[test]
    fn test_media_wire_names() {
        let json = serde_json::to_value(Media::new("s3://bucket/a.wav")).unwrap();
        assert_eq!(json, serde_json::json!({ "MediaFileUri": "s3://bucket/a.wav" }));
    }

    #[test]
    fn test_media_requires_uri() {
        assert!(Media::default().validate().is_err());
        assert!(Media::new("file:///tmp/a.wav").validate().is_err());
        assert!(Media::new("s3://bucket/a.wav").validate().is_ok());
    }

    #[test]
    fn test_redaction_wire_values() {
        let redaction = ContentRedaction {
            redaction_type: RedactionType::Pii,
            redaction_output: RedactionOutput::RedactedAndUnredacted,
            pii_entity_types: None,
        };
        let json = serde_json::to_value(&redaction).unwrap();
        assert_eq!(json["RedactionType"], "PII");
        assert_eq!(json["RedactionOutput"], "redacted_and_unredacted");
    }

    #[test]
    fn test_unknown_values_are_not_sent() {
        let redaction = ContentRedaction {
            redaction_type: RedactionType::Unknown,
            redaction_output: RedactionOutput::Redacted,
            pii_entity_types: None,
        };
        assert!(redaction.validate().is_err());
        assert!(
            validate_filter_method(Some(VocabularyFilterMethod::Unknown), Some("filter")).is_err()
        );
        assert!(validate_filter_method(Some(VocabularyFilterMethod::Mask), Some("filter")).is_ok());
    }
}
