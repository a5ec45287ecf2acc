//! Custom vocabularies.

use serde::{Deserialize, Serialize};

use super::Tag;
use crate::{
    error::Result,
    operation::{NoOutput, declared, operation},
    validate::{self, Validate},
};

/// Processing state of a custom vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum VocabularyState {
    /// Still being processed.
    Pending,
    /// Ready for use in transcription jobs.
    Ready,
    /// Processing failed.
    Failed,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Creates a custom vocabulary from inline phrases or a file in S3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVocabularyRequest {
    /// Unique name for the vocabulary.
    pub vocabulary_name: String,
    /// Language of the entries.
    pub language_code: String,
    /// Inline vocabulary entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrases: Option<Vec<String>>,
    /// S3 location of a vocabulary file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_file_uri: Option<String>,
    /// Role the service assumes to read the vocabulary file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
    /// Tags attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl CreateVocabularyRequest {
    /// A vocabulary built from inline phrases.
    #[must_use]
    pub fn with_phrases(
        vocabulary_name: impl Into<String>,
        language_code: impl Into<String>,
        phrases: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            vocabulary_name: vocabulary_name.into(),
            language_code: language_code.into(),
            phrases: Some(phrases.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// A vocabulary read from a file in S3.
    #[must_use]
    pub fn with_file(
        vocabulary_name: impl Into<String>,
        language_code: impl Into<String>,
        vocabulary_file_uri: impl Into<String>,
    ) -> Self {
        Self {
            vocabulary_name: vocabulary_name.into(),
            language_code: language_code.into(),
            vocabulary_file_uri: Some(vocabulary_file_uri.into()),
            ..Self::default()
        }
    }
}

fn validate_source(phrases: Option<&[String]>, file_uri: Option<&str>) -> Result<()> {
    validate::exactly_one(&[
        ("Phrases", phrases.is_some()),
        ("VocabularyFileUri", file_uri.is_some()),
    ])?;
    if let Some(phrases) = phrases {
        if phrases.is_empty() || phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(crate::Error::bad_request(
                "Phrases must contain at least one non-empty entry",
            ));
        }
    }
    if let Some(uri) = file_uri {
        validate::uri("VocabularyFileUri", uri)?;
    }
    Ok(())
}

impl Validate for CreateVocabularyRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyName", &self.vocabulary_name)?;
        validate::required("LanguageCode", Some(self.language_code.as_str()))?;
        validate_source(self.phrases.as_deref(), self.vocabulary_file_uri.as_deref())?;
        if let Some(arn) = &self.data_access_role_arn {
            validate::role_arn("DataAccessRoleArn", arn)?;
        }
        validate::tags(self.tags.as_deref())
    }
}

/// Result of [`CreateVocabularyRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVocabularyResponse {
    /// Name of the vocabulary.
    pub vocabulary_name: Option<String>,
    /// Language of the vocabulary.
    pub language_code: Option<String>,
    /// Processing state.
    pub vocabulary_state: Option<VocabularyState>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
    /// Why processing failed, when it did.
    pub failure_reason: Option<String>,
}

/// Fetches a custom vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVocabularyRequest {
    /// Name of the vocabulary.
    pub vocabulary_name: String,
}

impl GetVocabularyRequest {
    /// Request for the named vocabulary.
    #[must_use]
    pub fn new(vocabulary_name: impl Into<String>) -> Self {
        Self {
            vocabulary_name: vocabulary_name.into(),
        }
    }
}

impl Validate for GetVocabularyRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyName", &self.vocabulary_name)
    }
}

/// Result of [`GetVocabularyRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVocabularyResponse {
    /// Name of the vocabulary.
    pub vocabulary_name: Option<String>,
    /// Language of the vocabulary.
    pub language_code: Option<String>,
    /// Processing state.
    pub vocabulary_state: Option<VocabularyState>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
    /// Why processing failed, when it did.
    pub failure_reason: Option<String>,
    /// Pre-signed location of the processed vocabulary.
    pub download_uri: Option<String>,
}

/// Lists custom vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabulariesRequest {
    /// Token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Page size, 1..=100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    /// Only vocabularies in this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_equals: Option<VocabularyState>,
    /// Only vocabularies whose name contains this string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
}

impl Validate for ListVocabulariesRequest {
    fn validate(&self) -> Result<()> {
        validate::max_results(self.max_results)?;
        validate::not_unknown("StateEquals", self.state_equals)?;
        validate::name_filter("NameContains", self.name_contains.as_deref())
    }
}

/// Summary of a vocabulary in a list result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VocabularyInfo {
    /// Name of the vocabulary.
    pub vocabulary_name: Option<String>,
    /// Language of the vocabulary.
    pub language_code: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
    /// Processing state.
    pub vocabulary_state: Option<VocabularyState>,
}

/// Result of [`ListVocabulariesRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabulariesResponse {
    /// State filter that was applied.
    pub status: Option<VocabularyState>,
    /// Token for the next page, if any.
    pub next_token: Option<String>,
    /// Matching vocabularies.
    #[serde(default)]
    pub vocabularies: Vec<VocabularyInfo>,
}

/// Replaces the entries of an existing custom vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateVocabularyRequest {
    /// Name of the vocabulary.
    pub vocabulary_name: String,
    /// Language of the entries.
    pub language_code: String,
    /// Inline vocabulary entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrases: Option<Vec<String>>,
    /// S3 location of a vocabulary file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_file_uri: Option<String>,
    /// Role the service assumes to read the vocabulary file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
}

impl Validate for UpdateVocabularyRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyName", &self.vocabulary_name)?;
        validate::required("LanguageCode", Some(self.language_code.as_str()))?;
        validate_source(self.phrases.as_deref(), self.vocabulary_file_uri.as_deref())?;
        if let Some(arn) = &self.data_access_role_arn {
            validate::role_arn("DataAccessRoleArn", arn)?;
        }
        Ok(())
    }
}

/// Result of [`UpdateVocabularyRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateVocabularyResponse {
    /// Name of the vocabulary.
    pub vocabulary_name: Option<String>,
    /// Language of the vocabulary.
    pub language_code: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
    /// Processing state.
    pub vocabulary_state: Option<VocabularyState>,
}

/// Deletes a custom vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteVocabularyRequest {
    /// Name of the vocabulary.
    pub vocabulary_name: String,
}

impl DeleteVocabularyRequest {
    /// Request deleting the named vocabulary.
    #[must_use]
    pub fn new(vocabulary_name: impl Into<String>) -> Self {
        Self {
            vocabulary_name: vocabulary_name.into(),
        }
    }
}

impl Validate for DeleteVocabularyRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyName", &self.vocabulary_name)
    }
}

operation!(CreateVocabularyRequest => CreateVocabularyResponse, "CreateVocabulary", declared::CREATE);
operation!(GetVocabularyRequest => GetVocabularyResponse, "GetVocabulary", declared::LOOKUP);
operation!(ListVocabulariesRequest => ListVocabulariesResponse, "ListVocabularies", declared::LIST);
operation!(UpdateVocabularyRequest => UpdateVocabularyResponse, "UpdateVocabulary", declared::UPDATE);
operation!(DeleteVocabularyRequest => NoOutput, "DeleteVocabulary", declared::LOOKUP);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_one_source() {
        let mut request = CreateVocabularyRequest::with_phrases("v1", "en-US", ["Los-Angeles"]);
        assert!(request.validate().is_ok());

        request.vocabulary_file_uri = Some("s3://bucket/v1.txt".into());
        assert!(request.validate().is_err());

        request.phrases = None;
        assert!(request.validate().is_ok());

        request.vocabulary_file_uri = None;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_rejects_blank_phrases() {
        let request = CreateVocabularyRequest::with_phrases("v1", "en-US", ["  "]);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_wire_shape() {
        let request = CreateVocabularyRequest::with_phrases("v1", "en-US", ["Amazon"]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "VocabularyName": "v1",
                "LanguageCode": "en-US",
                "Phrases": ["Amazon"]
            })
        );
    }

    #[test]
    fn test_list_bounds() {
        let request = ListVocabulariesRequest {
            max_results: Some(0),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
