//! Custom medical vocabularies.

use serde::{Deserialize, Serialize};

use super::{Tag, VocabularyInfo, VocabularyState};
use crate::{
    error::{Error, Result},
    operation::{NoOutput, declared, operation},
    validate::{self, Validate},
};

/// The only language medical transcription supports.
pub const MEDICAL_LANGUAGE_CODE: &str = "en-US";

fn validate_medical_language(language_code: &str) -> Result<()> {
    if language_code == MEDICAL_LANGUAGE_CODE {
        Ok(())
    } else {
        Err(Error::bad_request(format!(
            "LanguageCode must be {MEDICAL_LANGUAGE_CODE} for medical resources"
        )))
    }
}

/// Creates a medical vocabulary from a file in S3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateMedicalVocabularyRequest {
    /// Unique name for the vocabulary.
    pub vocabulary_name: String,
    /// Language of the entries; must be `en-US`.
    pub language_code: String,
    /// S3 location of the vocabulary file.
    pub vocabulary_file_uri: String,
    /// Tags attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl CreateMedicalVocabularyRequest {
    /// An `en-US` medical vocabulary read from S3.
    #[must_use]
    pub fn new(vocabulary_name: impl Into<String>, vocabulary_file_uri: impl Into<String>) -> Self {
        Self {
            vocabulary_name: vocabulary_name.into(),
            language_code: MEDICAL_LANGUAGE_CODE.into(),
            vocabulary_file_uri: vocabulary_file_uri.into(),
            tags: None,
        }
    }
}

impl Validate for CreateMedicalVocabularyRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyName", &self.vocabulary_name)?;
        validate_medical_language(&self.language_code)?;
        validate::required("VocabularyFileUri", Some(self.vocabulary_file_uri.as_str()))?;
        validate::uri("VocabularyFileUri", &self.vocabulary_file_uri)?;
        validate::tags(self.tags.as_deref())
    }
}

/// Result of [`CreateMedicalVocabularyRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateMedicalVocabularyResponse {
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

/// Fetches a medical vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalVocabularyRequest {
    /// Name of the vocabulary.
    pub vocabulary_name: String,
}

impl GetMedicalVocabularyRequest {
    /// Request for the named vocabulary.
    #[must_use]
    pub fn new(vocabulary_name: impl Into<String>) -> Self {
        Self {
            vocabulary_name: vocabulary_name.into(),
        }
    }
}

impl Validate for GetMedicalVocabularyRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyName", &self.vocabulary_name)
    }
}

/// Result of [`GetMedicalVocabularyRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetMedicalVocabularyResponse {
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

/// Lists medical vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalVocabulariesRequest {
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

impl Validate for ListMedicalVocabulariesRequest {
    fn validate(&self) -> Result<()> {
        validate::max_results(self.max_results)?;
        validate::not_unknown("StateEquals", self.state_equals)?;
        validate::name_filter("NameContains", self.name_contains.as_deref())
    }
}

/// Result of [`ListMedicalVocabulariesRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListMedicalVocabulariesResponse {
    /// State filter that was applied.
    pub status: Option<VocabularyState>,
    /// Token for the next page, if any.
    pub next_token: Option<String>,
    /// Matching vocabularies.
    #[serde(default)]
    pub vocabularies: Vec<VocabularyInfo>,
}

/// Replaces the file backing a medical vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateMedicalVocabularyRequest {
    /// Name of the vocabulary.
    pub vocabulary_name: String,
    /// Language of the entries; must be `en-US`.
    pub language_code: String,
    /// S3 location of the new vocabulary file.
    pub vocabulary_file_uri: String,
}

impl Validate for UpdateMedicalVocabularyRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyName", &self.vocabulary_name)?;
        validate_medical_language(&self.language_code)?;
        validate::required("VocabularyFileUri", Some(self.vocabulary_file_uri.as_str()))?;
        validate::uri("VocabularyFileUri", &self.vocabulary_file_uri)
    }
}

/// Result of [`UpdateMedicalVocabularyRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateMedicalVocabularyResponse {
    /// Name of the vocabulary.
    pub vocabulary_name: Option<String>,
    /// Language of the vocabulary.
    pub language_code: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
    /// Processing state.
    pub vocabulary_state: Option<VocabularyState>,
}

/// Deletes a medical vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteMedicalVocabularyRequest {
    /// Name of the vocabulary.
    pub vocabulary_name: String,
}

impl DeleteMedicalVocabularyRequest {
    /// Request deleting the named vocabulary.
    #[must_use]
    pub fn new(vocabulary_name: impl Into<String>) -> Self {
        Self {
            vocabulary_name: vocabulary_name.into(),
        }
    }
}

impl Validate for DeleteMedicalVocabularyRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyName", &self.vocabulary_name)
    }
}

operation!(CreateMedicalVocabularyRequest => CreateMedicalVocabularyResponse, "CreateMedicalVocabulary", declared::CREATE);
operation!(GetMedicalVocabularyRequest => GetMedicalVocabularyResponse, "GetMedicalVocabulary", declared::LOOKUP);
operation!(ListMedicalVocabulariesRequest => ListMedicalVocabulariesResponse, "ListMedicalVocabularies", declared::LIST);
operation!(UpdateMedicalVocabularyRequest => UpdateMedicalVocabularyResponse, "UpdateMedicalVocabulary", declared::UPDATE);
operation!(DeleteMedicalVocabularyRequest => NoOutput, "DeleteMedicalVocabulary", declared::LOOKUP);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_en_us() {
        let mut request = CreateMedicalVocabularyRequest::new("med1", "s3://bucket/med.txt");
        assert!(request.validate().is_ok());
        request.language_code = "en-GB".into();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_requires_file() {
        let request = CreateMedicalVocabularyRequest::new("med1", "");
        assert!(request.validate().is_err());
    }
}
