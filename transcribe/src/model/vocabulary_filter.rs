//! Vocabulary filters.

use serde::{Deserialize, Serialize};

use super::Tag;
use crate::{
    error::{Error, Result},
    operation::{NoOutput, declared, operation},
    validate::{self, Validate},
};

/// Creates a vocabulary filter from inline words or a file in S3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVocabularyFilterRequest {
    /// Unique name for the filter.
    pub vocabulary_filter_name: String,
    /// Language of the words.
    pub language_code: String,
    /// Inline words to filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
    /// S3 location of a file of words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_file_uri: Option<String>,
    /// Role the service assumes to read the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
    /// Tags attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl CreateVocabularyFilterRequest {
    /// A filter built from inline words.
    #[must_use]
    pub fn with_words(
        vocabulary_filter_name: impl Into<String>,
        language_code: impl Into<String>,
        words: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            vocabulary_filter_name: vocabulary_filter_name.into(),
            language_code: language_code.into(),
            words: Some(words.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }
}

fn validate_words(words: Option<&[String]>, file_uri: Option<&str>) -> Result<()> {
    if words.is_some_and(|w| w.is_empty() || w.iter().any(|word| word.trim().is_empty())) {
        return Err(Error::bad_request(
            "Words must contain at least one non-empty entry",
        ));
    }
    if let Some(uri) = file_uri {
        validate::uri("VocabularyFilterFileUri", uri)?;
    }
    Ok(())
}

impl Validate for CreateVocabularyFilterRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyFilterName", &self.vocabulary_filter_name)?;
        validate::required("LanguageCode", Some(self.language_code.as_str()))?;
        validate::exactly_one(&[
            ("Words", self.words.is_some()),
            ("VocabularyFilterFileUri", self.vocabulary_filter_file_uri.is_some()),
        ])?;
        validate_words(
            self.words.as_deref(),
            self.vocabulary_filter_file_uri.as_deref(),
        )?;
        if let Some(arn) = &self.data_access_role_arn {
            validate::role_arn("DataAccessRoleArn", arn)?;
        }
        validate::tags(self.tags.as_deref())
    }
}

/// Result of [`CreateVocabularyFilterRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVocabularyFilterResponse {
    /// Name of the filter.
    pub vocabulary_filter_name: Option<String>,
    /// Language of the filter.
    pub language_code: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
}

/// Fetches a vocabulary filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVocabularyFilterRequest {
    /// Name of the filter.
    pub vocabulary_filter_name: String,
}

impl GetVocabularyFilterRequest {
    /// Request for the named filter.
    #[must_use]
    pub fn new(vocabulary_filter_name: impl Into<String>) -> Self {
        Self {
            vocabulary_filter_name: vocabulary_filter_name.into(),
        }
    }
}

impl Validate for GetVocabularyFilterRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyFilterName", &self.vocabulary_filter_name)
    }
}

/// Result of [`GetVocabularyFilterRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetVocabularyFilterResponse {
    /// Name of the filter.
    pub vocabulary_filter_name: Option<String>,
    /// Language of the filter.
    pub language_code: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
    /// Pre-signed location of the filter's word list.
    pub download_uri: Option<String>,
}

/// Lists vocabulary filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabularyFiltersRequest {
    /// Token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Page size, 1..=100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    /// Only filters whose name contains this string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
}

impl Validate for ListVocabularyFiltersRequest {
    fn validate(&self) -> Result<()> {
        validate::max_results(self.max_results)?;
        validate::name_filter("NameContains", self.name_contains.as_deref())
    }
}

/// Summary of a filter in a list result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VocabularyFilterInfo {
    /// Name of the filter.
    pub vocabulary_filter_name: Option<String>,
    /// Language of the filter.
    pub language_code: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
}

/// Result of [`ListVocabularyFiltersRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListVocabularyFiltersResponse {
    /// Token for the next page, if any.
    pub next_token: Option<String>,
    /// Matching filters.
    #[serde(default)]
    pub vocabulary_filters: Vec<VocabularyFilterInfo>,
}

/// Replaces the words of an existing vocabulary filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateVocabularyFilterRequest {
    /// Name of the filter.
    pub vocabulary_filter_name: String,
    /// Inline words to filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
    /// S3 location of a file of words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_file_uri: Option<String>,
    /// Role the service assumes to read the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
}

impl Validate for UpdateVocabularyFilterRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyFilterName", &self.vocabulary_filter_name)?;
        validate::at_most_one(&[
            ("Words", self.words.is_some()),
            ("VocabularyFilterFileUri", self.vocabulary_filter_file_uri.is_some()),
        ])?;
        validate_words(
            self.words.as_deref(),
            self.vocabulary_filter_file_uri.as_deref(),
        )?;
        if let Some(arn) = &self.data_access_role_arn {
            validate::role_arn("DataAccessRoleArn", arn)?;
        }
        Ok(())
    }
}

/// Result of [`UpdateVocabularyFilterRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateVocabularyFilterResponse {
    /// Name of the filter.
    pub vocabulary_filter_name: Option<String>,
    /// Language of the filter.
    pub language_code: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
}

/// Deletes a vocabulary filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteVocabularyFilterRequest {
    /// Name of the filter.
    pub vocabulary_filter_name: String,
}

impl DeleteVocabularyFilterRequest {
    /// Request deleting the named filter.
    #[must_use]
    pub fn new(vocabulary_filter_name: impl Into<String>) -> Self {
        Self {
            vocabulary_filter_name: vocabulary_filter_name.into(),
        }
    }
}

impl Validate for DeleteVocabularyFilterRequest {
    fn validate(&self) -> Result<()> {
        validate::name("VocabularyFilterName", &self.vocabulary_filter_name)
    }
}

operation!(CreateVocabularyFilterRequest => CreateVocabularyFilterResponse, "CreateVocabularyFilter", declared::CREATE);
operation!(GetVocabularyFilterRequest => GetVocabularyFilterResponse, "GetVocabularyFilter", declared::LOOKUP);
operation!(ListVocabularyFiltersRequest => ListVocabularyFiltersResponse, "ListVocabularyFilters", declared::LIST);
// Updates to filters cannot conflict.
operation!(UpdateVocabularyFilterRequest => UpdateVocabularyFilterResponse, "UpdateVocabularyFilter", declared::LOOKUP);
operation!(DeleteVocabularyFilterRequest => NoOutput, "DeleteVocabularyFilter", declared::LOOKUP);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_words_or_file() {
        let mut request = CreateVocabularyFilterRequest::with_words("f1", "en-US", ["darn"]);
        assert!(request.validate().is_ok());
        request.words = None;
        assert!(request.validate().is_err());
        request.vocabulary_filter_file_uri = Some("s3://bucket/words.txt".into());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_allows_neither_source() {
        let request = UpdateVocabularyFilterRequest {
            vocabulary_filter_name: "f1".into(),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_both_sources() {
        let request = UpdateVocabularyFilterRequest {
            vocabulary_filter_name: "f1".into(),
            words: Some(vec!["a".into()]),
            vocabulary_filter_file_uri: Some("s3://bucket/words.txt".into()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }
}
