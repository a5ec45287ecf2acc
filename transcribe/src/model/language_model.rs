//! Custom language models.

use serde::{Deserialize, Serialize};

use super::Tag;
use crate::{
    error::{Error, Result},
    operation::{NoOutput, declared, operation},
    validate::{self, Validate},
};

/// Languages a custom language model can be trained for.
pub const CLM_LANGUAGE_CODES: &[&str] = &[
    "en-US", "hi-IN", "es-US", "en-GB", "en-AU", "de-DE", "ja-JP",
];

/// Base model a custom language model is trained on top of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BaseModelName {
    /// Audio sampled below 16 kHz.
    NarrowBand,
    /// Audio sampled at 16 kHz or above.
    WideBand,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Training state of a custom language model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ModelStatus {
    /// Training.
    InProgress,
    /// Training failed.
    Failed,
    /// Ready for use.
    Completed,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Where the training data lives and how the service may read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputDataConfig {
    /// S3 prefix of the training data.
    pub s3_uri: String,
    /// S3 prefix of the tuning data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuning_data_s3_uri: Option<String>,
    /// Role the service assumes to read the data.
    pub data_access_role_arn: String,
}

impl Validate for InputDataConfig {
    fn validate(&self) -> Result<()> {
        validate::required("InputDataConfig.S3Uri", Some(self.s3_uri.as_str()))?;
        validate::uri("InputDataConfig.S3Uri", &self.s3_uri)?;
        if let Some(uri) = &self.tuning_data_s3_uri {
            validate::uri("InputDataConfig.TuningDataS3Uri", uri)?;
        }
        validate::required(
            "InputDataConfig.DataAccessRoleArn",
            Some(self.data_access_role_arn.as_str()),
        )?;
        validate::role_arn("InputDataConfig.DataAccessRoleArn", &self.data_access_role_arn)
    }
}

/// Trains a custom language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLanguageModelRequest {
    /// Language of the model.
    pub language_code: String,
    /// Base model to extend.
    pub base_model_name: BaseModelName,
    /// Unique name for the model.
    pub model_name: String,
    /// Training data.
    pub input_data_config: InputDataConfig,
    /// Tags attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl CreateLanguageModelRequest {
    /// A model trained on the data at `s3_uri`.
    #[must_use]
    pub fn new(
        model_name: impl Into<String>,
        language_code: impl Into<String>,
        base_model_name: BaseModelName,
        s3_uri: impl Into<String>,
        data_access_role_arn: impl Into<String>,
    ) -> Self {
        Self {
            language_code: language_code.into(),
            base_model_name,
            model_name: model_name.into(),
            input_data_config: InputDataConfig {
                s3_uri: s3_uri.into(),
                tuning_data_s3_uri: None,
                data_access_role_arn: data_access_role_arn.into(),
            },
            tags: None,
        }
    }
}

impl Validate for CreateLanguageModelRequest {
    fn validate(&self) -> Result<()> {
        validate::name("ModelName", &self.model_name)?;
        if !CLM_LANGUAGE_CODES.contains(&self.language_code.as_str()) {
            return Err(Error::bad_request(format!(
                "LanguageCode {} is not supported for custom language models",
                self.language_code
            )));
        }
        validate::not_unknown("BaseModelName", Some(self.base_model_name))?;
        self.input_data_config.validate()?;
        validate::tags(self.tags.as_deref())
    }
}

/// Result of [`CreateLanguageModelRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateLanguageModelResponse {
    /// Language of the model.
    pub language_code: Option<String>,
    /// Base model extended.
    pub base_model_name: Option<BaseModelName>,
    /// Name of the model.
    pub model_name: Option<String>,
    /// Training data.
    pub input_data_config: Option<InputDataConfig>,
    /// Training state.
    pub model_status: Option<ModelStatus>,
}

/// Fetches a custom language model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeLanguageModelRequest {
    /// Name of the model.
    pub model_name: String,
}

impl DescribeLanguageModelRequest {
    /// Request for the named model.
    #[must_use]
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

impl Validate for DescribeLanguageModelRequest {
    fn validate(&self) -> Result<()> {
        validate::name("ModelName", &self.model_name)
    }
}

/// A custom language model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanguageModel {
    /// Name of the model.
    pub model_name: Option<String>,
    /// Creation time.
    pub create_time: Option<f64>,
    /// Last modification time.
    pub last_modified_time: Option<f64>,
    /// Language of the model.
    pub language_code: Option<String>,
    /// Base model extended.
    pub base_model_name: Option<BaseModelName>,
    /// Training state.
    pub model_status: Option<ModelStatus>,
    /// Whether a newer base model is available.
    pub upgrade_availability: Option<bool>,
    /// Why training failed, when it did.
    pub failure_reason: Option<String>,
    /// Training data.
    pub input_data_config: Option<InputDataConfig>,
}

/// Result of [`DescribeLanguageModelRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeLanguageModelResponse {
    /// The model.
    pub language_model: Option<LanguageModel>,
}

/// Lists custom language models.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLanguageModelsRequest {
    /// Only models in this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_equals: Option<ModelStatus>,
    /// Only models whose name contains this string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
    /// Token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Page size, 1..=100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl Validate for ListLanguageModelsRequest {
    fn validate(&self) -> Result<()> {
        validate::max_results(self.max_results)?;
        validate::not_unknown("StatusEquals", self.status_equals)?;
        validate::name_filter("NameContains", self.name_contains.as_deref())
    }
}

/// Result of [`ListLanguageModelsRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLanguageModelsResponse {
    /// Token for the next page, if any.
    pub next_token: Option<String>,
    /// Matching models.
    #[serde(default)]
    pub models: Vec<LanguageModel>,
}

/// Deletes a custom language model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteLanguageModelRequest {
    /// Name of the model.
    pub model_name: String,
}

impl DeleteLanguageModelRequest {
    /// Request deleting the named model.
    #[must_use]
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

impl Validate for DeleteLanguageModelRequest {
    fn validate(&self) -> Result<()> {
        validate::name("ModelName", &self.model_name)
    }
}

operation!(CreateLanguageModelRequest => CreateLanguageModelResponse, "CreateLanguageModel", declared::CREATE);
operation!(DescribeLanguageModelRequest => DescribeLanguageModelResponse, "DescribeLanguageModel", declared::LOOKUP);
operation!(ListLanguageModelsRequest => ListLanguageModelsResponse, "ListLanguageModels", declared::LIST);
operation!(DeleteLanguageModelRequest => NoOutput, "DeleteLanguageModel", declared::LIST);

#[cfg(test)]
mod tests {
    use super::*;

    const ROLE: &str = "arn:aws:iam::123456789012:role/Transcribe";

    #[test]
    fn test_valid_request() {
        let request = CreateLanguageModelRequest::new(
            "clm1",
            "en-US",
            BaseModelName::WideBand,
            "s3://bucket/train/",
            ROLE,
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unsupported_language() {
        let request = CreateLanguageModelRequest::new(
            "clm1",
            "fr-FR",
            BaseModelName::WideBand,
            "s3://bucket/train/",
            ROLE,
        );
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_role() {
        let request = CreateLanguageModelRequest::new(
            "clm1",
            "en-US",
            BaseModelName::NarrowBand,
            "s3://bucket/train/",
            "",
        );
        let err = request.validate().unwrap_err();
        assert_eq!(err.message, "InputDataConfig.DataAccessRoleArn is required");
    }

    #[test]
    fn test_base_model_wire_names() {
        assert_eq!(
            serde_json::to_string(&BaseModelName::NarrowBand).unwrap(),
            "\"NarrowBand\""
        );
        let json = serde_json::to_value(CreateLanguageModelRequest::new(
            "clm1",
            "en-US",
            BaseModelName::WideBand,
            "s3://bucket/train/",
            ROLE,
        ))
        .unwrap();
        assert_eq!(json["InputDataConfig"]["S3Uri"], "s3://bucket/train/");
    }
}
