//! Resource tagging.

use serde::{Deserialize, Serialize};

use super::Tag;
use crate::{
    error::{Error, Result},
    operation::{NoOutput, declared, operation},
    validate::{self, Validate},
};

/// Adds or overwrites tags on a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagResourceRequest {
    /// ARN of the resource.
    pub resource_arn: String,
    /// Tags to apply.
    pub tags: Vec<Tag>,
}

impl TagResourceRequest {
    /// Tag the resource with the given key/value pairs.
    #[must_use]
    pub fn new(resource_arn: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            resource_arn: resource_arn.into(),
            tags,
        }
    }
}

impl Validate for TagResourceRequest {
    fn validate(&self) -> Result<()> {
        validate::resource_arn(&self.resource_arn)?;
        validate::tags(Some(self.tags.as_slice()))
    }
}

/// Removes tags from a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UntagResourceRequest {
    /// ARN of the resource.
    pub resource_arn: String,
    /// Keys of the tags to remove.
    pub tag_keys: Vec<String>,
}

impl UntagResourceRequest {
    /// Remove the given keys from the resource.
    #[must_use]
    pub fn new(
        resource_arn: impl Into<String>,
        tag_keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            resource_arn: resource_arn.into(),
            tag_keys: tag_keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validate for UntagResourceRequest {
    fn validate(&self) -> Result<()> {
        validate::resource_arn(&self.resource_arn)?;
        if self.tag_keys.is_empty() || self.tag_keys.len() > validate::MAX_TAGS {
            return Err(Error::bad_request(format!(
                "TagKeys must contain between 1 and {} entries",
                validate::MAX_TAGS
            )));
        }
        self.tag_keys.iter().try_for_each(|key| validate::tag_key(key))
    }
}

/// Lists the tags on a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTagsForResourceRequest {
    /// ARN of the resource.
    pub resource_arn: String,
}

impl ListTagsForResourceRequest {
    /// Request the tags of the given resource.
    #[must_use]
    pub fn new(resource_arn: impl Into<String>) -> Self {
        Self {
            resource_arn: resource_arn.into(),
        }
    }
}

impl Validate for ListTagsForResourceRequest {
    fn validate(&self) -> Result<()> {
        validate::resource_arn(&self.resource_arn)
    }
}

/// Result of [`ListTagsForResourceRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTagsForResourceResponse {
    /// ARN of the resource.
    pub resource_arn: Option<String>,
    /// Tags on the resource.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

operation!(TagResourceRequest => NoOutput, "TagResource", declared::UPDATE);
operation!(UntagResourceRequest => NoOutput, "UntagResource", declared::UPDATE);
operation!(ListTagsForResourceRequest => ListTagsForResourceResponse, "ListTagsForResource", declared::LOOKUP);

#[cfg(test)]
mod tests {
    use super::*;

    const ARN: &str = "arn:aws:transcribe:us-east-1:123456789012:vocabulary/v1";

    #[test]
    fn test_tag_validation() {
        assert!(TagResourceRequest::new(ARN, vec![Tag::new("team", "speech")])
            .validate()
            .is_ok());
        assert!(TagResourceRequest::new(ARN, vec![]).validate().is_err());
        assert!(TagResourceRequest::new("not-an-arn", vec![Tag::new("k", "v")])
            .validate()
            .is_err());
        assert!(TagResourceRequest::new(ARN, vec![Tag::new("", "v")])
            .validate()
            .is_err());
    }

    #[test]
    fn test_untag_requires_keys() {
        assert!(UntagResourceRequest::new(ARN, ["team"]).validate().is_ok());
        assert!(UntagResourceRequest::new(ARN, Vec::<String>::new())
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_foreign_service_arn() {
        let request = ListTagsForResourceRequest::new("arn:aws:s3:::bucket/key");
        assert!(request.validate().is_err());
    }
}
