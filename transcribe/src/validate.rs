//! Local request validation.
//!
//! Checks run before anything is serialized. A failure is always a
//! [`ErrorKind::BadRequest`](crate::ErrorKind::BadRequest) and no request is sent.

use crate::error::{Error, Result};

/// Maximum length of a resource or job name.
pub const MAX_NAME_LEN: usize = 200;

/// Bounds for `MaxResults` on list operations.
pub const MAX_RESULTS_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

/// Maximum number of tags attached in a single request.
pub const MAX_TAGS: usize = 200;

/// Shape checks performed on a request before dispatch.
pub trait Validate {
    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns a bad request error describing the first violation found.
    fn validate(&self) -> Result<()>;
}

/// Requires a resource name of 1..=200 characters from `[0-9A-Za-z._-]`.
pub(crate) fn name(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::bad_request(format!("{field} is required")));
    }
    if value.len() > MAX_NAME_LEN {
        return Err(Error::bad_request(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(Error::bad_request(format!(
            "{field} may only contain letters, digits, '.', '_' and '-'"
        )));
    }
    Ok(())
}

/// Requires a non-empty string.
pub(crate) fn required(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(Error::bad_request(format!("{field} is required"))),
    }
}

pub(crate) fn max_results(value: Option<u32>) -> Result<()> {
    match value {
        Some(n) if !MAX_RESULTS_RANGE.contains(&n) => Err(Error::bad_request(format!(
            "MaxResults must be between {} and {}",
            MAX_RESULTS_RANGE.start(),
            MAX_RESULTS_RANGE.end()
        ))),
        _ => Ok(()),
    }
}

/// Optional name filter used by list operations.
pub(crate) fn name_filter(field: &str, value: Option<&str>) -> Result<()> {
    value.map_or(Ok(()), |v| name(field, v))
}

/// Requires an integer within `range` when present.
pub(crate) fn in_range(
    field: &str,
    value: Option<u32>,
    range: std::ops::RangeInclusive<u32>,
) -> Result<()> {
    match value {
        Some(v) if !range.contains(&v) => Err(Error::bad_request(format!(
            "{field} must be between {} and {}",
            range.start(),
            range.end()
        ))),
        _ => Ok(()),
    }
}

/// Enums that decode unrecognised service values to an `Unknown` variant.
pub(crate) trait Known: Copy {
    fn is_unknown(self) -> bool;
}

/// Rejects the `Unknown` placeholder, which has no wire value of its own.
pub(crate) fn not_unknown<T: Known>(field: &str, value: Option<T>) -> Result<()> {
    match value {
        Some(v) if v.is_unknown() => Err(Error::bad_request(format!(
            "{field} is not a supported value"
        ))),
        _ => Ok(()),
    }
}

/// Requires exactly one of the named alternatives to be set.
pub(crate) fn exactly_one(fields: &[(&str, bool)]) -> Result<()> {
    let set = fields.iter().filter(|(_, present)| *present).count();
    if set == 1 {
        return Ok(());
    }
    let names = fields
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");
    if set == 0 {
        Err(Error::bad_request(format!("one of {names} is required")))
    } else {
        Err(Error::bad_request(format!(
            "only one of {names} may be specified"
        )))
    }
}

/// Rejects requests that set more than one of the named alternatives.
pub(crate) fn at_most_one(fields: &[(&str, bool)]) -> Result<()> {
    if fields.iter().filter(|(_, present)| *present).count() > 1 {
        let names = fields
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::bad_request(format!(
            "only one of {names} may be specified"
        )));
    }
    Ok(())
}

/// Requires an S3 location of the form `s3://bucket/key` or an https URL.
pub(crate) fn uri(field: &str, value: &str) -> Result<()> {
    if value.starts_with("s3://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(Error::bad_request(format!(
            "{field} must be an s3:// or https:// location"
        )))
    }
}

/// Requires an IAM role ARN.
pub(crate) fn role_arn(field: &str, value: &str) -> Result<()> {
    if value.starts_with("arn:") && value.contains(":iam::") && value.contains(":role/") {
        Ok(())
    } else {
        Err(Error::bad_request(format!("{field} must be an IAM role ARN")))
    }
}

/// Requires a transcribe resource ARN.
pub(crate) fn resource_arn(value: &str) -> Result<()> {
    let mut parts = value.splitn(6, ':');
    let well_formed = parts.next() == Some("arn")
        && parts.next().is_some_and(|p| p.starts_with("aws"))
        && parts.next() == Some("transcribe")
        && parts.nth(2).is_some_and(|resource| resource.contains('/'));
    if well_formed {
        Ok(())
    } else {
        Err(Error::bad_request(
            "ResourceArn must be a transcribe resource ARN",
        ))
    }
}

pub(crate) fn tag_key(key: &str) -> Result<()> {
    if key.is_empty() || key.chars().count() > 128 {
        return Err(Error::bad_request(
            "tag keys must be between 1 and 128 characters",
        ));
    }
    Ok(())
}

pub(crate) fn tags(tags: Option<&[crate::model::Tag]>) -> Result<()> {
    let Some(tags) = tags else {
        return Ok(());
    };
    if tags.is_empty() || tags.len() > MAX_TAGS {
        return Err(Error::bad_request(format!(
            "Tags must contain between 1 and {MAX_TAGS} entries"
        )));
    }
    for tag in tags {
        tag_key(&tag.key)?;
        if tag.value.chars().count() > 256 {
            return Err(Error::bad_request(
                "tag values must be at most 256 characters",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_name() {
        assert!(name("VocabularyName", "my-vocab_1.0").is_ok());
        assert!(name("VocabularyName", "").is_err());
        assert!(name("VocabularyName", "has space").is_err());
        assert!(name("VocabularyName", &"a".repeat(201)).is_err());
        assert_eq!(
            name("VocabularyName", "x/y").unwrap_err().kind(),
            ErrorKind::BadRequest
        );
    }

    #[test]
    fn test_exactly_one() {
        assert!(exactly_one(&[("A", true), ("B", false)]).is_ok());
        let none = exactly_one(&[("A", false), ("B", false)]).unwrap_err();
        assert_eq!(none.message, "one of A, B is required");
        let both = exactly_one(&[("A", true), ("B", true)]).unwrap_err();
        assert_eq!(both.message, "only one of A, B may be specified");
    }

    #[test]
    fn test_max_results() {
        assert!(max_results(None).is_ok());
        assert!(max_results(Some(1)).is_ok());
        assert!(max_results(Some(100)).is_ok());
        assert!(max_results(Some(0)).is_err());
        assert!(max_results(Some(101)).is_err());
    }

    #[test]
    fn test_resource_arn() {
        assert!(resource_arn("arn:aws:transcribe:us-east-1:123456789012:vocabulary/v1").is_ok());
        assert!(resource_arn("arn:aws-cn:transcribe:cn-north-1:1:transcription-job/j").is_ok());
        assert!(resource_arn("arn:aws:s3:::bucket/key").is_err());
        assert!(resource_arn("vocabulary/v1").is_err());
        assert!(resource_arn("arn:aws:transcribe:us-east-1:123456789012:novocab").is_err());
    }

    #[test]
    fn test_role_arn() {
        assert!(role_arn("DataAccessRoleArn", "arn:aws:iam::123456789012:role/Transcribe").is_ok());
        assert!(role_arn("DataAccessRoleArn", "arn:aws:iam::123456789012:user/me").is_err());
    }
}
