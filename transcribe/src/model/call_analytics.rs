//! Call analytics categories and jobs.

use serde::{Deserialize, Serialize};

use super::{
    ContentRedaction, JobStatus, Media, MediaFormat, ParticipantRole, Tag, Transcript,
    VocabularyFilterMethod, validate_filter_method,
};
use crate::{
    error::{Error, Result},
    operation::{NoOutput, declared, operation},
    validate::{self, Validate},
};

/// Number of rules a category may hold.
pub const CATEGORY_RULES_RANGE: std::ops::RangeInclusive<usize> = 1..=20;

/// Whether a category applies to streaming or post-call analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum InputType {
    /// Streaming analytics.
    RealTime,
    /// Post-call analytics.
    PostCall,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Sentiment values a rule can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum SentimentValue {
    /// Positive sentiment.
    Positive,
    /// Negative sentiment.
    Negative,
    /// Neutral sentiment.
    Neutral,
    /// Mixed sentiment.
    Mixed,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// How a transcript filter matches its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum TranscriptFilterType {
    /// Exact phrase match.
    Exact,
    /// A value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// A window of the call in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AbsoluteTimeRange {
    /// Start of the window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<u64>,
    /// End of the window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
    /// The first N milliseconds of the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u64>,
    /// The last N milliseconds of the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<u64>,
}

/// A window of the call as percentages of its length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RelativeTimeRange {
    /// Start of the window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_percentage: Option<u32>,
    /// End of the window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_percentage: Option<u32>,
    /// The first N percent of the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    /// The last N percent of the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
}

impl Validate for RelativeTimeRange {
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("StartPercentage", self.start_percentage),
            ("EndPercentage", self.end_percentage),
            ("First", self.first),
            ("Last", self.last),
        ] {
            validate::in_range(field, value, 0..=100)?;
        }
        Ok(())
    }
}

fn validate_time_ranges(
    absolute: Option<&AbsoluteTimeRange>,
    relative: Option<&RelativeTimeRange>,
) -> Result<()> {
    validate::at_most_one(&[
        ("AbsoluteTimeRange", absolute.is_some()),
        ("RelativeTimeRange", relative.is_some()),
    ])?;
    relative.map_or(Ok(()), Validate::validate)
}

/// Matches periods of silence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NonTalkTimeFilter {
    /// Minimum silence in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u64>,
    /// Absolute window to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_time_range: Option<AbsoluteTimeRange>,
    /// Relative window to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time_range: Option<RelativeTimeRange>,
    /// Match when the condition is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
}

/// Matches participants talking over each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InterruptionFilter {
    /// Minimum interruption in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u64>,
    /// Who interrupts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_role: Option<ParticipantRole>,
    /// Absolute window to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_time_range: Option<AbsoluteTimeRange>,
    /// Relative window to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time_range: Option<RelativeTimeRange>,
    /// Match when the condition is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
}

/// Matches spoken phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptFilter {
    /// Match mode.
    pub transcript_filter_type: TranscriptFilterType,
    /// Absolute window to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_time_range: Option<AbsoluteTimeRange>,
    /// Relative window to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time_range: Option<RelativeTimeRange>,
    /// Who must say the phrases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_role: Option<ParticipantRole>,
    /// Match when the phrases are absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
    /// Phrases to look for.
    pub targets: Vec<String>,
}

impl TranscriptFilter {
    /// Exact match on any of the given phrases.
    #[must_use]
    pub fn exact(targets: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            transcript_filter_type: TranscriptFilterType::Exact,
            absolute_time_range: None,
            relative_time_range: None,
            participant_role: None,
            negate: None,
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }
}

/// Matches sentiment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentFilter {
    /// Sentiments to match.
    pub sentiments: Vec<SentimentValue>,
    /// Absolute window to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_time_range: Option<AbsoluteTimeRange>,
    /// Relative window to inspect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_time_range: Option<RelativeTimeRange>,
    /// Whose sentiment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_role: Option<ParticipantRole>,
    /// Match when the sentiment is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
}

/// One condition of a category. Serialized as a single-key object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Rule {
    /// Silence.
    NonTalkTimeFilter(NonTalkTimeFilter),
    /// Interruptions.
    InterruptionFilter(InterruptionFilter),
    /// Phrases.
    TranscriptFilter(TranscriptFilter),
    /// Sentiment.
    SentimentFilter(SentimentFilter),
}

impl Validate for Rule {
    fn validate(&self) -> Result<()> {
        match self {
            Self::NonTalkTimeFilter(f) => {
                validate_time_ranges(f.absolute_time_range.as_ref(), f.relative_time_range.as_ref())
            }
            Self::InterruptionFilter(f) => {
                validate::not_unknown("InterruptionFilter.ParticipantRole", f.participant_role)?;
                validate_time_ranges(f.absolute_time_range.as_ref(), f.relative_time_range.as_ref())
            }
            Self::TranscriptFilter(f) => {
                if f.targets.is_empty() || f.targets.iter().any(|t| t.trim().is_empty()) {
                    return Err(Error::bad_request(
                        "TranscriptFilter.Targets must contain at least one non-empty phrase",
                    ));
                }
                validate::not_unknown(
                    "TranscriptFilter.TranscriptFilterType",
                    Some(f.transcript_filter_type),
                )?;
                validate::not_unknown("TranscriptFilter.ParticipantRole", f.participant_role)?;
                validate_time_ranges(f.absolute_time_range.as_ref(), f.relative_time_range.as_ref())
            }
            Self::SentimentFilter(f) => {
                if f.sentiments.is_empty() {
                    return Err(Error::bad_request(
                        "SentimentFilter.Sentiments must not be empty",
                    ));
                }
                f.sentiments.iter().try_for_each(|&s| {
                    validate::not_unknown("SentimentFilter.Sentiments", Some(s))
                })?;
                validate::not_unknown("SentimentFilter.ParticipantRole", f.participant_role)?;
                validate_time_ranges(f.absolute_time_range.as_ref(), f.relative_time_range.as_ref())
            }
        }
    }
}

fn validate_rules(rules: &[Rule]) -> Result<()> {
    if !CATEGORY_RULES_RANGE.contains(&rules.len()) {
        return Err(Error::bad_request(format!(
            "Rules must contain between {} and {} entries",
            CATEGORY_RULES_RANGE.start(),
            CATEGORY_RULES_RANGE.end()
        )));
    }
    rules.iter().try_for_each(Validate::validate)
}

/// A call analytics category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryProperties {
    /// Name of the category.
    pub category_name: Option<String>,
    /// Conditions of the category.
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Creation time.
    pub create_time: Option<f64>,
    /// Last update time.
    pub last_update_time: Option<f64>,
    /// Tags attached to the category.
    pub tags: Option<Vec<Tag>>,
    /// Streaming or post-call.
    pub input_type: Option<InputType>,
}

/// Creates a call analytics category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCallAnalyticsCategoryRequest {
    /// Unique name for the category.
    pub category_name: String,
    /// Conditions, 1..=20.
    pub rules: Vec<Rule>,
    /// Tags attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Streaming or post-call; post-call when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
}

impl CreateCallAnalyticsCategoryRequest {
    /// A post-call category with the given rules.
    #[must_use]
    pub fn new(category_name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            category_name: category_name.into(),
            rules,
            tags: None,
            input_type: None,
        }
    }
}

impl Validate for CreateCallAnalyticsCategoryRequest {
    fn validate(&self) -> Result<()> {
        validate::name("CategoryName", &self.category_name)?;
        validate_rules(&self.rules)?;
        validate::not_unknown("InputType", self.input_type)?;
        validate::tags(self.tags.as_deref())
    }
}

/// Result of [`CreateCallAnalyticsCategoryRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCallAnalyticsCategoryResponse {
    /// The category.
    pub category_properties: Option<CategoryProperties>,
}

/// Fetches a call analytics category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallAnalyticsCategoryRequest {
    /// Name of the category.
    pub category_name: String,
}

impl GetCallAnalyticsCategoryRequest {
    /// Request for the named category.
    #[must_use]
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
        }
    }
}

impl Validate for GetCallAnalyticsCategoryRequest {
    fn validate(&self) -> Result<()> {
        validate::name("CategoryName", &self.category_name)
    }
}

/// Result of [`GetCallAnalyticsCategoryRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallAnalyticsCategoryResponse {
    /// The category.
    pub category_properties: Option<CategoryProperties>,
}

/// Lists call analytics categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCallAnalyticsCategoriesRequest {
    /// Token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Page size, 1..=100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl Validate for ListCallAnalyticsCategoriesRequest {
    fn validate(&self) -> Result<()> {
        validate::max_results(self.max_results)
    }
}

/// Result of [`ListCallAnalyticsCategoriesRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCallAnalyticsCategoriesResponse {
    /// Token for the next page, if any.
    pub next_token: Option<String>,
    /// The categories.
    #[serde(default)]
    pub categories: Vec<CategoryProperties>,
}

/// Replaces the rules of a call analytics category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCallAnalyticsCategoryRequest {
    /// Name of the category.
    pub category_name: String,
    /// New conditions, 1..=20.
    pub rules: Vec<Rule>,
    /// Must match the category's existing input type when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
}

impl Validate for UpdateCallAnalyticsCategoryRequest {
    fn validate(&self) -> Result<()> {
        validate::name("CategoryName", &self.category_name)?;
        validate_rules(&self.rules)?;
        validate::not_unknown("InputType", self.input_type)
    }
}

/// Result of [`UpdateCallAnalyticsCategoryRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCallAnalyticsCategoryResponse {
    /// The updated category.
    pub category_properties: Option<CategoryProperties>,
}

/// Deletes a call analytics category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteCallAnalyticsCategoryRequest {
    /// Name of the category.
    pub category_name: String,
}

impl DeleteCallAnalyticsCategoryRequest {
    /// Request deleting the named category.
    #[must_use]
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
        }
    }
}

impl Validate for DeleteCallAnalyticsCategoryRequest {
    fn validate(&self) -> Result<()> {
        validate::name("CategoryName", &self.category_name)
    }
}

/// Maps an audio channel to a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChannelDefinition {
    /// Channel index, 0 or 1.
    pub channel_id: u32,
    /// Who speaks on the channel.
    pub participant_role: ParticipantRole,
}

/// Generative call summary options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Summarization {
    /// Produce an abstractive summary.
    pub generate_abstractive_summary: bool,
}

/// Optional call analytics features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallAnalyticsJobSettings {
    /// Custom vocabulary to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_name: Option<String>,
    /// Vocabulary filter to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_name: Option<String>,
    /// How filtered words are treated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_filter_method: Option<VocabularyFilterMethod>,
    /// Custom language model to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_model_name: Option<String>,
    /// Redaction settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_redaction: Option<ContentRedaction>,
    /// Candidate languages for identification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_options: Option<Vec<String>>,
    /// Summary options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summarization: Option<Summarization>,
}

impl Validate for CallAnalyticsJobSettings {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.vocabulary_name {
            validate::name("Settings.VocabularyName", name)?;
        }
        if let Some(name) = &self.language_model_name {
            validate::name("Settings.LanguageModelName", name)?;
        }
        if let Some(redaction) = &self.content_redaction {
            redaction.validate()?;
        }
        validate_filter_method(
            self.vocabulary_filter_method,
            self.vocabulary_filter_name.as_deref(),
        )
    }
}

fn validate_channels(channels: &[ChannelDefinition]) -> Result<()> {
    if channels.len() > 2 {
        return Err(Error::bad_request(
            "ChannelDefinitions may contain at most 2 entries",
        ));
    }
    if channels.iter().any(|c| c.channel_id > 1) {
        return Err(Error::bad_request("ChannelDefinitions.ChannelId must be 0 or 1"));
    }
    channels.iter().try_for_each(|c| {
        validate::not_unknown("ChannelDefinitions.ParticipantRole", Some(c.participant_role))
    })?;
    if let [a, b] = channels {
        if a.channel_id == b.channel_id {
            return Err(Error::bad_request(
                "ChannelDefinitions must use distinct channel ids",
            ));
        }
    }
    Ok(())
}

/// Starts an asynchronous call analytics job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartCallAnalyticsJobRequest {
    /// Unique name for the job.
    pub call_analytics_job_name: String,
    /// The call recording.
    pub media: Media,
    /// S3 location for the output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location: Option<String>,
    /// KMS key used to encrypt the output.
    #[serde(
        rename = "OutputEncryptionKMSKeyId",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_encryption_kms_key_id: Option<String>,
    /// Role the service assumes to read and write S3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_access_role_arn: Option<String>,
    /// Optional features.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<CallAnalyticsJobSettings>,
    /// Tags attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Channel to participant mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_definitions: Option<Vec<ChannelDefinition>>,
}

impl StartCallAnalyticsJobRequest {
    /// A job over the recording at `media_file_uri`.
    #[must_use]
    pub fn new(call_analytics_job_name: impl Into<String>, media_file_uri: impl Into<String>) -> Self {
        Self {
            call_analytics_job_name: call_analytics_job_name.into(),
            media: Media::new(media_file_uri),
            ..Self::default()
        }
    }
}

impl Validate for StartCallAnalyticsJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name("CallAnalyticsJobName", &self.call_analytics_job_name)?;
        self.media.validate()?;
        if let Some(location) = &self.output_location {
            validate::uri("OutputLocation", location)?;
        }
        if let Some(arn) = &self.data_access_role_arn {
            validate::role_arn("DataAccessRoleArn", arn)?;
        }
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        if let Some(channels) = &self.channel_definitions {
            validate_channels(channels)?;
        }
        validate::tags(self.tags.as_deref())
    }
}

/// A call analytics job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallAnalyticsJob {
    /// Name of the job.
    pub call_analytics_job_name: Option<String>,
    /// Processing state.
    pub call_analytics_job_status: Option<JobStatus>,
    /// Language of the call.
    pub language_code: Option<String>,
    /// Sample rate of the media.
    pub media_sample_rate_hertz: Option<u32>,
    /// Container format of the media.
    pub media_format: Option<MediaFormat>,
    /// The call recording.
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
    /// Role used by the job.
    pub data_access_role_arn: Option<String>,
    /// Confidence in the identified language.
    pub identified_language_score: Option<f64>,
    /// Optional features.
    pub settings: Option<CallAnalyticsJobSettings>,
    /// Channel to participant mapping.
    pub channel_definitions: Option<Vec<ChannelDefinition>>,
}

/// Result of [`StartCallAnalyticsJobRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StartCallAnalyticsJobResponse {
    /// The job.
    pub call_analytics_job: Option<CallAnalyticsJob>,
}

/// Fetches a call analytics job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallAnalyticsJobRequest {
    /// Name of the job.
    pub call_analytics_job_name: String,
}

impl GetCallAnalyticsJobRequest {
    /// Request for the named job.
    #[must_use]
    pub fn new(call_analytics_job_name: impl Into<String>) -> Self {
        Self {
            call_analytics_job_name: call_analytics_job_name.into(),
        }
    }
}

impl Validate for GetCallAnalyticsJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name("CallAnalyticsJobName", &self.call_analytics_job_name)
    }
}

/// Result of [`GetCallAnalyticsJobRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCallAnalyticsJobResponse {
    /// The job.
    pub call_analytics_job: Option<CallAnalyticsJob>,
}

/// Lists call analytics jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCallAnalyticsJobsRequest {
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

impl Validate for ListCallAnalyticsJobsRequest {
    fn validate(&self) -> Result<()> {
        validate::max_results(self.max_results)?;
        validate::not_unknown("Status", self.status)?;
        validate::name_filter("JobNameContains", self.job_name_contains.as_deref())
    }
}

/// Summary of a call analytics job in a list result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallAnalyticsJobSummary {
    /// Name of the job.
    pub call_analytics_job_name: Option<String>,
    /// Request time.
    pub creation_time: Option<f64>,
    /// Processing start time.
    pub start_time: Option<f64>,
    /// Completion time.
    pub completion_time: Option<f64>,
    /// Language of the call.
    pub language_code: Option<String>,
    /// Processing state.
    pub call_analytics_job_status: Option<JobStatus>,
    /// Why the job failed, when it did.
    pub failure_reason: Option<String>,
}

/// Result of [`ListCallAnalyticsJobsRequest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCallAnalyticsJobsResponse {
    /// State filter that was applied.
    pub status: Option<JobStatus>,
    /// Token for the next page, if any.
    pub next_token: Option<String>,
    /// Matching jobs.
    #[serde(default)]
    pub call_analytics_job_summaries: Vec<CallAnalyticsJobSummary>,
}

/// Deletes a call analytics job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteCallAnalyticsJobRequest {
    /// Name of the job.
    pub call_analytics_job_name: String,
}

impl DeleteCallAnalyticsJobRequest {
    /// Request deleting the named job.
    #[must_use]
    pub fn new(call_analytics_job_name: impl Into<String>) -> Self {
        Self {
            call_analytics_job_name: call_analytics_job_name.into(),
        }
    }
}

impl Validate for DeleteCallAnalyticsJobRequest {
    fn validate(&self) -> Result<()> {
        validate::name("CallAnalyticsJobName", &self.call_analytics_job_name)
    }
}

operation!(CreateCallAnalyticsCategoryRequest => CreateCallAnalyticsCategoryResponse, "CreateCallAnalyticsCategory", declared::CREATE);
operation!(GetCallAnalyticsCategoryRequest => GetCallAnalyticsCategoryResponse, "GetCallAnalyticsCategory", declared::LOOKUP);
operation!(ListCallAnalyticsCategoriesRequest => ListCallAnalyticsCategoriesResponse, "ListCallAnalyticsCategories", declared::LIST);
operation!(UpdateCallAnalyticsCategoryRequest => UpdateCallAnalyticsCategoryResponse, "UpdateCallAnalyticsCategory", declared::UPDATE);
operation!(DeleteCallAnalyticsCategoryRequest => NoOutput, "DeleteCallAnalyticsCategory", declared::LOOKUP);
operation!(StartCallAnalyticsJobRequest => StartCallAnalyticsJobResponse, "StartCallAnalyticsJob", declared::CREATE);
operation!(GetCallAnalyticsJobRequest => GetCallAnalyticsJobResponse, "GetCallAnalyticsJob", declared::LOOKUP);
operation!(ListCallAnalyticsJobsRequest => ListCallAnalyticsJobsResponse, "ListCallAnalyticsJobs", declared::LIST);
operation!(DeleteCallAnalyticsJobRequest => NoOutput, "DeleteCallAnalyticsJob", declared::LIST);

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> Rule {
        Rule::TranscriptFilter(TranscriptFilter::exact(["cancel my account"]))
    }

    #[test]
    fn test_rule_wire_shape() {
        let json = serde_json::to_value(rule()).unwrap();
        assert_eq!(json["TranscriptFilter"]["TranscriptFilterType"], "EXACT");
        assert_eq!(json["TranscriptFilter"]["Targets"][0], "cancel my account");
    }

    #[test]
    fn test_rule_count_bounds() {
        let mut request = CreateCallAnalyticsCategoryRequest::new("churn", vec![]);
        assert!(request.validate().is_err());
        request.rules = vec![rule(); 20];
        assert!(request.validate().is_ok());
        request.rules.push(rule());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_both_time_ranges() {
        let filter = NonTalkTimeFilter {
            threshold: Some(5_000),
            absolute_time_range: Some(AbsoluteTimeRange::default()),
            relative_time_range: Some(RelativeTimeRange::default()),
            negate: None,
        };
        assert!(Rule::NonTalkTimeFilter(filter).validate().is_err());
    }

    #[test]
    fn test_time_range_shared_between_rules() {
        let window = RelativeTimeRange {
            first: Some(20),
            ..RelativeTimeRange::default()
        };
        let silence = NonTalkTimeFilter {
            threshold: Some(3_000),
            relative_time_range: Some(window),
            ..NonTalkTimeFilter::default()
        };
        let interruptions = InterruptionFilter {
            relative_time_range: Some(window),
            ..InterruptionFilter::default()
        };
        let request = CreateCallAnalyticsCategoryRequest::new(
            "early-friction",
            vec![
                Rule::NonTalkTimeFilter(silence),
                Rule::InterruptionFilter(interruptions),
            ],
        );
        assert!(request.validate().is_ok());
        assert_eq!(window.first, Some(20));
    }

    #[test]
    fn test_channel_definitions() {
        let mut request = StartCallAnalyticsJobRequest::new("call1", "s3://bucket/call.wav");
        request.channel_definitions = Some(vec![
            ChannelDefinition {
                channel_id: 0,
                participant_role: ParticipantRole::Agent,
            },
            ChannelDefinition {
                channel_id: 1,
                participant_role: ParticipantRole::Customer,
            },
        ]);
        assert!(request.validate().is_ok());

        request.channel_definitions = Some(vec![
            ChannelDefinition {
                channel_id: 1,
                participant_role: ParticipantRole::Agent,
            },
            ChannelDefinition {
                channel_id: 1,
                participant_role: ParticipantRole::Customer,
            },
        ]);
        assert!(request.validate().is_err());

        request.channel_definitions = Some(vec![ChannelDefinition {
            channel_id: 2,
            participant_role: ParticipantRole::Agent,
        }]);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_enum_values() {
        let sentiment = |sentiments: Vec<SentimentValue>| {
            Rule::SentimentFilter(SentimentFilter {
                sentiments,
                ..SentimentFilter::default()
            })
        };
        assert!(sentiment(vec![SentimentValue::Negative]).validate().is_ok());
        assert!(
            sentiment(vec![SentimentValue::Negative, SentimentValue::Unknown])
                .validate()
                .is_err()
        );

        let mut request = CreateCallAnalyticsCategoryRequest::new("churn", vec![rule()]);
        request.input_type = Some(InputType::Unknown);
        assert!(request.validate().is_err());

        let mut job = StartCallAnalyticsJobRequest::new("call1", "s3://bucket/call.wav");
        job.channel_definitions = Some(vec![ChannelDefinition {
            channel_id: 0,
            participant_role: ParticipantRole::Unknown,
        }]);
        assert!(job.validate().is_err());

        let list = ListCallAnalyticsJobsRequest {
            status: Some(JobStatus::Unknown),
            ..ListCallAnalyticsJobsRequest::default()
        };
        assert!(list.validate().is_err());
    }

    #[test]
    fn test_category_properties_decode() {
        let props: CategoryProperties = serde_json::from_str(
            r#"{"CategoryName":"c","Rules":[{"SentimentFilter":{"Sentiments":["NEGATIVE"]}}],"InputType":"REAL_TIME"}"#,
        )
        .unwrap();
        assert_eq!(props.input_type, Some(InputType::RealTime));
        assert_eq!(props.rules.len(), 1);
    }
}
