//! Client configuration.
//!
//! Configuration is fixed when a [`Client`](crate::Client) is built. There
//! are no setters on a built client; [`Client::with_endpoint`] returns a new
//! client instead of changing an existing one.
//!
//! [`Client::with_endpoint`]: crate::Client::with_endpoint

use std::{sync::Arc, time::Duration};

use crate::{
    client::Client,
    error::ClientBuilderError,
    transport::{HttpTransport, Transport},
};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retained response metadata entries.
pub const DEFAULT_METADATA_CACHE_CAPACITY: usize = 50;

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("transcribe-rs/", env!("CARGO_PKG_VERSION"));

/// Endpoint override variable read by [`ClientBuilder::from_env`].
pub const ENDPOINT_ENV: &str = "TRANSCRIBE_ENDPOINT";

/// Timeout override variable read by [`ClientBuilder::from_env`].
pub const TIMEOUT_ENV: &str = "TRANSCRIBE_TIMEOUT_SECS";

/// Endpoint for a region.
#[must_use]
pub fn default_endpoint(region: &str) -> String {
    format!("https://transcribe.{region}.amazonaws.com")
}

/// Immutable configuration of a built client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL requests are posted to.
    pub endpoint: String,
    /// Region the client targets.
    pub region: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Number of retained response metadata entries.
    pub metadata_cache_capacity: usize,
}

impl ClientConfig {
    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) fn http_transport(&self) -> Result<HttpTransport, ClientBuilderError> {
        HttpTransport::new(self.endpoint.as_str(), self.timeout(), &self.user_agent)
    }
}

/// Builder for [`Client`].
///
/// # Example
///
/// ```rust,ignore
/// use transcribe::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .region("us-east-1")
///     .timeout_secs(30)
///     .build()?;
/// ```
#[derive(Debug, Default, Clone)]
pub struct ClientBuilder {
    region: Option<String>,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    metadata_cache_capacity: Option<usize>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AWS_REGION`, falling back to `AWS_DEFAULT_REGION`
    /// - `TRANSCRIBE_ENDPOINT` (optional)
    /// - `TRANSCRIBE_TIMEOUT_SECS` (optional)
    pub fn from_env() -> Result<Self, ClientBuilderError> {
        let mut builder = Self::new();

        if let Some(region) = ["AWS_REGION", "AWS_DEFAULT_REGION"]
            .into_iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        {
            builder = builder.region(region);
        }

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            builder = builder.endpoint(endpoint);
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            let timeout = timeout.trim().parse().map_err(|_| {
                ClientBuilderError::invalid("timeout_secs", format!("{TIMEOUT_ENV}={timeout}"))
            })?;
            builder = builder.timeout_secs(timeout);
        }

        Ok(builder)
    }

    /// Set the region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint instead of the regional default.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout in seconds. Default is 60.
    #[must_use]
    pub const fn timeout_secs(mut self, timeout: u64) -> Self {
        self.timeout_secs = Some(timeout);
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set how many response metadata entries are retained. Default is 50.
    #[must_use]
    pub const fn metadata_cache_capacity(mut self, capacity: usize) -> Self {
        self.metadata_cache_capacity = Some(capacity);
        self
    }

    /// Send requests through a custom transport instead of HTTP.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the configuration without building a client.
    pub fn config(&self) -> Result<ClientConfig, ClientBuilderError> {
        let region = self
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(ClientBuilderError::MissingRegion)?;
        validate_region(region)?;

        let endpoint = match &self.endpoint {
            Some(endpoint) => normalize_endpoint(endpoint)?,
            None => default_endpoint(region),
        };

        let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ClientBuilderError::invalid(
                "timeout_secs",
                "must be greater than zero",
            ));
        }

        Ok(ClientConfig {
            endpoint,
            region: region.to_owned(),
            timeout_secs,
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            metadata_cache_capacity: self
                .metadata_cache_capacity
                .unwrap_or(DEFAULT_METADATA_CACHE_CAPACITY),
        })
    }

    /// Build the client.
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        let config = self.config()?;
        match self.transport {
            Some(transport) => Ok(Client::from_parts(config, transport, false)),
            None => {
                let transport = Arc::new(config.http_transport()?);
                Ok(Client::from_parts(config, transport, true))
            }
        }
    }
}

fn validate_region(region: &str) -> Result<(), ClientBuilderError> {
    let valid = region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !region.starts_with('-')
        && !region.ends_with('-');
    if valid {
        Ok(())
    } else {
        Err(ClientBuilderError::invalid(
            "region",
            format!("{region:?} is not a region name"),
        ))
    }
}

/// Default bare hosts to https, lowercase the scheme and trim trailing
/// slashes from what follows it.
pub(crate) fn normalize_endpoint(endpoint: &str) -> Result<String, ClientBuilderError> {
    let endpoint = endpoint.trim();
    let (scheme, rest) = endpoint.split_once("://").unwrap_or(("https", endpoint));
    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(ClientBuilderError::invalid(
            "endpoint",
            "scheme must be http or https",
        ));
    }
    let host = rest.trim_end_matches('/');
    if host.is_empty() || host.starts_with('/') || host.contains(char::is_whitespace) {
        return Err(ClientBuilderError::invalid(
            "endpoint",
            format!("{endpoint:?} has no host"),
        ));
    }
    Ok(format!("{scheme}://{host}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientBuilder::new().region("us-east-1").config().unwrap();
        assert_eq!(config.endpoint, "https://transcribe.us-east-1.amazonaws.com");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.metadata_cache_capacity, DEFAULT_METADATA_CACHE_CAPACITY);
        assert!(config.user_agent.starts_with("transcribe-rs/"));
    }

    #[test]
    fn test_missing_region() {
        assert!(matches!(
            ClientBuilder::new().config(),
            Err(ClientBuilderError::MissingRegion)
        ));
        assert!(matches!(
            ClientBuilder::new().region("  ").config(),
            Err(ClientBuilderError::MissingRegion)
        ));
    }

    #[test]
    fn test_invalid_region() {
        assert!(matches!(
            ClientBuilder::new().region("US East").config(),
            Err(ClientBuilderError::InvalidProperty { property: "region", .. })
        ));
    }

    #[test]
    fn test_endpoint_normalization() {
        assert_eq!(
            normalize_endpoint("transcribe.us-east-1.example").unwrap(),
            "https://transcribe.us-east-1.example"
        );
        assert_eq!(
            normalize_endpoint("http://localhost:8080/").unwrap(),
            "http://localhost:8080"
        );
        assert_eq!(
            normalize_endpoint("HTTPS://transcribe.example//").unwrap(),
            "https://transcribe.example"
        );
        assert!(normalize_endpoint("ftp://transcribe.example").is_err());
        assert!(normalize_endpoint("https://").is_err());
        assert!(normalize_endpoint("https:///").is_err());
        assert!(normalize_endpoint("http:////host").is_err());
        assert!(normalize_endpoint("/").is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(
            ClientBuilder::new()
                .region("eu-west-1")
                .timeout_secs(0)
                .config()
                .is_err()
        );
    }
}
