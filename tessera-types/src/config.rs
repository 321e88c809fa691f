//! Configuration types shared across the orchestrator, extractors and middleware.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TesseraError;

/// Strategy for selecting among registered extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use registration order and fall back to the next extractor on failure.
    #[default]
    PriorityWithFallback,
    /// Race all extractors concurrently and return the first success.
    Latency,
}

/// Policy applied when turning raw entity records into spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Drop records whose type marks them as calendrical (any type containing
    /// `Date` or `Time`) before deduplication.
    pub exclude_temporal: bool,
    /// Add the decoded title of the record's Wikipedia link to its suggestions.
    pub wiki_title_suggestions: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            exclude_temporal: true,
            wiki_title_suggestions: true,
        }
    }
}

/// Options for projecting spans into display segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Omit a span's own matched text from its rendered suggestion list.
    ///
    /// The underlying `Span::suggestions` keep the identity entry either way.
    pub exclude_identity_suggestion: bool,
}

/// Global configuration for the `Tessera` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TesseraConfig {
    /// Span normalization policy.
    pub normalizer: NormalizerConfig,
    /// Rendering policy used by sessions.
    pub render: RenderOptions,
    /// Strategy for calling multiple extractors.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual extractor calls.
    pub extractor_timeout: Duration,
}

impl Default for TesseraConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerConfig::default(),
            render: RenderOptions::default(),
            fetch_strategy: FetchStrategy::default(),
            extractor_timeout: Duration::from_secs(10),
        }
    }
}

/// Configuration for the extraction response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached texts.
    pub max_entries: u64,
    /// Time-to-live for a cached response.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            ttl: Duration::from_secs(10 * 60),
        }
    }
}

/// Configuration for a request budget over a fixed window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum number of calls within a single window.
    pub limit: u64,
    /// Duration of the accounting window.
    pub window: Duration,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            limit: 500,
            window: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Snapshot of a quota budget at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotaState {
    /// Configured maximum calls per window.
    pub limit: u64,
    /// Remaining calls available in the current window.
    pub remaining: u64,
    /// Time remaining until the current window resets.
    pub reset_in: Duration,
}

/// Credentials and request shape for the TextRazor extractor.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RazorConfig {
    /// Value sent in the `x-textrazor-key` header.
    pub api_key: String,
    /// Base URL requests are POSTed to.
    pub endpoint: String,
    /// Comma-separated extractor list sent with every request.
    pub extractors: String,
}

impl RazorConfig {
    /// Environment variable holding the API key.
    pub const API_KEY_VAR: &'static str = "TEXTRAZOR_API_KEY";
    /// Environment variable overriding the endpoint.
    pub const ENDPOINT_VAR: &'static str = "TEXTRAZOR_ENDPOINT";
    /// Production endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.textrazor.com/";
    /// Extractors requested when none are configured.
    pub const DEFAULT_EXTRACTORS: &'static str = "entities,topics,words,phrases";

    /// Config for `api_key` with the default endpoint and extractor list.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            extractors: Self::DEFAULT_EXTRACTORS.to_string(),
        }
    }

    /// Point requests at a different base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the extractor list.
    #[must_use]
    pub fn with_extractors(mut self, extractors: impl Into<String>) -> Self {
        self.extractors = extractors.into();
        self
    }

    /// Read the key (and optionally the endpoint) from the environment.
    ///
    /// # Errors
    /// Returns `Config` when `TEXTRAZOR_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self, TesseraError> {
        let key = std::env::var(Self::API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                TesseraError::Config(format!("missing TextRazor API key ({})", Self::API_KEY_VAR))
            })?;
        let mut cfg = Self::new(key);
        if let Ok(endpoint) = std::env::var(Self::ENDPOINT_VAR)
            && !endpoint.trim().is_empty()
        {
            cfg.endpoint = endpoint;
        }
        Ok(cfg)
    }
}

impl std::fmt::Debug for RazorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("extractors", &self.extractors)
            .finish()
    }
}
