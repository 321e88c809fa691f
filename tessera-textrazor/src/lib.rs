//! tessera-textrazor
//!
//! Entity extractor backed by the [TextRazor](https://www.textrazor.com/) HTTP
//! API. Submits text as a form-encoded POST and decodes the `entities` list of
//! the response into [`RawEntity`](tessera_core::RawEntity) records.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;

use std::sync::Arc;

use adapter::{RazorApi, RealAdapter};
use async_trait::async_trait;
use tessera_core::{EntityExtractor, ExtractionResponse, ExtractorKey, RazorConfig, TesseraError};

pub use builder::RazorExtractorBuilder;

pub(crate) const NAME: &str = "tessera-textrazor";

/// Public extractor type. Production users construct it with
/// [`RazorConnector::new`] or [`RazorConnector::from_env`].
#[derive(Clone)]
pub struct RazorConnector {
    api: Arc<dyn RazorApi>,
}

impl RazorConnector {
    /// Static extractor key.
    pub const KEY: ExtractorKey = ExtractorKey::new(NAME);

    fn looks_like_auth_failure(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.starts_with("status 401") || m.starts_with("status 403") || m.contains("api key")
    }

    fn normalize_error(e: TesseraError) -> TesseraError {
        match e {
            TesseraError::Extraction { extractor: _, msg } => {
                if Self::looks_like_auth_failure(&msg) {
                    TesseraError::Config(format!("TextRazor rejected credentials: {msg}"))
                } else {
                    TesseraError::extraction(NAME, msg)
                }
            }
            TesseraError::InvalidArg(msg) => TesseraError::extraction(NAME, msg),
            other => other,
        }
    }

    /// Build a live connector from explicit configuration.
    ///
    /// # Errors
    /// Returns `Config` for a blank key or an unparseable endpoint.
    pub fn new(config: &RazorConfig) -> Result<Self, TesseraError> {
        let real = RealAdapter::new(config)?;
        Ok(Self::from_adapter(Arc::new(real)))
    }

    /// Build a live connector from `TEXTRAZOR_API_KEY` (and optionally
    /// `TEXTRAZOR_ENDPOINT`).
    ///
    /// # Errors
    /// Returns `Config` when the key is missing.
    pub fn from_env() -> Result<Self, TesseraError> {
        Self::new(&RazorConfig::from_env()?)
    }

    /// Build around any transport, e.g. a closure adapter in tests.
    #[must_use]
    pub fn from_adapter(api: Arc<dyn RazorApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl EntityExtractor for RazorConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "TextRazor"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tessera_textrazor::extract",
            skip(self, text),
            fields(chars = text.chars().count()),
        )
    )]
    async fn extract(&self, text: &str) -> Result<ExtractionResponse, TesseraError> {
        let resp = self.api.analyze(text).await.map_err(Self::normalize_error)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(entities = resp.entities.len(), "textrazor response decoded");
        Ok(resp)
    }
}
