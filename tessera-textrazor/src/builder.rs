use std::sync::Arc;
use std::time::Duration;

use tessera_core::{CacheConfig, EntityExtractor, QuotaConfig, RazorConfig, TesseraError};
use tessera_middleware::ExtractorBuilder;

use crate::RazorConnector;

/// Builder type alias specialized for TextRazor extractors.
pub type RazorExtractorBuilder = ExtractorBuilder;

impl RazorConnector {
    /// Returns an unconfigured builder around a live connector.
    ///
    /// # Errors
    /// Same as [`RazorConnector::new`].
    pub fn builder(config: &RazorConfig) -> Result<RazorExtractorBuilder, TesseraError> {
        let raw: Arc<dyn EntityExtractor> = Arc::new(Self::new(config)?);
        Ok(ExtractorBuilder::new(raw))
    }

    /// Returns a builder sized for the free TextRazor plan: 500 requests per
    /// day behind a cache that answers repeated texts for an hour.
    ///
    /// Users can further customize before calling `.build()`.
    ///
    /// # Errors
    /// Same as [`RazorConnector::new`].
    pub fn rate_limited(config: &RazorConfig) -> Result<RazorExtractorBuilder, TesseraError> {
        Ok(Self::rate_limited_around(Self::new(config)?))
    }

    /// [`rate_limited`](Self::rate_limited) for an already-built connector.
    #[must_use]
    pub fn rate_limited_around(connector: Self) -> RazorExtractorBuilder {
        let raw: Arc<dyn EntityExtractor> = Arc::new(connector);
        let quota = QuotaConfig {
            limit: 500,
            window: Duration::from_secs(24 * 60 * 60),
        };
        let cache = CacheConfig {
            max_entries: 256,
            ttl: Duration::from_secs(60 * 60),
        };
        ExtractorBuilder::new(raw)
            .with_quota(&quota)
            .with_cache(&cache)
    }
}
