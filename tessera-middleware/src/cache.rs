use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use tessera_core::{EntityExtractor, ExtractionResponse, Middleware, TesseraError};
use tessera_types::CacheConfig;

/// Wrapper that memoizes successful responses keyed by the exact input text.
///
/// Failures are never cached, so a transient service error does not stick.
pub struct CachingExtractor {
    inner: Arc<dyn EntityExtractor>,
    cache: Cache<String, ExtractionResponse>,
}

impl CachingExtractor {
    /// Wrap `inner` with a bounded TTL cache.
    pub fn new(inner: Arc<dyn EntityExtractor>, cfg: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(cfg.max_entries)
            .time_to_live(cfg.ttl)
            .build();
        Self { inner, cache }
    }

    /// Access the inner extractor.
    pub fn inner(&self) -> &Arc<dyn EntityExtractor> {
        &self.inner
    }
}

#[async_trait]
impl EntityExtractor for CachingExtractor {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    async fn extract(&self, text: &str) -> Result<ExtractionResponse, TesseraError> {
        if let Some(hit) = self.cache.get(text).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(extractor = self.inner.name(), "extraction cache hit");
            return Ok(hit);
        }
        let resp = self.inner.extract(text).await?;
        self.cache.insert(text.to_string(), resp.clone()).await;
        Ok(resp)
    }
}

/// Middleware config for constructing a [`CachingExtractor`].
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn EntityExtractor>) -> Arc<dyn EntityExtractor> {
        Arc::new(CachingExtractor::new(inner, &self.cfg))
    }

    fn name(&self) -> &'static str {
        "CachingExtractor"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_entries": self.cfg.max_entries,
            "ttl_ms": u64::try_from(self.cfg.ttl.as_millis()).unwrap_or(u64::MAX),
        })
    }
}
