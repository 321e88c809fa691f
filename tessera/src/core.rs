use std::sync::Arc;
use std::time::Duration;

use tessera_core::{
    Annotation, EntityExtractor, ExtractionResponse, ExtractorKey, FetchStrategy,
    NormalizerConfig, RenderOptions, TesseraConfig, TesseraError, normalize_entities,
    resolve_overlaps,
};

use crate::session::AnalysisSession;

/// Orchestrator that routes extraction requests across registered extractors
/// and runs the annotation pipeline over their output.
#[derive(Clone)]
pub struct Tessera {
    pub(crate) extractors: Vec<Arc<dyn EntityExtractor>>,
    pub(crate) cfg: TesseraConfig,
}

/// Builder for constructing a `Tessera` orchestrator with custom configuration.
pub struct TesseraBuilder {
    extractors: Vec<Arc<dyn EntityExtractor>>,
    cfg: TesseraConfig,
}

impl Default for TesseraBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TesseraBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no extractors; register at least one via [`with_extractor`](Self::with_extractor).
    #[must_use]
    pub fn new() -> Self {
        Self {
            extractors: vec![],
            cfg: TesseraConfig::default(),
        }
    }

    /// Register an extractor.
    ///
    /// Registration order is the priority order used by
    /// `FetchStrategy::PriorityWithFallback`. Duplicates are not removed.
    #[must_use]
    pub fn with_extractor(mut self, e: Arc<dyn EntityExtractor>) -> Self {
        self.extractors.push(e);
        self
    }

    /// Select the strategy for multi-extractor requests.
    ///
    /// - `PriorityWithFallback`: registration order, falls through on failure.
    /// - `Latency`: races all extractors and returns the first success.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-extractor call timeout.
    #[must_use]
    pub const fn extractor_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.extractor_timeout = timeout;
        self
    }

    /// Set the span normalization policy.
    #[must_use]
    pub const fn normalizer(mut self, cfg: NormalizerConfig) -> Self {
        self.cfg.normalizer = cfg;
        self
    }

    /// Set the rendering options used by sessions.
    #[must_use]
    pub const fn render_options(mut self, opts: RenderOptions) -> Self {
        self.cfg.render = opts;
        self
    }

    /// Build the `Tessera` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no extractors have been registered.
    pub fn build(self) -> Result<Tessera, TesseraError> {
        if self.extractors.is_empty() {
            return Err(TesseraError::InvalidArg(
                "no extractors registered; add at least one via with_extractor(...)".to_string(),
            ));
        }
        Ok(Tessera {
            extractors: self.extractors,
            cfg: self.cfg,
        })
    }
}

/// Attribute an untagged error to the extractor that raised it.
pub(crate) fn tag_err(extractor: &str, e: TesseraError) -> TesseraError {
    if e.is_extraction_failure() {
        e
    } else {
        TesseraError::extraction(extractor, e.to_string())
    }
}

/// Collapse per-extractor failures into one outcome.
///
/// Rules:
/// - A single failure is returned as-is.
/// - If every failure is an `ExtractorTimeout` → `AllExtractorsTimedOut`.
/// - Else → `AllExtractorsFailed(errors)`.
#[must_use]
pub fn collapse_errors(mut errors: Vec<TesseraError>) -> TesseraError {
    if errors.len() == 1
        && let Some(e) = errors.pop()
    {
        return e;
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, TesseraError::ExtractorTimeout { .. }))
    {
        return TesseraError::AllExtractorsTimedOut;
    }
    TesseraError::AllExtractorsFailed(errors)
}

impl Tessera {
    /// Start building a new `Tessera` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use tessera::{FetchStrategy, Tessera};
    ///
    /// let razor = Arc::new(tessera_textrazor::RazorConnector::from_env()?);
    /// let tessera = Tessera::builder()
    ///     .with_extractor(razor)
    ///     .fetch_strategy(FetchStrategy::PriorityWithFallback)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TesseraBuilder {
        TesseraBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TesseraConfig {
        &self.cfg
    }

    /// Open a fresh analysis session bound to this orchestrator.
    #[must_use]
    pub fn session(&self) -> AnalysisSession {
        AnalysisSession::new(self.clone())
    }

    /// Wrap an extractor future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tessera::core::extractor_call_with_timeout",
            skip(fut),
            fields(
                extractor = extractor_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn extractor_call_with_timeout<T, Fut>(
        extractor_name: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, TesseraError>
    where
        Fut: core::future::Future<Output = Result<T, TesseraError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(TesseraError::timeout(extractor_name)))
    }

    /// Run entity extraction over `text`, honoring the configured fetch strategy.
    ///
    /// Returns the key of the extractor that answered alongside its response.
    ///
    /// # Errors
    /// Returns the single failure when only one extractor was attempted,
    /// `AllExtractorsTimedOut` when every attempt timed out, or
    /// `AllExtractorsFailed` otherwise.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tessera::core::extract",
            skip(self, text),
            fields(chars = text.chars().count(), strategy = ?self.cfg.fetch_strategy),
        )
    )]
    pub async fn extract(
        &self,
        text: &str,
    ) -> Result<(ExtractorKey, ExtractionResponse), TesseraError> {
        match self.cfg.fetch_strategy {
            FetchStrategy::Latency => self.extract_latency(text).await,
            _ => self.extract_priority_with_fallback(text).await,
        }
    }

    async fn extract_priority_with_fallback(
        &self,
        text: &str,
    ) -> Result<(ExtractorKey, ExtractionResponse), TesseraError> {
        let mut errors: Vec<TesseraError> = Vec::new();
        for e in &self.extractors {
            match Self::extractor_call_with_timeout(
                e.name(),
                self.cfg.extractor_timeout,
                e.extract(text),
            )
            .await
            {
                Ok(resp) => return Ok((e.key(), resp)),
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(extractor = e.name(), error = %err, "extractor failed; falling back");
                    errors.push(tag_err(e.name(), err));
                }
            }
        }
        Err(collapse_errors(errors))
    }

    async fn extract_latency(
        &self,
        text: &str,
    ) -> Result<(ExtractorKey, ExtractionResponse), TesseraError> {
        use futures::stream::{FuturesUnordered, StreamExt};

        let timeout = self.cfg.extractor_timeout;
        let mut futs: FuturesUnordered<_> = self
            .extractors
            .iter()
            .map(|e| async move {
                let res = Self::extractor_call_with_timeout(e.name(), timeout, e.extract(text)).await;
                (e, res)
            })
            .collect();

        let mut errors: Vec<TesseraError> = Vec::new();
        while let Some((e, res)) = futs.next().await {
            match res {
                Ok(resp) => return Ok((e.key(), resp)),
                Err(err) => errors.push(tag_err(e.name(), err)),
            }
        }
        Err(collapse_errors(errors))
    }

    /// Extract, normalize and resolve `text` into a non-overlapping span cover.
    ///
    /// Malformed records are dropped and reported in `Annotation::warnings`.
    ///
    /// # Errors
    /// Propagates extraction failures from [`extract`](Self::extract).
    pub async fn annotate(&self, text: &str) -> Result<Annotation, TesseraError> {
        let (extractor, resp) = self.extract(text).await?;
        let normalized = normalize_entities(resp.entities, text, &self.cfg.normalizer);
        let keywords = normalized.spans.clone();
        let spans = resolve_overlaps(normalized.spans);
        Ok(Annotation {
            extractor,
            keywords,
            spans,
            warnings: normalized.warnings,
        })
    }
}
