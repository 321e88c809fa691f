//! Quota-aware extractor wrapper.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tessera_core::{EntityExtractor, ExtractionResponse, Middleware, TesseraError};
use tessera_types::{QuotaConfig, QuotaState};
use tokio::time::Instant;

/// Wrapper that enforces a request budget over a fixed window.
///
/// Rejected calls never reach the inner extractor.
pub struct QuotaAwareExtractor {
    inner: Arc<dyn EntityExtractor>,
    runtime: Mutex<QuotaRuntime>,
}

struct QuotaRuntime {
    limit: u64,
    window: Duration,
    calls_made_in_window: u64,
    last_reset: Instant,
}

impl QuotaRuntime {
    fn roll_window(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.last_reset);
        if self.window.is_zero() || elapsed < self.window {
            return;
        }
        self.calls_made_in_window = 0;
        // Keep windows aligned to regular boundaries even across idle gaps
        let windows_passed = elapsed.as_nanos() / self.window.as_nanos();
        let offset = Duration::from_nanos(
            (windows_passed * self.window.as_nanos())
                .try_into()
                .unwrap_or(u64::MAX),
        );
        self.last_reset += offset;
    }

    fn reset_in(&self, now: Instant) -> Duration {
        self.window
            .saturating_sub(now.duration_since(self.last_reset))
    }
}

impl QuotaAwareExtractor {
    /// Create a new quota-aware wrapper around an existing extractor.
    pub fn new(inner: Arc<dyn EntityExtractor>, config: &QuotaConfig) -> Self {
        Self {
            inner,
            runtime: Mutex::new(QuotaRuntime {
                limit: config.limit,
                window: config.window,
                calls_made_in_window: 0,
                last_reset: Instant::now(),
            }),
        }
    }

    /// Access the inner extractor.
    pub fn inner(&self) -> &Arc<dyn EntityExtractor> {
        &self.inner
    }

    fn runtime(&self) -> MutexGuard<'_, QuotaRuntime> {
        self.runtime.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the budget in the current window.
    pub fn state(&self) -> QuotaState {
        let now = Instant::now();
        let mut rt = self.runtime();
        rt.roll_window(now);
        QuotaState {
            limit: rt.limit,
            remaining: rt.limit.saturating_sub(rt.calls_made_in_window),
            reset_in: rt.reset_in(now),
        }
    }

    /// Consume one unit of budget if available.
    ///
    /// # Errors
    /// Returns `TesseraError::QuotaExceeded` when the window budget is exhausted.
    pub fn should_allow_call(&self) -> Result<(), TesseraError> {
        let now = Instant::now();
        let mut rt = self.runtime();
        rt.roll_window(now);

        if rt.calls_made_in_window < rt.limit {
            rt.calls_made_in_window += 1;
            return Ok(());
        }

        let reset_in_ms = rt.reset_in(now).as_millis().try_into().unwrap_or(u64::MAX);
        let err = TesseraError::QuotaExceeded {
            remaining: rt.limit.saturating_sub(rt.calls_made_in_window),
            reset_in_ms,
        };
        drop(rt);
        #[cfg(feature = "tracing")]
        tracing::warn!(extractor = self.inner.name(), error = %err, "quota exhausted");
        Err(err)
    }
}

#[async_trait]
impl EntityExtractor for QuotaAwareExtractor {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    async fn extract(&self, text: &str) -> Result<ExtractionResponse, TesseraError> {
        self.should_allow_call()?;
        self.inner.extract(text).await
    }
}

/// Middleware config for constructing a [`QuotaAwareExtractor`].
pub struct QuotaMiddleware {
    pub config: QuotaConfig,
}

impl QuotaMiddleware {
    #[must_use]
    pub const fn new(config: QuotaConfig) -> Self {
        Self { config }
    }
}

impl Middleware for QuotaMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn EntityExtractor>) -> Arc<dyn EntityExtractor> {
        Arc::new(QuotaAwareExtractor::new(inner, &self.config))
    }

    fn name(&self) -> &'static str {
        "QuotaAwareExtractor"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "limit": self.config.limit,
            "window_ms": u64::try_from(self.config.window.as_millis()).unwrap_or(u64::MAX),
        })
    }
}
