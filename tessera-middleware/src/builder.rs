//! Builder for composing extractors with middleware layers.
//!
//! Layers form an onion around the raw extractor:
//!
//! ```text
//! analyze(text)
//!     ↓
//! Outermost layer (e.g., Cache - answers repeats without spending quota)
//!     ↓
//! Inner layer (e.g., Quota - rejects calls once the window budget is spent)
//!     ↓
//! Raw extractor (e.g., TextRazor - makes the actual API call)
//! ```
//!
//! The `layers` vector stores middleware **outermost-first** (last added =
//! outermost) and is applied in reverse during `build()`:
//!
//! ```text
//! builder.with_quota(..).with_cache(..)
//!
//! Storage: [Cache, Quota]
//! Applied:  Raw -> Quota -> Cache
//! Result:   Cache(Quota(Raw))
//! ```
//!
//! This matches [`MiddlewareStack`](tessera_types::MiddlewareStack), where
//! `layers[0]` is the outermost layer.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tessera_core::{EntityExtractor, Middleware};
use tessera_types::{CacheConfig, MiddlewareLayer, MiddlewareStack, QuotaConfig};

use crate::cache::CacheMiddleware;
use crate::quota::QuotaMiddleware;

const QUOTA: &str = "QuotaAwareExtractor";
const CACHE: &str = "CachingExtractor";

fn ms_field(config: &Value, key: &str) -> Option<Duration> {
    config
        .get(key)
        .and_then(Value::as_u64)
        .map(Duration::from_millis)
}

fn quota_from_json(config: &Value) -> QuotaConfig {
    let defaults = QuotaConfig::default();
    QuotaConfig {
        limit: config
            .get("limit")
            .and_then(Value::as_u64)
            .unwrap_or(defaults.limit),
        window: ms_field(config, "window_ms").unwrap_or(defaults.window),
    }
}

fn cache_from_json(config: &Value) -> CacheConfig {
    let defaults = CacheConfig::default();
    CacheConfig {
        max_entries: config
            .get("max_entries")
            .and_then(Value::as_u64)
            .unwrap_or(defaults.max_entries),
        ttl: ms_field(config, "ttl_ms").unwrap_or(defaults.ttl),
    }
}

/// Generic middleware builder for composing an extractor with layered wrappers.
///
/// See [module-level documentation](self) for details on ordering.
pub struct ExtractorBuilder {
    raw: Arc<dyn EntityExtractor>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ExtractorBuilder {
    /// Create a new builder from a raw, unwrapped extractor.
    #[must_use]
    pub fn new(raw: Arc<dyn EntityExtractor>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    fn existing_quota_config(&self) -> Option<QuotaConfig> {
        self.layers
            .iter()
            .find(|l| l.name() == QUOTA)
            .map(|l| quota_from_json(&l.config_json()))
    }

    /// Add or replace the quota layer at the outermost position.
    #[must_use]
    pub fn with_quota(mut self, cfg: &QuotaConfig) -> Self {
        self.layers.retain(|m| m.name() != QUOTA);
        self.layers
            .insert(0, Box::new(QuotaMiddleware::new(cfg.clone())));
        self
    }

    /// Remove quota if present.
    #[must_use]
    pub fn without_quota(mut self) -> Self {
        self.layers.retain(|m| m.name() != QUOTA);
        self
    }

    /// Shortcut: set quota limit only (preserves an existing window).
    #[must_use]
    pub fn quota_limit(self, limit: u64) -> Self {
        let mut cfg = self.existing_quota_config().unwrap_or_default();
        cfg.limit = limit;
        self.with_quota(&cfg)
    }

    /// Shortcut: set quota window only (preserves an existing limit).
    #[must_use]
    pub fn quota_window(self, window: Duration) -> Self {
        let mut cfg = self.existing_quota_config().unwrap_or_default();
        cfg.window = window;
        self.with_quota(&cfg)
    }

    /// Add or replace the response cache at the outermost position.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Export the current middleware stack for inspection.
    ///
    /// The raw extractor is appended as the innermost "layer" for observability.
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        for layer in &self.layers {
            stack.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        stack.push_inner(MiddlewareLayer::new(
            "RawExtractor",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Construct a builder from a raw extractor and an explicit stack.
    ///
    /// Inverse of [`to_stack`](Self::to_stack). Unknown layer names are
    /// ignored, as is the trailing `RawExtractor` entry.
    #[must_use]
    pub fn from_stack(raw: Arc<dyn EntityExtractor>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        for l in &stack.layers {
            match l.name.as_str() {
                QUOTA => layers.push(Box::new(QuotaMiddleware::new(quota_from_json(&l.config)))),
                CACHE => layers.push(Box::new(CacheMiddleware::new(cache_from_json(&l.config)))),
                _ => {}
            }
        }
        Self { raw, layers }
    }

    /// Build the wrapped extractor, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn EntityExtractor> {
        let mut acc: Arc<dyn EntityExtractor> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
