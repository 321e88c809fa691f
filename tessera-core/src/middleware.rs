//! Middleware trait for wrapping `EntityExtractor` implementations.

use std::sync::Arc;

use crate::extractor::EntityExtractor;

/// Trait implemented by extractor middleware layers.
///
/// A middleware consumes an inner `EntityExtractor` and returns a wrapped
/// extractor that augments or restricts behavior (e.g., caching, quotas).
pub trait Middleware: Send + Sync {
    /// Apply this middleware to wrap an inner extractor and return the wrapped extractor.
    fn apply(self: Box<Self>, inner: Arc<dyn EntityExtractor>) -> Arc<dyn EntityExtractor>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
