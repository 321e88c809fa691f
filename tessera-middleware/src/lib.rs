//! tessera-middleware
//!
//! Wrappers that sit between the orchestrator and a raw extractor.
//!
//! - [`CachingExtractor`]: reuses the response for a text seen recently.
//! - [`QuotaAwareExtractor`]: rejects calls once a fixed-window budget is spent.
//! - [`ExtractorBuilder`]: composes a raw extractor with these layers.

mod builder;
mod cache;
mod quota;

pub use crate::builder::ExtractorBuilder;
pub use crate::cache::{CacheMiddleware, CachingExtractor};
pub use crate::quota::{QuotaAwareExtractor, QuotaMiddleware};
