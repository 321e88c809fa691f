//! Tessera-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod entity;
mod error;
mod extractor;
mod middleware;
mod reports;
mod segment;
mod span;

pub use config::{
    CacheConfig, FetchStrategy, NormalizerConfig, QuotaConfig, QuotaState, RazorConfig,
    RenderOptions, TesseraConfig,
};
pub use entity::{ExtractionResponse, RawEntity};
pub use error::TesseraError;
pub use extractor::ExtractorKey;
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use reports::{AnalysisReport, Annotation};
pub use segment::{Segment, segments_text};
pub use span::{Span, SpanMetadata, Suggestion};
