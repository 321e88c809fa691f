//! Re-export of foundational types from `tessera-types`.
// Consolidated re-exports so downstream crates can depend on `tessera-core` only

pub use tessera_types::{
    AnalysisReport, Annotation, CacheConfig, ExtractionResponse, ExtractorKey, FetchStrategy,
    MiddlewareLayer, MiddlewareStack, NormalizerConfig, QuotaConfig, QuotaState, RawEntity,
    RazorConfig, RenderOptions, Segment, Span, SpanMetadata, Suggestion, TesseraConfig,
    TesseraError, segments_text,
};
