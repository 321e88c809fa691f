//! Tessera annotates free-form text with entities found by an external
//! extraction service and lets a user rewrite the text one suggestion at a time.
//!
//! Overview
//! - Routes extraction requests to extractors implementing `tessera_core::EntityExtractor`.
//! - Normalizes raw entity records into deduplicated, scored spans.
//! - Resolves overlaps longest-match-first into a single non-overlapping cover.
//! - Renders the text as `Segment`s (plain text interleaved with annotated spans).
//! - Tracks a per-analysis `AnalysisSession` that applies whole-word substitutions.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: registration order, per-extractor timeout, aggregates
//!     errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races all extractors; lowest tail latency but more request fanout.
//! - Substitution is single-shot per old word: once a word has been replaced,
//!   further requests for that word are no-ops for the rest of the session.
//! - Spans are fixed at analysis time. After a length-changing substitution the
//!   renderer reuses the original offsets over the edited buffer; run `analyze`
//!   again to recompute them.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera::Tessera;
//!
//! let razor = Arc::new(tessera_textrazor::RazorConnector::from_env()?);
//! let tessera = Tessera::builder().with_extractor(razor).build()?;
//!
//! let session = tessera.session();
//! let segments = session.analyze("Paris is the capital of France.").await?;
//! let segments = session.apply_suggestion("Paris", "Lutetia")?;
//! assert_eq!(session.current_buffer(), "Lutetia is the capital of France.");
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod session;

pub use crate::core::{Tessera, TesseraBuilder, collapse_errors};
pub use session::AnalysisSession;

pub use tessera_middleware::{
    CacheMiddleware, CachingExtractor, ExtractorBuilder, QuotaAwareExtractor, QuotaMiddleware,
};

// Re-export core types for convenience
pub use tessera_core::{
    AnalysisReport, Annotation, CacheConfig, EntityExtractor, ExtractionResponse, ExtractorKey,
    FetchStrategy, Middleware, MiddlewareLayer, MiddlewareStack, NormalizerConfig, QuotaConfig,
    QuotaState, RawEntity, RazorConfig, RenderOptions, Segment, Span, SpanMetadata, Suggestion,
    TesseraConfig, TesseraError, normalize_entities, render_segments, resolve_overlaps,
    segments_text, substitute_word,
};
