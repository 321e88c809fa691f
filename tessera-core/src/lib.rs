//! tessera-core
//!
//! Core types, traits, and the annotation engine shared across the tessera
//! workspace.
//!
//! - `types`: re-exports of the shared data structures (spans, segments, raw entities).
//! - `extractor`: the `EntityExtractor` trait implemented by extraction services.
//! - `middleware`: the `Middleware` trait implemented by extractor wrappers.
//! - `engine`: the pure annotation pipeline.
//!
//! Engine pipeline
//! ---------------
//! ```text
//! raw entities ─ normalize_entities ─▶ spans ─ resolve_overlaps ─▶ resolved spans
//!                                                                       │
//! text buffer ────────────────────────────────── render_segments ◀──────┘
//!      ▲
//!      └── substitute_word (whole-word, once per old word)
//! ```
//!
//! Every engine function is synchronous and side-effect free; only the
//! extractor seam is async.
#![warn(missing_docs)]

/// Pure annotation and substitution functions.
pub mod engine;
/// The `EntityExtractor` collaborator trait.
pub mod extractor;
/// Middleware trait implemented by extractor wrappers.
pub mod middleware;
pub mod types;

pub use engine::normalize::{Normalized, normalize_entities, wiki_title};
pub use engine::offsets::CharOffsets;
pub use engine::render::render_segments;
pub use engine::resolve::resolve_overlaps;
pub use engine::substitute::{Substitution, is_word_char, substitute_word};
pub use extractor::EntityExtractor;
pub use middleware::Middleware;
pub use types::*;
