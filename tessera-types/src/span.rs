//! Scored, positioned matches and their replacement suggestions.

use serde::{Deserialize, Serialize};

/// One candidate replacement string for a span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    /// Replacement text, non-empty after trimming.
    pub text: String,
}

impl Suggestion {
    /// Construct a suggestion from any string-like value.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Auxiliary fields carried through from the extraction service untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanMetadata {
    /// Canonical identifier assigned by the extractor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Link to the entity's Wikipedia article.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_link: Option<String>,
    /// Wikidata item identifier (e.g. `Q90`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikidata_id: Option<String>,
    /// Semantic types reported by the extractor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Any other fields present on the raw record.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A scored, positioned match within the analyzed text.
///
/// `start` and `end` are half-open character offsets (Unicode scalar values)
/// into the text that was analyzed; `0 <= start < end <= chars(text)` holds
/// for every span produced by normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The matched surface form.
    pub text: String,
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
    /// Relevance in `[0, 1]`.
    pub score: f64,
    /// Deduplicated replacement candidates in first-seen order.
    pub suggestions: Vec<Suggestion>,
    /// Pass-through extractor fields.
    #[serde(default)]
    pub metadata: SpanMetadata,
}

impl Span {
    /// Score assigned when the extractor reports neither relevance nor confidence.
    pub const DEFAULT_SCORE: f64 = 0.5;

    /// Build a span with only its identity suggestion and default metadata.
    pub fn new(text: impl Into<String>, start: usize, end: usize, score: f64) -> Self {
        let text = text.into();
        Self {
            suggestions: vec![Suggestion::new(text.clone())],
            text,
            start,
            end,
            score,
            metadata: SpanMetadata::default(),
        }
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the half-open intervals of `self` and `other` intersect.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Identity key used for deduplication.
    #[must_use]
    pub fn key(&self) -> (usize, usize, &str) {
        (self.start, self.end, self.text.as_str())
    }
}
