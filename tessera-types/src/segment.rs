use serde::{Deserialize, Serialize};

use crate::span::{Span, Suggestion};

/// A piece of the rendered view: plain text or an annotated span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Unannotated text copied from the rendered buffer.
    Plain {
        /// The copied text.
        text: String,
    },
    /// A span together with the suggestions offered for it.
    Annotated {
        /// The resolved span.
        span: Span,
        /// Suggestions after applying the render options.
        suggestions: Vec<Suggestion>,
    },
}

impl Segment {
    /// Display text: the plain text, or the span's matched text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain { text } => text,
            Self::Annotated { span, .. } => &span.text,
        }
    }

    /// The annotated span, if any.
    #[must_use]
    pub const fn span(&self) -> Option<&Span> {
        match self {
            Self::Plain { .. } => None,
            Self::Annotated { span, .. } => Some(span),
        }
    }

    /// True for `Annotated` segments.
    #[must_use]
    pub const fn is_annotated(&self) -> bool {
        matches!(self, Self::Annotated { .. })
    }
}

/// Concatenate the display text of every segment.
#[must_use]
pub fn segments_text(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}
