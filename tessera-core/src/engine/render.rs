use crate::engine::offsets::CharOffsets;
use crate::{RenderOptions, Segment, Span, Suggestion};

/// Project `text` and its resolved `spans` into display segments.
///
/// `spans` must be non-overlapping and ascending by `start`, as produced by
/// [`resolve_overlaps`](crate::resolve_overlaps). The scan is a single left
/// to right pass: plain text between spans is copied from `text`, each span
/// is emitted as an `Annotated` segment displaying `span.text`.
///
/// Offsets are not required to be valid for `text`. When the buffer has been
/// edited since the spans were computed, offsets past the end are clamped
/// and spans starting before the cursor are skipped, so the call never panics.
/// For spans computed against `text` itself, concatenating the segments
/// reproduces `text` exactly.
#[must_use]
pub fn render_segments(text: &str, spans: &[Span], opts: &RenderOptions) -> Vec<Segment> {
    if spans.is_empty() {
        return vec![Segment::Plain {
            text: text.to_string(),
        }];
    }

    let offsets = CharOffsets::new(text);
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0usize;

    for span in spans {
        if span.start < cursor {
            continue;
        }
        if span.start > cursor {
            let plain = offsets.slice(cursor, span.start);
            if !plain.is_empty() {
                segments.push(Segment::Plain {
                    text: plain.to_string(),
                });
            }
        }
        segments.push(Segment::Annotated {
            span: span.clone(),
            suggestions: rendered_suggestions(span, opts),
        });
        cursor = span.end;
    }

    if cursor < offsets.len() {
        segments.push(Segment::Plain {
            text: offsets.slice(cursor, offsets.len()).to_string(),
        });
    }
    segments
}

fn rendered_suggestions(span: &Span, opts: &RenderOptions) -> Vec<Suggestion> {
    span.suggestions
        .iter()
        .filter(|s| !(opts.exclude_identity_suggestion && s.text == span.text))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments_text;

    #[test]
    fn identity_suggestion_filtered_only_in_view() {
        let mut span = Span::new("Paris", 0, 5, 0.9);
        span.suggestions.push(Suggestion::new("Lutetia"));
        let opts = RenderOptions {
            exclude_identity_suggestion: true,
        };
        let segs = render_segments("Paris", std::slice::from_ref(&span), &opts);
        match &segs[0] {
            Segment::Annotated { span: s, suggestions } => {
                assert_eq!(suggestions, &vec![Suggestion::new("Lutetia")]);
                assert_eq!(s.suggestions.len(), 2);
            }
            other => panic!("expected annotated, got {other:?}"),
        }
    }

    #[test]
    fn stale_offsets_past_end_do_not_panic() {
        let spans = vec![Span::new("France", 24, 30, 0.8)];
        let segs = render_segments("Paris.", &spans, &RenderOptions::default());
        assert_eq!(segments_text(&segs), "Paris.France");
    }
}
