use std::collections::BTreeMap;

use crate::Span;

/// Reduce `spans` to a non-overlapping subset, longest match first.
///
/// Spans are considered in descending width; ties keep their input order, so
/// of two spans with identical intervals the earlier one survives. A span is
/// accepted iff its half-open interval intersects no previously accepted
/// span. Zero-width spans are never accepted.
///
/// The result is sorted ascending by `start`. Accepted spans never share a
/// start, so no secondary key is needed.
#[must_use]
pub fn resolve_overlaps(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by(|a, b| b.width().cmp(&a.width()));

    let mut accepted: BTreeMap<usize, Span> = BTreeMap::new();
    for span in spans {
        if span.width() == 0 {
            continue;
        }
        // Only the accepted span starting closest before `span.end` can reach into it.
        let clashes = accepted
            .range(..span.end)
            .next_back()
            .is_some_and(|(_, prev)| prev.end > span.start);
        if !clashes {
            accepted.insert(span.start, span);
        }
    }
    accepted.into_values().collect()
}
