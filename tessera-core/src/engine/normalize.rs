use std::collections::HashSet;

use crate::engine::offsets::CharOffsets;
use crate::{NormalizerConfig, RawEntity, Span, SpanMetadata, Suggestion, TesseraError};

/// Output of [`normalize_entities`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Deduplicated spans in extractor order.
    pub spans: Vec<Span>,
    /// One `MalformedEntity` per dropped record.
    pub warnings: Vec<TesseraError>,
    /// Number of records dropped by the temporal filter.
    pub temporal: usize,
    /// Number of records dropped as duplicates of an earlier record.
    pub duplicates: usize,
}

/// Decoded title from the last path segment of a Wikipedia link.
///
/// `https://en.wikipedia.org/wiki/New_York_City` yields `New_York_City`.
/// Segments that are not valid percent-encoding are returned as-is.
#[must_use]
pub fn wiki_title(link: &str) -> String {
    let last = link.rsplit('/').next().unwrap_or(link);
    urlencoding::decode(last).map_or_else(|_| last.to_string(), |s| s.into_owned())
}

/// Convert raw entity records into deduplicated, scored spans.
///
/// `text` is the analyzed text. A record is malformed when its offsets fall
/// outside it or when its matched text differs from the characters at
/// `[start, end)`. Malformed records are dropped and reported in `warnings`,
/// never failing the batch. When
/// `cfg.exclude_temporal` is set, date/time records are removed before
/// deduplication. Deduplication keys on `(start, end, text)` and keeps the
/// first occurrence.
#[must_use]
pub fn normalize_entities(
    entities: Vec<RawEntity>,
    text: &str,
    cfg: &NormalizerConfig,
) -> Normalized {
    let offsets = CharOffsets::new(text);
    let mut out = Normalized::default();
    let mut seen: HashSet<(usize, usize, String)> = HashSet::new();

    for (index, raw) in entities.into_iter().enumerate() {
        let (text, start, end) = match validate(&raw, &offsets) {
            Ok(v) => v,
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(index, reason, "dropping malformed entity");
                out.warnings
                    .push(TesseraError::malformed_entity(index, reason));
                continue;
            }
        };
        if cfg.exclude_temporal && raw.is_temporal() {
            out.temporal += 1;
            continue;
        }
        if !seen.insert((start, end, text.clone())) {
            out.duplicates += 1;
            continue;
        }
        out.spans.push(build_span(raw, text, start, end, cfg));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        spans = out.spans.len(),
        malformed = out.warnings.len(),
        temporal = out.temporal,
        duplicates = out.duplicates,
        "normalized entities"
    );
    out
}

fn validate(
    raw: &RawEntity,
    offsets: &CharOffsets<'_>,
) -> Result<(String, usize, usize), &'static str> {
    let text = match raw.matched_text.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => return Err("missing matched text"),
    };
    let (Some(start), Some(end)) = (raw.start, raw.end) else {
        return Err("missing start/end offsets");
    };
    let start = usize::try_from(start).map_err(|_| "negative start offset")?;
    let end = usize::try_from(end).map_err(|_| "negative end offset")?;
    if start >= end {
        return Err("empty or inverted interval");
    }
    if end > offsets.len() {
        return Err("end offset past end of text");
    }
    if offsets.slice(start, end) != text {
        return Err("matched text does not match offsets");
    }
    Ok((text.to_string(), start, end))
}

fn build_span(raw: RawEntity, text: String, start: usize, end: usize, cfg: &NormalizerConfig) -> Span {
    let score = raw
        .relevance_score
        .or(raw.confidence_score)
        .unwrap_or(Span::DEFAULT_SCORE)
        .clamp(0.0, 1.0);

    let wiki = if cfg.wiki_title_suggestions {
        raw.wiki_link.as_deref().map(wiki_title)
    } else {
        None
    };
    let candidates = std::iter::once(text.clone())
        .chain(raw.synonyms)
        .chain(wiki)
        .chain(raw.entity_id.clone());

    let mut suggestions: Vec<Suggestion> = Vec::new();
    for candidate in candidates {
        if candidate.trim().is_empty() || suggestions.iter().any(|s| s.text == candidate) {
            continue;
        }
        suggestions.push(Suggestion::new(candidate));
    }

    Span {
        text,
        start,
        end,
        score,
        suggestions,
        metadata: SpanMetadata {
            entity_id: raw.entity_id,
            wiki_link: raw.wiki_link,
            wikidata_id: raw.wikidata_id,
            types: raw.types,
            extra: raw.extra,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiki_title_decodes_last_segment() {
        assert_eq!(
            wiki_title("http://en.wikipedia.org/wiki/S%C3%A3o_Paulo"),
            "São_Paulo"
        );
        assert_eq!(wiki_title("Paris"), "Paris");
        assert_eq!(wiki_title("https://en.wikipedia.org/wiki/"), "");
    }

    #[test]
    fn confidence_used_when_relevance_absent() {
        let n = normalize_entities(
            vec![RawEntity::new("Paris", 0, 5).confidence(0.7)],
            "Paris",
            &NormalizerConfig::default(),
        );
        assert!((n.spans[0].score - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_relevance_is_kept() {
        let n = normalize_entities(
            vec![RawEntity::new("Paris", 0, 5).relevance(0.0).confidence(0.9)],
            "Paris",
            &NormalizerConfig::default(),
        );
        assert!(n.spans[0].score.abs() < f64::EPSILON);
    }
}
