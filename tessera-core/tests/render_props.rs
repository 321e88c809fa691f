use proptest::prelude::*;
use tessera_core::{
    NormalizerConfig, RawEntity, RenderOptions, Segment, Span, normalize_entities,
    render_segments, resolve_overlaps, segments_text,
};

fn arb_text() -> impl Strategy<Value = String> {
    // Mix of ASCII and multi-byte characters so char and byte offsets diverge
    proptest::collection::vec(
        prop_oneof![Just('a'), Just('Z'), Just(' '), Just('é'), Just('京'), Just('.')],
        0..60,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn arb_text_and_spans() -> impl Strategy<Value = (String, Vec<Span>)> {
    arb_text().prop_flat_map(|text| {
        let n = text.chars().count();
        let spans = proptest::collection::vec((0..=n, 0..=n), 0..12);
        (Just(text), spans).prop_map(|(text, intervals)| {
            let chars: Vec<char> = text.chars().collect();
            let spans = intervals
                .into_iter()
                .filter(|(s, e)| s < e)
                .map(|(s, e)| {
                    let t: String = chars[s..e].iter().collect();
                    Span::new(t, s, e, 0.5)
                })
                .collect();
            (text, spans)
        })
    })
}

fn arb_text_and_raw() -> impl Strategy<Value = (String, Vec<RawEntity>)> {
    arb_text().prop_flat_map(|text| {
        let n = i64::try_from(text.chars().count()).unwrap_or(i64::MAX);
        // Matched text is drawn independently, so most records disagree with their offsets
        let raw = proptest::collection::vec((arb_text(), -2..=n + 2, -2..=n + 2), 0..12);
        (Just(text), raw).prop_map(|(text, records)| {
            let entities = records
                .into_iter()
                .map(|(t, s, e)| RawEntity::new(t, s, e))
                .collect();
            (text, entities)
        })
    })
}

proptest! {
    #[test]
    fn normalized_raw_records_render_back_to_input((text, raw) in arb_text_and_raw()) {
        let n = normalize_entities(raw, &text, &NormalizerConfig::default());
        let resolved = resolve_overlaps(n.spans);
        let segs = render_segments(&text, &resolved, &RenderOptions::default());
        prop_assert_eq!(segments_text(&segs), text);
    }

    #[test]
    fn concatenation_reproduces_input((text, spans) in arb_text_and_spans()) {
        let resolved = resolve_overlaps(spans);
        let segs = render_segments(&text, &resolved, &RenderOptions::default());
        prop_assert_eq!(segments_text(&segs), text);
    }

    #[test]
    fn annotated_spans_disjoint_and_increasing((text, spans) in arb_text_and_spans()) {
        let resolved = resolve_overlaps(spans);
        let segs = render_segments(&text, &resolved, &RenderOptions::default());
        let annotated: Vec<&Span> = segs.iter().filter_map(Segment::span).collect();
        for pair in annotated.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
            prop_assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn no_empty_plain_segments((text, spans) in arb_text_and_spans()) {
        prop_assume!(!text.is_empty());
        let resolved = resolve_overlaps(spans);
        let segs = render_segments(&text, &resolved, &RenderOptions::default());
        for seg in &segs {
            if let Segment::Plain { text } = seg {
                prop_assert!(!text.is_empty());
            }
        }
    }

    #[test]
    fn every_rejected_span_overlaps_a_wider_or_equal_accepted_one((_text, spans) in arb_text_and_spans()) {
        let resolved = resolve_overlaps(spans.clone());
        for s in &spans {
            if resolved.iter().any(|r| r.key() == s.key()) {
                continue;
            }
            prop_assert!(resolved.iter().any(|r| r.overlaps(s) && r.width() >= s.width()));
        }
    }

    #[test]
    fn rendering_with_stale_spans_never_panics(text in arb_text(), (_orig, spans) in arb_text_and_spans()) {
        let resolved = resolve_overlaps(spans);
        let _ = render_segments(&text, &resolved, &RenderOptions::default());
    }
}

#[test]
fn no_spans_renders_whole_text_as_plain() {
    let segs = render_segments("New York Times", &[], &RenderOptions::default());
    assert_eq!(
        segs,
        vec![Segment::Plain {
            text: "New York Times".into()
        }]
    );
}

#[test]
fn empty_text_without_spans_is_single_empty_plain() {
    let segs = render_segments("", &[], &RenderOptions::default());
    assert_eq!(segs, vec![Segment::Plain { text: String::new() }]);
}

#[test]
fn longest_match_wins_new_york() {
    let resolved = resolve_overlaps(vec![
        Span::new("New", 0, 3, 0.9),
        Span::new("New York", 0, 8, 0.4),
    ]);
    let segs = render_segments("New York Times", &resolved, &RenderOptions::default());
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].span().map(|s| s.text.as_str()), Some("New York"));
    assert_eq!(segs[1], Segment::Plain { text: " Times".into() });
}

#[test]
fn identical_intervals_keep_first_by_priority() {
    let resolved = resolve_overlaps(vec![
        Span::new("Times", 9, 14, 0.2),
        Span::new("Times", 9, 14, 0.9),
    ]);
    assert_eq!(resolved.len(), 1);
    assert!((resolved[0].score - 0.2).abs() < f64::EPSILON);
}

#[test]
fn adjacent_spans_both_kept() {
    let resolved = resolve_overlaps(vec![
        Span::new("New York", 0, 8, 0.5),
        Span::new(" Times", 8, 14, 0.5),
    ]);
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].start, 0);
    assert_eq!(resolved[1].start, 8);
}

#[test]
fn paris_france_segments() {
    let text = "Paris is the capital of France.";
    let spans = resolve_overlaps(vec![
        Span::new("France", 24, 30, 0.8),
        Span::new("Paris", 0, 5, 0.9),
    ]);
    let segs = render_segments(text, &spans, &RenderOptions::default());
    let shape: Vec<(bool, &str)> = segs.iter().map(|s| (s.is_annotated(), s.text())).collect();
    assert_eq!(
        shape,
        vec![
            (true, "Paris"),
            (false, " is the capital of "),
            (true, "France"),
            (false, "."),
        ]
    );
}
