use serde_json::json;
use tessera_core::{
    ExtractionResponse, NormalizerConfig, RawEntity, RenderOptions, Span, Suggestion,
    TesseraError, normalize_entities, render_segments, resolve_overlaps, segments_text,
};

const PARIS: &str = "Paris is the capital of France.";

fn texts(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.text.as_str()).collect()
}

#[test]
fn same_record_twice_yields_one_span() {
    let e = RawEntity::new("Paris", 0, 5).relevance(0.9);
    let n = normalize_entities(vec![e.clone(), e], PARIS, &NormalizerConfig::default());
    assert_eq!(n.spans.len(), 1);
    assert_eq!(n.duplicates, 1);
}

#[test]
fn first_duplicate_wins() {
    let n = normalize_entities(
        vec![
            RawEntity::new("Paris", 0, 5).relevance(0.9),
            RawEntity::new("Paris", 0, 5).relevance(0.1).synonyms(["Lutetia"]),
        ],
        "Paris",
        &NormalizerConfig::default(),
    );
    assert_eq!(n.spans.len(), 1);
    assert!((n.spans[0].score - 0.9).abs() < f64::EPSILON);
    assert_eq!(texts(&n.spans[0].suggestions), vec!["Paris"]);
}

#[test]
fn matched_text_must_equal_the_characters_at_its_offsets() {
    let n = normalize_entities(
        vec![
            RawEntity::new("paris", 0, 5),
            RawEntity::new("Franc", 24, 30),
            RawEntity::new("France", 24, 30),
        ],
        PARIS,
        &NormalizerConfig::default(),
    );
    assert_eq!(n.spans.len(), 1);
    assert_eq!(n.spans[0].text, "France");
    assert_eq!(
        n.warnings,
        vec![
            TesseraError::malformed_entity(0, "matched text does not match offsets"),
            TesseraError::malformed_entity(1, "matched text does not match offsets"),
        ]
    );

    let resolved = resolve_overlaps(n.spans);
    let segments = render_segments(PARIS, &resolved, &RenderOptions::default());
    assert_eq!(segments_text(&segments), PARIS);
}

#[test]
fn offsets_count_characters_not_bytes() {
    let text = "Zürich café";
    let n = normalize_entities(
        vec![RawEntity::new("Zürich", 0, 6), RawEntity::new("café", 7, 11)],
        text,
        &NormalizerConfig::default(),
    );
    assert!(n.warnings.is_empty());
    assert_eq!(n.spans.len(), 2);
}

#[test]
fn missing_scores_default_to_half() {
    let n = normalize_entities(
        vec![RawEntity::new("Paris", 0, 5)],
        "Paris",
        &NormalizerConfig::default(),
    );
    assert!((n.spans[0].score - Span::DEFAULT_SCORE).abs() < f64::EPSILON);
}

#[test]
fn relevance_preferred_over_confidence() {
    let n = normalize_entities(
        vec![RawEntity::new("Paris", 0, 5).relevance(0.3).confidence(0.9)],
        "Paris",
        &NormalizerConfig::default(),
    );
    assert!((n.spans[0].score - 0.3).abs() < f64::EPSILON);
}

#[test]
fn out_of_range_score_is_clamped() {
    let n = normalize_entities(
        vec![RawEntity::new("Paris", 0, 5).confidence(7.5)],
        "Paris",
        &NormalizerConfig::default(),
    );
    assert!((n.spans[0].score - 1.0).abs() < f64::EPSILON);
}

#[test]
fn suggestion_union_order_and_dedup() {
    let e = RawEntity::new("NYC", 0, 3)
        .synonyms(["New York", "  ", "NYC", "New York", ""])
        .wiki_link("https://en.wikipedia.org/wiki/New_York_City")
        .entity_id("New York");
    let n = normalize_entities(vec![e], "NYC", &NormalizerConfig::default());
    assert_eq!(
        texts(&n.spans[0].suggestions),
        vec!["NYC", "New York", "New_York_City"]
    );
}

#[test]
fn suggestion_dedup_is_case_sensitive() {
    let e = RawEntity::new("Paris", 0, 5).synonyms(["paris", "PARIS"]);
    let n = normalize_entities(vec![e], "Paris", &NormalizerConfig::default());
    assert_eq!(texts(&n.spans[0].suggestions), vec!["Paris", "paris", "PARIS"]);
}

#[test]
fn wiki_title_suggestion_can_be_disabled() {
    let cfg = NormalizerConfig {
        wiki_title_suggestions: false,
        ..NormalizerConfig::default()
    };
    let e = RawEntity::new("Paris", 0, 5)
        .wiki_link("http://en.wikipedia.org/wiki/Paris_(city)")
        .entity_id("Paris (city)");
    let n = normalize_entities(vec![e], "Paris", &cfg);
    assert_eq!(texts(&n.spans[0].suggestions), vec!["Paris", "Paris (city)"]);
    assert_eq!(
        n.spans[0].metadata.wiki_link.as_deref(),
        Some("http://en.wikipedia.org/wiki/Paris_(city)")
    );
}

#[test]
fn temporal_records_dropped_before_dedup() {
    let entities = vec![
        RawEntity::new("Monday", 0, 6).with_type("Date"),
        RawEntity::new("noon", 7, 11).with_type("TimeOfDay"),
        RawEntity::new("Paris", 12, 17).with_type("Place").with_type("City"),
    ];
    let n = normalize_entities(entities.clone(), "Monday noon Paris", &NormalizerConfig::default());
    assert_eq!(n.spans.len(), 1);
    assert_eq!(n.temporal, 2);
    assert_eq!(n.spans[0].metadata.types, vec!["Place", "City"]);

    let keep_all = NormalizerConfig {
        exclude_temporal: false,
        ..NormalizerConfig::default()
    };
    assert_eq!(normalize_entities(entities, "Monday noon Paris", &keep_all).spans.len(), 3);
}

#[test]
fn untyped_records_survive_temporal_filter() {
    let n = normalize_entities(
        vec![RawEntity::new("Paris", 0, 5)],
        "Paris",
        &NormalizerConfig::default(),
    );
    assert_eq!(n.spans.len(), 1);
}

#[test]
fn malformed_records_dropped_with_warnings() {
    let entities = vec![
        RawEntity::default(),
        RawEntity {
            matched_text: Some("Paris".into()),
            start: Some(0),
            ..RawEntity::default()
        },
        RawEntity::new("", 0, 5),
        RawEntity::new("Paris", -1, 4),
        RawEntity::new("Paris", 5, 5),
        RawEntity::new("Paris", 0, 99),
        RawEntity::new("France", 23, 29),
        RawEntity::new("France", 24, 30),
    ];
    let n = normalize_entities(entities, PARIS, &NormalizerConfig::default());
    assert_eq!(n.spans.len(), 1);
    assert_eq!(n.spans[0].text, "France");
    let indices: Vec<usize> = n
        .warnings
        .iter()
        .map(|w| match w {
            TesseraError::MalformedEntity { index, .. } => *index,
            other => panic!("unexpected warning {other:?}"),
        })
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn metadata_passes_through_untouched() {
    let payload = json!({
        "entities": [{
            "matchedText": "Paris",
            "startingPos": 0,
            "endingPos": 5,
            "entityId": "Paris",
            "wikiLink": "http://en.wikipedia.org/wiki/Paris",
            "wikidataId": "Q90",
            "type": ["Place", "City"],
            "freebaseId": "/m/05qtj",
            "id": 3
        }]
    });
    let resp: ExtractionResponse = serde_json::from_value(payload).unwrap();
    let n = normalize_entities(resp.entities, "Paris", &NormalizerConfig::default());
    let meta = &n.spans[0].metadata;
    assert_eq!(meta.wikidata_id.as_deref(), Some("Q90"));
    assert_eq!(meta.entity_id.as_deref(), Some("Paris"));
    assert_eq!(meta.extra.get("freebaseId"), Some(&json!("/m/05qtj")));
    assert_eq!(meta.extra.get("id"), Some(&json!(3)));
}
