use tessera_core::{ExtractionResponse, RawEntity};

pub const PARIS: &str = "Paris is the capital of France.";
pub const NYT: &str = "New York Times";
pub const ZURICH: &str = "On Monday, Apple opened a store in Zürich.";

pub fn by_text(text: &str) -> Option<ExtractionResponse> {
    match text {
        PARIS => Some(ExtractionResponse::new(vec![
            RawEntity::new("Paris", 0, 5)
                .relevance(0.9)
                .confidence(4.1)
                .synonyms(["City of Light"])
                .entity_id("Paris")
                .with_type("Place")
                .with_type("City")
                .wiki_link("http://en.wikipedia.org/wiki/Paris")
                .wikidata_id("Q90"),
            RawEntity::new("France", 24, 30)
                .relevance(0.8)
                .entity_id("France")
                .with_type("Place")
                .with_type("Country")
                .wiki_link("http://en.wikipedia.org/wiki/France")
                .wikidata_id("Q142"),
        ])),
        NYT => Some(ExtractionResponse::new(vec![
            RawEntity::new("New", 0, 3).relevance(0.2),
            RawEntity::new("New York", 0, 8)
                .relevance(0.6)
                .synonyms(["NYC", "Big Apple"])
                .entity_id("New York City")
                .wiki_link("http://en.wikipedia.org/wiki/New_York_City")
                .wikidata_id("Q60"),
            RawEntity::new("Times", 9, 14).confidence(0.4),
        ])),
        ZURICH => Some(ExtractionResponse::new(vec![
            RawEntity::new("Monday", 3, 9).with_type("Date"),
            RawEntity::new("Apple", 11, 16)
                .confidence(0.6)
                .synonyms(["Apple Inc."])
                .entity_id("Apple Inc.")
                .with_type("Organisation")
                .wiki_link("http://en.wikipedia.org/wiki/Apple_Inc.")
                .wikidata_id("Q312"),
            RawEntity::new("Apple", 11, 16).relevance(0.1),
            RawEntity {
                matched_text: Some("store".into()),
                start: Some(26),
                ..RawEntity::default()
            },
            RawEntity::new("Zürich", 35, 41)
                .with_type("Place")
                .wiki_link("http://en.wikipedia.org/wiki/Z%C3%BCrich")
                .wikidata_id("Q72"),
        ])),
        _ => None,
    }
}
