//! Raw entity records as delivered by an extraction service.
//!
//! Records arrive as untyped key-value data. Deserialization is lenient: a
//! field with an unexpected JSON type is treated as absent rather than failing
//! the whole payload, so that normalization can drop the single bad record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw entity record. Every field is optional at this boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    /// Matched surface text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_text: Option<String>,
    /// Start character offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Exclusive end character offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Relevance score, preferred when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
    /// Confidence score, used when relevance is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    /// Synonyms offered by the service.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    /// Canonical identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Semantic types (`type` on the wire; a string or a list).
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Wikipedia link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_link: Option<String>,
    /// Wikidata identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikidata_id: Option<String>,
    /// Unrecognized fields, passed through as span metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawEntity {
    /// Start a record with the three required fields.
    pub fn new(matched_text: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            matched_text: Some(matched_text.into()),
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Set the relevance score.
    #[must_use]
    pub const fn relevance(mut self, score: f64) -> Self {
        self.relevance_score = Some(score);
        self
    }

    /// Set the confidence score.
    #[must_use]
    pub const fn confidence(mut self, score: f64) -> Self {
        self.confidence_score = Some(score);
        self
    }

    /// Set the synonym list.
    #[must_use]
    pub fn synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    /// Set the canonical identifier.
    #[must_use]
    pub fn entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Append a semantic type.
    #[must_use]
    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.types.push(ty.into());
        self
    }

    /// Set the Wikipedia link.
    #[must_use]
    pub fn wiki_link(mut self, link: impl Into<String>) -> Self {
        self.wiki_link = Some(link.into());
        self
    }

    /// Set the Wikidata identifier.
    #[must_use]
    pub fn wikidata_id(mut self, id: impl Into<String>) -> Self {
        self.wikidata_id = Some(id.into());
        self
    }

    /// True when any type marks the record as a date or time expression.
    #[must_use]
    pub fn is_temporal(&self) -> bool {
        self.types
            .iter()
            .any(|t| t.contains("Date") || t.contains("Time"))
    }
}

/// Remove every alias in `keys`, in order, so none of them leaks into `extra`.
fn take_all(map: &mut Map<String, Value>, keys: &[&str]) -> Vec<Value> {
    keys.iter().filter_map(|k| map.remove(*k)).collect()
}

fn take_str(map: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    take_all(map, keys).into_iter().find_map(|v| match v {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn take_i64(map: &mut Map<String, Value>, keys: &[&str]) -> Option<i64> {
    take_all(map, keys).into_iter().find_map(|v| v.as_i64())
}

fn take_f64(map: &mut Map<String, Value>, key: &str) -> Option<f64> {
    map.remove(key)
        .and_then(|v| v.as_f64())
        .filter(|f| f.is_finite())
}

fn take_strings(map: &mut Map<String, Value>, key: &str) -> Vec<String> {
    match map.remove(key) {
        Some(Value::String(s)) => vec![s],
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

impl From<Value> for RawEntity {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        Self {
            matched_text: take_str(&mut map, &["matchedText"]),
            start: take_i64(&mut map, &["start", "startingPos"]),
            end: take_i64(&mut map, &["end", "endingPos"]),
            relevance_score: take_f64(&mut map, "relevanceScore"),
            confidence_score: take_f64(&mut map, "confidenceScore"),
            synonyms: take_strings(&mut map, "synonyms"),
            entity_id: take_str(&mut map, &["entityId"]),
            types: take_strings(&mut map, "type"),
            wiki_link: take_str(&mut map, &["wikiLink", "wikipediaLink"]),
            wikidata_id: take_str(&mut map, &["wikidataId"]),
            extra: map,
        }
    }
}

/// The collaborator's answer for one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    /// Entity records in service order.
    #[serde(default)]
    pub entities: Vec<RawEntity>,
}

impl ExtractionResponse {
    /// Wrap a list of records.
    #[must_use]
    pub const fn new(entities: Vec<RawEntity>) -> Self {
        Self { entities }
    }

    /// Empty response (no entities found).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entities: Vec::new(),
        }
    }
}
