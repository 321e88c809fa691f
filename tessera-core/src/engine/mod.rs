/// Raw entity records to deduplicated, scored spans.
pub mod normalize;
/// Character-offset to byte-offset mapping.
pub mod offsets;
/// Segment projection of a text and its resolved spans.
pub mod render;
/// Longest-match-wins overlap elimination.
pub mod resolve;
/// Whole-word, single-shot word substitution.
pub mod substitute;
