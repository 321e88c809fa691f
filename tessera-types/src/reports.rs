//! Report envelopes produced by the orchestrator and sessions.

use serde::{Deserialize, Serialize};

use crate::error::TesseraError;
use crate::extractor::ExtractorKey;
use crate::segment::Segment;
use crate::span::Span;

/// Result of running extraction, normalization and overlap resolution on a text.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Extractor whose response was used.
    pub extractor: ExtractorKey,
    /// Every normalized span, in extractor order, before overlap resolution.
    pub keywords: Vec<Span>,
    /// Non-overlapping spans in ascending `start` order.
    pub spans: Vec<Span>,
    /// Records dropped during normalization (`MalformedEntity`).
    pub warnings: Vec<TesseraError>,
}

/// Summary of one `analyze` call.
///
/// Carries the rendered `segments`, the full keyword table and any non-fatal
/// warnings encountered while normalizing the extractor's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Sequence number the session assigned to this analysis.
    pub seq: u64,
    /// Name of the extractor that produced the entities.
    pub extractor: String,
    /// Rendered view of the analyzed text.
    pub segments: Vec<Segment>,
    /// Normalized spans before overlap resolution.
    pub keywords: Vec<Span>,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<TesseraError>,
}
