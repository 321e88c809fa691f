#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tessera::{ExtractionResponse, RawEntity, Segment, Tessera};
use tessera_mock::{DynamicMockController, DynamicMockExtractor, MockExtractor};

/// Orchestrator over the fixture extractor with default configuration.
pub fn fixture_tessera() -> Tessera {
    Tessera::builder()
        .with_extractor(Arc::new(MockExtractor::new()))
        .build()
        .expect("one extractor registered")
}

/// Orchestrator over a single dynamic mock, plus its controller.
pub fn dynamic_tessera(name: &'static str) -> (Tessera, DynamicMockController) {
    let (mock, controller) = DynamicMockExtractor::new_with_controller(name);
    let tessera = Tessera::builder()
        .with_extractor(mock)
        .extractor_timeout(Duration::from_secs(1))
        .build()
        .expect("one extractor registered");
    (tessera, controller)
}

/// A response with one entity per `(text, start, end)` triple.
pub fn response(entities: &[(&str, i64, i64)]) -> ExtractionResponse {
    ExtractionResponse::new(
        entities
            .iter()
            .map(|(t, s, e)| RawEntity::new(*t, *s, *e))
            .collect(),
    )
}

/// `(is_annotated, display text)` per segment, for compact assertions.
pub fn shape(segments: &[Segment]) -> Vec<(bool, String)> {
    segments
        .iter()
        .map(|s| (s.is_annotated(), s.text().to_string()))
        .collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
