use std::time::Duration;

use async_trait::async_trait;
use tessera_core::{EntityExtractor, ExtractionResponse, TesseraError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockExtractor, MockBehavior};
pub use fixtures::entities::{NYT, PARIS, ZURICH};

/// Mock extractor for CI-safe demos. Provides deterministic entities from static fixtures.
///
/// Texts without a fixture yield an empty response. The texts `"FAIL"` and
/// `"TIMEOUT"` simulate a failing and a slow extraction service.
pub struct MockExtractor;

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(text: &str) -> Result<(), TesseraError> {
        match text {
            "FAIL" => Err(TesseraError::extraction(
                "tessera-mock",
                "forced failure",
            )),
            "TIMEOUT" => {
                // Orchestrator may time out depending on config
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl EntityExtractor for MockExtractor {
    fn name(&self) -> &'static str {
        "tessera-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn extract(&self, text: &str) -> Result<ExtractionResponse, TesseraError> {
        Self::maybe_fail_or_timeout(text).await?;
        Ok(fixtures::entities::by_text(text).unwrap_or_else(ExtractionResponse::empty))
    }
}
