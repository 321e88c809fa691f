use async_trait::async_trait;

use crate::{ExtractionResponse, TesseraError};
pub use tessera_types::ExtractorKey;

/// Main trait implemented by extraction-service crates.
///
/// An extractor turns free-form text into a list of raw entity records. It is
/// consumed as an opaque collaborator: the engine never interprets why a call
/// failed, only whether it produced records.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    /// A stable identifier (e.g., "tessera-textrazor", "tessera-mock").
    fn name(&self) -> &'static str;

    /// Canonical extractor key constructed from the static name.
    fn key(&self) -> ExtractorKey {
        ExtractorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Extract entity records from `text`.
    ///
    /// Offsets in the returned records are character offsets into `text`.
    async fn extract(&self, text: &str) -> Result<ExtractionResponse, TesseraError>;
}
