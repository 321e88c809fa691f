use std::sync::Arc;

use tessera_core::{EntityExtractor, RazorConfig, TesseraError};

/// Set this variable to run the demos against the fixture extractor.
pub const USE_MOCK_VAR: &str = "TESSERA_DEMOS_USE_MOCK";

/// Return an extractor for demos.
///
/// Uses the fixture mock when `TESSERA_DEMOS_USE_MOCK` is set, otherwise a
/// rate-limited TextRazor connector configured from the environment.
///
/// # Errors
/// Returns `Config` when running live without `TEXTRAZOR_API_KEY`.
pub fn get_extractor() -> Result<Arc<dyn EntityExtractor>, TesseraError> {
    if std::env::var(USE_MOCK_VAR).is_ok() {
        println!("--- (Using Mock Extractor for CI) ---");
        Ok(Arc::new(tessera_mock::MockExtractor::new()))
    } else {
        let cfg = RazorConfig::from_env()?;
        Ok(tessera_textrazor::RazorConnector::rate_limited(&cfg)?.build())
    }
}

/// Print segments on one line, bracketing annotated spans with their suggestions.
pub fn print_segments(segments: &[tessera_core::Segment]) {
    let mut line = String::new();
    for seg in segments {
        match seg {
            tessera_core::Segment::Plain { text } => line.push_str(text),
            tessera_core::Segment::Annotated { span, suggestions } => {
                let alts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
                line.push_str(&format!("[{} | {}]", span.text, alts.join(", ")));
            }
        }
    }
    println!("{line}");
}
