use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tessera_core::{EntityExtractor, ExtractionResponse, TesseraError};

/// Instruction for how an extraction should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior {
    /// Return the provided response immediately.
    Return(ExtractionResponse),
    /// Fail immediately with the provided error.
    Fail(TesseraError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
    /// Wait, then return the provided response (simulate network latency).
    Delay(Duration, ExtractionResponse),
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior>,
    fallback: Option<MockBehavior>,
    requests: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `extract` calls on exactly `text`.
    pub async fn set_behavior(&self, text: impl Into<String>, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(text.into(), behavior);
    }

    /// Set the behavior for texts without a specific rule.
    pub async fn set_default_behavior(&self, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.fallback = Some(behavior);
    }

    /// Texts passed to `extract`, in call order.
    pub async fn requests(&self) -> Vec<String> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.fallback = None;
        guard.requests.clear();
    }
}

/// An extractor that defers all behavior to an external controller.
pub struct DynamicMockExtractor {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockExtractor {
    /// Create a new dynamic mock extractor and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn EntityExtractor>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn EntityExtractor>, controller)
    }
}

#[async_trait]
impl EntityExtractor for DynamicMockExtractor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    async fn extract(&self, text: &str) -> Result<ExtractionResponse, TesseraError> {
        // Log and snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(text.to_string());
            guard
                .rules
                .get(text)
                .cloned()
                .or_else(|| guard.fallback.clone())
        };

        match behavior {
            Some(MockBehavior::Return(resp)) => Ok(resp),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            Some(MockBehavior::Delay(wait, resp)) => {
                tokio::time::sleep(wait).await;
                Ok(resp)
            }
            None => Err(TesseraError::extraction(
                self.name,
                format!("no behavior configured for {text:?}"),
            )),
        }
    }
}
