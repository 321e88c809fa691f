//! Serializable description of an extractor's middleware onion.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One wrapper around an extractor: its name and the JSON form of its settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareLayer {
    /// Layer name, e.g. `CachingExtractor` or `QuotaAwareExtractor`.
    pub name: String,
    /// Layer settings. Unknown keys are ignored when a stack is rebuilt.
    pub config: Value,
}

impl MiddlewareLayer {
    /// Describe a layer.
    #[must_use]
    pub fn new(name: impl Into<String>, config: Value) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Layers from the outside in: `layers[0]` sees a call first and the last
/// entry is the raw extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareStack {
    /// Layers, outermost first.
    pub layers: Vec<MiddlewareLayer>,
}

impl MiddlewareStack {
    /// Empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append `layer` beneath every existing layer.
    pub fn push_inner(&mut self, layer: MiddlewareLayer) {
        self.layers.push(layer);
    }

    /// Layer names, outermost first.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    /// First layer called `name`, if present.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&MiddlewareLayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}

impl fmt::Display for MiddlewareStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(" -> "))
    }
}
