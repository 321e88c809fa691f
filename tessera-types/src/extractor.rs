//! Extractor metadata types usable across crates.

/// Typed key for identifying extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtractorKey(pub &'static str);

impl ExtractorKey {
    /// Construct a new typed extractor key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<ExtractorKey> for &'static str {
    fn from(k: ExtractorKey) -> Self {
        k.0
    }
}

impl std::fmt::Display for ExtractorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
