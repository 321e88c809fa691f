/// Maps character offsets onto byte offsets of a borrowed text.
///
/// Offsets past the end clamp to the text length, so callers can slice with
/// stale offsets without panicking.
pub struct CharOffsets<'a> {
    text: &'a str,
    bounds: Vec<usize>,
}

impl<'a> CharOffsets<'a> {
    /// Index the character boundaries of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let bounds = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, bounds }
    }

    /// Number of characters in the text.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// True for the empty text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset of character `ch`, clamped to the end of the text.
    #[must_use]
    pub fn byte(&self, ch: usize) -> usize {
        self.bounds[ch.min(self.len())]
    }

    /// Text between character offsets `start` and `end` (clamped; empty when `end <= start`).
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let from = self.byte(start);
        let to = self.byte(end.max(start));
        &self.text[from..to]
    }
}
