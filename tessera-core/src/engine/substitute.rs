use std::collections::BTreeSet;

use regex::Regex;

use crate::TesseraError;

/// Result of [`substitute_word`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The buffer after replacement.
    pub buffer: String,
    /// The replaced-word set after the call.
    pub replaced: BTreeSet<String>,
    /// Number of whole-word occurrences replaced.
    pub occurrences: usize,
    /// False when `old` had already been substituted and the call was a no-op.
    pub applied: bool,
}

/// True for characters that make up a word: alphanumerics and `_`.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replace every whole-word, case-sensitive occurrence of `old` in `buffer`
/// with `new`.
///
/// Both words are trimmed first. A word already present in `replaced` is not
/// substituted again: the call returns the inputs unchanged with
/// `applied == false`. Otherwise `old` joins the replaced set, even when no
/// occurrence was found or `old == new`.
///
/// # Errors
/// `MalformedSubstitution` when `old` is empty after trimming.
pub fn substitute_word(
    buffer: &str,
    old: &str,
    new: &str,
    replaced: &BTreeSet<String>,
) -> Result<Substitution, TesseraError> {
    let old = old.trim();
    let new = new.trim();
    if old.is_empty() {
        return Err(TesseraError::MalformedSubstitution(
            "old word is empty".into(),
        ));
    }
    if replaced.contains(old) {
        return Ok(Substitution {
            buffer: buffer.to_string(),
            replaced: replaced.clone(),
            occurrences: 0,
            applied: false,
        });
    }

    let pattern = Regex::new(&regex::escape(old))
        .map_err(|e| TesseraError::MalformedSubstitution(e.to_string()))?;

    let mut out = String::with_capacity(buffer.len());
    let mut copied = 0usize;
    let mut pos = 0usize;
    let mut occurrences = 0usize;
    while let Some(m) = pattern.find_at(buffer, pos) {
        let before = buffer[..m.start()].chars().next_back();
        let after = buffer[m.end()..].chars().next();
        if before.is_some_and(is_word_char) || after.is_some_and(is_word_char) {
            // Retry one character further; a match may start inside this one.
            pos = m.start() + buffer[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        out.push_str(&buffer[copied..m.start()]);
        out.push_str(new);
        copied = m.end();
        pos = m.end();
        occurrences += 1;
    }
    out.push_str(&buffer[copied..]);

    let mut replaced = replaced.clone();
    replaced.insert(old.to_string());
    Ok(Substitution {
        buffer: out,
        replaced,
        occurrences,
        applied: true,
    })
}
