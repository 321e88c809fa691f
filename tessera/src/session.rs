//! Per-analysis session state machine.
//!
//! A session is `Idle` until its first successful analysis and `Analyzed`
//! afterwards. Every `analyze` call replaces the analyzed state wholesale;
//! `apply_suggestion` edits the buffer and re-renders the spans that were
//! fixed at analysis time.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tessera_core::{
    AnalysisReport, ExtractorKey, Segment, Span, TesseraError, render_segments, substitute_word,
};

use crate::core::Tessera;

struct Snapshot {
    seq: u64,
    extractor: ExtractorKey,
    buffer: String,
    spans: Vec<Span>,
    replaced: BTreeSet<String>,
}

enum SessionState {
    Idle,
    Analyzed(Snapshot),
}

/// Holds the current text buffer, the span set and the replaced-word set.
///
/// Each `analyze` call takes a sequence number when it starts. A response is
/// installed only if no analysis with a higher number has landed in the
/// meantime; a stale response is discarded and reported as `Superseded`.
pub struct AnalysisSession {
    tessera: Tessera,
    next_seq: AtomicU64,
    state: Mutex<SessionState>,
}

impl AnalysisSession {
    pub(crate) fn new(tessera: Tessera) -> Self {
        Self {
            tessera,
            next_seq: AtomicU64::new(0),
            state: Mutex::new(SessionState::Idle),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // State is replaced atomically under the lock; a poisoned guard is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Analyze `text` and return its rendered segments.
    ///
    /// # Errors
    /// See [`analyze_report`](Self::analyze_report).
    pub async fn analyze(&self, text: &str) -> Result<Vec<Segment>, TesseraError> {
        self.analyze_report(text).await.map(|r| r.segments)
    }

    /// Analyze `text`, replacing any previous session state, and return the
    /// full report.
    ///
    /// On success the buffer becomes `text`, the span set becomes the resolved
    /// extraction, and the replaced-word set is cleared.
    ///
    /// # Errors
    /// - Extraction failures are returned unchanged; the previous state is kept.
    /// - `Superseded` when a newer analysis landed while this one was pending.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tessera::session::analyze",
            skip(self, text),
            fields(chars = text.chars().count()),
        )
    )]
    pub async fn analyze_report(&self, text: &str) -> Result<AnalysisReport, TesseraError> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let annotation = self.tessera.annotate(text).await?;

        let mut state = self.state();
        if let SessionState::Analyzed(current) = &*state
            && current.seq > seq
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(seq, landed = current.seq, "discarding superseded analysis");
            return Err(TesseraError::Superseded {
                seq,
                landed: current.seq,
            });
        }

        let segments = render_segments(text, &annotation.spans, &self.tessera.cfg.render);
        *state = SessionState::Analyzed(Snapshot {
            seq,
            extractor: annotation.extractor,
            buffer: text.to_string(),
            spans: annotation.spans,
            replaced: BTreeSet::new(),
        });
        drop(state);

        Ok(AnalysisReport {
            seq,
            extractor: annotation.extractor.to_string(),
            segments,
            keywords: annotation.keywords,
            warnings: annotation.warnings,
        })
    }

    /// Replace every whole-word occurrence of `old` with `new` in the buffer
    /// and re-render the analyzed spans over the edited buffer.
    ///
    /// A word that was already substituted in this session is left alone and
    /// the current rendering is returned unchanged. Span offsets are not
    /// recomputed: after a length-changing edit, spans following the edit
    /// point at their original character positions in the new buffer.
    ///
    /// # Errors
    /// - `InvalidState` before any successful analysis.
    /// - `MalformedSubstitution` when `old` is blank; no state changes.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "tessera::session::apply_suggestion", skip(self))
    )]
    pub fn apply_suggestion(&self, old: &str, new: &str) -> Result<Vec<Segment>, TesseraError> {
        let mut state = self.state();
        let SessionState::Analyzed(snap) = &mut *state else {
            return Err(TesseraError::InvalidState(
                "apply_suggestion called before a successful analyze".into(),
            ));
        };

        let sub = substitute_word(&snap.buffer, old, new, &snap.replaced)?;
        if sub.applied {
            #[cfg(feature = "tracing")]
            tracing::debug!(occurrences = sub.occurrences, "substitution applied");
            snap.buffer = sub.buffer;
            snap.replaced = sub.replaced;
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(word = old.trim(), "word already substituted; no-op");
        }
        Ok(render_segments(
            &snap.buffer,
            &snap.spans,
            &self.tessera.cfg.render,
        ))
    }

    /// The current, possibly edited, text. Empty while idle.
    #[must_use]
    pub fn current_buffer(&self) -> String {
        match &*self.state() {
            SessionState::Idle => String::new(),
            SessionState::Analyzed(s) => s.buffer.clone(),
        }
    }

    /// Words substituted so far in this session, in lexical order.
    #[must_use]
    pub fn replaced_words(&self) -> Vec<String> {
        match &*self.state() {
            SessionState::Idle => Vec::new(),
            SessionState::Analyzed(s) => s.replaced.iter().cloned().collect(),
        }
    }

    /// Resolved spans fixed at analysis time.
    #[must_use]
    pub fn spans(&self) -> Vec<Span> {
        match &*self.state() {
            SessionState::Idle => Vec::new(),
            SessionState::Analyzed(s) => s.spans.clone(),
        }
    }

    /// Re-render the current buffer without changing any state.
    ///
    /// # Errors
    /// `InvalidState` before any successful analysis.
    pub fn render(&self) -> Result<Vec<Segment>, TesseraError> {
        match &*self.state() {
            SessionState::Idle => Err(TesseraError::InvalidState(
                "render called before a successful analyze".into(),
            )),
            SessionState::Analyzed(s) => Ok(render_segments(
                &s.buffer,
                &s.spans,
                &self.tessera.cfg.render,
            )),
        }
    }

    /// True once an analysis has been installed.
    #[must_use]
    pub fn is_analyzed(&self) -> bool {
        matches!(&*self.state(), SessionState::Analyzed(_))
    }

    /// Extractor that produced the installed analysis.
    #[must_use]
    pub fn extractor(&self) -> Option<ExtractorKey> {
        match &*self.state() {
            SessionState::Idle => None,
            SessionState::Analyzed(s) => Some(s.extractor),
        }
    }
}
