use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tessera workspace.
///
/// Covers collaborator (extractor) failures, per-record data problems,
/// session state violations, malformed substitution requests and the
/// configuration errors raised by builders and live extractors.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TesseraError {
    /// An individual extractor call failed.
    #[error("{extractor} failed: {msg}")]
    Extraction {
        /// Extractor name that failed.
        extractor: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual extractor call exceeded the configured timeout.
    #[error("extractor timed out: {extractor}")]
    ExtractorTimeout {
        /// Extractor name that timed out.
        extractor: String,
    },

    /// All registered extractors failed; contains the individual failures.
    #[error("all extractors failed: {0:?}")]
    AllExtractorsFailed(Vec<TesseraError>),

    /// Every attempted extractor timed out.
    #[error("all extractors timed out")]
    AllExtractorsTimedOut,

    /// The extractor payload could not be interpreted.
    #[error("data issue: {0}")]
    Data(String),

    /// A single raw entity record was unusable and has been dropped.
    #[error("malformed entity #{index}: {reason}")]
    MalformedEntity {
        /// Position of the record in the extractor's entity list.
        index: usize,
        /// Why the record was rejected.
        reason: String,
    },

    /// The operation is not valid in the session's current state.
    #[error("invalid session state: {0}")]
    InvalidState(String),

    /// The substitution request was rejected before touching session state.
    #[error("malformed substitution request: {0}")]
    MalformedSubstitution(String),

    /// A newer analysis landed before this one resolved; its result was discarded.
    #[error("analysis #{seq} superseded by #{landed}")]
    Superseded {
        /// Sequence number of the discarded request.
        seq: u64,
        /// Sequence number of the analysis currently installed.
        landed: u64,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Missing or invalid configuration for a live extractor (credentials, endpoint).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request exceeds the configured quota budget for the current window.
    #[error("quota exceeded: remaining={remaining} reset_in_ms={reset_in_ms}")]
    QuotaExceeded {
        /// Remaining units at the time of rejection.
        remaining: u64,
        /// Milliseconds until the quota window resets.
        reset_in_ms: u64,
    },
}

impl TesseraError {
    /// Helper: build an `Extraction` error with the extractor name and message.
    pub fn extraction(extractor: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Extraction {
            extractor: extractor.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `ExtractorTimeout` error.
    pub fn timeout(extractor: impl Into<String>) -> Self {
        Self::ExtractorTimeout {
            extractor: extractor.into(),
        }
    }

    /// Helper: build a `MalformedEntity` warning.
    pub fn malformed_entity(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedEntity {
            index,
            reason: reason.into(),
        }
    }

    /// Returns true if this error means the collaborator call failed as a whole.
    ///
    /// These are the failures `analyze` reports upward; the session keeps its
    /// previous state when it sees one.
    #[must_use]
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            Self::Extraction { .. }
                | Self::ExtractorTimeout { .. }
                | Self::AllExtractorsFailed(_)
                | Self::AllExtractorsTimedOut
                | Self::Data(_)
                | Self::Config(_)
                | Self::QuotaExceeded { .. }
        )
    }

    /// Flatten nested `AllExtractorsFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllExtractorsFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

impl From<serde_json::Error> for TesseraError {
    fn from(e: serde_json::Error) -> Self {
        Self::Data(e.to_string())
    }
}
