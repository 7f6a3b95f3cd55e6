//! Boundary-by-boundary validation of an alignment index against corpus A.
//!
//! For each instance of a structure (documents by default) the validator asks
//! the corpus collaborator which sentence the instance starts in, converts the
//! sentence identifier to its sequence order and looks that order up in the
//! [`AlignmentIndex`](crate::aligndef::AlignmentIndex).

mod report;
mod validator;

use thiserror::Error;

use crate::corpus::CorpusError;

pub use report::{BoundaryOutcome, BoundaryReport, ValidationSummary};
pub use validator::{parse_reference, SentenceRef, Validator};

/// Structure validated when none is configured.
pub const DEFAULT_STRUCTURE: &str = "doc";
/// Sentence identifier attribute used when none is configured.
pub const DEFAULT_SENTENCE_ATTR: &str = "s.id";

/// Per-boundary validation failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The boundary query matched zero or several positions.
    #[error("<{structure} #{index}> not found ({matches} matches)")]
    BoundaryNotFound {
        /// Structure name.
        structure: String,
        /// Boundary number.
        index: usize,
        /// Number of matches reported by the corpus.
        matches: usize,
    },

    /// The corpus returned a reference that could not be parsed.
    #[error("malformed reference '{0}'")]
    MalformedReference(String),

    /// The sentence identifier is missing from the attribute lexicon.
    #[error("unknown sentence identifier '{0}'")]
    UnknownSentence(String),

    /// The corpus collaborator failed; fatal for a whole run.
    #[error(transparent)]
    Collaborator(#[from] CorpusError),
}

/// Settings for a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Structure whose boundaries are checked.
    pub structure: String,
    /// Structural attribute holding sentence identifiers.
    pub sentence_attr: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            structure: DEFAULT_STRUCTURE.to_string(),
            sentence_attr: DEFAULT_SENTENCE_ATTR.to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Validate boundaries of `structure` instead of documents.
    pub fn with_structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = structure.into();
        self
    }

    /// Read sentence identifiers from `attr`.
    pub fn with_sentence_attr(mut self, attr: impl Into<String>) -> Self {
        self.sentence_attr = attr.into();
        self
    }
}
