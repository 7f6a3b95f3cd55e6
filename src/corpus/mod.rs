//! Interfaces to the corpus-query engine the validator talks to.
//!
//! The validator never opens corpora on its own; callers hand it a
//! [`CorpusHandle`] obtained from a [`CorpusProvider`]. [`snapshot`] provides
//! a file-backed implementation used by the CLI and the tests.

pub mod snapshot;

use std::path::PathBuf;

use thiserror::Error;

pub use snapshot::{CorpusSnapshot, SnapshotAttribute, SnapshotCorpus, SnapshotProvider, SnapshotStructure};

/// Failures reported by a corpus collaborator.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Corpus could not be opened.
    #[error("failed to open corpus {path}: {source}")]
    Open {
        /// Resolved location of the corpus.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Corpus data could not be decoded.
    #[error("failed to decode corpus {path}: {source}")]
    Snapshot {
        /// Resolved location of the corpus.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// Corpus data is internally inconsistent.
    #[error("invalid corpus data: {0}")]
    InvalidSnapshot(String),

    /// Requested attribute does not exist.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// Requested structure does not exist.
    #[error("unknown structure '{0}'")]
    UnknownStructure(String),

    /// Any other engine-specific failure.
    #[error("corpus engine error: {0}")]
    Engine(String),
}

/// Opens corpora by identifier.
pub trait CorpusProvider {
    /// Handle type returned for an opened corpus.
    type Corpus: CorpusHandle;

    /// Resolve and open the corpus named `ident`.
    fn open_corpus(&self, ident: &str) -> Result<Self::Corpus, CorpusError>;
}

/// An opened corpus.
pub trait CorpusHandle {
    /// Attribute handle type.
    type Attribute: AttributeHandle;
    /// Structure handle type.
    type Structure: StructureHandle;

    /// Identifier the corpus was opened with.
    fn name(&self) -> &str;

    /// Open a (structural) attribute such as `s.id`.
    fn attribute(&self, name: &str) -> Result<Self::Attribute, CorpusError>;

    /// Open a structure such as `doc`.
    fn structure(&self, name: &str) -> Result<Self::Structure, CorpusError>;

    /// Query the first position of structure `structure` number `index` and
    /// extract the `refs` reference for every match.
    ///
    /// Each returned string has the form `<refs>=<value>,#<token>`; the number
    /// of strings is the match count.
    fn boundary_refs(
        &self,
        structure: &str,
        index: usize,
        refs: &str,
    ) -> Result<Vec<String>, CorpusError>;
}

/// Lexicon of an attribute.
pub trait AttributeHandle {
    /// Sequence order of `value`, if present.
    fn str_to_id(&self, value: &str) -> Option<u32>;

    /// Value stored at sequence order `id`, if present.
    fn id_to_str(&self, id: u32) -> Option<String>;
}

/// A structure (e.g. documents, sentences).
pub trait StructureHandle {
    /// Number of structure instances.
    fn size(&self) -> usize;
}
