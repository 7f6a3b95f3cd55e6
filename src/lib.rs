//! # Sentence alignment index and diagnostics
//!
//! Tools for checking sentence-level alignments between two parallel corpora.
//! An alignment-definition ("aligndef") file maps spans of sentence positions
//! in corpus A to spans in corpus B, one record per line:
//!
//! ```text
//! 0,9     0,9
//! 10,19   10,25
//! -1      26
//! ```
//!
//! ## Components
//!
//! 1. **Interval index** ([`aligndef::AlignmentIndex`]): containment lookup of
//!    a corpus A position in O(log N).
//! 2. **Gap diagnostic** ([`diagnostics::scan_for_gaps`]): flags records whose
//!    span is wider than a threshold.
//! 3. **Order diagnostic** ([`diagnostics::order_violations`]): flags records
//!    overlapping ranges already covered.
//! 4. **Validation** ([`validation::Validator`]): resolves each structural
//!    boundary of corpus A through a [`corpus::CorpusHandle`] and reports the
//!    covering record.
//!
//! ## Usage Example
//!
//! ```
//! use aligncheck::aligndef::AlignmentIndex;
//! use aligncheck::diagnostics::{scan_for_gaps, GapConfig};
//!
//! let lines = ["0,9\t0,9", "10,19\t10,25", "-1\t26,26", "20,150\t26,40"];
//! let index = AlignmentIndex::build(lines)?;
//! assert_eq!(index.len(), 3);
//! assert!(index.lookup(15).is_some());
//!
//! let gaps: Vec<_> = scan_for_gaps(lines, GapConfig::default())
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(gaps[0].left_width, 130);
//! # Ok::<(), aligncheck::aligndef::AligndefError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod aligndef; // Records and the interval index
pub mod corpus; // Corpus collaborator interfaces
pub mod diagnostics; // Gap and order scans
pub mod validation; // Boundary validation

// Re-exports for convenience
pub use aligndef::{AligndefError, AlignmentIndex, AlignmentRecord, IndexedAlignment, Span};
pub use diagnostics::{scan_for_gaps, GapConfig, GapFinding};
pub use validation::{BoundaryReport, ValidationError, Validator, ValidatorConfig};
