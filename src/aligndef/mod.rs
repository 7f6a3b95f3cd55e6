//! Alignment-definition ("aligndef") records and the interval index built
//! over them.
//!
//! An aligndef source holds one record per line, `<left>\t<right>`, where each
//! side is `N`, `N,M` (inclusive) or `-1` for a sentence with no counterpart.

mod index;
mod record;

pub use index::{AligndefError, AlignmentIndex};
pub use record::{AlignmentRecord, IndexedAlignment, RecordError, Side, Span, UNALIGNED};
