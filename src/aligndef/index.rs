use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use super::record::{AlignmentRecord, IndexedAlignment, RecordError};
use crate::diagnostics::{self, OrderViolation};

/// Errors raised while reading an aligndef source.
#[derive(Debug, Error)]
pub enum AligndefError {
    /// A line violated the aligndef grammar.
    #[error("malformed record on line {line}: {source}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Underlying parse failure.
        #[source]
        source: RecordError,
    },

    /// Reading the source failed.
    #[error("failed to read aligndef data: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordered, read-only collection of alignments anchored in corpus A.
///
/// Entries keep the order of the source. The source is expected to be sorted
/// by left position with no overlapping left ranges; this is not checked at
/// build time (see [`AlignmentIndex::order_violations`]). Lookups against a
/// source that breaks the precondition return unspecified results.
#[derive(Debug, Clone, Default)]
pub struct AlignmentIndex {
    entries: Vec<IndexedAlignment>,
}

impl AlignmentIndex {
    /// Build from raw aligndef lines.
    ///
    /// Blank lines are skipped, records with an unaligned left side are
    /// dropped, and the first malformed line aborts the build.
    pub fn build<I, S>(lines: I) -> Result<Self, AligndefError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        let mut dropped = 0usize;

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let record = AlignmentRecord::parse(line).map_err(|source| {
                AligndefError::Malformed {
                    line: idx + 1,
                    source,
                }
            })?;
            match record.anchored() {
                Some(entry) => entries.push(entry),
                None => {
                    debug!(line = idx + 1, "skipping record with unaligned left side");
                    dropped += 1;
                }
            }
        }

        info!(entries = entries.len(), dropped, "alignment index built");
        Ok(Self { entries })
    }

    /// Build from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, AligndefError> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Self::build(lines)
    }

    /// Build from an aligndef file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AligndefError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Construct directly from already anchored entries.
    pub fn from_entries(entries: Vec<IndexedAlignment>) -> Self {
        Self { entries }
    }

    /// Number of indexed alignments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no alignments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `idx` in source order.
    pub fn get(&self, idx: usize) -> Option<&IndexedAlignment> {
        self.entries.get(idx)
    }

    /// Iterate entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedAlignment> {
        self.entries.iter()
    }

    /// First corpus A position covered by the index.
    pub fn first_position(&self) -> Option<u32> {
        self.entries.first().map(|entry| entry.left.first)
    }

    /// Last corpus A position covered by the index.
    pub fn last_position(&self) -> Option<u32> {
        self.entries.last().map(|entry| entry.left.last)
    }

    /// Find the alignment whose left range contains `position`.
    pub fn lookup(&self, position: u32) -> Option<&IndexedAlignment> {
        self.locate(position).0.map(|idx| &self.entries[idx])
    }

    /// Records breaking the sorted, non-overlapping left-side precondition.
    ///
    /// `line` in each violation is the 1-based entry ordinal within the index.
    pub fn order_violations(&self) -> Vec<OrderViolation> {
        let records: Vec<AlignmentRecord> =
            self.entries.iter().copied().map(AlignmentRecord::from).collect();
        diagnostics::order_violations(&records)
            .into_iter()
            .filter(|violation| violation.side == super::Side::Left)
            .collect()
    }

    /// Containment search over `[lo, hi)`; returns the entry index and the
    /// number of window steps taken.
    fn locate(&self, position: u32) -> (Option<usize>, usize) {
        let mut lo = 0usize;
        let mut hi = self.entries.len();
        let mut steps = 0usize;

        while lo < hi {
            steps += 1;
            if position < self.entries[lo].left.first || position > self.entries[hi - 1].left.last
            {
                return (None, steps);
            }
            let mid = lo + (hi - lo) / 2;
            let span = self.entries[mid].left;
            if position < span.first {
                hi = mid;
            } else if position > span.last {
                // mid itself is excluded, so the window shrinks even when mid == lo
                lo = mid + 1;
            } else {
                return (Some(mid), steps);
            }
        }
        (None, steps)
    }
}

impl<'a> IntoIterator for &'a AlignmentIndex {
    type Item = &'a IndexedAlignment;
    type IntoIter = std::slice::Iter<'a, IndexedAlignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
