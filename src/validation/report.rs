use std::fmt;

use crate::aligndef::{IndexedAlignment, UNALIGNED};

use super::ValidationError;

/// Correspondence found for one structural boundary of corpus A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryReport {
    /// Boundary (structure instance) number.
    pub boundary: usize,
    /// Identifier of the sentence the boundary falls into.
    pub sentence_id: String,
    /// Token position of the boundary.
    pub token: u32,
    /// Sentence order of `sentence_id` within corpus A.
    pub sentence_order: u32,
    /// Alignment covering `sentence_order`, if any.
    pub alignment: Option<IndexedAlignment>,
    /// Identifier of the first aligned sentence in corpus B.
    pub counterpart: Option<String>,
}

impl BoundaryReport {
    /// Whether the boundary sentence is covered by an alignment.
    pub fn is_matched(&self) -> bool {
        self.alignment.is_some()
    }
}

impl fmt::Display for BoundaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} -- {} -- 1st sentence in corp: {} -- aligndef line: ",
            self.boundary, self.sentence_id, self.sentence_order
        )?;
        match &self.alignment {
            Some(entry) => {
                write!(f, "{},{} --> ", entry.left.first, entry.left.last)?;
                match entry.right {
                    Some(right) => write!(f, "{},{}", right.first, right.last)?,
                    None => write!(f, "{UNALIGNED},{UNALIGNED}")?,
                }
            }
            None => f.write_str("not found")?,
        }
        if let Some(counterpart) = &self.counterpart {
            write!(f, " -- counterpart: {counterpart}")?;
        }
        Ok(())
    }
}

/// Result of validating a single boundary.
pub type BoundaryOutcome = Result<BoundaryReport, ValidationError>;

/// Counts over a validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Boundaries examined.
    pub boundaries: usize,
    /// Boundaries covered by an alignment.
    pub matched: usize,
    /// Boundaries resolved but not covered.
    pub unmatched: usize,
    /// Boundaries that could not be resolved.
    pub failed: usize,
}

impl ValidationSummary {
    /// Account for one outcome.
    pub fn record(&mut self, outcome: &BoundaryOutcome) {
        self.boundaries += 1;
        match outcome {
            Ok(report) if report.is_matched() => self.matched += 1,
            Ok(_) => self.unmatched += 1,
            Err(_) => self.failed += 1,
        }
    }

    /// Summarise a list of outcomes.
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a BoundaryOutcome>,
    {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    /// Whether every boundary resolved to an alignment.
    pub fn is_clean(&self) -> bool {
        self.unmatched == 0 && self.failed == 0
    }
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} boundaries: {} matched, {} not found, {} failed",
            self.boundaries, self.matched, self.unmatched, self.failed
        )
    }
}
