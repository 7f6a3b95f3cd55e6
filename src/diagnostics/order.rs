use std::fmt;

use crate::aligndef::{AlignmentRecord, Side};

/// Record that starts inside a range already covered by an earlier record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderViolation {
    /// 1-based line (or record ordinal) of the offending record.
    pub line: usize,
    /// The offending record.
    pub record: AlignmentRecord,
    /// Side on which the overlap occurred.
    pub side: Side,
    /// Last position covered on that side before this record.
    pub covered_until: u32,
}

impl fmt::Display for OrderViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: alignment [{}] overlaps an already covered range ({} position: {})",
            self.line,
            self.record.to_string().replace('\t', " -- "),
            self.side,
            self.covered_until
        )
    }
}

/// Streaming check of the sorted, non-overlapping precondition.
///
/// Unaligned sides neither advance nor violate the covered position.
#[derive(Debug, Clone, Default)]
pub struct OrderCheck {
    left: Option<u32>,
    right: Option<u32>,
}

impl OrderCheck {
    /// Fresh check with nothing covered yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next record; returns a violation per overlapping side.
    pub fn check(&mut self, line: usize, record: &AlignmentRecord) -> Vec<OrderViolation> {
        let mut violations = Vec::new();
        for side in [Side::Left, Side::Right] {
            let Some(span) = record.side(side) else {
                continue;
            };
            let covered = match side {
                Side::Left => &mut self.left,
                Side::Right => &mut self.right,
            };
            if let Some(until) = *covered {
                if span.first <= until {
                    violations.push(OrderViolation {
                        line,
                        record: *record,
                        side,
                        covered_until: until,
                    });
                }
            }
            let next = (*covered).map_or(span.last, |until| until.max(span.last));
            *covered = Some(next);
        }
        violations
    }
}

/// Check a whole record sequence; `line` holds the 1-based ordinal.
pub fn order_violations(records: &[AlignmentRecord]) -> Vec<OrderViolation> {
    let mut check = OrderCheck::new();
    records
        .iter()
        .enumerate()
        .flat_map(|(idx, record)| check.check(idx + 1, record))
        .collect()
}
