use std::fmt;

use crate::aligndef::{AligndefError, AlignmentRecord, Span};

/// Default span width above which a record is reported.
pub const DEFAULT_GAP_THRESHOLD: u32 = 100;

/// Configuration for the gap scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapConfig {
    /// Widths strictly greater than this value are reported.
    pub threshold: u32,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_GAP_THRESHOLD,
        }
    }
}

impl GapConfig {
    /// Set the reporting threshold.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Reported width of `span`, or 0 when it stays within the threshold.
    pub fn excess_width(&self, span: Span) -> u32 {
        let width = span.width();
        if width > self.threshold {
            width
        } else {
            0
        }
    }

    /// Evaluate one record. Records with an unaligned side are never reported.
    pub fn inspect(&self, line: usize, record: &AlignmentRecord) -> Option<GapFinding> {
        let (left, right) = (record.left?, record.right?);
        let left_width = self.excess_width(left);
        let right_width = self.excess_width(right);
        if left_width == 0 && right_width == 0 {
            return None;
        }
        Some(GapFinding {
            line,
            left,
            right,
            left_width,
            right_width,
        })
    }
}

/// Record whose span is suspiciously wide on at least one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapFinding {
    /// 1-based source line (or record ordinal for pre-parsed input).
    pub line: usize,
    /// Range in corpus A.
    pub left: Span,
    /// Range in corpus B.
    pub right: Span,
    /// Left width when above the threshold, otherwise 0.
    pub left_width: u32,
    /// Right width when above the threshold, otherwise 0.
    pub right_width: u32,
}

impl fmt::Display for GapFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} ({}) --> {},{} ({})",
            self.left.first,
            self.left.last,
            self.left_width,
            self.right.first,
            self.right.last,
            self.right_width
        )
    }
}

/// Lazy scan over raw aligndef lines.
///
/// Malformed lines come out as `Err` items and the scan moves on, so callers
/// can decide between skipping and stopping.
#[derive(Debug)]
pub struct GapScan<I> {
    lines: I,
    line_no: usize,
    config: GapConfig,
}

impl<I, S> Iterator for GapScan<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<GapFinding, AligndefError>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match AlignmentRecord::parse(line) {
                Ok(record) => {
                    if let Some(finding) = self.config.inspect(self.line_no, &record) {
                        return Some(Ok(finding));
                    }
                }
                Err(source) => {
                    return Some(Err(AligndefError::Malformed {
                        line: self.line_no,
                        source,
                    }))
                }
            }
        }
        None
    }
}

/// Scan raw lines for records wider than `config.threshold`.
pub fn scan_for_gaps<I, S>(lines: I, config: GapConfig) -> GapScan<I::IntoIter>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    GapScan {
        lines: lines.into_iter(),
        line_no: 0,
        config,
    }
}

/// Same rule as [`scan_for_gaps`], applied to parsed records.
pub fn scan_records<'a, I>(records: I, config: GapConfig) -> impl Iterator<Item = GapFinding> + 'a
where
    I: IntoIterator<Item = &'a AlignmentRecord>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .enumerate()
        .filter_map(move |(idx, record)| config.inspect(idx + 1, record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn findings(lines: &[&str], threshold: u32) -> Vec<GapFinding> {
        scan_for_gaps(lines.iter().copied(), GapConfig::default().with_threshold(threshold))
            .collect::<Result<Vec<_>, _>>()
            .expect("scan should succeed")
    }

    #[test]
    fn narrow_records_are_not_reported() {
        assert!(findings(&["0,50\t0,60"], 100).is_empty());
        // exactly at the threshold stays quiet
        assert!(findings(&["0,100\t5"], 100).is_empty());
    }

    #[test]
    fn wide_left_side_is_reported() {
        let found = findings(&["0,200\t0,10"], 100);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].left_width, 200);
        assert_eq!(found[0].right_width, 0);
        assert_eq!(found[0].to_string(), "0,200 (200) --> 0,10 (0)");
    }

    #[test]
    fn unaligned_sides_are_never_reported() {
        assert!(findings(&["-1\t0,500", "0,500\t-1"], 100).is_empty());
        assert!(findings(&["0,500\t-1,3", "-2,400\t0,9"], 100).is_empty());
    }

    #[test]
    fn parsed_records_use_the_same_rule() {
        let records: Vec<AlignmentRecord> = ["0,9\t0", "-1\t0,400", "10\t1,250"]
            .iter()
            .map(|line| AlignmentRecord::parse(line).unwrap())
            .collect();
        let found: Vec<_> = scan_records(&records, GapConfig::default()).collect();
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].line, found[0].right_width), (3, 249));
    }

    #[test]
    fn malformed_lines_do_not_stop_the_scan() {
        let items: Vec<_> = scan_for_gaps(["x\t1", "", "0,300\t1"], GapConfig::default()).collect();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Err(AligndefError::Malformed { line: 1, .. })));
        let finding = items[1].as_ref().expect("second item is a finding");
        assert_eq!(finding.line, 3);
    }
}
