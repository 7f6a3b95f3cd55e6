use std::fmt::{self, Display};

use thiserror::Error;

/// Raw value marking a side with no counterpart sentence.
pub const UNALIGNED: i64 = -1;

/// Errors produced while parsing a single aligndef line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line did not split into exactly two tab-separated fields.
    #[error("expected 2 tab-separated fields, found {found}")]
    FieldCount {
        /// Number of fields actually present.
        found: usize,
    },

    /// A range component was not an integer.
    #[error("invalid integer '{value}' in {side} field")]
    InvalidInteger {
        /// Side (`left`/`right`) holding the value.
        side: Side,
        /// Offending text.
        value: String,
    },

    /// A range carried more than two comma-separated values.
    #[error("{side} field has {found} values, expected 1 or 2")]
    TooManyValues {
        /// Side holding the range.
        side: Side,
        /// Number of values present.
        found: usize,
    },

    /// First value of a range was greater than the last one.
    #[error("{side} range {first},{last} is reversed")]
    ReversedRange {
        /// Side holding the range.
        side: Side,
        /// First value.
        first: i64,
        /// Last value.
        last: i64,
    },

    /// A value too large to be a sentence position.
    #[error("position {value} out of range in {side} field")]
    PositionOutOfRange {
        /// Side holding the value.
        side: Side,
        /// Offending value.
        value: i64,
    },
}

/// Which corpus a range belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Corpus A (the indexed side).
    Left,
    /// Corpus B.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Inclusive range of sentence positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// First covered position.
    pub first: u32,
    /// Last covered position (inclusive).
    pub last: u32,
}

impl Span {
    /// Construct a span; `first` must not exceed `last`.
    pub fn new(first: u32, last: u32) -> Self {
        debug_assert!(first <= last, "span {first},{last} is reversed");
        Self { first, last }
    }

    /// Span covering exactly one position.
    pub fn single(position: u32) -> Self {
        Self {
            first: position,
            last: position,
        }
    }

    /// Distance between the two endpoints (`last - first`).
    pub fn width(&self) -> u32 {
        self.last - self.first
    }

    /// Whether `position` falls inside the span.
    pub fn contains(&self, position: u32) -> bool {
        self.first <= position && position <= self.last
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{},{}", self.first, self.last)
        }
    }
}

/// One parsed aligndef line.
///
/// A side is `None` when the source used the `-1` marker, i.e. the sentences
/// on the other side have no counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignmentRecord {
    /// Range in corpus A.
    pub left: Option<Span>,
    /// Range in corpus B.
    pub right: Option<Span>,
}

impl AlignmentRecord {
    /// Construct a record from both sides.
    pub fn new(left: Option<Span>, right: Option<Span>) -> Self {
        Self { left, right }
    }

    /// Parse one line of the `<left>\t<right>` grammar.
    ///
    /// Surrounding whitespace is ignored. Each side is `N`, `N,M` or `-1`.
    /// A side whose first value is negative is unaligned.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() != 2 {
            return Err(RecordError::FieldCount {
                found: fields.len(),
            });
        }
        Ok(Self {
            left: parse_range(fields[0], Side::Left)?,
            right: parse_range(fields[1], Side::Right)?,
        })
    }

    /// First position on the left side.
    pub fn left_start(&self) -> Option<u32> {
        self.left.map(|span| span.first)
    }

    /// Last position on the left side.
    pub fn left_end(&self) -> Option<u32> {
        self.left.map(|span| span.last)
    }

    /// First position on the right side.
    pub fn right_start(&self) -> Option<u32> {
        self.right.map(|span| span.first)
    }

    /// Last position on the right side.
    pub fn right_end(&self) -> Option<u32> {
        self.right.map(|span| span.last)
    }

    /// Range on the requested side.
    pub fn side(&self, side: Side) -> Option<Span> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// View of the record anchored in corpus A, if its left side is aligned.
    pub fn anchored(&self) -> Option<IndexedAlignment> {
        self.left.map(|left| IndexedAlignment {
            left,
            right: self.right,
        })
    }
}

impl fmt::Display for AlignmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_side(f, self.left)?;
        f.write_str("\t")?;
        write_side(f, self.right)
    }
}

/// Record whose corpus A range is known; the element type of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexedAlignment {
    /// Range in corpus A.
    pub left: Span,
    /// Range in corpus B, `None` when the left sentences are unaligned.
    pub right: Option<Span>,
}

impl IndexedAlignment {
    /// Whether the corpus A range covers `position`.
    pub fn covers(&self, position: u32) -> bool {
        self.left.contains(position)
    }
}

impl From<IndexedAlignment> for AlignmentRecord {
    fn from(entry: IndexedAlignment) -> Self {
        Self {
            left: Some(entry.left),
            right: entry.right,
        }
    }
}

impl fmt::Display for IndexedAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&AlignmentRecord::from(*self), f)
    }
}

fn write_side(f: &mut fmt::Formatter<'_>, side: Option<Span>) -> fmt::Result {
    match side {
        Some(span) => Display::fmt(&span, f),
        None => write!(f, "{UNALIGNED}"),
    }
}

fn parse_range(field: &str, side: Side) -> Result<Option<Span>, RecordError> {
    let values = field
        .split(',')
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| RecordError::InvalidInteger {
                    side,
                    value: raw.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (first, last) = match values.as_slice() {
        [single] => (*single, *single),
        [first, last] => (*first, *last),
        _ => {
            return Err(RecordError::TooManyValues {
                side,
                found: values.len(),
            })
        }
    };

    if first < 0 {
        return Ok(None);
    }
    if first > last {
        return Err(RecordError::ReversedRange { side, first, last });
    }
    Ok(Some(Span::new(
        to_position(first, side)?,
        to_position(last, side)?,
    )))
}

fn to_position(value: i64, side: Side) -> Result<u32, RecordError> {
    u32::try_from(value).map_err(|_| RecordError::PositionOutOfRange { side, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ranges_and_shorthand() {
        let record = AlignmentRecord::parse("3,7\t12").unwrap();
        assert_eq!(record.left, Some(Span::new(3, 7)));
        assert_eq!(record.right, Some(Span::single(12)));
    }

    #[test]
    fn sentinel_becomes_none() {
        let record = AlignmentRecord::parse("-1\t26,26").unwrap();
        assert_eq!(record.left, None);
        assert_eq!(record.right_start(), Some(26));
        assert!(record.anchored().is_none());

        let record = AlignmentRecord::parse("-1,-1\t4").unwrap();
        assert_eq!(record.left, None);
    }

    #[test]
    fn negative_start_marks_side_unaligned() {
        for line in ["-1,4\t4", "-3\t1", "-2,-2\t0"] {
            let record = AlignmentRecord::parse(line).unwrap();
            assert_eq!(record.left, None, "{line}");
            assert!(record.right.is_some());
        }
        let record = AlignmentRecord::parse("0,500\t-1,3").unwrap();
        assert_eq!(record.right, None);
    }

    #[test]
    fn rejects_reversed_and_oversized_ranges() {
        assert!(matches!(
            AlignmentRecord::parse("4\t9,2"),
            Err(RecordError::ReversedRange { side: Side::Right, first: 9, last: 2 })
        ));
        assert!(matches!(
            AlignmentRecord::parse("5,-1\t0"),
            Err(RecordError::ReversedRange { side: Side::Left, .. })
        ));
        assert!(matches!(
            AlignmentRecord::parse("0,4294967296\t1"),
            Err(RecordError::PositionOutOfRange { value: 4_294_967_296, .. })
        ));
    }

    #[test]
    fn display_uses_aligndef_grammar() {
        let record = AlignmentRecord::new(Some(Span::new(10, 19)), None);
        assert_eq!(record.to_string(), "10,19\t-1");
        let record = AlignmentRecord::parse("5\t6,8").unwrap();
        assert_eq!(record.to_string(), "5\t6,8");
    }
}
