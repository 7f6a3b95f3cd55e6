//! End-to-end check of index build, lookup and gap scan on one aligndef file.

use aligncheck::aligndef::{AlignmentIndex, Span};
use aligncheck::diagnostics::{scan_for_gaps, GapConfig};
use std::io::Write;

const SCENARIO: &[&str] = &["0,9\t0,9", "10,19\t10,25", "-1\t26,26", "20,150\t26,40"];

#[test]
fn sentinel_line_is_dropped_from_index() {
    let index = AlignmentIndex::build(SCENARIO.iter().copied()).expect("index should build");
    assert_eq!(index.len(), 3);
    assert!(index.iter().all(|entry| entry.right != Some(Span::single(26))));
}

#[test]
fn lookup_finds_covering_record() {
    let index = AlignmentIndex::build(SCENARIO.iter().copied()).expect("index should build");

    let entry = index.lookup(15).expect("15 is covered");
    assert_eq!(entry.left, Span::new(10, 19));
    assert_eq!(entry.right, Some(Span::new(10, 25)));

    assert!(index.lookup(9999).is_none());
}

#[test]
fn gap_scan_reports_the_wide_record() {
    let findings: Vec<_> = scan_for_gaps(SCENARIO.iter().copied(), GapConfig::default())
        .collect::<Result<_, _>>()
        .expect("scan should succeed");

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, 4);
    assert_eq!(findings[0].left_width, 130);
    assert_eq!(findings[0].right_width, 0);
}

#[test]
fn index_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "{}", SCENARIO.join("\n")).expect("write aligndef");
    writeln!(file).expect("write trailing blank line");

    let index = AlignmentIndex::from_path(file.path()).expect("index should load");
    assert_eq!(index.len(), 3);
    assert_eq!(index.first_position(), Some(0));
    assert_eq!(index.last_position(), Some(150));
    assert_eq!(index.lookup(150).map(|entry| entry.left), Some(Span::new(20, 150)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = AlignmentIndex::from_path(dir.path().join("absent.aligndef")).unwrap_err();
    assert!(matches!(err, aligncheck::AligndefError::Io(_)));
}
