#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aligncheck::corpus::CorpusSnapshot;

const UPDATE_VAR: &str = "ALIGNCHECK_UPDATE_SNAPSHOTS";

fn snapshot_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots")
        .join(name)
}

/// Compare `actual` with the stored report `name`, or rewrite the stored
/// report when `ALIGNCHECK_UPDATE_SNAPSHOTS` is set.
pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_path(name);
    if std::env::var_os(UPDATE_VAR).is_some() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read snapshot {}: {err}", path.display()));
    if let Some(diff) = first_difference(&expected, actual) {
        panic!(
            "report {} differs at {diff}\n(set {UPDATE_VAR}=1 to accept the new output)",
            path.display()
        );
    }
}

/// Describe the first line where two reports disagree, ignoring line endings.
pub fn first_difference(expected: &str, actual: &str) -> Option<String> {
    let mut expected_lines = expected.lines();
    let mut actual_lines = actual.lines();
    let mut line = 0usize;
    loop {
        line += 1;
        match (expected_lines.next(), actual_lines.next()) {
            (None, None) => return None,
            (want, got) if want == got => continue,
            (want, got) => {
                return Some(format!(
                    "line {line}:\n  expected: {}\n  actual:   {}",
                    want.unwrap_or("<end of report>"),
                    got.unwrap_or("<end of report>")
                ))
            }
        }
    }
}

/// Aligndef lines used across the pipeline tests.
pub const PARALLEL_ALIGNDEF: &[&str] = &["0,1\t0", "2\t1,2", "-1\t3"];

/// Corpus A: three documents over five sentences of five tokens each.
pub fn english_snapshot() -> CorpusSnapshot {
    CorpusSnapshot::new()
        .with_structure("doc", vec![[0, 9], [10, 19], [20, 24]])
        .with_structure("s", vec![[0, 4], [5, 9], [10, 14], [15, 19], [20, 24]])
        .with_attribute("s.id", ["en:1:1", "en:1:2", "en:2:1", "en:2:2", "en:3:1"])
}

/// Corpus B: two documents over four sentences.
pub fn czech_snapshot() -> CorpusSnapshot {
    CorpusSnapshot::new()
        .with_structure("doc", vec![[0, 11], [12, 23]])
        .with_structure("s", vec![[0, 5], [6, 11], [12, 17], [18, 23]])
        .with_attribute("s.id", ["cs:1:1", "cs:1:2", "cs:2:1", "cs:2:2"])
}
