//! Advisory scans over aligndef data.
//!
//! Nothing here drops or corrects a record; the scans only report.

mod gaps;
mod order;

pub use gaps::{
    scan_for_gaps, scan_records, GapConfig, GapFinding, GapScan, DEFAULT_GAP_THRESHOLD,
};
pub use order::{order_violations, OrderCheck, OrderViolation};
