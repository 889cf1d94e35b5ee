//! Cell-level comparison of position-paired rendered rows.
//!
//! Runs post-alignment, or directly on raw positional pairs when alignment
//! is disabled. Monetary cells compare in whole cents after 2-decimal
//! rounding, with a one-cent tolerance.

use serde::Serialize;

use crate::project::RenderedRow;

/// Monetary comparison tolerance: one cent.
pub const AMOUNT_EPSILON: f64 = 0.01;

/// Mismatch annotations for one aligned position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RowDiff {
    pub identifier_mismatch: bool,
    pub amount_mismatch: bool,
    pub tip_mismatch: bool,
    pub paid_mismatch: bool,
}

impl RowDiff {
    /// True when any cell at this position is flagged.
    pub fn any(&self) -> bool {
        self.identifier_mismatch || self.amount_mismatch || self.tip_mismatch || self.paid_mismatch
    }
}

/// Annotate every paired position. Sequences of unequal length are
/// compared up to the longer one; the absent side reads as a placeholder.
pub fn highlight(left: &[RenderedRow], right: &[RenderedRow]) -> Vec<RowDiff> {
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| diff_pair(left.get(i), right.get(i)))
        .collect()
}

/// Positions to display under the mismatches-only toggle: all of them when
/// the toggle is off, otherwise only flagged ones.
pub fn visible_positions(diffs: &[RowDiff], mismatches_only: bool) -> Vec<usize> {
    diffs
        .iter()
        .enumerate()
        .filter(|(_, d)| !mismatches_only || d.any())
        .map(|(i, _)| i)
        .collect()
}

fn diff_pair(left: Option<&RenderedRow>, right: Option<&RenderedRow>) -> RowDiff {
    let left_id = left.map(|r| r.identifier.trim()).unwrap_or("");
    let right_id = right.map(|r| r.identifier.trim()).unwrap_or("");

    // Empty-vs-empty still flags: a gap on both sides is a disagreement,
    // not a match
    let identifier_mismatch = left_id.is_empty() || right_id.is_empty() || left_id != right_id;

    RowDiff {
        identifier_mismatch,
        amount_mismatch: money_mismatch(money(left, |r| r.amount), money(right, |r| r.amount)),
        tip_mismatch: money_mismatch(money(left, |r| r.tip), money(right, |r| r.tip)),
        paid_mismatch: money_mismatch(money(left, |r| r.paid), money(right, |r| r.paid)),
    }
}

/// Monetary value of a cell, `None` for a blank (placeholder or absent).
fn money(row: Option<&RenderedRow>, get: impl Fn(&RenderedRow) -> f64) -> Option<f64> {
    match row {
        Some(r) if !r.is_placeholder => Some(get(r)),
        _ => None,
    }
}

/// One-cent tolerance over 2-decimal-rounded values. Blank cells never
/// flag: both-blank is equal, and blank-vs-value is surfaced by the
/// identifier flag instead.
fn money_mismatch(left: Option<f64>, right: Option<f64>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => {
            let l_cents = (l * 100.0).round() as i64;
            let r_cents = (r * 100.0).round() as i64;
            (l_cents - r_cents).abs() > 1
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, amount: f64, tip: f64, paid: f64) -> RenderedRow {
        RenderedRow {
            identifier: id.to_string(),
            amount,
            tip,
            paid,
            is_placeholder: false,
            ..RenderedRow::placeholder()
        }
    }

    #[test]
    fn identical_rows_flag_nothing() {
        let l = vec![row("A", 10.0, 1.0, 11.0)];
        let r = vec![row("A", 10.0, 1.0, 11.0)];
        let diffs = highlight(&l, &r);
        assert_eq!(diffs.len(), 1);
        assert!(!diffs[0].any());
    }

    #[test]
    fn amount_beyond_tolerance_flags() {
        let l = vec![row("A", 10.00, 0.0, 10.00)];
        let r = vec![row("A", 10.02, 0.0, 10.02)];
        let d = highlight(&l, &r);
        assert!(d[0].amount_mismatch);
        assert!(d[0].paid_mismatch);
        assert!(!d[0].identifier_mismatch);
    }

    #[test]
    fn amount_within_tolerance_does_not_flag() {
        // 10.005 rounds to the same cent bucket within the one-cent tolerance
        let l = vec![row("A", 10.00, 0.0, 10.00)];
        let r = vec![row("A", 10.005, 0.0, 10.00)];
        let d = highlight(&l, &r);
        assert!(!d[0].amount_mismatch);
    }

    #[test]
    fn exactly_one_cent_is_within_tolerance() {
        let l = vec![row("A", 10.00, 0.0, 0.0)];
        let r = vec![row("A", 10.01, 0.0, 0.0)];
        assert!(!highlight(&l, &r)[0].amount_mismatch);
    }

    #[test]
    fn identifier_inequality_flags() {
        let l = vec![row("A", 1.0, 0.0, 1.0)];
        let r = vec![row("B", 1.0, 0.0, 1.0)];
        assert!(highlight(&l, &r)[0].identifier_mismatch);
    }

    #[test]
    fn both_empty_identifiers_still_flag() {
        let l = vec![row("", 0.0, 0.0, 0.0)];
        let r = vec![row("", 0.0, 0.0, 0.0)];
        assert!(highlight(&l, &r)[0].identifier_mismatch);
    }

    #[test]
    fn placeholder_pair_flags_identifier_not_money() {
        let l = vec![RenderedRow::placeholder()];
        let r = vec![row("A", 5.0, 0.0, 5.0)];
        let d = highlight(&l, &r);
        assert!(d[0].identifier_mismatch);
        assert!(!d[0].amount_mismatch);
        assert!(!d[0].paid_mismatch);
    }

    #[test]
    fn unequal_lengths_compare_against_absent() {
        let l = vec![row("A", 1.0, 0.0, 1.0), row("B", 2.0, 0.0, 2.0)];
        let r = vec![row("A", 1.0, 0.0, 1.0)];
        let d = highlight(&l, &r);
        assert_eq!(d.len(), 2);
        assert!(!d[0].any());
        assert!(d[1].identifier_mismatch);
        assert!(!d[1].amount_mismatch);
    }

    #[test]
    fn visible_positions_all_when_toggle_off() {
        let diffs = vec![RowDiff::default(), RowDiff { amount_mismatch: true, ..RowDiff::default() }];
        assert_eq!(visible_positions(&diffs, false), vec![0, 1]);
    }

    #[test]
    fn visible_positions_only_flagged_when_toggle_on() {
        let clean = RowDiff::default();
        let flagged = RowDiff { tip_mismatch: true, ..RowDiff::default() };
        assert_eq!(visible_positions(&[clean, flagged, clean], true), vec![1]);
    }
}
