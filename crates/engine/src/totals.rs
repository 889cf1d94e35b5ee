//! Synthetic trailing totals row.

use serde::Serialize;

use crate::project::RenderedRow;

/// Column sums over the visible rendered rows of one panel. Labeled
/// "Filtered" when the mismatches-only toggle restricts visibility,
/// "Total" otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub label: &'static str,
    pub amount: f64,
    pub tip: f64,
    pub paid: f64,
}

/// Sum the monetary columns over `visible` positions. `visible` is `None`
/// when every row counts (toggle off).
pub fn compute(rows: &[RenderedRow], visible: Option<&[usize]>) -> Totals {
    let mut totals = Totals {
        label: if visible.is_some() { "Filtered" } else { "Total" },
        amount: 0.0,
        tip: 0.0,
        paid: 0.0,
    };

    let mut add = |row: &RenderedRow| {
        totals.amount += row.amount;
        totals.tip += row.tip;
        totals.paid += row.paid;
    };

    match visible {
        Some(positions) => {
            for &pos in positions {
                if let Some(row) = rows.get(pos) {
                    add(row);
                }
            }
        }
        None => {
            for row in rows {
                add(row);
            }
        }
    }

    totals
}
