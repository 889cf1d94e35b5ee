//! Plain-text side-by-side rendering of the two aligned panels.
//!
//! Flagged cells carry a `!` suffix, placeholder rows render as `·`, and
//! each panel ends with a synthetic totals row.

use tallyview_engine::diff::RowDiff;
use tallyview_engine::normalize::{format_long_date, format_money};
use tallyview_engine::project::RenderedRow;
use tallyview_engine::totals::Totals;

const LEFT_HEADERS: &[&str] = &["PaymentRef", "Account", "Date", "Amount", "Tip", "Paid"];
const RIGHT_HEADERS: &[&str] = &["PaymentRef", "Account", "Date", "Amount", "Tip", "Paid", "Channel"];

pub fn render(
    left: &[RenderedRow],
    right: &[RenderedRow],
    diffs: &[RowDiff],
    visible: &[usize],
    left_totals: &Totals,
    right_totals: &Totals,
) -> String {
    let mut left_rows = vec![LEFT_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>()];
    let mut right_rows = vec![RIGHT_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>()];

    for &pos in visible {
        let diff = diffs.get(pos).copied().unwrap_or_default();
        left_rows.push(cells(left.get(pos), diff, false));
        right_rows.push(cells(right.get(pos), diff, true));
    }

    left_rows.push(totals_cells(left_totals, false));
    right_rows.push(totals_cells(right_totals, true));

    let left_lines = layout(&left_rows);
    let right_lines = layout(&right_rows);

    let mut out = String::new();
    for (l, r) in left_lines.iter().zip(right_lines.iter()) {
        out.push_str(l);
        out.push_str("  |  ");
        out.push_str(r);
        out.push('\n');
    }
    out
}

fn cells(row: Option<&RenderedRow>, diff: RowDiff, with_channel: bool) -> Vec<String> {
    let Some(row) = row else {
        return vec![String::new(); if with_channel { 7 } else { 6 }];
    };
    if row.is_placeholder {
        let mut cells = vec!["·".to_string(); if with_channel { 7 } else { 6 }];
        if diff.identifier_mismatch {
            cells[0].push('!');
        }
        return cells;
    }

    let mark = |text: String, flagged: bool| if flagged { format!("{text}!") } else { text };

    let date = row
        .date
        .map(|d| format_long_date(d, true))
        .unwrap_or_default();

    let mut cells = vec![
        mark(row.identifier.clone(), diff.identifier_mismatch),
        row.account.clone(),
        date,
        mark(format_money(row.amount), diff.amount_mismatch),
        mark(format_money(row.tip), diff.tip_mismatch),
        mark(format_money(row.paid), diff.paid_mismatch),
    ];
    if with_channel {
        cells.push(row.channel.clone());
    }
    cells
}

fn totals_cells(totals: &Totals, with_channel: bool) -> Vec<String> {
    let mut cells = vec![
        totals.label.to_string(),
        String::new(),
        String::new(),
        format_money(totals.amount),
        format_money(totals.tip),
        format_money(totals.paid),
    ];
    if with_channel {
        cells.push(String::new());
    }
    cells
}

/// Pad every column to its widest cell.
fn layout(rows: &[Vec<String>]) -> Vec<String> {
    let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (i, width) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                if i > 0 {
                    line.push_str("  ");
                }
                line.push_str(cell);
                for _ in cell.chars().count()..*width {
                    line.push(' ');
                }
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, amount: f64) -> RenderedRow {
        RenderedRow {
            identifier: id.to_string(),
            amount,
            paid: amount,
            is_placeholder: false,
            ..RenderedRow::placeholder()
        }
    }

    #[test]
    fn renders_marks_and_totals() {
        let left = vec![row("P1", 10.0)];
        let right = vec![row("P1", 10.5)];
        let diffs = vec![RowDiff {
            amount_mismatch: true,
            paid_mismatch: true,
            ..RowDiff::default()
        }];
        let totals = Totals { label: "Total", amount: 10.0, tip: 0.0, paid: 10.0 };
        let out = render(&left, &right, &diffs, &[0], &totals, &totals);

        assert!(out.contains("10.00!"));
        assert!(out.contains("10.50!"));
        assert!(out.contains("Total"));
        assert!(out.contains("PaymentRef"));
    }

    #[test]
    fn placeholder_renders_as_dot() {
        let left = vec![RenderedRow::placeholder()];
        let right = vec![row("P1", 5.0)];
        let diffs = vec![RowDiff { identifier_mismatch: true, ..RowDiff::default() }];
        let totals = Totals { label: "Total", amount: 0.0, tip: 0.0, paid: 0.0 };
        let out = render(&left, &right, &diffs, &[0], &totals, &totals);
        assert!(out.contains('·'));
    }
}
