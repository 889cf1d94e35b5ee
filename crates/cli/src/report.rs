//! JSON report of a reconciliation pass.

use serde::Serialize;

use tallyview_engine::diff::RowDiff;
use tallyview_engine::project::RenderedRow;
use tallyview_engine::totals::Totals;

#[derive(Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub summary: ReportSummary,
    pub positions: Vec<PositionEntry>,
}

#[derive(Serialize)]
pub struct ReportMeta {
    pub left_file: String,
    pub right_file: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Serialize)]
pub struct ReportSummary {
    pub positions: usize,
    pub flagged: usize,
    pub identifier_mismatches: usize,
    pub amount_mismatches: usize,
    pub tip_mismatches: usize,
    pub paid_mismatches: usize,
    pub left_totals: Totals,
    pub right_totals: Totals,
}

#[derive(Serialize)]
pub struct PositionEntry {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<RenderedRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<RenderedRow>,
    pub diff: RowDiff,
}

pub fn build(
    left_file: &str,
    right_file: &str,
    left: &[RenderedRow],
    right: &[RenderedRow],
    diffs: &[RowDiff],
    left_totals: Totals,
    right_totals: Totals,
) -> Report {
    let positions: Vec<PositionEntry> = diffs
        .iter()
        .enumerate()
        .map(|(i, diff)| PositionEntry {
            index: i,
            left: left.get(i).cloned(),
            right: right.get(i).cloned(),
            diff: *diff,
        })
        .collect();

    let summary = ReportSummary {
        positions: diffs.len(),
        flagged: diffs.iter().filter(|d| d.any()).count(),
        identifier_mismatches: diffs.iter().filter(|d| d.identifier_mismatch).count(),
        amount_mismatches: diffs.iter().filter(|d| d.amount_mismatch).count(),
        tip_mismatches: diffs.iter().filter(|d| d.tip_mismatch).count(),
        paid_mismatches: diffs.iter().filter(|d| d.paid_mismatch).count(),
        left_totals,
        right_totals,
    };

    Report {
        meta: ReportMeta {
            left_file: left_file.to_string(),
            right_file: right_file.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        positions,
    }
}
