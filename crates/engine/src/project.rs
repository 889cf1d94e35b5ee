//! Filtered, sorted projection of raw panel data into rendered rows.
//!
//! Filters follow a checkbox opt-in model: when a panel has filterable
//! values and none are active, the projection is empty — nothing shows
//! until the user checks a box. Rendered rows are display-only and are
//! rebuilt on every refresh.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::{clean_channel, clean_method, normalize_date, parse_money};
use crate::panel::{PanelSide, PanelState};
use crate::view::{GroupingMode, SortMode, ViewOptions};

// Expected column names, order-independent. Absent columns degrade to
// empty/zero via the header-index contract.
pub const COL_METHOD: &str = "Method";
pub const COL_PAYMENT_REF: &str = "PaymentRef";
pub const COL_ACCOUNT: &str = "Account";
pub const COL_DATE: &str = "Date";
pub const COL_AMOUNT: &str = "Amount";
pub const COL_TIP: &str = "Tip";
pub const COL_PAID: &str = "Paid";
pub const COL_CHANNEL: &str = "Channel";
pub const COL_PAYMENT_ID: &str = "Payment ID";
pub const COL_CARD_LAST4: &str = "Card last 4";
pub const COL_GRATUITY: &str = "Gratuity amount";
pub const COL_STATUS: &str = "Status";

/// Identifier shown for left-panel rows with no payment reference in the
/// legacy grouped mode.
pub const STANDALONE_LABEL: &str = "Standalone";

// ---------------------------------------------------------------------------
// RenderedRow
// ---------------------------------------------------------------------------

/// Display-only projection of one row. Placeholders carry no source data
/// and exist purely to keep the two panels' row counts aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    pub identifier: String,
    pub account: String,
    pub date: Option<NaiveDate>,
    /// Net amount. Right panel: raw amount minus gratuity.
    pub amount: f64,
    pub tip: f64,
    pub paid: f64,
    /// Right panel only; empty on the left.
    pub channel: String,
    pub is_placeholder: bool,
    pub original_index: Option<usize>,
}

impl RenderedRow {
    /// Blank synthetic row inserted to preserve positional alignment.
    pub fn placeholder() -> Self {
        Self {
            identifier: String::new(),
            account: String::new(),
            date: None,
            amount: 0.0,
            tip: 0.0,
            paid: 0.0,
            channel: String::new(),
            is_placeholder: true,
            original_index: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Derive the visible, sorted row sequence for one panel.
pub fn project(panel: &PanelState, options: &ViewOptions) -> Vec<RenderedRow> {
    let filters = options.filters_for(panel.side);

    // Opt-in model: checkboxes exist but none are checked → empty result
    if filters.is_empty() && !distinct_filter_values(panel).is_empty() {
        return Vec::new();
    }

    let mut rows = match panel.side {
        PanelSide::Left => match options.left_grouping {
            GroupingMode::PerRow => project_left(panel, options),
            GroupingMode::Grouped => project_left_grouped(panel, options),
        },
        PanelSide::Right => project_right(panel, options),
    };

    sort_rows(&mut rows, options.sort);
    rows
}

/// Distinct filterable values for one panel, sorted — the checkbox set.
/// Left: cleaned methods with empties dropped. Right: channels, with empty
/// collapsing to "Blank".
pub fn distinct_filter_values(panel: &PanelState) -> Vec<String> {
    let mut values = BTreeSet::new();
    for idx in 0..panel.table.row_count() {
        match panel.side {
            PanelSide::Left => {
                let method = clean_method(panel.table.field(idx, COL_METHOD));
                if !method.is_empty() {
                    values.insert(method);
                }
            }
            PanelSide::Right => {
                values.insert(clean_channel(panel.table.field(idx, COL_CHANNEL)));
            }
        }
    }
    values.into_iter().collect()
}

fn passes_date_restriction(date: Option<NaiveDate>, options: &ViewOptions) -> bool {
    match options.date_restriction {
        Some(restriction) => date == Some(restriction),
        None => true,
    }
}

fn project_left(panel: &PanelState, options: &ViewOptions) -> Vec<RenderedRow> {
    let table = &panel.table;
    let order = options.date_order_for(PanelSide::Left);
    let mut out = Vec::new();

    for idx in 0..table.row_count() {
        let method = clean_method(table.field(idx, COL_METHOD));
        if !options.left_filters.contains(&method) {
            continue;
        }
        let date = normalize_date(table.field(idx, COL_DATE), order);
        if !passes_date_restriction(date, options) {
            continue;
        }
        out.push(RenderedRow {
            identifier: table.field(idx, COL_PAYMENT_REF).trim().to_string(),
            account: table.field(idx, COL_ACCOUNT).to_string(),
            date,
            amount: parse_money(table.field(idx, COL_AMOUNT)),
            tip: parse_money(table.field(idx, COL_TIP)),
            paid: parse_money(table.field(idx, COL_PAID)),
            channel: String::new(),
            is_placeholder: false,
            original_index: Some(idx),
        });
    }
    out
}

/// Legacy grouped mode: rows sharing a non-empty payment reference collapse
/// into one summary row per reference (first row's account/date, summed
/// amounts); rows with no reference are emitted standalone, one per source
/// row.
fn project_left_grouped(panel: &PanelState, options: &ViewOptions) -> Vec<RenderedRow> {
    let table = &panel.table;
    let order = options.date_order_for(PanelSide::Left);
    let mut out = Vec::new();

    for method in &options.left_filters {
        let member_rows: Vec<usize> = (0..table.row_count())
            .filter(|&idx| clean_method(table.field(idx, COL_METHOD)) == *method)
            .filter(|&idx| {
                passes_date_restriction(normalize_date(table.field(idx, COL_DATE), order), options)
            })
            .collect();

        // Standalone rows first, then grouped summaries in first-seen order
        for &idx in member_rows.iter().filter(|&&i| table.field(i, COL_PAYMENT_REF).trim().is_empty()) {
            out.push(RenderedRow {
                identifier: STANDALONE_LABEL.to_string(),
                account: table.field(idx, COL_ACCOUNT).to_string(),
                date: normalize_date(table.field(idx, COL_DATE), order),
                amount: parse_money(table.field(idx, COL_AMOUNT)),
                tip: parse_money(table.field(idx, COL_TIP)),
                paid: parse_money(table.field(idx, COL_PAID)),
                channel: String::new(),
                is_placeholder: false,
                original_index: Some(idx),
            });
        }

        let mut seen: Vec<String> = Vec::new();
        for &idx in &member_rows {
            let key = table.field(idx, COL_PAYMENT_REF).trim().to_string();
            if key.is_empty() || seen.contains(&key) {
                continue;
            }
            seen.push(key.clone());

            let members: Vec<usize> = member_rows
                .iter()
                .copied()
                .filter(|&i| table.field(i, COL_PAYMENT_REF).trim() == key)
                .collect();
            let first = members[0];
            out.push(RenderedRow {
                identifier: key,
                account: table.field(first, COL_ACCOUNT).to_string(),
                date: normalize_date(table.field(first, COL_DATE), order),
                amount: members.iter().map(|&i| parse_money(table.field(i, COL_AMOUNT))).sum(),
                tip: members.iter().map(|&i| parse_money(table.field(i, COL_TIP))).sum(),
                paid: members.iter().map(|&i| parse_money(table.field(i, COL_PAID))).sum(),
                channel: String::new(),
                is_placeholder: false,
                original_index: Some(first),
            });
        }
    }
    out
}

fn project_right(panel: &PanelState, options: &ViewOptions) -> Vec<RenderedRow> {
    let table = &panel.table;
    let order = options.date_order_for(PanelSide::Right);
    let mut out = Vec::new();

    for idx in 0..table.row_count() {
        // Failed payments are excluded unconditionally, regardless of filters
        if table.field(idx, COL_STATUS).trim().eq_ignore_ascii_case("FAILED") {
            continue;
        }
        let channel = clean_channel(table.field(idx, COL_CHANNEL));
        if !options.right_filters.contains(&channel) {
            continue;
        }
        let date = normalize_date(table.field(idx, COL_DATE), order);
        if !passes_date_restriction(date, options) {
            continue;
        }

        let gross = parse_money(table.field(idx, COL_AMOUNT));
        let gratuity = parse_money(table.field(idx, COL_GRATUITY));

        out.push(RenderedRow {
            identifier: table.field(idx, COL_PAYMENT_ID).trim().to_string(),
            account: table.field(idx, COL_CARD_LAST4).to_string(),
            date,
            // Displayed amount is net of tip, a business rule distinguishing
            // this panel from the left panel's raw Paid passthrough
            amount: gross - gratuity,
            tip: gratuity,
            paid: gross,
            channel,
            is_placeholder: false,
            original_index: Some(idx),
        });
    }
    out
}

fn sort_rows(rows: &mut [RenderedRow], sort: SortMode) {
    match sort {
        SortMode::ByAmount => {
            // Descending by net amount; stable, so ties keep projection order
            rows.sort_by(|a, b| {
                b.amount
                    .partial_cmp(&a.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SortMode::ByDate => {
            rows.sort_by_cached_key(|r| (r.date, r.identifier.to_lowercase()));
        }
    }
}
