//! View-state context passed explicitly to each pipeline stage.
//!
//! The projection, alignment, and diff stages read this and nothing else,
//! so each can be unit-tested without any rendering target.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::DateOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Ascending by normalized date, tie-broken case-insensitively on the
    /// identifier.
    #[default]
    ByDate,
    /// Descending by net amount.
    ByAmount,
}

/// Left-panel display mode. Per-row is canonical; grouping is the legacy
/// mode that aggregates rows sharing a payment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    #[default]
    PerRow,
    Grouped,
}

/// All view state consumed by the pipeline, reset to defaults on an
/// explicit reset. Filters follow the checkbox opt-in model: an empty set
/// means "nothing selected", not "show all".
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub sort: SortMode,
    pub align_enabled: bool,
    pub mismatches_only: bool,
    /// Single selected date restricting both panels, if any.
    pub date_restriction: Option<NaiveDate>,
    pub left_filters: BTreeSet<String>,
    pub right_filters: BTreeSet<String>,
    pub left_date_order: DateOrder,
    pub right_date_order: DateOrder,
    pub left_grouping: GroupingMode,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            sort: SortMode::ByDate,
            align_enabled: true,
            mismatches_only: false,
            date_restriction: None,
            left_filters: BTreeSet::new(),
            right_filters: BTreeSet::new(),
            left_date_order: DateOrder::DayFirst,
            right_date_order: DateOrder::DayFirst,
            left_grouping: GroupingMode::PerRow,
        }
    }
}

impl ViewOptions {
    /// Active filter set for one side.
    pub fn filters_for(&self, side: crate::panel::PanelSide) -> &BTreeSet<String> {
        match side {
            crate::panel::PanelSide::Left => &self.left_filters,
            crate::panel::PanelSide::Right => &self.right_filters,
        }
    }

    /// Date-format assumption for one side.
    pub fn date_order_for(&self, side: crate::panel::PanelSide) -> DateOrder {
        match side {
            crate::panel::PanelSide::Left => self.left_date_order,
            crate::panel::PanelSide::Right => self.right_date_order,
        }
    }
}
