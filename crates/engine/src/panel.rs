//! Per-panel state: source table, selection, and manual-edit history.
//!
//! Selection and undo are index-based references into the rendered row
//! sequence (arena+index), not handles to any rendering target. The
//! rendered sequence itself is rebuilt by projection; manual edits operate
//! on the sequence the caller holds and are reversed the same way.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::project::RenderedRow;
use crate::table::Table;

/// Undo stack depth. Oldest entries are discarded beyond this.
pub const MAX_HISTORY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelSide {
    /// Ledger export: Method / PaymentRef / Account / Date / Amount / Tip / Paid.
    Left,
    /// Processor export: Channel / Payment ID / Date / Amount / Gratuity amount / Status.
    Right,
}

impl std::fmt::Display for PanelSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// One manual edit, recorded for undo.
#[derive(Debug, Clone)]
pub enum EditAction {
    /// Blank rows inserted at these rendered positions (ascending).
    Add { positions: Vec<usize> },
    /// Rows removed from these rendered positions (ascending, with the
    /// removed rows so undo can restore them in place).
    Remove { rows: Vec<(usize, RenderedRow)> },
}

/// State owned by one side of the reconciliation view.
#[derive(Debug)]
pub struct PanelState {
    pub side: PanelSide,
    pub table: Table,
    /// Selected positions in the rendered sequence.
    pub selection: BTreeSet<usize>,
    history: Vec<EditAction>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(PanelSide::Left)
    }
}

impl PanelState {
    pub fn new(side: PanelSide) -> Self {
        Self {
            side,
            table: Table::default(),
            selection: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    /// Replace all prior state with a freshly loaded table.
    pub fn load(&mut self, table: Table) {
        self.table = table;
        self.selection.clear();
        self.history.clear();
    }

    /// Clear data, selection, and history (explicit reset action).
    pub fn reset(&mut self) {
        self.load(Table::default());
    }

    // -- selection ----------------------------------------------------------

    /// Plain click: select only this position.
    pub fn select_only(&mut self, pos: usize) {
        self.selection.clear();
        self.selection.insert(pos);
    }

    /// Ctrl-click: toggle one position.
    pub fn toggle(&mut self, pos: usize) {
        if !self.selection.remove(&pos) {
            self.selection.insert(pos);
        }
    }

    /// Shift-click: select the inclusive range between two positions.
    pub fn select_range(&mut self, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        for pos in lo..=hi {
            self.selection.insert(pos);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -- manual edits -------------------------------------------------------

    /// Insert one blank row per selected row, after the last selected
    /// position. Empty selection is a no-op.
    pub fn add_rows(&mut self, rendered: &mut Vec<RenderedRow>) {
        if self.selection.is_empty() {
            return;
        }
        let last = self
            .selection
            .iter()
            .rev()
            .find(|&&p| p < rendered.len())
            .copied();
        let insert_at = match last {
            Some(p) => p + 1,
            None => rendered.len(),
        };
        let count = self.selection.len();

        let mut positions = Vec::with_capacity(count);
        for offset in 0..count {
            let pos = (insert_at + offset).min(rendered.len());
            rendered.insert(pos, RenderedRow::placeholder());
            positions.push(pos);
        }
        self.push_history(EditAction::Add { positions });
    }

    /// Remove the selected rows. Empty selection is a no-op. Selection is
    /// cleared afterwards.
    pub fn remove_rows(&mut self, rendered: &mut Vec<RenderedRow>) {
        let mut removed: Vec<(usize, RenderedRow)> = Vec::new();
        for &pos in self.selection.iter().rev() {
            if pos < rendered.len() {
                removed.push((pos, rendered.remove(pos)));
            }
        }
        self.selection.clear();
        if removed.is_empty() {
            return;
        }
        removed.reverse(); // ascending for restore
        self.push_history(EditAction::Remove { rows: removed });
    }

    /// Reverse the most recent add/remove. No-op when the stack is empty.
    pub fn undo(&mut self, rendered: &mut Vec<RenderedRow>) {
        let Some(action) = self.history.pop() else {
            return;
        };
        match action {
            EditAction::Add { positions } => {
                for &pos in positions.iter().rev() {
                    if pos < rendered.len() {
                        rendered.remove(pos);
                    }
                }
            }
            EditAction::Remove { rows } => {
                for (pos, row) in rows {
                    let pos = pos.min(rendered.len());
                    rendered.insert(pos, row);
                }
            }
        }
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    fn push_history(&mut self, action: EditAction) {
        if self.history.len() == MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push(action);
    }
}
