//! `tallyview-engine` — Two-panel reconciliation engine.
//!
//! Pure engine crate: receives pre-parsed tables, returns rendered rows,
//! aligned sequences, and cell-level diff annotations. No CLI or IO
//! dependencies, and no fallible surface — malformed values degrade to
//! documented defaults instead of erroring.

pub mod align;
pub mod diff;
pub mod normalize;
pub mod panel;
pub mod project;
pub mod table;
pub mod totals;
pub mod view;

pub use align::align;
pub use diff::{highlight, RowDiff};
pub use normalize::DateOrder;
pub use panel::{PanelSide, PanelState};
pub use project::{project, RenderedRow};
pub use table::{HeaderIndex, Table};
pub use view::{GroupingMode, SortMode, ViewOptions};
