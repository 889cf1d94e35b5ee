// Exit code registry (single source of truth)

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
/// `view --check` found flagged cells.
pub const EXIT_MISMATCH: u8 = 10;
