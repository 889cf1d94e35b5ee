//! Positional alignment of the two panels' rendered rows.
//!
//! A sequential scan with forward lookahead pairs rows across the panels
//! by identifier, inserting blank placeholder rows so matching identifiers
//! occupy the same visual position, then pads the trailing length
//! difference. Greedy nearest-forward-match, not a minimal edit-distance
//! alignment: duplicate identifiers are rare and rows arrive date-sorted,
//! so the first forward occurrence wins.

use crate::project::RenderedRow;

/// Iteration ceiling guarding against pathological inputs. On exceeding it
/// the scan aborts, leaving a partial alignment rather than hanging.
pub const MAX_ALIGN_STEPS: usize = 100_000;

/// Align two rendered sequences by identifier.
///
/// Pure function: consumes both sequences, returns new ones. Invariants on
/// the output: equal lengths, and at every position either both
/// identifiers are equal and non-empty, at least one side is a
/// placeholder, or the pair is unmatched on both sides (no forward match
/// existed for either).
pub fn align(
    mut left: Vec<RenderedRow>,
    mut right: Vec<RenderedRow>,
) -> (Vec<RenderedRow>, Vec<RenderedRow>) {
    let mut i = 0;
    let mut steps = 0;

    while i < left.len() && i < right.len() {
        steps += 1;
        if steps > MAX_ALIGN_STEPS {
            break;
        }

        let left_id = left[i].identifier.trim();
        let right_id = right[i].identifier.trim();

        if !left_id.is_empty() && left_id == right_id {
            i += 1;
            continue;
        }

        // Does left[i]'s identifier appear later in right? Then right is
        // ahead by a gap: hold left back with a placeholder.
        if !left_id.is_empty() && found_ahead(&right, i + 1, left_id) {
            left.insert(i, RenderedRow::placeholder());
            continue;
        }

        // Symmetric: right[i]'s identifier appears later in left.
        if !right_id.is_empty() && found_ahead(&left, i + 1, right_id) {
            right.insert(i, RenderedRow::placeholder());
            continue;
        }

        // No match in either direction (including empty identifiers):
        // leave the rows side by side, unmatched, for the highlighter.
        i += 1;
    }

    // Pad the trailing length difference
    while left.len() < right.len() {
        left.push(RenderedRow::placeholder());
    }
    while right.len() < left.len() {
        right.push(RenderedRow::placeholder());
    }

    (left, right)
}

fn found_ahead(rows: &[RenderedRow], from: usize, id: &str) -> bool {
    rows[from.min(rows.len())..]
        .iter()
        .any(|r| r.identifier.trim() == id)
}
