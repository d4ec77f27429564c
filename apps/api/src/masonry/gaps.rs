//! Gap detection over a finished simulation.
//!
//! A row above the last one that is partly filled and partly empty is a visible
//! hole. The last row may be partial; whether that is acceptable is decided by
//! [`is_truly_perfect`].

use std::collections::BTreeSet;

use serde::Serialize;

use crate::masonry::simulation::OccupancyGrid;
use crate::masonry::types::{GridItem, GridLayoutResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapReport {
    pub has_gaps: bool,
    pub gap_rows: BTreeSet<usize>,
}

/// Flag every non-last row that holds both occupied and empty cells.
///
/// Cells of tall items that reach past `total_rows` are ignored.
pub fn detect_gaps(all_items: &[GridItem], total_rows: usize, num_columns: usize) -> GapReport {
    let grid = OccupancyGrid::from_items(all_items, num_columns, total_rows);

    let gap_rows: BTreeSet<usize> = (0..total_rows.saturating_sub(1))
        .filter(|&row| grid.row_fill(row) == (true, true))
        .collect();

    GapReport {
        has_gaps: !gap_rows.is_empty(),
        gap_rows,
    }
}

/// A layout with no holes anywhere and a visually balanced last row.
///
/// Beyond `empty_slots == 0` and no gap rows: a lone last-row item must span
/// the full width, and a pair of last-row items must both be 1×1.
pub fn is_truly_perfect(
    all_items: &[GridItem],
    total_rows: usize,
    last_row_items: &[GridItem],
    num_columns: usize,
    empty_slots: usize,
) -> bool {
    if empty_slots != 0 {
        return false;
    }
    if detect_gaps(all_items, total_rows, num_columns).has_gaps {
        return false;
    }
    match last_row_items {
        [only] => only.col_span == num_columns.max(1),
        [a, b] => a.is_normal() && b.is_normal(),
        _ => true,
    }
}

/// [`is_truly_perfect`] applied to a whole simulation result.
pub fn layout_is_truly_perfect(layout: &GridLayoutResult, num_columns: usize) -> bool {
    is_truly_perfect(
        &layout.all_items,
        layout.total_rows,
        &layout.last_row_items,
        num_columns,
        layout.empty_slots,
    )
}
