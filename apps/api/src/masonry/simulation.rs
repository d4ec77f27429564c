//! Grid simulator: replays CSS Grid `grid-auto-flow: dense` placement.
//!
//! Items are placed one by one in index order. Each placement search restarts
//! from the top-left of the grid, so earlier holes are backfilled by later,
//! smaller items before new rows open.

use crate::masonry::classify::{is_full_width_item, is_tall_item, is_wide_item};
use crate::masonry::types::{GridItem, GridLayoutResult, Overrides};

// ────────────────────────────────────────────────────────────────────────────
// Occupancy grid
// ────────────────────────────────────────────────────────────────────────────

/// Row-major occupancy map, grown on demand.
#[derive(Debug, Clone)]
pub(crate) struct OccupancyGrid {
    num_columns: usize,
    rows: Vec<Vec<bool>>,
    /// Every row above this one is completely filled.
    first_open_row: usize,
}

impl OccupancyGrid {
    pub(crate) fn new(num_columns: usize) -> Self {
        Self {
            num_columns,
            rows: Vec::new(),
            first_open_row: 0,
        }
    }

    /// Rebuild occupancy from placed items, ignoring cells at or past `max_rows`.
    pub(crate) fn from_items(items: &[GridItem], num_columns: usize, max_rows: usize) -> Self {
        let mut grid = Self::new(num_columns);
        grid.ensure_rows(max_rows);
        for item in items {
            for row in item.row..(item.row + item.row_span).min(max_rows) {
                for col in item.col..(item.col + item.col_span).min(num_columns) {
                    grid.rows[row][col] = true;
                }
            }
        }
        grid
    }

    pub(crate) fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// `(has_filled, has_empty)` for one row.
    pub(crate) fn row_fill(&self, row: usize) -> (bool, bool) {
        let cells = (0..self.num_columns).map(|col| self.is_occupied(row, col));
        cells.fold((false, false), |(filled, empty), occupied| {
            (filled || occupied, empty || !occupied)
        })
    }

    fn fits(&self, row: usize, col: usize, row_span: usize, col_span: usize) -> bool {
        col + col_span <= self.num_columns
            && (row..row + row_span)
                .all(|r| (col..col + col_span).all(|c| !self.is_occupied(r, c)))
    }

    /// First `(row, col)` in row-major order where the span fits.
    ///
    /// Starts at the first row with a free cell; rows above it cannot host the
    /// top-left corner of anything. Terminates because `col_span <= num_columns`
    /// and the grid is unbounded below.
    fn find_slot(&self, row_span: usize, col_span: usize) -> (usize, usize) {
        let mut row = self.first_open_row;
        loop {
            for col in 0..=(self.num_columns - col_span) {
                if self.fits(row, col, row_span, col_span) {
                    return (row, col);
                }
            }
            row += 1;
        }
    }

    fn ensure_rows(&mut self, count: usize) {
        while self.rows.len() < count {
            self.rows.push(vec![false; self.num_columns]);
        }
    }

    fn mark(&mut self, row: usize, col: usize, row_span: usize, col_span: usize) {
        self.ensure_rows(row + row_span);
        for r in row..row + row_span {
            for c in col..col + col_span {
                self.rows[r][c] = true;
            }
        }
        while self
            .rows
            .get(self.first_open_row)
            .is_some_and(|r| r.iter().all(|&cell| cell))
        {
            self.first_open_row += 1;
        }
    }

    /// Place a span at the first free position and claim its cells.
    fn place(&mut self, row_span: usize, col_span: usize) -> (usize, usize) {
        let (row, col) = self.find_slot(row_span, col_span);
        self.mark(row, col, row_span, col_span);
        (row, col)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Simulation
// ────────────────────────────────────────────────────────────────────────────

/// Simulate dense placement of `photo_count` items.
///
/// A column count of 0 is treated as 1. Wide spans are clamped to the grid.
/// An empty collection yields zero rows, no last-row items, zero empty slots,
/// and `is_perfect == true`.
pub fn simulate_grid_layout(
    photo_count: usize,
    pattern_index: usize,
    num_columns: usize,
    overrides: Option<&Overrides>,
) -> GridLayoutResult {
    let num_columns = num_columns.max(1);
    let mut grid = OccupancyGrid::new(num_columns);
    let mut items = Vec::with_capacity(photo_count);

    for index in 0..photo_count {
        let row_span = if is_tall_item(index, pattern_index, overrides) {
            2
        } else {
            1
        };
        let col_span = if is_full_width_item(index, overrides) {
            num_columns
        } else if is_wide_item(index, pattern_index, overrides) {
            2.min(num_columns)
        } else {
            1
        };

        let (row, col) = grid.place(row_span, col_span);
        items.push(GridItem {
            index,
            row,
            col,
            row_span,
            col_span,
        });
    }

    summarize(items, num_columns)
}

fn summarize(items: Vec<GridItem>, num_columns: usize) -> GridLayoutResult {
    let last_row = items.iter().map(|item| item.row).max();
    let Some(last_row) = last_row else {
        return GridLayoutResult {
            total_rows: 0,
            last_row_items: Vec::new(),
            empty_slots: 0,
            is_perfect: true,
            all_items: items,
        };
    };

    let last_row_items: Vec<GridItem> = items
        .iter()
        .filter(|item| item.row == last_row)
        .copied()
        .collect();
    let filled: usize = last_row_items.iter().map(|item| item.col_span).sum();
    let empty_slots = num_columns.saturating_sub(filled);

    GridLayoutResult {
        total_rows: last_row + 1,
        last_row_items,
        empty_slots,
        is_perfect: empty_slots == 0,
        all_items: items,
    }
}
