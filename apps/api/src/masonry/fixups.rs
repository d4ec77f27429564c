//! Fixup engine: per-item overrides that repair layouts no pattern tiles perfectly.
//!
//! # Passes (in order, each re-simulating before the next)
//! 1. Middle-row gaps: flatten tall items that touch a hole above the last row.
//! 2. Tail stabilization: flatten every spanning item in the last three rows.
//! 3. Last two rows (3 columns only): closed-form wide assignments that fill
//!    exactly `2 × num_columns` cells.
//! 4. Last row: expand a lone item, rebalance pairs, fill remaining empty slots,
//!    and flatten any tall item left hanging below the grid.
//!
//! Later passes assume earlier ones already ran; a pass whose precondition no
//! longer holds does nothing. Writing an override for an index replaces any
//! earlier override for that index.

use std::ops::ControlFlow;

use tracing::debug;

use crate::masonry::gaps::detect_gaps;
use crate::masonry::simulation::simulate_grid_layout;
use crate::masonry::types::{GridItem, GridLayoutResult, Overrides, SizeOverride};

/// Tunable choices that are aesthetic rather than correctness fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixupPolicy {
    /// When the last row is exactly two 1×1 items, make the first one tall.
    pub tall_accent: bool,
}

impl Default for FixupPolicy {
    fn default() -> Self {
        Self { tall_accent: true }
    }
}

/// Overrides for `(photo_count, pattern_index, num_columns)` under the default policy.
pub fn create_fixups(photo_count: usize, pattern_index: usize, num_columns: usize) -> Overrides {
    create_fixups_with_policy(photo_count, pattern_index, num_columns, FixupPolicy::default())
}

pub fn create_fixups_with_policy(
    photo_count: usize,
    pattern_index: usize,
    num_columns: usize,
    policy: FixupPolicy,
) -> Overrides {
    let mut fixer = Fixer::new(photo_count, pattern_index, num_columns.max(1));
    if fixer.layout.last_row_items.is_empty() {
        return fixer.overrides;
    }

    let passes: [fn(&mut Fixer, FixupPolicy) -> ControlFlow<()>; 4] = [
        Fixer::repair_middle_gaps,
        Fixer::stabilize_tail,
        Fixer::repair_last_two_rows,
        Fixer::repair_last_row,
    ];
    for pass in passes {
        if pass(&mut fixer, policy).is_break() {
            break;
        }
    }

    debug!(
        photo_count,
        pattern_index,
        num_columns,
        overrides = fixer.overrides.len(),
        "fixups computed"
    );
    fixer.overrides
}

// ────────────────────────────────────────────────────────────────────────────
// Pass machinery
// ────────────────────────────────────────────────────────────────────────────

struct Fixer {
    photo_count: usize,
    pattern_index: usize,
    num_columns: usize,
    overrides: Overrides,
    layout: GridLayoutResult,
}

/// Drop tallness, keep whatever width the item currently has.
fn flatten_height(item: &GridItem) -> SizeOverride {
    SizeOverride::shape(false, item.col_span == 2)
}

impl Fixer {
    fn new(photo_count: usize, pattern_index: usize, num_columns: usize) -> Self {
        Self {
            photo_count,
            pattern_index,
            num_columns,
            overrides: Overrides::new(),
            layout: simulate_grid_layout(photo_count, pattern_index, num_columns, None),
        }
    }

    fn set(&mut self, index: usize, size: SizeOverride) {
        self.overrides.insert(index, size);
    }

    fn resimulate(&mut self) {
        self.layout = simulate_grid_layout(
            self.photo_count,
            self.pattern_index,
            self.num_columns,
            Some(&self.overrides),
        );
    }

    fn items_in_row(&self, row: usize) -> Vec<GridItem> {
        self.layout
            .all_items
            .iter()
            .filter(|item| item.row == row)
            .copied()
            .collect()
    }

    // ── Pass 1 ──────────────────────────────────────────────────────────────

    fn repair_middle_gaps(&mut self, _: FixupPolicy) -> ControlFlow<()> {
        let report = detect_gaps(&self.layout.all_items, self.layout.total_rows, self.num_columns);
        if !report.has_gaps {
            return ControlFlow::Continue(());
        }

        let culprits: Vec<GridItem> = self
            .layout
            .all_items
            .iter()
            .filter(|item| item.is_tall())
            .filter(|item| report.gap_rows.iter().any(|&row| item.covers_row(row)))
            .copied()
            .collect();
        for item in &culprits {
            self.set(item.index, flatten_height(item));
        }
        self.resimulate();
        debug!(gap_rows = ?report.gap_rows, flattened = culprits.len(), "middle-row gap repair");

        let still_gapped =
            detect_gaps(&self.layout.all_items, self.layout.total_rows, self.num_columns).has_gaps;
        if !still_gapped && self.layout.empty_slots == 0 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    // ── Pass 2 ──────────────────────────────────────────────────────────────

    fn stabilize_tail(&mut self, _: FixupPolicy) -> ControlFlow<()> {
        let total_rows = self.layout.total_rows;
        if total_rows < 3 {
            return ControlFlow::Continue(());
        }

        let spanning: Vec<usize> = self
            .layout
            .all_items
            .iter()
            .filter(|item| item.row >= total_rows - 3)
            .filter(|item| !item.is_normal())
            .map(|item| item.index)
            .collect();
        if spanning.is_empty() {
            return ControlFlow::Continue(());
        }

        for &index in &spanning {
            self.set(index, SizeOverride::flat());
        }
        self.resimulate();
        debug!(flattened = spanning.len(), "tail stabilization");
        ControlFlow::Continue(())
    }

    // ── Pass 3 ──────────────────────────────────────────────────────────────

    fn repair_last_two_rows(&mut self, _: FixupPolicy) -> ControlFlow<()> {
        let total_rows = self.layout.total_rows;
        if total_rows < 2 || self.num_columns != 3 {
            return ControlFlow::Continue(());
        }

        let upper = self.items_in_row(total_rows - 2);
        let lower = self.layout.last_row_items.clone();
        let upper_filled: usize = upper.iter().map(|item| item.col_span).sum();
        let lower_filled: usize = lower.iter().map(|item| item.col_span).sum();
        let empty = (self.num_columns * 2).saturating_sub(upper_filled + lower_filled);
        if empty == 0 {
            return ControlFlow::Continue(());
        }

        let mut combined: Vec<GridItem> = upper.iter().chain(&lower).copied().collect();
        combined.sort_by_key(|item| (item.row, item.col));

        match (combined.len(), empty) {
            // 3 × wide = 6 cells.
            (3, 3) => {
                for item in &combined {
                    self.set(item.index, SizeOverride::wide());
                }
            }
            // 2 × wide + 2 × normal = 6 cells.
            (4, 2) => {
                for (i, item) in combined.iter().enumerate() {
                    let size = if i < 2 { SizeOverride::wide() } else { SizeOverride::flat() };
                    self.set(item.index, size);
                }
            }
            // Five cells filled: widen the last narrow item of the bottom row. Without
            // one, or with the hole above, nothing here closes it; pass 4 takes over.
            (4, 1) => {
                let narrow = lower.iter().rev().find(|item| item.col_span == 1);
                match narrow {
                    Some(item) if upper_filled >= self.num_columns => {
                        self.set(item.index, SizeOverride::wide());
                    }
                    _ => return ControlFlow::Continue(()),
                }
            }
            // 1 × wide + 4 × normal = 6 cells.
            (5, 1) => {
                for (i, item) in combined.iter().enumerate() {
                    let size = if i == 0 { SizeOverride::wide() } else { SizeOverride::flat() };
                    self.set(item.index, size);
                }
            }
            _ => return ControlFlow::Continue(()),
        }

        debug!(items = combined.len(), empty, "joint last-two-row repair");
        ControlFlow::Break(())
    }

    // ── Pass 4 ──────────────────────────────────────────────────────────────

    fn repair_last_row(&mut self, policy: FixupPolicy) -> ControlFlow<()> {
        let cols = self.num_columns;
        let last = self.layout.last_row_items.clone();

        // Lone item: stretch it across the row.
        if let [only] = last.as_slice() {
            if only.col_span < cols {
                let size = if cols == 2 {
                    SizeOverride::wide()
                } else {
                    SizeOverride::full_width()
                };
                self.set(only.index, size);
                debug!(index = only.index, "expanded lone last-row item");
            }
            return ControlFlow::Break(());
        }

        if let [first, second] = last.as_slice() {
            if first.is_normal() && second.is_normal() && self.layout.empty_slots == 0 {
                if policy.tall_accent {
                    self.set(first.index, SizeOverride::shape(true, false));
                    debug!(index = first.index, "tall accent on balanced last row");
                }
                return ControlFlow::Break(());
            }
            if !first.is_normal() || !second.is_normal() {
                self.set(first.index, SizeOverride::flat());
                self.set(second.index, SizeOverride::flat());
                self.resimulate();
                debug!("flattened unbalanced last-row pair");
            }
        }

        let last = self.layout.last_row_items.clone();
        let empty = self.layout.empty_slots;
        if empty > 0 {
            if let Some(tail) = last.last() {
                if empty == 1 {
                    self.set(tail.index, SizeOverride::wide());
                    debug!(index = tail.index, "widened last item into final slot");
                    return ControlFlow::Break(());
                }
                if last.len() == 1 && cols >= 3 {
                    self.set(tail.index, SizeOverride::full_width());
                    debug!(index = tail.index, "expanded lone last-row item");
                    return ControlFlow::Break(());
                }
            }
        }

        // Tall items in the last row hang below the grid.
        for item in last.iter().filter(|item| item.is_tall()) {
            self.set(item.index, flatten_height(item));
        }
        ControlFlow::Break(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masonry::gaps::layout_is_truly_perfect;
    use crate::masonry::get_masonry_layout;
    use crate::masonry::patterns::PATTERN_COUNT;

    fn expected(entries: &[(usize, SizeOverride)]) -> Overrides {
        entries.iter().copied().collect()
    }

    fn final_layout(n: usize, p: usize, cols: usize) -> GridLayoutResult {
        let overrides = create_fixups(n, p, cols);
        simulate_grid_layout(n, p, cols, Some(&overrides))
    }

    #[test]
    fn test_empty_collection_needs_no_fixups() {
        assert!(create_fixups(0, 0, 2).is_empty());
        assert!(create_fixups(0, 4, 3).is_empty());
    }

    #[test]
    fn test_lone_item_goes_wide_on_two_columns() {
        assert_eq!(create_fixups(1, 0, 2), expected(&[(0, SizeOverride::wide())]));
    }

    #[test]
    fn test_lone_item_goes_full_width_on_three_or_more_columns() {
        assert_eq!(create_fixups(1, 0, 3), expected(&[(0, SizeOverride::full_width())]));
        assert_eq!(create_fixups(1, 0, 4), expected(&[(0, SizeOverride::full_width())]));
    }

    #[test]
    fn test_single_column_layouts_end_perfect() {
        for p in 0..PATTERN_COUNT {
            for n in 0..60 {
                assert!(final_layout(n, p, 1).is_perfect, "pattern {p}, {n} photos");
            }
        }
    }

    #[test]
    fn test_two_normal_items_get_tall_accent() {
        assert_eq!(
            create_fixups(2, 0, 2),
            expected(&[(0, SizeOverride::shape(true, false))])
        );
    }

    #[test]
    fn test_tall_accent_can_be_disabled() {
        let policy = FixupPolicy { tall_accent: false };
        assert!(create_fixups_with_policy(2, 0, 2, policy).is_empty());
    }

    #[test]
    fn test_unbalanced_pair_is_flattened() {
        // Pattern 1, 4 photos, 2 columns: 3 is tall beside 2.
        assert_eq!(
            create_fixups(4, 1, 2),
            expected(&[(2, SizeOverride::flat()), (3, SizeOverride::flat())])
        );
    }

    #[test]
    fn test_middle_gap_repair_can_finish_early() {
        assert_eq!(create_fixups(10, 2, 2), expected(&[(7, SizeOverride::flat())]));
        assert_eq!(create_fixups(7, 0, 3), expected(&[(4, SizeOverride::flat())]));
    }

    #[test]
    fn test_two_row_repair_three_items_three_empty() {
        assert_eq!(
            create_fixups(35, 9, 3),
            expected(&[
                (28, SizeOverride::flat()),
                (32, SizeOverride::wide()),
                (33, SizeOverride::wide()),
                (34, SizeOverride::wide()),
            ])
        );
    }

    #[test]
    fn test_two_row_repair_four_items_two_empty() {
        assert_eq!(
            create_fixups(4, 1, 3),
            expected(&[
                (0, SizeOverride::wide()),
                (1, SizeOverride::wide()),
                (2, SizeOverride::flat()),
                (3, SizeOverride::flat()),
            ])
        );
    }

    #[test]
    fn test_two_row_repair_skips_an_already_wide_bottom_item() {
        // Pattern 0, 4 photos, 3 columns: the bottom row is item 2 alone and already
        // wide, so the lone-item rule makes it full width.
        assert_eq!(create_fixups(4, 0, 3), expected(&[(2, SizeOverride::full_width())]));
        let layout = final_layout(4, 0, 3);
        assert_eq!(layout.empty_slots, 0);
        assert_eq!(layout.total_rows, 2);
        assert!(get_masonry_layout(None, 4, 3).is_perfect);
    }

    /// Fixer over a pattern-free grid with hand-set overrides.
    fn fixer_with(photo_count: usize, entries: &[(usize, SizeOverride)]) -> Fixer {
        let mut fixer = Fixer::new(photo_count, PATTERN_COUNT, 3);
        for &(index, size) in entries {
            fixer.set(index, size);
        }
        fixer.resimulate();
        fixer
    }

    #[test]
    fn test_two_row_repair_widens_a_narrow_bottom_item() {
        // Row 0: wide 0 + 1. Row 1: 2 and 3, one cell free.
        let mut fixer = fixer_with(4, &[(0, SizeOverride::wide())]);
        assert_eq!(fixer.layout.empty_slots, 1);

        assert!(fixer.repair_last_two_rows(FixupPolicy::default()).is_break());
        assert_eq!(
            fixer.overrides,
            expected(&[(0, SizeOverride::wide()), (3, SizeOverride::wide())])
        );
        fixer.resimulate();
        assert_eq!(fixer.layout.empty_slots, 0);
        assert_eq!(fixer.layout.total_rows, 2);
    }

    #[test]
    fn test_two_row_repair_leaves_upper_row_shortfall_alone() {
        // Tall 0 reaches into row 1, so row 1's own items cover only two cells even
        // though the grid is full. Widening anything would break the layout.
        let entries = [(0, SizeOverride::shape(true, false)), (6, SizeOverride::wide())];
        let mut fixer = fixer_with(7, &entries);
        assert_eq!(fixer.layout.total_rows, 3);
        assert_eq!(fixer.layout.empty_slots, 0);

        assert!(fixer.repair_last_two_rows(FixupPolicy::default()).is_continue());
        assert_eq!(fixer.overrides, expected(&entries));
    }

    #[test]
    fn test_two_row_repair_five_items_one_empty() {
        let overrides = create_fixups(5, 1, 3);
        assert_eq!(overrides.get(&0), Some(&SizeOverride::wide()));
        for i in 1..5 {
            assert_eq!(overrides.get(&i), Some(&SizeOverride::flat()), "index {i}");
        }
    }

    #[test]
    fn test_single_empty_slot_widens_last_item() {
        assert_eq!(create_fixups(2, 0, 3), expected(&[(1, SizeOverride::wide())]));
        let layout = final_layout(2, 0, 3);
        assert_eq!(layout.total_rows, 1);
        assert_eq!(layout.empty_slots, 0);
    }

    #[test]
    fn test_hanging_tall_items_are_flattened() {
        // Pattern 4, 3 photos, 3 columns: item 2 is tall in an otherwise full
        // single row and would hang below it.
        let overrides = create_fixups(3, 4, 3);
        assert_eq!(overrides, expected(&[(2, SizeOverride::flat())]));
        let layout = simulate_grid_layout(3, 4, 3, Some(&overrides));
        assert!(layout.last_row_items.iter().all(|item| !item.is_tall()));
        assert_eq!(layout.total_rows, 1);
    }

    #[test]
    fn test_two_column_layouts_always_end_perfect() {
        for p in 0..PATTERN_COUNT {
            for n in 1..=120 {
                let layout = final_layout(n, p, 2);
                assert!(layout.is_perfect, "pattern {p}, {n} photos: {layout:?}");
            }
        }
    }

    #[test]
    fn test_fixups_are_deterministic() {
        for p in 0..PATTERN_COUNT {
            assert_eq!(create_fixups(57, p, 3), create_fixups(57, p, 3));
        }
    }

    #[test]
    fn test_fixups_keep_a_truly_perfect_layout_filled() {
        // Pattern 3 already tiles 10 photos on 2 columns. Tail stabilization
        // still reshapes the end, and the result must stay filled.
        let base = simulate_grid_layout(10, 3, 2, None);
        assert!(layout_is_truly_perfect(&base, 2));
        let layout = final_layout(10, 3, 2);
        assert_eq!(layout.empty_slots, 0);
    }
}
