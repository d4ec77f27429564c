// Masonry grid layout engine.
// Deterministic pattern choice per collection, dense-placement simulation,
// gap detection, and localized fixups. Pure and synchronous; no shared state.

pub mod classify;
pub mod fixups;
pub mod gaps;
pub mod hash;
pub mod patterns;
pub mod perfect;
pub mod simulation;
pub mod spans;
pub mod types;

use tracing::debug;

pub use classify::{
    is_big_item, is_full_width_item, is_tall_item, is_wide_item, item_shape, ItemShape,
};
pub use fixups::{create_fixups, create_fixups_with_policy, FixupPolicy};
pub use gaps::{detect_gaps, is_truly_perfect, GapReport};
pub use hash::{hash_string, select_pattern_index};
pub use patterns::{MASONRY_PATTERNS, PATTERN_COUNT};
pub use perfect::find_perfect_pattern;
pub use simulation::simulate_grid_layout;
pub use spans::{item_spans, layout_mode, ItemSpan, LayoutMode, COLUMN_LAYOUT_THRESHOLD};
pub use types::{GridItem, GridLayoutResult, MasonryLayoutConfig, Overrides, SizeOverride};

/// Default column count when the caller does not choose one.
pub const DEFAULT_COLUMNS: usize = 2;

/// Widest grid the service will lay out.
pub const MAX_COLUMNS: usize = 12;

/// Compute the final layout for a collection.
///
/// 1. Hash the collection id to a starting pattern.
/// 2. Search all patterns, in cyclic order, for a truly perfect tiling.
/// 3. Compute fixups for the chosen pattern.
/// 4. Re-simulate with the fixups for the reported stats.
///
/// Total for every `photo_count` and `num_columns`; never panics.
pub fn get_masonry_layout(
    collection_id: Option<&str>,
    photo_count: usize,
    num_columns: usize,
) -> MasonryLayoutConfig {
    let start = select_pattern_index(collection_id);
    let pattern_index = find_perfect_pattern(photo_count, start, num_columns);
    let overrides = create_fixups(photo_count, pattern_index, num_columns);
    let layout = simulate_grid_layout(photo_count, pattern_index, num_columns, Some(&overrides));

    debug!(
        start,
        pattern_index,
        photo_count,
        num_columns,
        total_rows = layout.total_rows,
        empty_slots = layout.empty_slots,
        "masonry layout computed"
    );

    MasonryLayoutConfig {
        pattern_index,
        overrides,
        is_perfect: layout.is_perfect,
        total_rows: layout.total_rows,
        empty_slots: layout.empty_slots,
        tried_patterns: patterns::cyclic_order(start).collect(),
    }
}
