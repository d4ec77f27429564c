//! Perfect-pattern search: try every pattern before resorting to fixups.

use tracing::debug;

use crate::masonry::gaps::layout_is_truly_perfect;
use crate::masonry::patterns::cyclic_order;
use crate::masonry::simulation::simulate_grid_layout;

/// First pattern, in cyclic order from `start_pattern_index`, whose plain
/// simulation is truly perfect. Returns `start_pattern_index` unchanged when
/// none is.
pub fn find_perfect_pattern(photo_count: usize, start_pattern_index: usize, num_columns: usize) -> usize {
    for pattern_index in cyclic_order(start_pattern_index) {
        let layout = simulate_grid_layout(photo_count, pattern_index, num_columns, None);
        if layout_is_truly_perfect(&layout, num_columns) {
            debug!(photo_count, num_columns, pattern_index, "found perfect pattern");
            return pattern_index;
        }
    }
    start_pattern_index
}
