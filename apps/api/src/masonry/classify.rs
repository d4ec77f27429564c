//! Item classifier: decides each photo's span shape from the pattern and overrides.
//!
//! Overrides win field by field: an override that only sets `tall` still lets
//! the pattern decide `wide`. Out-of-range pattern indices classify everything
//! as normal.

use serde::{Deserialize, Serialize};

use crate::masonry::patterns::pattern;
use crate::masonry::types::{Overrides, SizeOverride};

/// The single classification a photo receives in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemShape {
    /// 1×1.
    Normal,
    /// Two rows, one column.
    Tall,
    /// One row, two columns.
    Wide,
    /// Two rows, two columns.
    Big,
    /// One row, every column. Only reachable through an override.
    FullWidth,
}

impl ItemShape {
    /// Grid class name used by the gallery stylesheet. Normal items carry none.
    pub fn css_class(self) -> &'static str {
        match self {
            ItemShape::Normal => "",
            ItemShape::Tall => "tall",
            ItemShape::Wide => "wide",
            ItemShape::Big => "big",
            ItemShape::FullWidth => "full-width",
        }
    }

    /// `(row_span, col_span)` on a grid of `num_columns` columns.
    ///
    /// Two-column spans are clamped so they never exceed the grid.
    pub fn spans(self, num_columns: usize) -> (usize, usize) {
        let cols = num_columns.max(1);
        match self {
            ItemShape::Normal => (1, 1),
            ItemShape::Tall => (2, 1),
            ItemShape::Wide => (1, 2.min(cols)),
            ItemShape::Big => (2, 2.min(cols)),
            ItemShape::FullWidth => (1, cols),
        }
    }
}

fn override_for(index: usize, overrides: Option<&Overrides>) -> Option<&SizeOverride> {
    overrides.and_then(|o| o.get(&index))
}

/// Whether item `index` spans two rows.
pub fn is_tall_item(index: usize, pattern_index: usize, overrides: Option<&Overrides>) -> bool {
    if let Some(tall) = override_for(index, overrides).and_then(|o| o.tall) {
        return tall;
    }
    pattern(pattern_index)
        .map(|p| p.tall_rules.iter().any(|rule| rule.matches(index)))
        .unwrap_or(false)
}

/// Whether item `index` spans two columns.
pub fn is_wide_item(index: usize, pattern_index: usize, overrides: Option<&Overrides>) -> bool {
    if let Some(wide) = override_for(index, overrides).and_then(|o| o.wide) {
        return wide;
    }
    pattern(pattern_index)
        .map(|p| p.wide_rules.iter().any(|rule| rule.matches(index)))
        .unwrap_or(false)
}

/// Tall and wide at once (2×2).
pub fn is_big_item(index: usize, pattern_index: usize, overrides: Option<&Overrides>) -> bool {
    is_tall_item(index, pattern_index, overrides) && is_wide_item(index, pattern_index, overrides)
}

/// Full width is never derived from a pattern; only an explicit override sets it.
pub fn is_full_width_item(index: usize, overrides: Option<&Overrides>) -> bool {
    override_for(index, overrides)
        .and_then(|o| o.full_width)
        .unwrap_or(false)
}

/// Collapse the classifier outputs into one shape. Full width beats everything.
pub fn item_shape(index: usize, pattern_index: usize, overrides: Option<&Overrides>) -> ItemShape {
    if is_full_width_item(index, overrides) {
        return ItemShape::FullWidth;
    }
    match (
        is_tall_item(index, pattern_index, overrides),
        is_wide_item(index, pattern_index, overrides),
    ) {
        (true, true) => ItemShape::Big,
        (true, false) => ItemShape::Tall,
        (false, true) => ItemShape::Wide,
        (false, false) => ItemShape::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masonry::patterns::PATTERN_COUNT;
    use crate::masonry::types::SizeOverride;

    fn overrides(entries: &[(usize, SizeOverride)]) -> Overrides {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_pattern_zero_tall_indices() {
        // 13n + 4 and 19n + 10
        for i in [4, 17, 10, 29] {
            assert!(is_tall_item(i, 0, None), "index {i} should be tall");
        }
        for i in [0, 1, 2] {
            assert!(!is_tall_item(i, 0, None), "index {i} should not be tall");
        }
    }

    #[test]
    fn test_pattern_zero_wide_indices() {
        // 17n + 2 and 23n + 6
        for i in [2, 19, 6, 29] {
            assert!(is_wide_item(i, 0, None), "index {i} should be wide");
        }
        for i in [0, 1, 3] {
            assert!(!is_wide_item(i, 0, None), "index {i} should not be wide");
        }
    }

    #[test]
    fn test_big_requires_both_dimensions() {
        assert!(is_big_item(29, 0, None));
        assert!(!is_big_item(4, 0, None), "tall only");
        assert!(!is_big_item(2, 0, None), "wide only");
        assert!(!is_big_item(0, 0, None));
    }

    #[test]
    fn test_big_is_tall_and_wide_for_every_pattern() {
        for p in 0..PATTERN_COUNT {
            for i in 0..200 {
                assert_eq!(
                    is_big_item(i, p, None),
                    is_tall_item(i, p, None) && is_wide_item(i, p, None),
                    "pattern {p}, index {i}"
                );
            }
        }
    }

    #[test]
    fn test_patterns_are_pairwise_distinct() {
        for a in 0..PATTERN_COUNT {
            for b in (a + 1)..PATTERN_COUNT {
                let identical = (0..100).all(|i| {
                    is_tall_item(i, a, None) == is_tall_item(i, b, None)
                        && is_wide_item(i, a, None) == is_wide_item(i, b, None)
                });
                assert!(!identical, "patterns {a} and {b} classify 0..100 identically");
            }
        }
    }

    #[test]
    fn test_out_of_range_pattern_is_all_normal() {
        for i in 0..50 {
            assert!(!is_tall_item(i, PATTERN_COUNT, None));
            assert!(!is_wide_item(i, 99, None));
            assert_eq!(item_shape(i, 99, None), ItemShape::Normal);
        }
    }

    #[test]
    fn test_tall_override_beats_pattern() {
        let o = overrides(&[(5, SizeOverride { tall: Some(true), ..Default::default() })]);
        assert!(!is_tall_item(5, 0, None));
        assert!(is_tall_item(5, 0, Some(&o)));
    }

    #[test]
    fn test_wide_override_can_clear_pattern() {
        let o = overrides(&[(2, SizeOverride { wide: Some(false), ..Default::default() })]);
        assert!(is_wide_item(2, 0, None));
        assert!(!is_wide_item(2, 0, Some(&o)));
    }

    #[test]
    fn test_override_is_field_by_field() {
        // Index 29 is big in pattern 0; overriding only `tall` keeps it wide.
        let o = overrides(&[(29, SizeOverride { tall: Some(false), ..Default::default() })]);
        assert_eq!(item_shape(29, 0, Some(&o)), ItemShape::Wide);
    }

    #[test]
    fn test_big_override() {
        let o = overrides(&[(0, SizeOverride::shape(true, true))]);
        assert!(is_big_item(0, 0, Some(&o)));
        assert_eq!(item_shape(0, 0, Some(&o)), ItemShape::Big);
    }

    #[test]
    fn test_full_width_only_from_override() {
        for i in 0..100 {
            assert!(!is_full_width_item(i, None));
        }
        let o = overrides(&[(3, SizeOverride::full_width())]);
        assert!(is_full_width_item(3, Some(&o)));
        assert_eq!(item_shape(3, 0, Some(&o)), ItemShape::FullWidth);
    }

    #[test]
    fn test_shape_spans_clamp_to_grid() {
        assert_eq!(ItemShape::Wide.spans(1), (1, 1));
        assert_eq!(ItemShape::Big.spans(1), (2, 1));
        assert_eq!(ItemShape::Wide.spans(3), (1, 2));
        assert_eq!(ItemShape::FullWidth.spans(3), (1, 3));
        assert_eq!(ItemShape::FullWidth.spans(0), (1, 1));
    }

    #[test]
    fn test_css_class_names() {
        assert_eq!(ItemShape::Normal.css_class(), "");
        assert_eq!(ItemShape::Big.css_class(), "big");
        assert_eq!(ItemShape::FullWidth.css_class(), "full-width");
    }
}
