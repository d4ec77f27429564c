//! What the renderer needs per photo: shape, spans, and the overall layout mode.

use serde::{Deserialize, Serialize};

use crate::masonry::classify::{item_shape, ItemShape};
use crate::masonry::types::MasonryLayoutConfig;

/// Albums this small render as plain columns instead of masonry.
pub const COLUMN_LAYOUT_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Columns,
    Masonry,
}

pub fn layout_mode(photo_count: usize) -> LayoutMode {
    if photo_count <= COLUMN_LAYOUT_THRESHOLD {
        LayoutMode::Columns
    } else {
        LayoutMode::Masonry
    }
}

/// Grid spans for one photo, as the renderer applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSpan {
    pub index: usize,
    pub shape: ItemShape,
    pub row_span: usize,
    pub col_span: usize,
}

/// Replay the classifier with the config's pattern and overrides for every index.
///
/// The spans match the ones the orchestrator validated in its final simulation.
pub fn item_spans(config: &MasonryLayoutConfig, photo_count: usize, num_columns: usize) -> Vec<ItemSpan> {
    (0..photo_count)
        .map(|index| {
            let shape = item_shape(index, config.pattern_index, Some(&config.overrides));
            let (row_span, col_span) = shape.spans(num_columns);
            ItemSpan {
                index,
                shape,
                row_span,
                col_span,
            }
        })
        .collect()
}
