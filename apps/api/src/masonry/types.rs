//! Data model shared by every stage of the masonry engine.
//!
//! Everything here is transient: results are recomputed from
//! `(collection_id, photo_count, num_columns)` on every call and never mutated
//! after a simulation pass returns them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Pattern rules
// ────────────────────────────────────────────────────────────────────────────

/// A modulo rule: index `i` matches iff `i % modulus == remainder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub modulus: usize,
    pub remainder: usize,
}

impl Rule {
    pub const fn new(modulus: usize, remainder: usize) -> Self {
        Self { modulus, remainder }
    }

    /// True when `index` falls on this rule's residue class.
    pub fn matches(&self, index: usize) -> bool {
        self.modulus != 0 && index % self.modulus == self.remainder
    }
}

/// A curated set of tall and wide rules. An item is tall if it matches ANY tall
/// rule and wide if it matches ANY wide rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pattern {
    pub tall_rules: &'static [Rule],
    pub wide_rules: &'static [Rule],
}

// ────────────────────────────────────────────────────────────────────────────
// Overrides
// ────────────────────────────────────────────────────────────────────────────

/// Explicit per-index classification produced by the fixup engine.
///
/// Each `Some` field supersedes the pattern-derived value for that field only.
/// `full_width` is never derived from a pattern; it exists only as an override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tall: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wide: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_width: Option<bool>,
}

impl SizeOverride {
    /// Force both dimensions to the given values.
    pub fn shape(tall: bool, wide: bool) -> Self {
        Self {
            tall: Some(tall),
            wide: Some(wide),
            full_width: None,
        }
    }

    /// 1×1 regardless of the pattern.
    pub fn flat() -> Self {
        Self::shape(false, false)
    }

    /// Single-row, two-column item.
    pub fn wide() -> Self {
        Self::shape(false, true)
    }

    /// Single-row item spanning every column. Wideness is left to the pattern
    /// because the full-width span supersedes it.
    pub fn full_width() -> Self {
        Self {
            tall: Some(false),
            wide: None,
            full_width: Some(true),
        }
    }
}

/// Index → override mapping, scoped to one layout computation.
///
/// Ordered so iteration and serialized output are deterministic.
pub type Overrides = BTreeMap<usize, SizeOverride>;

// ────────────────────────────────────────────────────────────────────────────
// Simulation output
// ────────────────────────────────────────────────────────────────────────────

/// One photo's placement in the simulated dense grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    /// 1 or 2.
    pub row_span: usize,
    /// 1, 2, or the column count (full width).
    pub col_span: usize,
}

impl GridItem {
    /// A 1×1 item.
    pub fn is_normal(&self) -> bool {
        self.row_span == 1 && self.col_span == 1
    }

    pub fn is_tall(&self) -> bool {
        self.row_span == 2
    }

    /// Whether the item's rows `row..row + row_span` include `row`.
    pub fn covers_row(&self, row: usize) -> bool {
        row >= self.row && row < self.row + self.row_span
    }
}

/// Result of one simulation pass over a whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayoutResult {
    /// `max(item.row) + 1`, or 0 for an empty collection.
    pub total_rows: usize,
    /// Items whose top row is the last row, in placement order.
    pub last_row_items: Vec<GridItem>,
    /// Columns of the last row not claimed by `last_row_items`.
    pub empty_slots: usize,
    /// `empty_slots == 0`.
    pub is_perfect: bool,
    /// Every placed item, in index order.
    pub all_items: Vec<GridItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Final configuration
// ────────────────────────────────────────────────────────────────────────────

/// The orchestrator's output. The rendering layer replays the classifier with
/// `(pattern_index, overrides)` for every index to reconstruct the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasonryLayoutConfig {
    pub pattern_index: usize,
    pub overrides: Overrides,
    pub is_perfect: bool,
    pub total_rows: usize,
    pub empty_slots: usize,
    /// Every pattern index in cyclic order from the hashed starting pattern.
    pub tried_patterns: Vec<usize>,
}
