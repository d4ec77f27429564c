//! Collection identifier → starting pattern index.

use crate::masonry::patterns::PATTERN_COUNT;

/// Polynomial rolling hash (`acc * 31 + unit`) with 32-bit signed wraparound,
/// returned as the absolute value.
///
/// Iterates UTF-16 code units so an id hashes to the same value a browser
/// computes with `charCodeAt`. `i32::MIN` maps to `2^31` instead of overflowing.
/// Not cryptographic; only stable.
pub fn hash_string(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0i32, |acc, unit| {
            acc.wrapping_shl(5)
                .wrapping_sub(acc)
                .wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Starting pattern for a collection. Absent ids start at pattern 0.
pub fn select_pattern_index(collection_id: Option<&str>) -> usize {
    match collection_id {
        Some(id) => hash_string(id) as usize % PATTERN_COUNT,
        None => 0,
    }
}
