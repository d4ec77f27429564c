//! Static pattern table: ten curated tall/wide rule sets.
//!
//! Every rule is `index % prime == remainder`. Small primes (11, 13) make special
//! items frequent; large primes (29, 31, 37) make them rare. Mixing both in one
//! pattern gives varied pacing. Big items need a tall AND a wide match, so they
//! stay uncommon.

use crate::masonry::types::{Pattern, Rule};

/// Number of curated patterns. Pattern indices are `0..PATTERN_COUNT`.
pub const PATTERN_COUNT: usize = 10;

pub static MASONRY_PATTERNS: [Pattern; PATTERN_COUNT] = [
    Pattern {
        tall_rules: &[Rule::new(13, 4), Rule::new(19, 10)],
        wide_rules: &[Rule::new(17, 2), Rule::new(23, 6)],
    },
    Pattern {
        tall_rules: &[Rule::new(11, 3), Rule::new(17, 8)],
        wide_rules: &[Rule::new(13, 5), Rule::new(19, 12)],
    },
    Pattern {
        tall_rules: &[Rule::new(23, 7), Rule::new(29, 14)],
        wide_rules: &[Rule::new(11, 6), Rule::new(13, 9)],
    },
    Pattern {
        tall_rules: &[Rule::new(17, 5), Rule::new(23, 11)],
        wide_rules: &[Rule::new(19, 7), Rule::new(29, 15)],
    },
    Pattern {
        tall_rules: &[Rule::new(11, 2), Rule::new(31, 18)],
        wide_rules: &[Rule::new(13, 7), Rule::new(23, 14)],
    },
    Pattern {
        tall_rules: &[Rule::new(19, 6), Rule::new(31, 22)],
        wide_rules: &[Rule::new(17, 9), Rule::new(29, 19)],
    },
    Pattern {
        tall_rules: &[Rule::new(13, 8), Rule::new(29, 12)],
        wide_rules: &[Rule::new(11, 4), Rule::new(31, 20)],
    },
    Pattern {
        tall_rules: &[Rule::new(23, 3), Rule::new(37, 25)],
        wide_rules: &[Rule::new(13, 6), Rule::new(17, 11)],
    },
    Pattern {
        tall_rules: &[Rule::new(11, 7), Rule::new(19, 15)],
        wide_rules: &[Rule::new(23, 9), Rule::new(31, 16)],
    },
    Pattern {
        tall_rules: &[Rule::new(17, 12), Rule::new(29, 21)],
        wide_rules: &[Rule::new(19, 8), Rule::new(37, 28)],
    },
];

/// Look up a pattern. Out-of-range indices yield `None`; callers treat that as
/// "no special items" rather than failing.
pub fn pattern(index: usize) -> Option<&'static Pattern> {
    MASONRY_PATTERNS.get(index)
}

/// Pattern indices in cyclic order starting at `start`, covering every pattern once.
pub fn cyclic_order(start: usize) -> impl Iterator<Item = usize> {
    (0..PATTERN_COUNT).map(move |offset| (start + offset) % PATTERN_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_ten_patterns() {
        assert_eq!(PATTERN_COUNT, 10);
    }

    #[test]
    fn test_every_remainder_is_below_its_modulus() {
        for (i, p) in MASONRY_PATTERNS.iter().enumerate() {
            for rule in p.tall_rules.iter().chain(p.wide_rules) {
                assert!(
                    rule.remainder < rule.modulus,
                    "pattern {i} has rule {rule:?} with remainder ≥ modulus"
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_pattern_is_none() {
        assert!(pattern(PATTERN_COUNT).is_none());
        assert!(pattern(usize::MAX).is_none());
    }

    #[test]
    fn test_cyclic_order_wraps_around() {
        let order: Vec<usize> = cyclic_order(7).collect();
        assert_eq!(order, vec![7, 8, 9, 0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_cyclic_order_normalizes_large_start() {
        let order: Vec<usize> = cyclic_order(13).collect();
        assert_eq!(order[0], 3);
        assert_eq!(order.len(), PATTERN_COUNT);
    }
}
