//! # Reference Table Matching
//!
//! The two lookup strategies every calculator uses against its static tables.
//!
//! ## Bracket lookup
//!
//! Rows cover half-open ranges `[lower, upper)`. A value on a boundary
//! belongs to the row that starts there, so every value in the table's domain
//! maps to exactly one row. Values outside the domain come back as
//! [`RangeMatch::Unsupported`], never clamped.
//!
//! ## Nearest-neighbour ranking
//!
//! Every row is scored with a caller-supplied distance and the rows are
//! stable-sorted ascending. Equal distances keep table declaration order.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::reference::matcher::{bracket_lookup, nearest, Bracket};
//!
//! struct Tier { lower: f64, upper: f64, name: &'static str }
//!
//! impl Bracket for Tier {
//!     fn lower(&self) -> f64 { self.lower }
//!     fn upper(&self) -> f64 { self.upper }
//! }
//!
//! let tiers = [
//!     Tier { lower: 0.0, upper: 10.0, name: "low" },
//!     Tier { lower: 10.0, upper: 20.0, name: "high" },
//! ];
//!
//! assert_eq!(bracket_lookup(&tiers, 10.0).matched().unwrap().name, "high");
//! assert!(!bracket_lookup(&tiers, 20.0).is_supported());
//!
//! let ranked = nearest(&tiers, 1, |t| (t.lower - 12.0).abs());
//! assert_eq!(ranked[0].row.name, "high");
//! ```

use tracing::trace;

use crate::composer::{RangeMatch, Ranked};
use crate::errors::{CalcError, CalcResult};

/// A table row covering the half-open range `[lower, upper)`
pub trait Bracket {
    fn lower(&self) -> f64;
    fn upper(&self) -> f64;

    fn contains(&self, value: f64) -> bool {
        value >= self.lower() && value < self.upper()
    }
}

/// Overall `[min, max)` covered by a bracket table
pub fn domain<R: Bracket>(table: &[R]) -> Option<(f64, f64)> {
    let min = table.iter().map(Bracket::lower).reduce(f64::min)?;
    let max = table.iter().map(Bracket::upper).reduce(f64::max)?;
    Some((min, max))
}

/// Find the unique row whose range contains `value`.
pub fn bracket_lookup<R: Bracket>(table: &[R], value: f64) -> RangeMatch<&R> {
    if let Some(row) = table.iter().find(|row| row.contains(value)) {
        return RangeMatch::Matched(row);
    }
    let (min, max) = domain(table).unwrap_or((0.0, 0.0));
    trace!(value, min, max, "value outside bracket table");
    RangeMatch::Unsupported { value, min, max }
}

/// Check that rows are ordered, non-empty, non-overlapping and gap-free.
pub fn validate_brackets<R: Bracket>(table: &[R]) -> CalcResult<()> {
    for (i, row) in table.iter().enumerate() {
        if row.lower() >= row.upper() {
            return Err(CalcError::Internal {
                message: format!("bracket {} is empty: [{}, {})", i, row.lower(), row.upper()),
            });
        }
    }
    for (i, pair) in table.windows(2).enumerate() {
        if pair[0].upper() != pair[1].lower() {
            return Err(CalcError::Internal {
                message: format!(
                    "brackets {} and {} do not meet: {} vs {}",
                    i,
                    i + 1,
                    pair[0].upper(),
                    pair[1].lower()
                ),
            });
        }
    }
    Ok(())
}

/// Rank rows by `distance` and return the closest `n`.
///
/// Uses a stable sort, so ties keep declaration order.
pub fn nearest<R, F>(table: &[R], n: usize, distance: F) -> Vec<Ranked<&R>>
where
    F: Fn(&R) -> f64,
{
    let mut scored: Vec<(f64, &R)> = table.iter().map(|row| (distance(row), row)).collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (distance, row))| Ranked {
            rank: i + 1,
            distance,
            row,
        })
        .collect()
}

/// Sum of absolute per-dimension differences
#[inline]
pub fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug)]
    struct Row {
        lower: f64,
        upper: f64,
        label: &'static str,
    }

    impl Bracket for Row {
        fn lower(&self) -> f64 {
            self.lower
        }
        fn upper(&self) -> f64 {
            self.upper
        }
    }

    const ROWS: [Row; 3] = [
        Row { lower: 0.0, upper: 5.0, label: "a" },
        Row { lower: 5.0, upper: 10.0, label: "b" },
        Row { lower: 10.0, upper: 15.0, label: "c" },
    ];

    #[test]
    fn test_boundary_goes_to_upper_row() {
        assert_eq!(bracket_lookup(&ROWS, 5.0).matched().unwrap().label, "b");
        assert_eq!(bracket_lookup(&ROWS, 4.999).matched().unwrap().label, "a");
    }

    #[test]
    fn test_out_of_domain_is_unsupported() {
        match bracket_lookup(&ROWS, 15.0) {
            RangeMatch::Unsupported { value, min, max } => {
                assert_eq!(value, 15.0);
                assert_eq!(min, 0.0);
                assert_eq!(max, 15.0);
            }
            RangeMatch::Matched(_) => panic!("15.0 should be outside [0, 15)"),
        }
        assert!(!bracket_lookup(&ROWS, -0.1).is_supported());
    }

    #[test]
    fn test_validate_brackets() {
        assert!(validate_brackets(&ROWS).is_ok());
        let gap = [
            Row { lower: 0.0, upper: 5.0, label: "a" },
            Row { lower: 6.0, upper: 10.0, label: "b" },
        ];
        assert!(validate_brackets(&gap).is_err());
        let empty = [Row { lower: 5.0, upper: 5.0, label: "a" }];
        assert!(validate_brackets(&empty).is_err());
    }

    #[test]
    fn test_nearest_ties_keep_declaration_order() {
        // "first" and "second" are both exactly 1.0 away from 5.0
        let table = [
            Row { lower: 9.0, upper: 10.0, label: "far" },
            Row { lower: 4.0, upper: 5.0, label: "first" },
            Row { lower: 6.0, upper: 7.0, label: "second" },
        ];
        let ranked = nearest(&table, 3, |r| (r.lower - 5.0).abs());
        let labels: Vec<_> = ranked.iter().map(|r| r.row.label).collect();
        assert_eq!(labels, vec!["first", "second", "far"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].distance, 1.0);
    }

    #[test]
    fn test_nearest_truncates() {
        assert_eq!(nearest(&ROWS, 2, |r| r.lower).len(), 2);
        assert_eq!(nearest(&ROWS, 10, |r| r.lower).len(), 3);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan(&[8.0, 10.0], &[9.0, 12.0]), 3.0);
    }

    proptest! {
        #[test]
        fn every_value_in_domain_matches_exactly_one_row(value in 0.0f64..15.0) {
            let hits = ROWS.iter().filter(|r| r.contains(value)).count();
            prop_assert_eq!(hits, 1);
            prop_assert!(bracket_lookup(&ROWS, value).is_supported());
        }
    }
}
