//! Golf Club Fitting Charts
//!
//! Static fitting data: length adjustment by player height, adjustment by
//! wrist-to-floor measurement, and the standard men's steel-shaft lengths the
//! adjustments are applied to.
//!
//! All values are in inches. Both charts use half-open `[min, max)` rows.

use serde::Serialize;

use crate::reference::matcher::Bracket;

/// Length adjustment for a band of measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthAdjustment {
    pub min_in: f64,
    pub max_in: f64,
    /// Inches added to (or removed from) standard length
    pub adjustment_in: f64,
}

impl Bracket for LengthAdjustment {
    fn lower(&self) -> f64 {
        self.min_in
    }
    fn upper(&self) -> f64 {
        self.max_in
    }
}

const fn row(min_in: f64, max_in: f64, adjustment_in: f64) -> LengthAdjustment {
    LengthAdjustment { min_in, max_in, adjustment_in }
}

/// Adjustment by player height, 4'0" up to (not including) 7'0"
pub const HEIGHT_CHART: [LengthAdjustment; 12] = [
    row(48.0, 51.0, -3.5),
    row(51.0, 54.0, -3.0),
    row(54.0, 57.0, -2.5),
    row(57.0, 60.0, -2.0),
    row(60.0, 63.0, -1.5),
    row(63.0, 66.0, -1.0),
    row(66.0, 69.0, -0.5),
    row(69.0, 72.0, 0.0),
    row(72.0, 75.0, 0.5),
    row(75.0, 78.0, 1.0),
    row(78.0, 81.0, 1.5),
    row(81.0, 84.0, 2.0),
];

/// Adjustment by wrist-to-floor distance (standing, arms relaxed)
pub const WRIST_TO_FLOOR_CHART: [LengthAdjustment; 7] = [
    row(27.0, 29.0, -1.5),
    row(29.0, 31.0, -1.0),
    row(31.0, 33.0, -0.5),
    row(33.0, 35.0, 0.0),
    row(35.0, 37.0, 0.5),
    row(37.0, 39.0, 1.0),
    row(39.0, 42.0, 1.5),
];

/// Standard club length
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardClub {
    pub club: &'static str,
    /// Men's steel standard length (in)
    pub mens_length_in: f64,
}

/// Women's standard lengths run this much shorter than men's
pub const WOMENS_OFFSET_IN: f64 = -1.0;

pub const STANDARD_CLUBS: [StandardClub; 13] = [
    StandardClub { club: "Driver", mens_length_in: 45.5 },
    StandardClub { club: "3-Wood", mens_length_in: 43.0 },
    StandardClub { club: "5-Wood", mens_length_in: 42.0 },
    StandardClub { club: "Hybrid", mens_length_in: 40.0 },
    StandardClub { club: "4-Iron", mens_length_in: 38.5 },
    StandardClub { club: "5-Iron", mens_length_in: 38.0 },
    StandardClub { club: "6-Iron", mens_length_in: 37.5 },
    StandardClub { club: "7-Iron", mens_length_in: 37.0 },
    StandardClub { club: "8-Iron", mens_length_in: 36.5 },
    StandardClub { club: "9-Iron", mens_length_in: 36.0 },
    StandardClub { club: "Pitching Wedge", mens_length_in: 35.75 },
    StandardClub { club: "Sand Wedge", mens_length_in: 35.25 },
    StandardClub { club: "Putter", mens_length_in: 34.0 },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::matcher::{bracket_lookup, domain, validate_brackets};
    use proptest::prelude::*;

    #[test]
    fn test_charts_are_gap_free() {
        validate_brackets(&HEIGHT_CHART).unwrap();
        validate_brackets(&WRIST_TO_FLOOR_CHART).unwrap();
        assert_eq!(domain(&HEIGHT_CHART), Some((48.0, 84.0)));
    }

    #[test]
    fn test_standard_height_is_unadjusted() {
        // 5'10"
        let hit = bracket_lookup(&HEIGHT_CHART, 70.0);
        assert_eq!(hit.matched().unwrap().adjustment_in, 0.0);
        // exactly on a boundary belongs to the upper row
        assert_eq!(bracket_lookup(&HEIGHT_CHART, 72.0).matched().unwrap().adjustment_in, 0.5);
    }

    #[test]
    fn test_height_outside_chart() {
        assert!(!bracket_lookup(&HEIGHT_CHART, 47.9).is_supported());
        assert!(!bracket_lookup(&HEIGHT_CHART, 84.0).is_supported());
    }

    proptest! {
        #[test]
        fn every_height_in_chart_maps_to_one_row(height in 48.0f64..84.0) {
            let hits = HEIGHT_CHART.iter().filter(|r| r.contains(height)).count();
            prop_assert_eq!(hits, 1);
        }
    }
}
