//! # Rug Size
//!
//! Finds the stock rug sizes closest to the ideal rug for a room.
//!
//! The ideal (target) rug is the room inset by a border of bare floor on
//! every side, or for a dining room, the table plus 2 ft on each side so
//! chairs stay on the rug when pulled out. Stock sizes are ranked by
//!
//! ```text
//! rectangle / runner   |w − target_w| + |l − target_l|
//! round                2 × |d − min(target_w, target_l)|
//! ```
//!
//! with ties kept in table order (smaller sizes first).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::rug::{RugInput, RugSize};
//! use calc_core::calculations::run;
//!
//! let input = RugInput {
//!     room_length_ft: 15.0,
//!     room_width_ft: 12.0,
//!     ..RugInput::default()
//! };
//!
//! let result = run::<RugSize>(&input).unwrap();
//! assert_eq!(result.matches[0].row.label, "9' x 12'");
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::{Quantity, Ranked, Unit};
use crate::equations::geometry::{inset_dimension, rectangle_area};
use crate::equations::rounding::{percent_of, round_to};
use crate::errors::{CalcError, CalcResult};
use crate::reference::matcher::{manhattan, nearest};
use crate::reference::rugs::{sizes_for, RoomType, RugShape, StandardRug, DINING_CHAIR_ALLOWANCE_FT};
use crate::validation::{check, check_optional, Constraint, FieldMap, FromFields};

/// Input parameters for rug sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "room_length_ft": 14,
///   "room_width_ft": 12,
///   "room_type": "dining",
///   "table_length_ft": 6,
///   "table_width_ft": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RugInput {
    #[serde(alias = "room_length")]
    pub room_length_ft: f64,
    #[serde(alias = "room_width")]
    pub room_width_ft: f64,
    pub room_type: RoomType,
    pub shape: RugShape,
    /// Bare floor between rug and wall (in). Defaults by room type.
    #[serde(alias = "clearance")]
    pub clearance_in: Option<f64>,
    /// Dining rooms only
    #[serde(alias = "table_length")]
    pub table_length_ft: Option<f64>,
    #[serde(alias = "table_width")]
    pub table_width_ft: Option<f64>,
    /// How many stock sizes to list
    pub matches: u32,
}

impl Default for RugInput {
    fn default() -> Self {
        Self {
            room_length_ft: 0.0,
            room_width_ft: 0.0,
            room_type: RoomType::Living,
            shape: RugShape::Rectangle,
            clearance_in: None,
            table_length_ft: None,
            table_width_ft: None,
            matches: 3,
        }
    }
}

impl RugInput {
    /// Room as (narrow, long) sides
    pub fn room(&self) -> (f64, f64) {
        ordered(self.room_width_ft, self.room_length_ft)
    }

    pub fn clearance(&self) -> f64 {
        self.clearance_in
            .unwrap_or_else(|| self.room_type.default_clearance_in())
    }

    /// Ideal rug as (narrow, long) sides
    pub fn target(&self) -> (f64, f64) {
        if self.room_type == RoomType::Dining {
            let allowance = 2.0 * DINING_CHAIR_ALLOWANCE_FT;
            let w = self.table_width_ft.unwrap_or(0.0) + allowance;
            let l = self.table_length_ft.unwrap_or(0.0) + allowance;
            ordered(w, l)
        } else {
            let (w, l) = self.room();
            let clearance = self.clearance();
            (inset_dimension(w, clearance), inset_dimension(l, clearance))
        }
    }
}

impl FromFields for RugInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        let defaults = RugInput::default();
        Ok(Self {
            room_length_ft: fields.number("room_length")?,
            room_width_ft: fields.number("room_width")?,
            room_type: fields.choice_or("room_type", defaults.room_type)?,
            shape: fields.choice_or("shape", defaults.shape)?,
            clearance_in: fields.optional_number("clearance")?,
            table_length_ft: fields.optional_number("table_length")?,
            table_width_ft: fields.optional_number("table_width")?,
            matches: fields.whole_or("matches", defaults.matches)?,
        })
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    (a.min(b), a.max(b))
}

/// A stock size and how it sits in the room
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RugMatch {
    pub label: &'static str,
    pub width_ft: f64,
    pub length_ft: f64,
    pub fits_room: bool,
    /// Share of the floor the rug covers (%)
    pub coverage_pct: f64,
}

/// Rug sizing results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RugResult {
    pub shape: RugShape,
    pub target_width_ft: f64,
    pub target_length_ft: f64,
    /// Clearance used; `None` for dining rooms, which size from the table
    pub clearance_in: Option<f64>,
    pub matches: Vec<Ranked<RugMatch>>,
}

/// Rank stock sizes against a target, closest first.
pub fn rank_sizes(
    table: &[StandardRug],
    shape: RugShape,
    target: (f64, f64),
    n: usize,
) -> Vec<Ranked<&StandardRug>> {
    let (tw, tl) = target;
    match shape {
        RugShape::Round => nearest(table, n, |rug| 2.0 * (rug.width_ft - tw.min(tl)).abs()),
        RugShape::Rectangle | RugShape::Runner => {
            nearest(table, n, |rug| manhattan(&[rug.width_ft, rug.length_ft], &[tw, tl]))
        }
    }
}

fn rug_area(rug: &StandardRug, shape: RugShape) -> f64 {
    match shape {
        RugShape::Round => PI * (rug.width_ft / 2.0).powi(2),
        RugShape::Rectangle | RugShape::Runner => rectangle_area(rug.width_ft, rug.length_ft).value(),
    }
}

pub struct RugSize;

impl Calculator for RugSize {
    const KIND: CalculatorKind = CalculatorKind::RugSize;
    type Input = RugInput;
    type Output = RugResult;

    fn validate(input: &RugInput) -> CalcResult<()> {
        check("room_length", input.room_length_ft, Constraint::Positive)?;
        check("room_width", input.room_width_ft, Constraint::Positive)?;
        check_optional("clearance", input.clearance_in, Constraint::Range { min: 0.0, max: 60.0 })?;
        check("matches", input.matches as f64, Constraint::Range { min: 1.0, max: 10.0 })?;

        if input.room_type == RoomType::Dining {
            let length = input
                .table_length_ft
                .ok_or_else(|| CalcError::missing_field("table_length"))?;
            let width = input
                .table_width_ft
                .ok_or_else(|| CalcError::missing_field("table_width"))?;
            check("table_length", length, Constraint::Positive)?;
            check("table_width", width, Constraint::Positive)?;
        } else {
            let (w, _) = input.target();
            if w <= 0.0 {
                return Err(CalcError::invalid_input(
                    "clearance",
                    input.clearance().to_string(),
                    "Clearance leaves no floor for a rug",
                ));
            }
        }
        Ok(())
    }

    fn evaluate(input: &RugInput) -> CalcResult<RugResult> {
        let (room_w, room_l) = input.room();
        let room_area = rectangle_area(room_w, room_l).value();
        let target = input.target();

        let matches = rank_sizes(sizes_for(input.shape), input.shape, target, input.matches as usize)
            .into_iter()
            .map(|ranked| {
                Ranked {
                    distance: round_to(ranked.distance, 2),
                    ..ranked.map(|rug| RugMatch {
                        label: rug.label,
                        width_ft: rug.width_ft,
                        length_ft: rug.length_ft,
                        fits_room: rug.width_ft <= room_w && rug.length_ft <= room_l,
                        coverage_pct: round_to(percent_of(rug_area(rug, input.shape), room_area), 1),
                    })
                }
            })
            .collect();

        Ok(RugResult {
            shape: input.shape,
            target_width_ft: round_to(target.0, 2),
            target_length_ft: round_to(target.1, 2),
            clearance_in: (input.room_type != RoomType::Dining).then(|| input.clearance()),
            matches,
        })
    }
}

impl Summary for RugResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        Some((
            "Ideal rug area",
            Quantity::new(round_to(self.target_width_ft * self.target_length_ft, 2), Unit::SquareFeet),
        ))
    }

    fn details(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Ideal size: {}' x {}'",
            self.target_width_ft, self.target_length_ft
        )];
        for ranked in &self.matches {
            let rug = &ranked.row;
            lines.push(format!(
                "  {}. {} - covers {}% of the floor{}",
                ranked.rank,
                rug.label,
                rug.coverage_pct,
                if rug.fits_room { "" } else { " (too big for the room)" }
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{run, run_fields};
    use pretty_assertions::assert_eq;

    fn living_room() -> RugInput {
        RugInput {
            room_length_ft: 15.0,
            room_width_ft: 12.0,
            ..RugInput::default()
        }
    }

    fn labels(result: &RugResult) -> Vec<&'static str> {
        result.matches.iter().map(|m| m.row.label).collect()
    }

    #[test]
    fn test_living_room() {
        // 18" clearance: 12x15 room -> 9x12 target
        let result = run::<RugSize>(&living_room()).unwrap();
        assert_eq!((result.target_width_ft, result.target_length_ft), (9.0, 12.0));
        // 8x10 and 10x14 tie at distance 3; table order keeps 8x10 first
        assert_eq!(labels(&result), vec!["9' x 12'", "8' x 10'", "10' x 14'"]);
        assert_eq!(result.matches[0].distance, 0.0);
        assert_eq!(result.matches[0].row.coverage_pct, 60.0);
        assert!(result.matches[0].row.fits_room);
    }

    #[test]
    fn test_room_orientation_does_not_matter() {
        let rotated = RugInput {
            room_length_ft: 12.0,
            room_width_ft: 15.0,
            ..living_room()
        };
        assert_eq!(
            run::<RugSize>(&rotated).unwrap(),
            run::<RugSize>(&living_room()).unwrap()
        );
    }

    #[test]
    fn test_dining_room_sizes_from_table() {
        let input = RugInput {
            room_type: RoomType::Dining,
            table_length_ft: Some(6.0),
            table_width_ft: Some(3.0),
            ..living_room()
        };
        let result = run::<RugSize>(&input).unwrap();
        assert_eq!((result.target_width_ft, result.target_length_ft), (7.0, 10.0));
        assert_eq!(result.matches[0].row.label, "8' x 10'");
        assert!(result.clearance_in.is_none());
    }

    #[test]
    fn test_dining_room_needs_table() {
        let input = RugInput {
            room_type: RoomType::Dining,
            ..living_room()
        };
        assert_eq!(run::<RugSize>(&input).unwrap_err().field(), Some("table_length"));
    }

    #[test]
    fn test_round_rug() {
        // 10x10 room, 18" clearance -> 7 ft target; 6 and 8 tie, 6 listed first
        let input = RugInput {
            room_length_ft: 10.0,
            room_width_ft: 10.0,
            shape: RugShape::Round,
            matches: 2,
            ..RugInput::default()
        };
        let result = run::<RugSize>(&input).unwrap();
        assert_eq!(labels(&result), vec!["6' round", "8' round"]);
        assert_eq!(result.matches[0].distance, 2.0);
    }

    #[test]
    fn test_clearance_too_large() {
        let input = RugInput {
            room_length_ft: 4.0,
            room_width_ft: 2.0,
            ..RugInput::default()
        };
        assert_eq!(run::<RugSize>(&input).unwrap_err().field(), Some("clearance"));
    }

    #[test]
    fn test_oversized_match_flagged() {
        let input = RugInput {
            room_length_ft: 5.0,
            room_width_ft: 4.0,
            clearance_in: Some(0.0),
            ..RugInput::default()
        };
        let result = run::<RugSize>(&input).unwrap();
        assert!(result.matches.iter().any(|m| !m.row.fits_room));
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let table = [
            StandardRug { label: "first", width_ft: 5.0, length_ft: 8.0 },
            StandardRug { label: "second", width_ft: 8.0, length_ft: 5.0 },
            StandardRug { label: "third", width_ft: 5.0, length_ft: 8.0 },
        ];
        let ranked = rank_sizes(&table, RugShape::Rectangle, (5.0, 8.0), 3);
        let order: Vec<&str> = ranked.iter().map(|r| r.row.label).collect();
        assert_eq!(order, vec!["first", "third", "second"]);
    }

    #[test]
    fn test_from_fields() {
        let fields = FieldMap::new()
            .with("room_length", "15")
            .with("room_width", "12")
            .with("room_type", "bedroom")
            .with("matches", "1");
        let result = run_fields::<RugSize>(&fields).unwrap();
        // 24" clearance -> 8x11 target -> 8x10 (distance 1)
        assert_eq!(labels(&result), vec!["8' x 10'"]);
    }
}
