//! # Golf Club Length
//!
//! Recommended club lengths from the player's height, optionally refined by
//! their wrist-to-floor measurement.
//!
//! The height chart gives the base adjustment to standard length. When a
//! wrist-to-floor measurement inside its chart is also given, the two
//! adjustments are averaged and rounded to the nearest quarter inch, since
//! arm length is the better predictor for players with unusual proportions.
//!
//! A height outside the 4'0"-7'0" chart produces an `Unsupported` match and
//! no club list. A wrist measurement outside its chart is reported and
//! ignored.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::{Quantity, RangeMatch, Unit};
use crate::equations::rounding::{round_to, round_to_step};
use crate::errors::CalcResult;
use crate::reference::golf::{LengthAdjustment, HEIGHT_CHART, STANDARD_CLUBS, WOMENS_OFFSET_IN, WRIST_TO_FLOOR_CHART};
use crate::reference::matcher::bracket_lookup;
use crate::units::{Centimeters, Inches, UnitSystem};
use crate::validation::{check, check_optional, Choice, Constraint, FieldMap, FromFields};

/// Club lengths are sold in quarter-inch steps
const LENGTH_STEP_IN: f64 = 0.25;

/// Standard-length set the adjustment is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubSet {
    #[default]
    Mens,
    Womens,
}

impl ClubSet {
    fn offset_in(&self) -> f64 {
        match self {
            ClubSet::Mens => 0.0,
            ClubSet::Womens => WOMENS_OFFSET_IN,
        }
    }
}

impl Choice for ClubSet {
    const OPTIONS: &'static [&'static str] = &["mens", "womens"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "mens" | "men" | "men's" | "male" => Some(ClubSet::Mens),
            "womens" | "women" | "women's" | "ladies" | "female" => Some(ClubSet::Womens),
            _ => None,
        }
    }
}

/// Input parameters for a club fitting.
///
/// ## JSON Example
///
/// ```json
/// {
///   "height": 183,
///   "wrist_to_floor": 88,
///   "unit": "metric",
///   "set": "mens"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GolfInput {
    /// Player height, in inches or cm per `unit`
    pub height: f64,
    /// Wrist crease to floor, standing in shoes
    #[serde(default)]
    pub wrist_to_floor: Option<f64>,
    #[serde(default)]
    pub unit: UnitSystem,
    #[serde(default)]
    pub set: ClubSet,
}

impl GolfInput {
    fn to_inches(&self, value: f64) -> f64 {
        match self.unit {
            UnitSystem::Imperial => value,
            UnitSystem::Metric => Inches::from(Centimeters(value)).0,
        }
    }
}

impl FromFields for GolfInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        Ok(Self {
            height: fields.number("height")?,
            wrist_to_floor: fields.optional_number("wrist_to_floor")?,
            unit: fields.choice_or("unit", UnitSystem::Imperial)?,
            set: fields.choice_or("set", ClubSet::Mens)?,
        })
    }
}

/// Fitted length for one club
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubLength {
    pub club: &'static str,
    pub standard_in: f64,
    pub recommended_in: f64,
    pub recommended_cm: f64,
}

/// Club fitting results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GolfResult {
    pub height_in: f64,
    pub wrist_to_floor_in: Option<f64>,
    pub set: ClubSet,
    pub height_match: RangeMatch<LengthAdjustment>,
    pub wrist_match: Option<RangeMatch<LengthAdjustment>>,
    /// Inches added to every standard length; `None` when the height is
    /// outside the chart
    pub adjustment_in: Option<f64>,
    pub clubs: Vec<ClubLength>,
}

/// Combined adjustment from the height row and an optional wrist row
///
/// # Example
/// ```rust
/// use calc_core::calculations::golf::combined_adjustment;
///
/// assert_eq!(combined_adjustment(1.0, None), 1.0);
/// assert_eq!(combined_adjustment(1.0, Some(0.5)), 0.75);
/// ```
pub fn combined_adjustment(height_adj: f64, wrist_adj: Option<f64>) -> f64 {
    match wrist_adj {
        Some(wrist) => round_to_step((height_adj + wrist) / 2.0, LENGTH_STEP_IN),
        None => height_adj,
    }
}

pub struct GolfClubLength;

impl Calculator for GolfClubLength {
    const KIND: CalculatorKind = CalculatorKind::GolfClubLength;
    type Input = GolfInput;
    type Output = GolfResult;

    fn validate(input: &GolfInput) -> CalcResult<()> {
        check("height", input.height, Constraint::Positive)?;
        check_optional("wrist_to_floor", input.wrist_to_floor, Constraint::Positive)?;
        Ok(())
    }

    fn evaluate(input: &GolfInput) -> CalcResult<GolfResult> {
        let height_in = input.to_inches(input.height);
        let wrist_in = input.wrist_to_floor.map(|w| input.to_inches(w));

        let height_match = bracket_lookup(&HEIGHT_CHART, height_in).cloned();
        let wrist_match = wrist_in.map(|w| bracket_lookup(&WRIST_TO_FLOOR_CHART, w).cloned());

        if let Some(RangeMatch::Unsupported { value, .. }) = &wrist_match {
            warn!(wrist_to_floor_in = value, "wrist-to-floor outside fitting chart, ignoring");
        }

        let adjustment = height_match.matched().map(|row| {
            let wrist_adj = wrist_match
                .as_ref()
                .and_then(|m| m.matched())
                .map(|row| row.adjustment_in);
            combined_adjustment(row.adjustment_in, wrist_adj)
        });

        let clubs = match adjustment {
            Some(adj) => STANDARD_CLUBS
                .iter()
                .map(|club| {
                    let standard = club.mens_length_in + input.set.offset_in();
                    let recommended = round_to_step(standard + adj, LENGTH_STEP_IN);
                    ClubLength {
                        club: club.club,
                        standard_in: standard,
                        recommended_in: recommended,
                        recommended_cm: round_to(Centimeters::from(Inches(recommended)).0, 1),
                    }
                })
                .collect(),
            None => {
                warn!(height_in, "height outside fitting chart");
                Vec::new()
            }
        };

        Ok(GolfResult {
            height_in: round_to(height_in, 2),
            wrist_to_floor_in: wrist_in.map(|w| round_to(w, 2)),
            set: input.set,
            height_match,
            wrist_match,
            adjustment_in: adjustment,
            clubs,
        })
    }
}

impl Summary for GolfResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        self.adjustment_in
            .map(|adj| ("Length adjustment", Quantity::new(adj, Unit::Inches)))
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let RangeMatch::Unsupported { min, max, .. } = &self.height_match {
            lines.push(format!(
                "Height {:.1}\" is outside the fitting chart ({}\" to {}\"); see a club fitter",
                self.height_in, min, max
            ));
        }
        if let Some(RangeMatch::Unsupported { value, .. }) = &self.wrist_match {
            lines.push(format!("Wrist-to-floor {:.1}\" is off the chart and was ignored", value));
        }
        for club in &self.clubs {
            lines.push(format!(
                "  {:<15} {:>6.2} in  {:>6.1} cm",
                club.club, club.recommended_in, club.recommended_cm
            ));
        }
        lines
    }
}
