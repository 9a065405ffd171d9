//! # Fence Picket Count
//!
//! Pickets, posts and rails for a straight fence run.
//!
//! ## Picket formulas
//!
//! With `L` the picketed length in inches (fence minus gate opening) and `W`
//! the picket width:
//!
//! ```text
//! standard        ceil(L / (W + gap))
//! privacy         ceil(L / W)
//! board-on-board  ceil((L − W) / (W − overlap) + 1)
//! ```
//!
//! The count is then padded by the waste percentage and rounded up again.
//! Every style needs at least one picket.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::fence::{FenceInput, FencePickets};
//! use calc_core::calculations::run;
//!
//! let input = FenceInput {
//!     fence_length_ft: 100.0,
//!     picket_width_in: 3.5,
//!     ..FenceInput::default()
//! };
//!
//! let result = run::<FencePickets>(&input).unwrap();
//! assert_eq!(result.pickets_before_waste, 200);
//! assert_eq!(result.total_pickets, 220);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::{CostRange, Quantity};
use crate::equations::rounding::ceil_count;
use crate::errors::{CalcError, CalcResult};
use crate::reference::fencing::{FenceStyle, FenceWood};
use crate::validation::{check, Constraint, FieldMap, FromFields};

/// Input parameters for a fence run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fence_length_ft": 100,
///   "picket_width_in": 5.5,
///   "style": "boardonboard",
///   "overlap_in": 1,
///   "wood": "cedar"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FenceInput {
    #[serde(alias = "fence_length")]
    pub fence_length_ft: f64,
    #[serde(alias = "picket_width")]
    pub picket_width_in: f64,
    /// Gap between pickets (standard style)
    #[serde(alias = "spacing")]
    pub spacing_in: f64,
    /// Overlap between front and back boards (board-on-board)
    #[serde(alias = "overlap")]
    pub overlap_in: f64,
    pub style: FenceStyle,
    pub include_gate: bool,
    #[serde(alias = "gate_width")]
    pub gate_width_ft: f64,
    /// Distance between posts (ft)
    #[serde(alias = "post_spacing")]
    pub post_spacing_ft: f64,
    pub waste_percent: f64,
    pub wood: FenceWood,
}

impl Default for FenceInput {
    fn default() -> Self {
        Self {
            fence_length_ft: 0.0,
            picket_width_in: 0.0,
            spacing_in: 2.5,
            overlap_in: 1.0,
            style: FenceStyle::Standard,
            include_gate: false,
            gate_width_ft: 4.0,
            post_spacing_ft: 8.0,
            waste_percent: 10.0,
            wood: FenceWood::PressureTreated,
        }
    }
}

impl FenceInput {
    /// Length that actually carries pickets (ft)
    pub fn picketed_length_ft(&self) -> f64 {
        if self.include_gate {
            self.fence_length_ft - self.gate_width_ft
        } else {
            self.fence_length_ft
        }
    }
}

impl FromFields for FenceInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        let defaults = FenceInput::default();
        Ok(Self {
            fence_length_ft: fields.number("fence_length")?,
            picket_width_in: fields.number("picket_width")?,
            spacing_in: fields.number_or("spacing", defaults.spacing_in)?,
            overlap_in: fields.number_or("overlap", defaults.overlap_in)?,
            style: fields.choice_or("style", defaults.style)?,
            include_gate: fields.flag("include_gate")?,
            gate_width_ft: fields.number_or("gate_width", defaults.gate_width_ft)?,
            post_spacing_ft: fields.number_or("post_spacing", defaults.post_spacing_ft)?,
            waste_percent: fields.number_or("waste_percent", defaults.waste_percent)?,
            wood: fields.choice_or("wood", defaults.wood)?,
        })
    }
}

/// Materials list for the fence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FenceResult {
    pub style: FenceStyle,
    pub wood: FenceWood,
    /// Picketed length after removing the gate opening (ft)
    pub picketed_length_ft: f64,
    pub pickets_before_waste: u32,
    pub total_pickets: u32,
    /// Post-to-post sections over the full run
    pub sections: u32,
    pub posts: u32,
    pub rails: u32,
    pub picket_cost: CostRange,
}

/// Pickets needed to cover `length_in` before waste
///
/// # Example
/// ```rust
/// use calc_core::calculations::fence::raw_pickets;
/// use calc_core::reference::fencing::FenceStyle;
///
/// // (1200 - 5.5) / (5.5 - 1) + 1 = 266.4 -> 267
/// assert_eq!(raw_pickets(FenceStyle::BoardOnBoard, 1200.0, 5.5, 0.0, 1.0), 267);
/// ```
pub fn raw_pickets(style: FenceStyle, length_in: f64, width_in: f64, spacing_in: f64, overlap_in: f64) -> u32 {
    let count = match style {
        FenceStyle::Standard => length_in / (width_in + spacing_in),
        FenceStyle::Privacy => length_in / width_in,
        FenceStyle::BoardOnBoard => (length_in - width_in) / (width_in - overlap_in) + 1.0,
    };
    ceil_count(count, 1)
}

pub struct FencePickets;

impl Calculator for FencePickets {
    const KIND: CalculatorKind = CalculatorKind::FencePickets;
    type Input = FenceInput;
    type Output = FenceResult;

    fn validate(input: &FenceInput) -> CalcResult<()> {
        check("fence_length", input.fence_length_ft, Constraint::Positive)?;
        check("picket_width", input.picket_width_in, Constraint::Positive)?;
        check("spacing", input.spacing_in, Constraint::NonNegative)?;
        check("overlap", input.overlap_in, Constraint::NonNegative)?;
        check("post_spacing", input.post_spacing_ft, Constraint::Range { min: 0.0, max: 12.0 })?;
        check("post_spacing", input.post_spacing_ft, Constraint::Positive)?;
        check("waste_percent", input.waste_percent, Constraint::Range { min: 0.0, max: 50.0 })?;

        if input.style == FenceStyle::BoardOnBoard && input.overlap_in >= input.picket_width_in {
            return Err(CalcError::invalid_input(
                "overlap",
                input.overlap_in.to_string(),
                "Overlap must be smaller than the picket width",
            ));
        }
        if input.include_gate {
            check("gate_width", input.gate_width_ft, Constraint::Positive)?;
            if input.gate_width_ft >= input.fence_length_ft {
                return Err(CalcError::invalid_input(
                    "gate_width",
                    input.gate_width_ft.to_string(),
                    "Gate must be narrower than the fence",
                ));
            }
        }
        Ok(())
    }

    fn evaluate(input: &FenceInput) -> CalcResult<FenceResult> {
        let picketed_ft = input.picketed_length_ft();
        let raw = raw_pickets(
            input.style,
            picketed_ft * 12.0,
            input.picket_width_in,
            input.spacing_in,
            input.overlap_in,
        );
        let total = ceil_count(raw as f64 * (1.0 + input.waste_percent / 100.0), raw);

        let sections = ceil_count(input.fence_length_ft / input.post_spacing_ft, 1);
        // A gate opening needs its own latch post
        let posts = sections + 1 + u32::from(input.include_gate);
        let rails = sections * input.style.rails_per_section();

        let (low, high) = input.wood.price_per_picket();

        Ok(FenceResult {
            style: input.style,
            wood: input.wood,
            picketed_length_ft: picketed_ft,
            pickets_before_waste: raw,
            total_pickets: total,
            sections,
            posts,
            rails,
            picket_cost: CostRange::from_band(total as f64, low, high).rounded(),
        })
    }
}

impl Summary for FenceResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        Some(("Pickets needed", Quantity::count(self.total_pickets)))
    }

    fn details(&self) -> Vec<String> {
        vec![
            format!("Style: {}", self.style.display_name()),
            format!("Pickets before waste: {}", self.pickets_before_waste),
            format!("Posts: {}", self.posts),
            format!("Rails: {} ({} sections)", self.rails, self.sections),
            format!("Picket cost ({}): {}", self.wood.display_name(), self.picket_cost),
        ]
    }
}
