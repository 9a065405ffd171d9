//! # Floor Joist Sizing
//!
//! Picks the smallest No. 2 joist size whose allowable span covers the clear
//! span, then counts joists and prices the lumber.
//!
//! ## Procedure
//!
//! 1. Span = feet + inches / 12
//! 2. Bracket lookup against the species/spacing span table
//! 3. `joists = ceil(floor_width × 12 / spacing) + 1`, plus 2 rim joists if asked
//! 4. Boards are bought in even lengths, at least 8 ft
//!
//! A span past the 2x12 limit yields an `Unsupported` recommendation (and no
//! lumber cost) rather than quietly suggesting a 2x12.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::joists::{FloorJoistInput, FloorJoists};
//! use calc_core::calculations::run;
//! use calc_core::reference::lumber::JoistSize;
//!
//! let input = FloorJoistInput {
//!     span_ft: 14.0,
//!     floor_width_ft: 20.0,
//!     ..FloorJoistInput::default()
//! };
//!
//! let result = run::<FloorJoists>(&input).unwrap();
//! assert_eq!(result.recommendation.matched().unwrap().size, JoistSize::L2x10);
//! assert_eq!(result.joist_count, 16);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::{CostRange, Quantity, RangeMatch};
use crate::equations::rounding::ceil_count;
use crate::errors::CalcResult;
use crate::reference::lumber::{span_brackets, JoistSize, JoistSpacing, SpanBracket, WoodSpecies};
use crate::reference::matcher::bracket_lookup;
use crate::validation::{check, Constraint, FieldMap, FromFields};

/// Shortest board the yard sells (ft)
pub const MIN_BOARD_LENGTH_FT: u32 = 8;

/// Input parameters for joist sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "span_ft": 13,
///   "span_in": 6,
///   "spacing": "16",
///   "species": "DF-L",
///   "floor_width_ft": 20,
///   "include_rim_joists": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorJoistInput {
    /// Clear span, whole feet part
    #[serde(alias = "span_feet")]
    pub span_ft: f64,
    /// Clear span, inches part [0, 12)
    #[serde(alias = "span_inches")]
    pub span_in: f64,
    pub spacing: JoistSpacing,
    pub species: WoodSpecies,
    /// Floor width measured perpendicular to the joists (ft)
    #[serde(alias = "floor_width")]
    pub floor_width_ft: f64,
    pub include_rim_joists: bool,
}

impl Default for FloorJoistInput {
    fn default() -> Self {
        Self {
            span_ft: 0.0,
            span_in: 0.0,
            spacing: JoistSpacing::In16,
            species: WoodSpecies::DouglasFirLarch,
            floor_width_ft: 0.0,
            include_rim_joists: false,
        }
    }
}

impl FloorJoistInput {
    /// Total clear span (ft)
    pub fn span(&self) -> f64 {
        self.span_ft + self.span_in / 12.0
    }
}

impl FromFields for FloorJoistInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        let defaults = FloorJoistInput::default();
        Ok(Self {
            span_ft: fields.number("span_feet")?,
            span_in: fields.number_or("span_inches", 0.0)?,
            spacing: fields.choice_or("spacing", defaults.spacing)?,
            species: fields.choice_or("species", defaults.species)?,
            floor_width_ft: fields.number("floor_width")?,
            include_rim_joists: fields.flag("include_rim_joists")?,
        })
    }
}

/// Joist sizing results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorJoistResult {
    pub span_ft: f64,
    pub species: WoodSpecies,
    pub spacing_in: f64,
    /// Smallest size rated for the span
    pub recommendation: RangeMatch<SpanBracket>,
    /// Every size rated for the span, smallest first
    pub adequate_sizes: Vec<JoistSize>,
    /// Field joists across the floor width
    pub joist_count: u32,
    pub rim_joists: u32,
    pub total_joists: u32,
    /// Board length to buy (ft)
    pub board_length_ft: u32,
    pub total_linear_ft: u32,
    /// Lumber cost for the recommended size
    pub estimated_cost: Option<CostRange>,
}

/// Joists across a floor, both end joists included
///
/// # Formula
/// n = ceil(width × 12 / spacing) + 1
#[inline]
pub fn joist_count(floor_width_ft: f64, spacing_in: f64) -> u32 {
    ceil_count(floor_width_ft * 12.0 / spacing_in, 1) + 1
}

/// Span rounded up to the next even foot, at least 8 ft
///
/// # Example
/// ```rust
/// use calc_core::calculations::joists::board_length_ft;
///
/// assert_eq!(board_length_ft(13.5), 14);
/// assert_eq!(board_length_ft(14.0), 14);
/// assert_eq!(board_length_ft(14.1), 16);
/// assert_eq!(board_length_ft(5.0), 8);
/// ```
pub fn board_length_ft(span_ft: f64) -> u32 {
    let whole = ceil_count(span_ft, 1);
    let even = whole + whole % 2;
    even.max(MIN_BOARD_LENGTH_FT)
}

pub struct FloorJoists;

impl Calculator for FloorJoists {
    const KIND: CalculatorKind = CalculatorKind::FloorJoists;
    type Input = FloorJoistInput;
    type Output = FloorJoistResult;

    fn validate(input: &FloorJoistInput) -> CalcResult<()> {
        check("span_feet", input.span_ft, Constraint::NonNegative)?;
        check("span_inches", input.span_in, Constraint::HalfOpen { min: 0.0, max: 12.0 })?;
        check("span_feet", input.span(), Constraint::Positive)?;
        check("floor_width", input.floor_width_ft, Constraint::Positive)?;
        Ok(())
    }

    fn evaluate(input: &FloorJoistInput) -> CalcResult<FloorJoistResult> {
        let span = input.span();
        let brackets = span_brackets(input.species, input.spacing);
        let recommendation = bracket_lookup(brackets, span).cloned();
        if let RangeMatch::Unsupported { max, .. } = &recommendation {
            warn!(span, max, species = input.species.code(), "span exceeds the largest joist size");
        }

        let adequate_sizes = brackets
            .iter()
            .filter(|b| span < b.max_span_ft)
            .map(|b| b.size)
            .collect();

        let joists = joist_count(input.floor_width_ft, input.spacing.inches());
        let rim = if input.include_rim_joists { 2 } else { 0 };
        let total = joists + rim;
        let board = board_length_ft(span);
        let linear_ft = total * board;

        let estimated_cost = recommendation.matched().map(|bracket| {
            let (low, high) = bracket.size.price_per_linear_foot();
            CostRange::from_band(linear_ft as f64, low, high).rounded()
        });

        Ok(FloorJoistResult {
            span_ft: span,
            species: input.species,
            spacing_in: input.spacing.inches(),
            recommendation,
            adequate_sizes,
            joist_count: joists,
            rim_joists: rim,
            total_joists: total,
            board_length_ft: board,
            total_linear_ft: linear_ft,
            estimated_cost,
        })
    }
}

impl Summary for FloorJoistResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        self.recommendation
            .is_supported()
            .then(|| ("Joists needed", Quantity::count(self.total_joists)))
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match &self.recommendation {
            RangeMatch::Matched(bracket) => lines.push(format!(
                "Recommended size: {} {} @ {}\" o.c. (max span {})",
                self.species.code(),
                bracket.size,
                self.spacing_in,
                bracket.max_span_label
            )),
            RangeMatch::Unsupported { max, .. } => lines.push(format!(
                "Span too long: {:.2} ft exceeds the {:.2} ft limit for a 2x12. Use engineered lumber or add a beam.",
                self.span_ft, max
            )),
        }
        lines.push(format!(
            "Boards: {} x {} ft ({} linear ft)",
            self.total_joists, self.board_length_ft, self.total_linear_ft
        ));
        if self.rim_joists > 0 {
            lines.push(format!("Includes {} rim joists", self.rim_joists));
        }
        if let Some(cost) = &self.estimated_cost {
            lines.push(format!("Lumber cost: {}", cost));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{run, run_fields};
    use pretty_assertions::assert_eq;

    fn floor(span_ft: f64) -> FloorJoistInput {
        FloorJoistInput {
            span_ft,
            floor_width_ft: 20.0,
            ..FloorJoistInput::default()
        }
    }

    #[test]
    fn test_recommends_smallest_adequate_size() {
        let result = run::<FloorJoists>(&floor(14.0)).unwrap();
        let bracket = result.recommendation.matched().unwrap();
        assert_eq!(bracket.size, JoistSize::L2x10);
        assert_eq!(bracket.max_span_label, "15'-5\"");
        assert_eq!(result.adequate_sizes, vec![JoistSize::L2x10, JoistSize::L2x12]);
    }

    #[test]
    fn test_boundary_moves_to_next_size() {
        // DF-L @ 16": 2x8 tops out at 12'-7"
        let input = FloorJoistInput {
            span_ft: 12.0,
            span_in: 7.0,
            ..floor(0.0)
        };
        let result = run::<FloorJoists>(&input).unwrap();
        assert_eq!(result.recommendation.matched().unwrap().size, JoistSize::L2x10);
    }

    #[test]
    fn test_span_too_long_is_unsupported() {
        let result = run::<FloorJoists>(&floor(18.0)).unwrap();
        assert!(!result.recommendation.is_supported());
        assert!(result.adequate_sizes.is_empty());
        assert!(result.estimated_cost.is_none());
        assert!(result.headline().is_none());
        assert!(result.details()[0].starts_with("Span too long"));
    }

    #[test]
    fn test_counts_and_cost() {
        let input = FloorJoistInput {
            include_rim_joists: true,
            ..floor(14.0)
        };
        let result = run::<FloorJoists>(&input).unwrap();
        // 240 / 16 = 15 + 1 = 16 field joists, + 2 rim
        assert_eq!(result.joist_count, 16);
        assert_eq!(result.total_joists, 18);
        assert_eq!(result.headline().unwrap().1, Quantity::count(18));
        assert_eq!(result.board_length_ft, 14);
        assert_eq!(result.total_linear_ft, 252);
        assert_eq!(result.estimated_cost, Some(CostRange::new(390.6, 567.0)));
    }

    #[test]
    fn test_wider_spacing_needs_fewer_joists() {
        let input = FloorJoistInput {
            spacing: JoistSpacing::In24,
            ..floor(10.0)
        };
        let result = run::<FloorJoists>(&input).unwrap();
        assert_eq!(result.joist_count, 11);
        assert_eq!(result.recommendation.matched().unwrap().size, JoistSize::L2x8);
    }

    #[test]
    fn test_inches_must_be_below_twelve() {
        let input = FloorJoistInput {
            span_in: 12.0,
            ..floor(10.0)
        };
        assert_eq!(run::<FloorJoists>(&input).unwrap_err().field(), Some("span_inches"));
    }

    #[test]
    fn test_zero_span_rejected() {
        assert_eq!(run::<FloorJoists>(&floor(0.0)).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_from_fields() {
        let fields = FieldMap::new()
            .with("span_feet", "13")
            .with("span_inches", "6")
            .with("spacing", "24")
            .with("species", "SPF")
            .with("floor_width", "20")
            .with("include_rim_joists", "yes");
        let result = run_fields::<FloorJoists>(&fields).unwrap();
        // SPF @ 24": 2x12 good to 14'-7"
        assert_eq!(result.recommendation.matched().unwrap().size, JoistSize::L2x12);
        assert_eq!(result.rim_joists, 2);
    }

    #[test]
    fn test_unknown_spacing() {
        let fields = FieldMap::new()
            .with("span_feet", "13")
            .with("spacing", "18")
            .with("floor_width", "20");
        assert_eq!(run_fields::<FloorJoists>(&fields).unwrap_err().error_code(), "UNKNOWN_OPTION");
    }
}
