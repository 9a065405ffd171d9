//! # Gravel Driveway
//!
//! Volume, weight and delivered cost of a layered gravel driveway.
//!
//! A driveway is built from up to three layers (base, middle, surface), each
//! with its own depth and stone. Per layer:
//!
//! ```text
//! cubic yards = length × width × (depth_in / 12) / 27
//! tons        = cubic yards × density
//! cost        = tons × price band
//! ```
//!
//! A layer with zero depth is left out. Metric input (meters and
//! centimeters) is converted to feet and inches first.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::gravel::{GravelDriveway, GravelInput};
//! use calc_core::calculations::run;
//! use calc_core::reference::aggregates::GravelMaterial;
//!
//! let input = GravelInput {
//!     length: 100.0,
//!     width: 12.0,
//!     base_depth: 12.0,
//!     base_material: GravelMaterial::CrushedStone,
//!     middle_depth: 0.0,
//!     surface_depth: 0.0,
//!     ..GravelInput::default()
//! };
//!
//! let result = run::<GravelDriveway>(&input).unwrap();
//! assert_eq!(result.total_cubic_yards, 44.44);
//! assert!((result.total_tons - 62.2).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::{CostRange, Quantity, Unit};
use crate::equations::geometry::{cubic_yards, layer_volume, rectangle_area, tons_from_volume};
use crate::equations::rounding::round_to;
use crate::errors::CalcResult;
use crate::reference::aggregates::GravelMaterial;
use crate::units::{Centimeters, CubicFeet, CubicMeters, CubicYards, Feet, Inches, Meters, UnitSystem};
use crate::validation::{check, check_optional, require_one_of, Constraint, FieldMap, FromFields};

/// Input parameters for a driveway.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length": 100,
///   "width": 12,
///   "base_depth": 4,
///   "base_material": "3-stone",
///   "middle_depth": 4,
///   "middle_material": "57-stone",
///   "surface_depth": 2,
///   "surface_material": "crusher-run"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravelInput {
    /// Feet, or meters when metric
    pub length: f64,
    pub width: f64,
    pub unit: UnitSystem,
    /// Inches, or centimeters when metric. 0 skips the layer.
    pub base_depth: f64,
    pub base_material: GravelMaterial,
    pub middle_depth: f64,
    pub middle_material: GravelMaterial,
    pub surface_depth: f64,
    pub surface_material: GravelMaterial,
    /// Price per ton overriding the material table, low end
    pub price_low: Option<f64>,
    pub price_high: Option<f64>,
}

impl Default for GravelInput {
    fn default() -> Self {
        Self {
            length: 0.0,
            width: 0.0,
            unit: UnitSystem::Imperial,
            base_depth: 4.0,
            base_material: GravelMaterial::Stone3,
            middle_depth: 4.0,
            middle_material: GravelMaterial::Stone57,
            surface_depth: 4.0,
            surface_material: GravelMaterial::CrusherRun,
            price_low: None,
            price_high: None,
        }
    }
}

impl GravelInput {
    fn length_ft(&self, value: f64) -> f64 {
        match self.unit {
            UnitSystem::Imperial => value,
            UnitSystem::Metric => Feet::from(Meters(value)).0,
        }
    }

    fn depth_in(&self, value: f64) -> f64 {
        match self.unit {
            UnitSystem::Imperial => value,
            UnitSystem::Metric => Inches::from(Centimeters(value)).0,
        }
    }

    fn layers(&self) -> [(Layer, f64, GravelMaterial); 3] {
        [
            (Layer::Base, self.base_depth, self.base_material),
            (Layer::Middle, self.middle_depth, self.middle_material),
            (Layer::Surface, self.surface_depth, self.surface_material),
        ]
    }
}

impl FromFields for GravelInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        let defaults = GravelInput::default();
        Ok(Self {
            length: fields.number("length")?,
            width: fields.number("width")?,
            unit: fields.choice_or("unit", defaults.unit)?,
            base_depth: fields.number_or("base_depth", defaults.base_depth)?,
            base_material: fields.choice_or("base_material", defaults.base_material)?,
            middle_depth: fields.number_or("middle_depth", defaults.middle_depth)?,
            middle_material: fields.choice_or("middle_material", defaults.middle_material)?,
            surface_depth: fields.number_or("surface_depth", defaults.surface_depth)?,
            surface_material: fields.choice_or("surface_material", defaults.surface_material)?,
            price_low: fields.optional_number("price_low")?,
            price_high: fields.optional_number("price_high")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Base,
    Middle,
    Surface,
}

/// Quantities for one layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerResult {
    pub layer: Layer,
    pub material: GravelMaterial,
    pub material_name: &'static str,
    pub depth_in: f64,
    /// Tons per cubic yard
    pub density: f64,
    pub cubic_feet: f64,
    pub cubic_yards: f64,
    pub tons: f64,
    pub cost: CostRange,
}

/// Per-layer quantities; a skipped layer is `None`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayerBreakdown {
    pub base: Option<LayerResult>,
    pub middle: Option<LayerResult>,
    pub surface: Option<LayerResult>,
}

/// Driveway totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GravelResult {
    pub area_sq_ft: f64,
    pub total_cubic_feet: f64,
    pub total_cubic_yards: f64,
    pub total_cubic_meters: f64,
    pub total_tons: f64,
    pub estimated_cost: CostRange,
    pub layers: LayerBreakdown,
}

pub struct GravelDriveway;

impl Calculator for GravelDriveway {
    const KIND: CalculatorKind = CalculatorKind::GravelDriveway;
    type Input = GravelInput;
    type Output = GravelResult;

    fn validate(input: &GravelInput) -> CalcResult<()> {
        check("length", input.length, Constraint::Positive)?;
        check("width", input.width, Constraint::Positive)?;
        check("base_depth", input.base_depth, Constraint::NonNegative)?;
        check("middle_depth", input.middle_depth, Constraint::NonNegative)?;
        check("surface_depth", input.surface_depth, Constraint::NonNegative)?;
        check_optional("price_low", input.price_low, Constraint::NonNegative)?;
        check_optional("price_high", input.price_high, Constraint::NonNegative)?;
        require_one_of(&[
            ("base_depth", input.base_depth > 0.0),
            ("middle_depth", input.middle_depth > 0.0),
            ("surface_depth", input.surface_depth > 0.0),
        ])
    }

    fn evaluate(input: &GravelInput) -> CalcResult<GravelResult> {
        let length_ft = input.length_ft(input.length);
        let width_ft = input.length_ft(input.width);
        let area = rectangle_area(length_ft, width_ft);

        let mut breakdown = LayerBreakdown::default();
        let mut total_cuft = CubicFeet(0.0);
        let mut total_yd = CubicYards(0.0);
        let mut total_tons = 0.0;
        let mut total_cost = CostRange::default();

        for (layer, depth, material) in input.layers() {
            if depth <= 0.0 {
                continue;
            }
            let depth_in = input.depth_in(depth);
            let spec = material.spec();
            let cuft = layer_volume(area, depth_in);
            let yards = cubic_yards(length_ft, width_ft, depth_in);
            let tons = tons_from_volume(yards, spec.density).0;
            let cost = CostRange::from_band(
                tons,
                input.price_low.unwrap_or(spec.price_low),
                input.price_high.unwrap_or(spec.price_high),
            );

            total_cuft = total_cuft + cuft;
            total_yd = total_yd + yards;
            total_tons += tons;
            total_cost = total_cost + cost;

            let result = LayerResult {
                layer,
                material,
                material_name: spec.name,
                depth_in: round_to(depth_in, 2),
                density: spec.density,
                cubic_feet: round_to(cuft.value(), 2),
                cubic_yards: round_to(yards.value(), 2),
                tons: round_to(tons, 2),
                cost: cost.rounded(),
            };
            match layer {
                Layer::Base => breakdown.base = Some(result),
                Layer::Middle => breakdown.middle = Some(result),
                Layer::Surface => breakdown.surface = Some(result),
            }
        }

        Ok(GravelResult {
            area_sq_ft: round_to(area.value(), 2),
            total_cubic_feet: round_to(total_cuft.value(), 2),
            total_cubic_yards: round_to(total_yd.value(), 2),
            total_cubic_meters: round_to(CubicMeters::from(total_yd).value(), 2),
            total_tons: round_to(total_tons, 2),
            estimated_cost: total_cost.rounded(),
            layers: breakdown,
        })
    }
}

impl Summary for GravelResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        Some(("Total gravel", Quantity::new(self.total_tons, Unit::Tons)))
    }

    fn details(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Area: {} sq ft", self.area_sq_ft),
            format!(
                "Volume: {} cu yd ({} cu ft, {} m3)",
                self.total_cubic_yards, self.total_cubic_feet, self.total_cubic_meters
            ),
            format!("Estimated cost: {}", self.estimated_cost),
        ];
        let layers = [&self.layers.base, &self.layers.middle, &self.layers.surface];
        for layer in layers.into_iter().flatten() {
            lines.push(format!(
                "  {:?}: {}\" {} - {} cu yd, {} tons",
                layer.layer, layer.depth_in, layer.material_name, layer.cubic_yards, layer.tons
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

    fn single_layer() -> GravelInput {
        GravelInput {
            length: 100.0,
            width: 12.0,
            base_depth: 12.0,
            base_material: GravelMaterial::CrushedStone,
            middle_depth: 0.0,
            surface_depth: 0.0,
            ..GravelInput::default()
        }
    }

    #[test]
    fn test_single_layer_worked_example() {
        let result = run::<GravelDriveway>(&single_layer()).unwrap();
        assert_eq!(result.total_cubic_feet, 1200.0);
        assert_eq!(result.total_cubic_yards, 44.44);
        assert!((result.total_tons - 62.2).abs() < 0.1);
        assert!(result.layers.middle.is_none());
        assert!(result.layers.surface.is_none());
    }

    #[test]
    fn test_default_three_layers() {
        let input = GravelInput {
            length: 100.0,
            width: 12.0,
            ..GravelInput::default()
        };
        let result = run::<GravelDriveway>(&input).unwrap();
        let base = result.layers.base.as_ref().unwrap();
        let middle = result.layers.middle.as_ref().unwrap();
        let surface = result.layers.surface.as_ref().unwrap();
        // 400 cu ft each = 14.81 cu yd
        assert_eq!(base.cubic_yards, 14.81);
        assert_eq!(base.material, GravelMaterial::Stone3);
        assert_eq!(middle.material, GravelMaterial::Stone57);
        assert_eq!(surface.material, GravelMaterial::CrusherRun);
        assert_eq!(result.total_cubic_yards, 44.44);
        // 14.815 * (1.5 + 1.4 + 1.5) = 65.19
        assert!((result.total_tons - 65.19).abs() < 0.01);
    }

    #[test]
    fn test_metric_input() {
        // 30.48 m x 3.6576 m x 30.48 cm is the single-layer example in metric
        let input = GravelInput {
            length: 30.48,
            width: 3.6576,
            unit: UnitSystem::Metric,
            base_depth: 30.48,
            ..single_layer()
        };
        let result = run::<GravelDriveway>(&input).unwrap();
        assert!((result.total_cubic_yards - 44.44).abs() < 0.01);
        assert!((result.total_cubic_meters - 33.98).abs() < 0.01);
    }

    #[test]
    fn test_price_override() {
        let input = GravelInput {
            price_low: Some(40.0),
            price_high: Some(40.0),
            ..single_layer()
        };
        let result = run::<GravelDriveway>(&input).unwrap();
        // 62.22 tons at $40
        assert!((result.estimated_cost.min - 2488.89).abs() < 0.01);
        assert_eq!(result.estimated_cost.min, result.estimated_cost.max);
    }

    #[test]
    fn test_no_layers() {
        let input = GravelInput {
            base_depth: 0.0,
            ..single_layer()
        };
        let err = run::<GravelDriveway>(&input).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_ALTERNATIVE");
    }

    #[test]
    fn test_from_fields() {
        let fields = FieldMap::new()
            .with("length", "100")
            .with("width", "12")
            .with("base_depth", "12")
            .with("base_material", "crushed stone")
            .with("middle_depth", "0")
            .with("surface_depth", "0");
        let result = run_fields::<GravelDriveway>(&fields).unwrap();
        assert_eq!(result.total_cubic_yards, 44.44);
    }
}
