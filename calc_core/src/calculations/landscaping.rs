//! # Landscaping Cost
//!
//! Installed-cost estimate for a yard project, built up from line items.
//!
//! Each line item is priced as `quantity × unit cost band × tier multiplier`.
//! Area items (sod, seed, pavers, irrigation) are priced per square foot,
//! mulch per cubic yard at the given depth, and trees and shrubs each. A
//! contingency percentage is added on top of the subtotal.

use serde::{Deserialize, Serialize};

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::{CostRange, Quantity, Unit};
use crate::equations::geometry::layer_volume;
use crate::equations::rounding::{round_cents, round_to, safe_div};
use crate::errors::CalcResult;
use crate::reference::landscaping::{LandscapeItem, QualityTier};
use crate::units::{CubicYards, SqFt};
use crate::validation::{check, check_optional, require_one_of, Constraint, FieldMap, FromFields};

/// Input parameters for a landscaping estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "area_sq_ft": 2000,
///   "sod_area": 1200,
///   "mulch_area": 300,
///   "trees": 2,
///   "tier": "premium"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandscapingInput {
    /// Total yard area the estimate covers (sq ft)
    #[serde(alias = "area")]
    pub area_sq_ft: f64,
    pub sod_area: Option<f64>,
    pub seed_area: Option<f64>,
    pub mulch_area: Option<f64>,
    /// Mulch depth (in)
    #[serde(alias = "mulch_depth")]
    pub mulch_depth_in: f64,
    pub paver_area: Option<f64>,
    pub irrigation_area: Option<f64>,
    pub trees: Option<u32>,
    pub shrubs: Option<u32>,
    pub tier: QualityTier,
    pub contingency_percent: f64,
}

impl Default for LandscapingInput {
    fn default() -> Self {
        Self {
            area_sq_ft: 0.0,
            sod_area: None,
            seed_area: None,
            mulch_area: None,
            mulch_depth_in: 3.0,
            paver_area: None,
            irrigation_area: None,
            trees: None,
            shrubs: None,
            tier: QualityTier::Standard,
            contingency_percent: 10.0,
        }
    }
}

impl LandscapingInput {
    /// Quantities for every line item with a positive amount, in table order
    fn quantities(&self) -> Vec<(LandscapeItem, f64)> {
        let mulch_yards = self.mulch_area.map(|area| {
            let yards: CubicYards = layer_volume(SqFt(area), self.mulch_depth_in).into();
            yards.value()
        });
        [
            (LandscapeItem::Sod, self.sod_area),
            (LandscapeItem::Seed, self.seed_area),
            (LandscapeItem::Mulch, mulch_yards),
            (LandscapeItem::Pavers, self.paver_area),
            (LandscapeItem::Irrigation, self.irrigation_area),
            (LandscapeItem::Trees, self.trees.map(f64::from)),
            (LandscapeItem::Shrubs, self.shrubs.map(f64::from)),
        ]
        .into_iter()
        .filter_map(|(item, qty)| qty.filter(|q| *q > 0.0).map(|q| (item, q)))
        .collect()
    }
}

impl FromFields for LandscapingInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        let defaults = LandscapingInput::default();
        Ok(Self {
            area_sq_ft: fields.number("area")?,
            sod_area: fields.optional_number("sod_area")?,
            seed_area: fields.optional_number("seed_area")?,
            mulch_area: fields.optional_number("mulch_area")?,
            mulch_depth_in: fields.number_or("mulch_depth", defaults.mulch_depth_in)?,
            paver_area: fields.optional_number("paver_area")?,
            irrigation_area: fields.optional_number("irrigation_area")?,
            trees: fields.optional_whole("trees")?,
            shrubs: fields.optional_whole("shrubs")?,
            tier: fields.choice_or("tier", defaults.tier)?,
            contingency_percent: fields.number_or("contingency_percent", defaults.contingency_percent)?,
        })
    }
}

/// One priced line of the estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub item: LandscapeItem,
    pub name: &'static str,
    pub quantity: Quantity,
    pub cost: CostRange,
}

/// Landscaping estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandscapingResult {
    pub tier: QualityTier,
    pub line_items: Vec<LineItem>,
    pub subtotal: CostRange,
    pub contingency: CostRange,
    pub total: CostRange,
    pub cost_per_sq_ft: CostRange,
    /// Middle of the total range
    pub midpoint: Quantity,
}

pub struct LandscapingCost;

impl Calculator for LandscapingCost {
    const KIND: CalculatorKind = CalculatorKind::LandscapingCost;
    type Input = LandscapingInput;
    type Output = LandscapingResult;

    fn validate(input: &LandscapingInput) -> CalcResult<()> {
        check("area", input.area_sq_ft, Constraint::Positive)?;
        check_optional("sod_area", input.sod_area, Constraint::NonNegative)?;
        check_optional("seed_area", input.seed_area, Constraint::NonNegative)?;
        check_optional("mulch_area", input.mulch_area, Constraint::NonNegative)?;
        check_optional("paver_area", input.paver_area, Constraint::NonNegative)?;
        check_optional("irrigation_area", input.irrigation_area, Constraint::NonNegative)?;
        check("mulch_depth", input.mulch_depth_in, Constraint::Range { min: 1.0, max: 12.0 })?;
        check(
            "contingency_percent",
            input.contingency_percent,
            Constraint::Range { min: 0.0, max: 50.0 },
        )?;

        let positive = |v: Option<f64>| v.is_some_and(|v| v > 0.0);
        require_one_of(&[
            ("sod_area", positive(input.sod_area)),
            ("seed_area", positive(input.seed_area)),
            ("mulch_area", positive(input.mulch_area)),
            ("paver_area", positive(input.paver_area)),
            ("irrigation_area", positive(input.irrigation_area)),
            ("trees", input.trees.is_some_and(|n| n > 0)),
            ("shrubs", input.shrubs.is_some_and(|n| n > 0)),
        ])
    }

    fn evaluate(input: &LandscapingInput) -> CalcResult<LandscapingResult> {
        let multiplier = input.tier.multiplier();

        let priced: Vec<(LineItem, CostRange)> = input
            .quantities()
            .into_iter()
            .map(|(item, qty)| {
                let unit_cost = item.unit_cost();
                let cost = CostRange::from_band(qty, unit_cost.low, unit_cost.high).scale(multiplier);
                let line = LineItem {
                    item,
                    name: unit_cost.name,
                    quantity: Quantity::new(round_to(qty, 2), unit_cost.unit),
                    cost: cost.rounded(),
                };
                (line, cost)
            })
            .collect();

        let subtotal: CostRange = priced.iter().map(|(_, cost)| *cost).sum();
        let contingency = subtotal.scale(input.contingency_percent / 100.0);
        let total = subtotal + contingency;
        let per_sq_ft = CostRange::new(
            safe_div(total.min, input.area_sq_ft),
            safe_div(total.max, input.area_sq_ft),
        );

        Ok(LandscapingResult {
            tier: input.tier,
            line_items: priced.into_iter().map(|(line, _)| line).collect(),
            subtotal: subtotal.rounded(),
            contingency: contingency.rounded(),
            total: total.rounded(),
            cost_per_sq_ft: per_sq_ft.rounded(),
            midpoint: Quantity::new(round_cents(total.midpoint()), Unit::Dollars),
        })
    }
}

impl Summary for LandscapingResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        Some(("Estimated cost (midpoint)", self.midpoint))
    }

    fn details(&self) -> Vec<String> {
        let mut lines = vec![format!("Total range: {}", self.total)];
        for line in &self.line_items {
            lines.push(format!("  {} ({}): {}", line.name, line.quantity, line.cost));
        }
        lines.push(format!("Subtotal: {}", self.subtotal));
        lines.push(format!("Contingency: {}", self.contingency));
        lines.push(format!("Per sq ft: {}", self.cost_per_sq_ft));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{run, run_fields};
    use pretty_assertions::assert_eq;

    fn sod_only() -> LandscapingInput {
        LandscapingInput {
            area_sq_ft: 1000.0,
            sod_area: Some(1000.0),
            ..LandscapingInput::default()
        }
    }

    #[test]
    fn test_sod_standard_tier() {
        // 1000 sq ft * $1-2 * 1.25 = 1250-2500, +10%
        let result = run::<LandscapingCost>(&sod_only()).unwrap();
        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.subtotal, CostRange::new(1250.0, 2500.0));
        assert_eq!(result.contingency, CostRange::new(125.0, 250.0));
        assert_eq!(result.total, CostRange::new(1375.0, 2750.0));
        assert_eq!(result.midpoint.value, 2062.5);
        assert_eq!(result.cost_per_sq_ft, CostRange::new(1.38, 2.75));
    }

    #[test]
    fn test_mulch_priced_by_volume() {
        // 324 sq ft at 3" = 81 cu ft = 3 cu yd
        let input = LandscapingInput {
            area_sq_ft: 324.0,
            sod_area: None,
            mulch_area: Some(324.0),
            tier: QualityTier::Basic,
            contingency_percent: 0.0,
            ..LandscapingInput::default()
        };
        let result = run::<LandscapingCost>(&input).unwrap();
        let mulch = &result.line_items[0];
        assert_eq!(mulch.item, LandscapeItem::Mulch);
        assert_eq!(mulch.quantity, Quantity::new(3.0, Unit::CubicYards));
        assert_eq!(mulch.cost, CostRange::new(135.0, 270.0));
    }

    #[test]
    fn test_tier_multiplier() {
        let basic = run::<LandscapingCost>(&LandscapingInput {
            tier: QualityTier::Basic,
            ..sod_only()
        })
        .unwrap();
        let premium = run::<LandscapingCost>(&LandscapingInput {
            tier: QualityTier::Premium,
            ..sod_only()
        })
        .unwrap();
        assert_eq!(basic.subtotal, CostRange::new(1000.0, 2000.0));
        assert_eq!(premium.subtotal, CostRange::new(1600.0, 3200.0));
    }

    #[test]
    fn test_counted_items() {
        let input = LandscapingInput {
            sod_area: None,
            trees: Some(2),
            shrubs: Some(5),
            tier: QualityTier::Basic,
            contingency_percent: 0.0,
            ..sod_only()
        };
        let result = run::<LandscapingCost>(&input).unwrap();
        let items: Vec<LandscapeItem> = result.line_items.iter().map(|l| l.item).collect();
        assert_eq!(items, vec![LandscapeItem::Trees, LandscapeItem::Shrubs]);
        // trees 300-1000, shrubs 150-500
        assert_eq!(result.total, CostRange::new(450.0, 1500.0));
    }

    #[test]
    fn test_requires_a_line_item() {
        let input = LandscapingInput {
            sod_area: Some(0.0),
            ..sod_only()
        };
        let err = run::<LandscapingCost>(&input).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_ALTERNATIVE");
    }

    #[test]
    fn test_contingency_limit() {
        let input = LandscapingInput {
            contingency_percent: 75.0,
            ..sod_only()
        };
        assert_eq!(run::<LandscapingCost>(&input).unwrap_err().field(), Some("contingency_percent"));
    }

    #[test]
    fn test_from_fields() {
        let fields = FieldMap::new()
            .with("area", "1,000")
            .with("sod_area", "1000")
            .with("tier", "mid-range");
        let result = run_fields::<LandscapingCost>(&fields).unwrap();
        assert_eq!(result.tier, QualityTier::Standard);
        assert_eq!(result.total, CostRange::new(1375.0, 2750.0));
    }
}
