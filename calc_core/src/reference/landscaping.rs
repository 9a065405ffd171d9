//! Landscaping Unit Costs
//!
//! Installed cost bands per unit (materials plus labor) and the finish-tier
//! multipliers applied on top of them.

use serde::{Deserialize, Serialize};

use crate::composer::Unit;
use crate::validation::Choice;

/// Line items a landscaping estimate can include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandscapeItem {
    Sod,
    Seed,
    Mulch,
    Pavers,
    Irrigation,
    Trees,
    Shrubs,
}

/// Installed price band for one line item
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitCost {
    pub item: LandscapeItem,
    pub name: &'static str,
    /// What one unit is (square feet, cubic yards, each)
    pub unit: Unit,
    pub low: f64,
    pub high: f64,
}

pub const UNIT_COSTS: [UnitCost; 7] = [
    UnitCost { item: LandscapeItem::Sod, name: "Sod installation", unit: Unit::SquareFeet, low: 1.00, high: 2.00 },
    UnitCost { item: LandscapeItem::Seed, name: "Seeding", unit: Unit::SquareFeet, low: 0.10, high: 0.25 },
    UnitCost { item: LandscapeItem::Mulch, name: "Mulch (installed)", unit: Unit::CubicYards, low: 45.0, high: 90.0 },
    UnitCost { item: LandscapeItem::Pavers, name: "Paver patio", unit: Unit::SquareFeet, low: 12.0, high: 25.0 },
    UnitCost { item: LandscapeItem::Irrigation, name: "Irrigation system", unit: Unit::SquareFeet, low: 0.75, high: 1.50 },
    UnitCost { item: LandscapeItem::Trees, name: "Trees (planted)", unit: Unit::Count, low: 150.0, high: 500.0 },
    UnitCost { item: LandscapeItem::Shrubs, name: "Shrubs (planted)", unit: Unit::Count, low: 30.0, high: 100.0 },
];

impl LandscapeItem {
    /// Table row for this item
    pub fn unit_cost(&self) -> &'static UnitCost {
        let row = match self {
            LandscapeItem::Sod => 0,
            LandscapeItem::Seed => 1,
            LandscapeItem::Mulch => 2,
            LandscapeItem::Pavers => 3,
            LandscapeItem::Irrigation => 4,
            LandscapeItem::Trees => 5,
            LandscapeItem::Shrubs => 6,
        };
        &UNIT_COSTS[row]
    }
}

/// Finish quality of the job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Basic,
    #[default]
    Standard,
    Premium,
}

impl QualityTier {
    pub fn multiplier(&self) -> f64 {
        match self {
            QualityTier::Basic => 1.0,
            QualityTier::Standard => 1.25,
            QualityTier::Premium => 1.6,
        }
    }
}

impl Choice for QualityTier {
    const OPTIONS: &'static [&'static str] = &["basic", "standard", "premium"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "basic" | "budget" => Some(QualityTier::Basic),
            "standard" | "mid" | "mid-range" => Some(QualityTier::Standard),
            "premium" | "high-end" => Some(QualityTier::Premium),
            _ => None,
        }
    }
}
