//! Aggregate Materials
//!
//! Bulk density (compacted, tons per cubic yard) and delivered price band
//! (dollars per ton) for the stone products used in driveway layers.

use serde::{Deserialize, Serialize};

use crate::validation::Choice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GravelMaterial {
    CrushedStone,
    #[serde(rename = "57-stone")]
    Stone57,
    #[serde(rename = "3-stone")]
    Stone3,
    CrusherRun,
    PeaGravel,
    RiverRock,
    RecycledConcrete,
    QuarryProcess,
}

/// Density and price for one material
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateSpec {
    pub material: GravelMaterial,
    pub name: &'static str,
    /// Tons per cubic yard
    pub density: f64,
    /// Dollars per ton, low end
    pub price_low: f64,
    /// Dollars per ton, high end
    pub price_high: f64,
}

pub const AGGREGATES: [AggregateSpec; 8] = [
    AggregateSpec { material: GravelMaterial::CrushedStone, name: "Crushed stone", density: 1.40, price_low: 30.0, price_high: 65.0 },
    AggregateSpec { material: GravelMaterial::Stone57, name: "#57 stone", density: 1.40, price_low: 30.0, price_high: 60.0 },
    AggregateSpec { material: GravelMaterial::Stone3, name: "#3 stone", density: 1.50, price_low: 28.0, price_high: 55.0 },
    AggregateSpec { material: GravelMaterial::CrusherRun, name: "Crusher run", density: 1.50, price_low: 25.0, price_high: 50.0 },
    AggregateSpec { material: GravelMaterial::PeaGravel, name: "Pea gravel", density: 1.35, price_low: 35.0, price_high: 70.0 },
    AggregateSpec { material: GravelMaterial::RiverRock, name: "River rock", density: 1.30, price_low: 45.0, price_high: 100.0 },
    AggregateSpec { material: GravelMaterial::RecycledConcrete, name: "Recycled concrete", density: 1.20, price_low: 15.0, price_high: 35.0 },
    AggregateSpec { material: GravelMaterial::QuarryProcess, name: "Quarry process", density: 1.45, price_low: 25.0, price_high: 45.0 },
];

impl GravelMaterial {
    /// Table row for this material
    pub fn spec(&self) -> &'static AggregateSpec {
        let row = match self {
            GravelMaterial::CrushedStone => 0,
            GravelMaterial::Stone57 => 1,
            GravelMaterial::Stone3 => 2,
            GravelMaterial::CrusherRun => 3,
            GravelMaterial::PeaGravel => 4,
            GravelMaterial::RiverRock => 5,
            GravelMaterial::RecycledConcrete => 6,
            GravelMaterial::QuarryProcess => 7,
        };
        &AGGREGATES[row]
    }
}

impl Choice for GravelMaterial {
    const OPTIONS: &'static [&'static str] = &[
        "crushed-stone",
        "57-stone",
        "3-stone",
        "crusher-run",
        "pea-gravel",
        "river-rock",
        "recycled-concrete",
        "quarry-process",
    ];

    fn from_option(value: &str) -> Option<Self> {
        match value.trim_start_matches('#') {
            "crushed-stone" | "crushed" => Some(GravelMaterial::CrushedStone),
            "57-stone" | "57" => Some(GravelMaterial::Stone57),
            "3-stone" | "3" => Some(GravelMaterial::Stone3),
            "crusher-run" | "dense-grade" | "abc" => Some(GravelMaterial::CrusherRun),
            "pea-gravel" => Some(GravelMaterial::PeaGravel),
            "river-rock" => Some(GravelMaterial::RiverRock),
            "recycled-concrete" | "rca" => Some(GravelMaterial::RecycledConcrete),
            "quarry-process" | "qp" => Some(GravelMaterial::QuarryProcess),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_material_has_its_own_row() {
        for option in GravelMaterial::OPTIONS {
            let material = GravelMaterial::from_option(option).unwrap();
            assert_eq!(material.spec().material, material);
        }
    }

    #[test]
    fn test_rows_line_up_with_materials() {
        for row in AGGREGATES.iter() {
            assert_eq!(row.material.spec(), row, "{}", row.name);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(GravelMaterial::parse_choice("base_material", "#57").unwrap(), GravelMaterial::Stone57);
        assert_eq!(
            GravelMaterial::parse_choice("surface_material", "Crusher Run").unwrap(),
            GravelMaterial::CrusherRun
        );
    }
}
