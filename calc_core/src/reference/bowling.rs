//! Bowling Reference Data
//!
//! Skill tiers by average and the league handicap formulas most sanctioned
//! leagues pick from.

use serde::Serialize;

use crate::reference::matcher::Bracket;

/// Skill level label for a range of averages
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkillTier {
    /// Inclusive lower average
    pub min_average: f64,
    /// Exclusive upper average
    pub max_average: f64,
    pub label: &'static str,
}

impl Bracket for SkillTier {
    fn lower(&self) -> f64 {
        self.min_average
    }
    fn upper(&self) -> f64 {
        self.max_average
    }
}

/// Covers every legal average, 0 through 300 inclusive
pub const SKILL_TIERS: [SkillTier; 6] = [
    SkillTier { min_average: 0.0, max_average: 120.0, label: "Beginner" },
    SkillTier { min_average: 120.0, max_average: 150.0, label: "Novice" },
    SkillTier { min_average: 150.0, max_average: 180.0, label: "Intermediate" },
    SkillTier { min_average: 180.0, max_average: 200.0, label: "Advanced" },
    SkillTier { min_average: 200.0, max_average: 230.0, label: "Expert" },
    SkillTier { min_average: 230.0, max_average: 301.0, label: "Elite" },
];

/// A common league handicap formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeagueFormula {
    pub name: &'static str,
    pub basis_score: f64,
    pub percentage: f64,
}

pub const LEAGUE_FORMULAS: [LeagueFormula; 5] = [
    LeagueFormula { name: "90% of 220", basis_score: 220.0, percentage: 90.0 },
    LeagueFormula { name: "80% of 220", basis_score: 220.0, percentage: 80.0 },
    LeagueFormula { name: "90% of 210", basis_score: 210.0, percentage: 90.0 },
    LeagueFormula { name: "80% of 200", basis_score: 200.0, percentage: 80.0 },
    LeagueFormula { name: "100% of 230", basis_score: 230.0, percentage: 100.0 },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::matcher::{bracket_lookup, validate_brackets};

    #[test]
    fn test_tiers_cover_all_averages() {
        validate_brackets(&SKILL_TIERS).unwrap();
        for average in 0..=300 {
            assert!(bracket_lookup(&SKILL_TIERS, average as f64).is_supported());
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(bracket_lookup(&SKILL_TIERS, 150.0).matched().unwrap().label, "Intermediate");
        assert_eq!(bracket_lookup(&SKILL_TIERS, 300.0).matched().unwrap().label, "Elite");
    }
}
