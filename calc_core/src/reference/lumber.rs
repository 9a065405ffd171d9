//! Floor Joist Span Tables
//!
//! Maximum allowable spans for No. 2 visually graded dimension lumber used
//! as floor joists: 40 psf live load, 10 psf dead load, L/360 deflection
//! limit (residential span table convention, values in feet-inches).
//!
//! A size's bracket runs from the previous size's maximum span (0 for the
//! smallest) up to, but not including, its own maximum span. A span at or
//! beyond the 2x12 limit is unsupported.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::reference::matcher::Bracket;
use crate::validation::Choice;

/// Wood species groups with published joist spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WoodSpecies {
    /// Douglas Fir-Larch
    #[serde(rename = "DF-L")]
    DouglasFirLarch,
    /// Southern Pine
    #[serde(rename = "SP")]
    SouthernPine,
    /// Hem-Fir
    #[serde(rename = "HF")]
    HemFir,
    /// Spruce-Pine-Fir
    #[serde(rename = "SPF")]
    SprucePineFir,
}

impl WoodSpecies {
    /// All species for UI selection
    pub const ALL: [WoodSpecies; 4] = [
        WoodSpecies::DouglasFirLarch,
        WoodSpecies::SouthernPine,
        WoodSpecies::HemFir,
        WoodSpecies::SprucePineFir,
    ];

    /// Short code (e.g., "DF-L", "SP")
    pub fn code(&self) -> &'static str {
        match self {
            WoodSpecies::DouglasFirLarch => "DF-L",
            WoodSpecies::SouthernPine => "SP",
            WoodSpecies::HemFir => "HF",
            WoodSpecies::SprucePineFir => "SPF",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WoodSpecies::DouglasFirLarch => "Douglas Fir-Larch",
            WoodSpecies::SouthernPine => "Southern Pine",
            WoodSpecies::HemFir => "Hem-Fir",
            WoodSpecies::SprucePineFir => "Spruce-Pine-Fir",
        }
    }
}

impl Choice for WoodSpecies {
    const OPTIONS: &'static [&'static str] = &["df-l", "sp", "hf", "spf"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "df-l" | "dfl" | "douglas-fir-larch" | "douglas-fir" => Some(WoodSpecies::DouglasFirLarch),
            "sp" | "southern-pine" | "syp" => Some(WoodSpecies::SouthernPine),
            "hf" | "hem-fir" => Some(WoodSpecies::HemFir),
            "spf" | "spruce-pine-fir" => Some(WoodSpecies::SprucePineFir),
            _ => None,
        }
    }
}

impl std::fmt::Display for WoodSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Dimension lumber sizes used for floor joists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoistSize {
    /// 2x6 (1.5" x 5.5")
    #[serde(rename = "2x6")]
    L2x6,
    /// 2x8 (1.5" x 7.25")
    #[serde(rename = "2x8")]
    L2x8,
    /// 2x10 (1.5" x 9.25")
    #[serde(rename = "2x10")]
    L2x10,
    /// 2x12 (1.5" x 11.25")
    #[serde(rename = "2x12")]
    L2x12,
}

impl JoistSize {
    /// Smallest to largest
    pub const ALL: [JoistSize; 4] = [
        JoistSize::L2x6,
        JoistSize::L2x8,
        JoistSize::L2x10,
        JoistSize::L2x12,
    ];

    /// Get display name (e.g., "2x10")
    pub fn display_name(&self) -> &'static str {
        match self {
            JoistSize::L2x6 => "2x6",
            JoistSize::L2x8 => "2x8",
            JoistSize::L2x10 => "2x10",
            JoistSize::L2x12 => "2x12",
        }
    }

    /// Lumber price band per linear foot (low, high) in dollars
    pub fn price_per_linear_foot(&self) -> (f64, f64) {
        match self {
            JoistSize::L2x6 => (0.85, 1.25),
            JoistSize::L2x8 => (1.15, 1.65),
            JoistSize::L2x10 => (1.55, 2.25),
            JoistSize::L2x12 => (2.05, 2.95),
        }
    }
}

impl std::fmt::Display for JoistSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// On-center joist spacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoistSpacing {
    #[serde(rename = "12")]
    In12,
    #[serde(rename = "16")]
    In16,
    #[serde(rename = "19.2")]
    In19_2,
    #[serde(rename = "24")]
    In24,
}

impl JoistSpacing {
    pub fn inches(&self) -> f64 {
        match self {
            JoistSpacing::In12 => 12.0,
            JoistSpacing::In16 => 16.0,
            JoistSpacing::In19_2 => 19.2,
            JoistSpacing::In24 => 24.0,
        }
    }
}

impl Choice for JoistSpacing {
    const OPTIONS: &'static [&'static str] = &["12", "16", "19.2", "24"];

    fn from_option(value: &str) -> Option<Self> {
        match value.trim_end_matches("in").trim_end_matches('"').trim_end_matches("-oc") {
            "12" => Some(JoistSpacing::In12),
            "16" => Some(JoistSpacing::In16),
            "19.2" => Some(JoistSpacing::In19_2),
            "24" => Some(JoistSpacing::In24),
            _ => None,
        }
    }
}

/// Maximum spans (feet, inches) for 2x6, 2x8, 2x10, 2x12 at one spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanRow {
    pub species: WoodSpecies,
    pub spacing: JoistSpacing,
    pub max_spans: [(u8, u8); 4],
}

/// No. 2 grade, 40 psf live / 10 psf dead, L/360
pub const SPAN_TABLE: [SpanRow; 16] = [
    SpanRow { species: WoodSpecies::DouglasFirLarch, spacing: JoistSpacing::In12, max_spans: [(10, 9), (14, 2), (17, 9), (20, 7)] },
    SpanRow { species: WoodSpecies::DouglasFirLarch, spacing: JoistSpacing::In16, max_spans: [(9, 9), (12, 7), (15, 5), (17, 10)] },
    SpanRow { species: WoodSpecies::DouglasFirLarch, spacing: JoistSpacing::In19_2, max_spans: [(9, 1), (11, 6), (14, 1), (16, 3)] },
    SpanRow { species: WoodSpecies::DouglasFirLarch, spacing: JoistSpacing::In24, max_spans: [(8, 1), (10, 3), (12, 7), (14, 7)] },
    SpanRow { species: WoodSpecies::SouthernPine, spacing: JoistSpacing::In12, max_spans: [(10, 9), (14, 2), (18, 0), (21, 9)] },
    SpanRow { species: WoodSpecies::SouthernPine, spacing: JoistSpacing::In16, max_spans: [(9, 9), (12, 10), (16, 1), (18, 10)] },
    SpanRow { species: WoodSpecies::SouthernPine, spacing: JoistSpacing::In19_2, max_spans: [(9, 2), (12, 1), (14, 8), (17, 2)] },
    SpanRow { species: WoodSpecies::SouthernPine, spacing: JoistSpacing::In24, max_spans: [(8, 6), (11, 0), (13, 1), (15, 5)] },
    SpanRow { species: WoodSpecies::HemFir, spacing: JoistSpacing::In12, max_spans: [(10, 0), (13, 2), (16, 10), (20, 4)] },
    SpanRow { species: WoodSpecies::HemFir, spacing: JoistSpacing::In16, max_spans: [(9, 1), (12, 0), (15, 2), (17, 7)] },
    SpanRow { species: WoodSpecies::HemFir, spacing: JoistSpacing::In19_2, max_spans: [(8, 7), (11, 3), (13, 10), (16, 1)] },
    SpanRow { species: WoodSpecies::HemFir, spacing: JoistSpacing::In24, max_spans: [(7, 11), (10, 2), (12, 5), (14, 4)] },
    SpanRow { species: WoodSpecies::SprucePineFir, spacing: JoistSpacing::In12, max_spans: [(10, 3), (13, 6), (17, 3), (20, 7)] },
    SpanRow { species: WoodSpecies::SprucePineFir, spacing: JoistSpacing::In16, max_spans: [(9, 4), (12, 3), (15, 5), (17, 10)] },
    SpanRow { species: WoodSpecies::SprucePineFir, spacing: JoistSpacing::In19_2, max_spans: [(8, 9), (11, 6), (14, 1), (16, 3)] },
    SpanRow { species: WoodSpecies::SprucePineFir, spacing: JoistSpacing::In24, max_spans: [(8, 1), (10, 3), (12, 7), (14, 7)] },
];

/// A joist size and the span range it is recommended for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanBracket {
    pub size: JoistSize,
    /// Inclusive lower bound (ft)
    pub min_span_ft: f64,
    /// Exclusive upper bound: the size's maximum span (ft)
    pub max_span_ft: f64,
    /// Maximum span as printed in the table, e.g. "15'-5\""
    pub max_span_label: String,
}

impl Bracket for SpanBracket {
    fn lower(&self) -> f64 {
        self.min_span_ft
    }
    fn upper(&self) -> f64 {
        self.max_span_ft
    }
}

/// Brackets for every species and spacing, derived from [`SPAN_TABLE`] once
static SPAN_BRACKETS: Lazy<HashMap<(WoodSpecies, JoistSpacing), Vec<SpanBracket>>> = Lazy::new(|| {
    SPAN_TABLE
        .iter()
        .map(|row| ((row.species, row.spacing), build_brackets(row)))
        .collect()
});

/// Size brackets for a species and spacing, smallest size first
pub fn span_brackets(species: WoodSpecies, spacing: JoistSpacing) -> &'static [SpanBracket] {
    SPAN_BRACKETS
        .get(&(species, spacing))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn build_brackets(row: &SpanRow) -> Vec<SpanBracket> {
    let mut lower = 0.0;
    JoistSize::ALL
        .iter()
        .zip(row.max_spans.iter())
        .map(|(size, (ft, inch))| {
            let upper = *ft as f64 + *inch as f64 / 12.0;
            let bracket = SpanBracket {
                size: *size,
                min_span_ft: lower,
                max_span_ft: upper,
                max_span_label: format!("{}'-{}\"", ft, inch),
            };
            lower = upper;
            bracket
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::matcher::{bracket_lookup, validate_brackets};

    #[test]
    fn test_every_species_spacing_pair_present() {
        for species in WoodSpecies::ALL {
            for spacing in [JoistSpacing::In12, JoistSpacing::In16, JoistSpacing::In19_2, JoistSpacing::In24] {
                let brackets = span_brackets(species, spacing);
                assert_eq!(brackets.len(), JoistSize::ALL.len(), "{} @ {}", species, spacing.inches());
            }
        }
    }

    #[test]
    fn test_brackets_are_gap_free() {
        for row in SPAN_TABLE.iter() {
            let brackets = span_brackets(row.species, row.spacing);
            assert_eq!(brackets.len(), 4);
            validate_brackets(brackets).unwrap();
        }
    }

    #[test]
    fn test_df_l_16_oc_lookup() {
        let brackets = span_brackets(WoodSpecies::DouglasFirLarch, JoistSpacing::In16);
        // 14 ft fits between the 2x8 max (12'-7") and the 2x10 max (15'-5")
        let hit = bracket_lookup(brackets, 14.0);
        assert_eq!(hit.matched().unwrap().size, JoistSize::L2x10);
        assert_eq!(hit.matched().unwrap().max_span_label, "15'-5\"");
        // Beyond 2x12 max of 17'-10"
        assert!(!bracket_lookup(brackets, 18.0).is_supported());
    }

    #[test]
    fn test_spacing_choice() {
        assert_eq!(JoistSpacing::parse_choice("spacing", "19.2").unwrap(), JoistSpacing::In19_2);
        assert_eq!(JoistSpacing::parse_choice("spacing", "16in").unwrap(), JoistSpacing::In16);
        assert!(JoistSpacing::parse_choice("spacing", "18").is_err());
    }

    #[test]
    fn test_species_choice() {
        assert_eq!(
            WoodSpecies::parse_choice("species", "Southern Pine").unwrap(),
            WoodSpecies::SouthernPine
        );
        assert_eq!(WoodSpecies::parse_choice("species", "DF-L").unwrap(), WoodSpecies::DouglasFirLarch);
    }
}
