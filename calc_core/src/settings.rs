//! # Engine Settings
//!
//! Optional user defaults loaded from a TOML file. Settings never override
//! a value the user typed; they only fill fields left empty.
//!
//! ```toml
//! default_unit = "metric"
//!
//! [presets.bowling-handicap]
//! basis_score = "220"
//! percentage = "90"
//!
//! [presets.fence-pickets]
//! wood = "cedar"
//! waste_percent = "15"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::CalculatorKind;
use crate::errors::{CalcError, CalcResult};
use crate::units::UnitSystem;
use crate::validation::FieldMap;

/// Calculators whose inputs carry a `unit` field
const UNIT_AWARE: [CalculatorKind; 2] = [CalculatorKind::GolfClubLength, CalculatorKind::GravelDriveway];

/// User defaults applied before a calculator parses its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Unit system for calculators that accept one
    pub default_unit: Option<UnitSystem>,

    /// Per-calculator default fields, keyed by calculator id
    pub presets: BTreeMap<String, BTreeMap<String, String>>,
}

impl EngineSettings {
    /// Parse settings from TOML text.
    ///
    /// Preset tables must be keyed by a known calculator id.
    ///
    /// # Example
    ///
    /// ```rust
    /// use calc_core::settings::EngineSettings;
    /// use calc_core::units::UnitSystem;
    ///
    /// let settings = EngineSettings::from_toml_str("default_unit = \"metric\"").unwrap();
    /// assert_eq!(settings.default_unit, Some(UnitSystem::Metric));
    /// ```
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: EngineSettings = toml::from_str(text).map_err(|e| CalcError::settings(e.to_string()))?;
        for name in settings.presets.keys() {
            name.parse::<CalculatorKind>()
                .map_err(|_| CalcError::settings(format!("unknown calculator in presets: {}", name)))?;
        }
        Ok(settings)
    }

    /// Presets for one calculator, if any
    pub fn preset(&self, kind: CalculatorKind) -> Option<&BTreeMap<String, String>> {
        self.presets.get(kind.id())
    }

    /// Fill empty fields of `fields` from the presets and default unit.
    pub fn apply_to(&self, kind: CalculatorKind, fields: &mut FieldMap) {
        if let Some(preset) = self.preset(kind) {
            debug!(calculator = kind.id(), count = preset.len(), "applying presets");
            fields.apply_defaults(preset);
        }
        if let Some(unit) = self.default_unit {
            if UNIT_AWARE.contains(&kind) && !fields.contains("unit") {
                fields.insert("unit", unit_name(unit));
            }
        }
    }
}

fn unit_name(unit: UnitSystem) -> &'static str {
    match unit {
        UnitSystem::Imperial => "imperial",
        UnitSystem::Metric => "metric",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
default_unit = "metric"

[presets.bowling-handicap]
basis_score = "220"
percentage = "90"
"#;

    #[test]
    fn test_parse_settings() {
        let settings = EngineSettings::from_toml_str(SAMPLE).unwrap();
        assert_eq!(settings.default_unit, Some(UnitSystem::Metric));
        let preset = settings.preset(CalculatorKind::BowlingHandicap).unwrap();
        assert_eq!(preset.get("basis_score").map(String::as_str), Some("220"));
    }

    #[test]
    fn test_empty_settings() {
        assert_eq!(EngineSettings::from_toml_str("").unwrap(), EngineSettings::default());
    }

    #[test]
    fn test_presets_fill_only_empty_fields() {
        let settings = EngineSettings::from_toml_str(SAMPLE).unwrap();
        let mut fields = FieldMap::new()
            .with("percentage", "80")
            .with("average", "150");
        settings.apply_to(CalculatorKind::BowlingHandicap, &mut fields);

        assert_eq!(fields.get("basis_score"), Some("220"));
        assert_eq!(fields.get("percentage"), Some("80"));
        assert!(!fields.contains("unit"));

        let outcome = CalculatorKind::BowlingHandicap.run_fields(&fields).unwrap();
        assert_eq!(outcome.kind(), CalculatorKind::BowlingHandicap);
    }

    #[test]
    fn test_default_unit_for_unit_aware_calculators() {
        let settings = EngineSettings::from_toml_str(SAMPLE).unwrap();

        let mut golf = FieldMap::new().with("height", "183");
        settings.apply_to(CalculatorKind::GolfClubLength, &mut golf);
        assert_eq!(golf.get("unit"), Some("metric"));

        let mut typed = FieldMap::new().with("length", "30").with("unit", "imperial");
        settings.apply_to(CalculatorKind::GravelDriveway, &mut typed);
        assert_eq!(typed.get("unit"), Some("imperial"));
    }

    #[test]
    fn test_unknown_calculator_preset() {
        let err = EngineSettings::from_toml_str("[presets.mortgage]\nrate = \"6\"").unwrap_err();
        assert_eq!(err.error_code(), "SETTINGS_ERROR");
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineSettings::from_toml_str("default_unit = ").unwrap_err();
        assert_eq!(err.error_code(), "SETTINGS_ERROR");
        let err = EngineSettings::from_toml_str("default_unit = \"furlongs\"").unwrap_err();
        assert_eq!(err.error_code(), "SETTINGS_ERROR");
    }
}
