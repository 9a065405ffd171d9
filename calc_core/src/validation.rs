//! # Input Validation
//!
//! First stage of every calculation. Raw form values arrive as strings in a
//! [`FieldMap`]; typed getters parse them, and [`check`] enforces the
//! per-field [`Constraint`] before any formula sees the number.
//!
//! Parsing and range checking are deliberately separate steps: JSON requests
//! skip the string stage entirely but still pass through the calculator's
//! `validate`, so ranges live in exactly one place.
//!
//! ## Rules
//!
//! - Empty or whitespace-only fields count as absent.
//! - An absent required field is a [`CalcError::MissingField`], never zero.
//! - `NaN` and infinities are rejected even when the text parses.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::validation::{check, Constraint, FieldMap};
//!
//! let fields = FieldMap::new()
//!     .with("basis_score", "220")
//!     .with("percentage", "90%");
//!
//! let pct = fields.number("percentage").unwrap();
//! assert_eq!(check("percentage", pct, Constraint::Percentage).unwrap(), 90.0);
//! assert!(fields.optional_number("average").unwrap().is_none());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Declared constraint for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    /// value > 0
    Positive,
    /// value >= 0
    NonNegative,
    /// 0 < value <= 100, stored as a whole-number percentage
    Percentage,
    /// 0 <= value <= 300 (bowling scores and averages)
    Score,
    /// min <= value <= max
    Range { min: f64, max: f64 },
    /// min <= value < max
    HalfOpen { min: f64, max: f64 },
}

impl Constraint {
    /// Does `value` satisfy this constraint?
    pub fn accepts(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match *self {
            Constraint::Positive => value > 0.0,
            Constraint::NonNegative => value >= 0.0,
            Constraint::Percentage => value > 0.0 && value <= 100.0,
            Constraint::Score => (0.0..=300.0).contains(&value),
            Constraint::Range { min, max } => value >= min && value <= max,
            Constraint::HalfOpen { min, max } => value >= min && value < max,
        }
    }

    /// Human-readable description used in error messages
    pub fn describe(&self) -> String {
        match *self {
            Constraint::Positive => "must be greater than 0".to_string(),
            Constraint::NonNegative => "cannot be negative".to_string(),
            Constraint::Percentage => "must be a percentage in (0, 100]".to_string(),
            Constraint::Score => "must be a score between 0 and 300".to_string(),
            Constraint::Range { min, max } => format!("must be between {} and {}", min, max),
            Constraint::HalfOpen { min, max } => {
                format!("must be at least {} and less than {}", min, max)
            }
        }
    }
}

/// Check `value` against `constraint`, returning it unchanged on success.
pub fn check(field: &str, value: f64, constraint: Constraint) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    if constraint.accepts(value) {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Value {}", constraint.describe()),
        ))
    }
}

/// Check an optional value; `None` passes through untouched.
pub fn check_optional(field: &str, value: Option<f64>, constraint: Constraint) -> CalcResult<Option<f64>> {
    value.map(|v| check(field, v, constraint)).transpose()
}

/// Fail with [`CalcError::MissingAlternative`] unless at least one flag is set.
///
/// `present` pairs each alternative field name with whether it was supplied.
pub fn require_one_of(present: &[(&str, bool)]) -> CalcResult<()> {
    if present.iter().any(|(_, supplied)| *supplied) {
        Ok(())
    } else {
        let names: Vec<&str> = present.iter().map(|(name, _)| *name).collect();
        Err(CalcError::missing_alternative(&names))
    }
}

/// Parse a user-typed number.
///
/// Accepts a leading `$`, a trailing `%` and thousands separators, so
/// "$30,000" and "6.5%" both parse.
pub fn parse_number(field: &str, raw: &str) -> CalcResult<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(CalcError::missing_field(field));
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::invalid_input(field, raw.trim(), "Not a number")),
    }
}

/// Parse a user-typed whole number (counts, months, etc.)
pub fn parse_whole(field: &str, raw: &str) -> CalcResult<u32> {
    let value = parse_number(field, raw)?;
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(CalcError::invalid_input(
            field,
            raw.trim(),
            "Must be a whole number",
        ));
    }
    Ok(value as u32)
}

/// Parse a yes/no toggle
pub fn parse_flag(field: &str, raw: &str) -> CalcResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Ok(true),
        "false" | "no" | "n" | "0" | "off" => Ok(false),
        other => Err(CalcError::unknown_option(field, other, &["true", "false"])),
    }
}

/// An enumerated select option (fence style, wood species, room type, ...).
///
/// `OPTIONS` lists the canonical spellings shown to the user; `from_option`
/// may accept extra aliases.
pub trait Choice: Sized + Copy {
    /// Canonical option spellings
    const OPTIONS: &'static [&'static str];

    /// Match an already-normalized (lowercase, kebab-case) option
    fn from_option(value: &str) -> Option<Self>;

    /// Normalize and parse a raw option string
    fn parse_choice(field: &str, raw: &str) -> CalcResult<Self> {
        let normalized = raw.trim().to_lowercase().replace([' ', '_'], "-");
        Self::from_option(&normalized)
            .ok_or_else(|| CalcError::unknown_option(field, raw.trim(), Self::OPTIONS))
    }
}

/// Raw form snapshot: field name → text as typed.
///
/// Kept ordered so error reporting and debug output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: BTreeMap<String, String>,
}

impl FieldMap {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert or replace a field value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(normalize_key(&field.into()), value.into());
    }

    /// Parse `key=value` pairs (as typed on a command line)
    pub fn from_pairs<I, S>(pairs: I) -> CalcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = FieldMap::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                CalcError::invalid_input(pair, pair, "Expected field=value")
            })?;
            if key.trim().is_empty() {
                return Err(CalcError::invalid_input(pair, pair, "Field name is empty"));
            }
            map.insert(key.trim(), value);
        }
        Ok(map)
    }

    /// Fill fields the user left empty from a set of defaults.
    pub fn apply_defaults(&mut self, defaults: &BTreeMap<String, String>) {
        for (key, value) in defaults {
            if self.get(key).is_none() {
                self.insert(key.clone(), value.clone());
            }
        }
    }

    /// Trimmed value, or `None` when absent or blank
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(&normalize_key(field))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Whether a non-blank value exists for `field`
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Number of stored fields (blank ones included)
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the snapshot has no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over (field, raw value) pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Required number
    pub fn number(&self, field: &str) -> CalcResult<f64> {
        let raw = self.get(field).ok_or_else(|| CalcError::missing_field(field))?;
        parse_number(field, raw)
    }

    /// Optional number
    pub fn optional_number(&self, field: &str) -> CalcResult<Option<f64>> {
        self.get(field).map(|raw| parse_number(field, raw)).transpose()
    }

    /// Number with a declared default
    pub fn number_or(&self, field: &str, default: f64) -> CalcResult<f64> {
        Ok(self.optional_number(field)?.unwrap_or(default))
    }

    /// Required whole number
    pub fn whole(&self, field: &str) -> CalcResult<u32> {
        let raw = self.get(field).ok_or_else(|| CalcError::missing_field(field))?;
        parse_whole(field, raw)
    }

    /// Optional whole number
    pub fn optional_whole(&self, field: &str) -> CalcResult<Option<u32>> {
        self.get(field).map(|raw| parse_whole(field, raw)).transpose()
    }

    /// Whole number with a declared default
    pub fn whole_or(&self, field: &str, default: u32) -> CalcResult<u32> {
        Ok(self.optional_whole(field)?.unwrap_or(default))
    }

    /// Required select option
    pub fn choice<T: Choice>(&self, field: &str) -> CalcResult<T> {
        let raw = self.get(field).ok_or_else(|| CalcError::missing_field(field))?;
        T::parse_choice(field, raw)
    }

    /// Select option with a declared default
    pub fn choice_or<T: Choice>(&self, field: &str, default: T) -> CalcResult<T> {
        match self.get(field) {
            Some(raw) => T::parse_choice(field, raw),
            None => Ok(default),
        }
    }

    /// Toggle; absent means off
    pub fn flag(&self, field: &str) -> CalcResult<bool> {
        match self.get(field) {
            Some(raw) => parse_flag(field, raw),
            None => Ok(false),
        }
    }

    /// Required free text
    pub fn text(&self, field: &str) -> CalcResult<String> {
        self.get(field)
            .map(str::to_string)
            .ok_or_else(|| CalcError::missing_field(field))
    }

    /// Optional list of numbers separated by commas, semicolons or spaces
    pub fn number_list(&self, field: &str) -> CalcResult<Option<Vec<f64>>> {
        let Some(raw) = self.get(field) else {
            return Ok(None);
        };
        let values = raw
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| parse_number(field, part))
            .collect::<CalcResult<Vec<f64>>>()?;
        Ok(if values.is_empty() { None } else { Some(values) })
    }
}

/// Typed calculator input built from a raw form snapshot.
pub trait FromFields: Sized {
    /// Parse every field this calculator reads. Range checks happen later in
    /// the calculator's `validate`.
    fn from_fields(fields: &FieldMap) -> CalcResult<Self>;
}

/// Field names are matched case-insensitively with `-` and `_` equivalent.
fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Style {
        Standard,
        BoardOnBoard,
    }

    impl Choice for Style {
        const OPTIONS: &'static [&'static str] = &["standard", "boardonboard"];

        fn from_option(value: &str) -> Option<Self> {
            match value {
                "standard" => Some(Style::Standard),
                "boardonboard" | "board-on-board" => Some(Style::BoardOnBoard),
                _ => None,
            }
        }
    }

    #[test]
    fn test_parse_number_formats() {
        assert_eq!(parse_number("price", "30000").unwrap(), 30000.0);
        assert_eq!(parse_number("price", " $30,000.50 ").unwrap(), 30000.5);
        assert_eq!(parse_number("rate", "6.5%").unwrap(), 6.5);
    }

    #[test]
    fn test_parse_number_rejects_text_and_non_finite() {
        assert_eq!(parse_number("price", "abc").unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(parse_number("price", "NaN").unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(parse_number("price", "inf").unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_parse_whole() {
        assert_eq!(parse_whole("term_months", "60").unwrap(), 60);
        assert!(parse_whole("term_months", "60.5").is_err());
        assert!(parse_whole("term_months", "-1").is_err());
    }

    #[test]
    fn test_constraints() {
        assert!(Constraint::Percentage.accepts(100.0));
        assert!(!Constraint::Percentage.accepts(0.0));
        assert!(Constraint::Score.accepts(0.0));
        assert!(Constraint::Score.accepts(300.0));
        assert!(!Constraint::Score.accepts(300.5));
        assert!(!Constraint::Positive.accepts(0.0));
        assert!(Constraint::HalfOpen { min: 0.0, max: 12.0 }.accepts(0.0));
        assert!(!Constraint::HalfOpen { min: 0.0, max: 12.0 }.accepts(12.0));
        assert!(!Constraint::NonNegative.accepts(f64::NAN));
    }

    #[test]
    fn test_check_reports_field() {
        let err = check("percentage", 120.0, Constraint::Percentage).unwrap_err();
        assert_eq!(err.field(), Some("percentage"));
        assert!(err.to_string().contains("(0, 100]"));
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let fields = FieldMap::new().with("average", "   ");
        assert!(!fields.contains("average"));
        assert_eq!(fields.number("average").unwrap_err(), CalcError::missing_field("average"));
    }

    #[test]
    fn test_keys_are_normalized() {
        let fields = FieldMap::new().with("Basis-Score", "220");
        assert_eq!(fields.number("basis_score").unwrap(), 220.0);
    }

    #[test]
    fn test_from_pairs() {
        let fields = FieldMap::from_pairs(["clicks=250", "ad_spend=500"]).unwrap();
        assert_eq!(fields.whole("clicks").unwrap(), 250);
        assert!(FieldMap::from_pairs(["clicks"]).is_err());
        assert!(FieldMap::from_pairs(["=5"]).is_err());
    }

    #[test]
    fn test_choice_parsing() {
        let fields = FieldMap::new().with("style", "Board On Board");
        assert_eq!(fields.choice::<Style>("style").unwrap(), Style::BoardOnBoard);

        let bad = FieldMap::new().with("style", "lattice");
        let err = bad.choice::<Style>("style").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_OPTION");

        let empty = FieldMap::new();
        assert_eq!(empty.choice_or("style", Style::Standard).unwrap(), Style::Standard);
    }

    #[test]
    fn test_flags() {
        let fields = FieldMap::new().with("include_gate", "yes").with("rim", "maybe");
        assert!(fields.flag("include_gate").unwrap());
        assert!(!fields.flag("absent").unwrap());
        assert!(fields.flag("rim").is_err());
    }

    #[test]
    fn test_number_list() {
        let fields = FieldMap::new().with("game_scores", "150, 160;170 180");
        assert_eq!(
            fields.number_list("game_scores").unwrap(),
            Some(vec![150.0, 160.0, 170.0, 180.0])
        );
        assert_eq!(FieldMap::new().number_list("game_scores").unwrap(), None);
        let bad = FieldMap::new().with("game_scores", "150, x");
        assert!(bad.number_list("game_scores").is_err());
    }

    #[test]
    fn test_require_one_of() {
        assert!(require_one_of(&[("average", false), ("game_scores", true)]).is_ok());
        let err = require_one_of(&[("average", false), ("game_scores", false)]).unwrap_err();
        assert_eq!(err, CalcError::missing_alternative(&["average", "game_scores"]));
    }

    #[test]
    fn test_apply_defaults_keeps_user_values() {
        let mut fields = FieldMap::new().with("percentage", "80").with("basis_score", "");
        let mut defaults = BTreeMap::new();
        defaults.insert("percentage".to_string(), "90".to_string());
        defaults.insert("basis_score".to_string(), "220".to_string());
        fields.apply_defaults(&defaults);
        assert_eq!(fields.number("percentage").unwrap(), 80.0);
        assert_eq!(fields.number("basis_score").unwrap(), 220.0);
    }
}
