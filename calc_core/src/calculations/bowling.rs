//! # Bowling Handicap
//!
//! League handicap from a bowler's average:
//!
//! ```text
//! handicap = floor((basis − average) × percentage / 100), never below 0
//! ```
//!
//! The average is either entered directly or computed as the floor of the
//! mean of recent game scores. A manual average wins when both are given.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::bowling::{BowlingHandicap, BowlingInput};
//! use calc_core::calculations::run;
//!
//! let input = BowlingInput {
//!     basis_score: 220.0,
//!     percentage: 90.0,
//!     average: Some(156.0),
//!     game_scores: None,
//!     games_per_series: 3,
//! };
//!
//! let result = run::<BowlingHandicap>(&input).unwrap();
//! assert_eq!(result.handicap, 57);
//! assert_eq!(result.series_handicap, 171);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::{Quantity, RangeMatch, Unit};
use crate::equations::rounding::floor_whole;
use crate::errors::CalcResult;
use crate::reference::bowling::{SkillTier, LEAGUE_FORMULAS, SKILL_TIERS};
use crate::reference::matcher::bracket_lookup;
use crate::validation::{check, check_optional, require_one_of, Constraint, FieldMap, FromFields};

fn default_games_per_series() -> u32 {
    3
}

/// Input parameters for a handicap calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "basis_score": 220,
///   "percentage": 90,
///   "game_scores": [150, 160, 171]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingInput {
    /// League basis (scratch) score, 0-300
    pub basis_score: f64,
    /// Percentage of the difference awarded, (0, 100]
    pub percentage: f64,
    /// Established average, if known
    #[serde(default)]
    pub average: Option<f64>,
    /// Recent game scores used when no average is given
    #[serde(default)]
    pub game_scores: Option<Vec<f64>>,
    /// Games per league series
    #[serde(default = "default_games_per_series")]
    pub games_per_series: u32,
}

impl FromFields for BowlingInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        Ok(Self {
            basis_score: fields.number("basis_score")?,
            percentage: fields.number("percentage")?,
            average: fields.optional_number("average")?,
            game_scores: fields.number_list("game_scores")?,
            games_per_series: fields.whole_or("games_per_series", default_games_per_series())?,
        })
    }
}

/// Where the average came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AverageSource {
    Entered,
    GameScores { games: usize },
}

/// Handicap under one of the common league formulas
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueHandicap {
    pub formula: &'static str,
    pub handicap: u32,
}

/// Handicap calculation results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingResult {
    /// Average the handicap was computed from
    pub average: f64,
    pub average_source: AverageSource,
    /// Pins added per game
    pub handicap: u32,
    /// Pins added per series
    pub series_handicap: u32,
    /// True when the average is at or above the basis score
    pub scratch: bool,
    pub skill_tier: RangeMatch<SkillTier>,
    /// Same average run through the common league formulas
    pub league_comparison: Vec<LeagueHandicap>,
}

/// Handicap pins for one game.
///
/// # Formula
/// `max(0, floor((basis − average) × pct / 100))`
///
/// # Example
/// ```rust
/// use calc_core::calculations::bowling::handicap;
///
/// assert_eq!(handicap(220.0, 156.0, 90.0), 57);
/// assert_eq!(handicap(220.0, 230.0, 90.0), 0);
/// ```
#[inline]
pub fn handicap(basis: f64, average: f64, percentage: f64) -> u32 {
    let pins = floor_whole((basis - average) * percentage / 100.0);
    if pins > 0.0 {
        pins as u32
    } else {
        0
    }
}

/// Floor of the mean of the game scores
fn average_of(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    floor_whole(scores.iter().sum::<f64>() / scores.len() as f64)
}

pub struct BowlingHandicap;

impl Calculator for BowlingHandicap {
    const KIND: CalculatorKind = CalculatorKind::BowlingHandicap;
    type Input = BowlingInput;
    type Output = BowlingResult;

    fn validate(input: &BowlingInput) -> CalcResult<()> {
        check("basis_score", input.basis_score, Constraint::Score)?;
        check("percentage", input.percentage, Constraint::Percentage)?;
        check_optional("average", input.average, Constraint::Score)?;
        if let Some(scores) = &input.game_scores {
            for score in scores {
                check("game_scores", *score, Constraint::Score)?;
            }
        }
        check(
            "games_per_series",
            input.games_per_series as f64,
            Constraint::Range { min: 1.0, max: 10.0 },
        )?;

        let has_scores = input.game_scores.as_ref().is_some_and(|s| !s.is_empty());
        require_one_of(&[("average", input.average.is_some()), ("game_scores", has_scores)])
    }

    fn evaluate(input: &BowlingInput) -> CalcResult<BowlingResult> {
        let (average, average_source) = match (input.average, &input.game_scores) {
            (Some(avg), _) => (avg, AverageSource::Entered),
            (None, Some(scores)) => (average_of(scores), AverageSource::GameScores { games: scores.len() }),
            (None, None) => (0.0, AverageSource::Entered),
        };

        let pins = handicap(input.basis_score, average, input.percentage);

        let league_comparison = LEAGUE_FORMULAS
            .iter()
            .map(|f| LeagueHandicap {
                formula: f.name,
                handicap: handicap(f.basis_score, average, f.percentage),
            })
            .collect();

        Ok(BowlingResult {
            average,
            average_source,
            handicap: pins,
            series_handicap: pins * input.games_per_series,
            scratch: average >= input.basis_score,
            skill_tier: bracket_lookup(&SKILL_TIERS, average).cloned(),
            league_comparison,
        })
    }
}

impl Summary for BowlingResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        Some(("Handicap", Quantity::new(self.handicap as f64, Unit::Pins)))
    }

    fn details(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Average: {}", self.average),
            format!("Series handicap: {} pins", self.series_handicap),
        ];
        if let Some(tier) = self.skill_tier.matched() {
            lines.push(format!("Skill level: {}", tier.label));
        }
        if self.scratch {
            lines.push("Average meets the basis score; bowls scratch".to_string());
        }
        for league in &self.league_comparison {
            lines.push(format!("  {}: {} pins", league.formula, league.handicap));
        }
        lines
    }
}
