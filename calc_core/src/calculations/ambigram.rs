//! # Ambigram Preview
//!
//! Scores how well two words could be drawn as a rotational ambigram: the
//! design reads as `word_one` upright and as `word_two` turned 180 degrees.
//!
//! Rotation reverses letter order, so letter `i` of word one has to turn
//! into letter `n − 1 − i` of word two. Each pair is scored from the letter
//! table; a longer word leaves letters with no partner, which score 0.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::calculations::{Calculator, CalculatorKind, Summary};
use crate::composer::{label_for, Quantity, Unit};
use crate::equations::rounding::round_to;
use crate::errors::{CalcError, CalcResult};
use crate::reference::letters::{find_pair, UNLISTED_NOTE, UNLISTED_SCORE};
use crate::validation::{FieldMap, FromFields};

pub const MAX_WORD_LEN: usize = 20;

const NO_PARTNER_NOTE: &str = "no partner";

/// Overall score thresholds, best first
const RATINGS: [(f64, &str); 3] = [(8.0, "Excellent"), (6.0, "Good"), (4.0, "Challenging")];

/// Input parameters for an ambigram preview.
///
/// ## JSON Example
///
/// ```json
/// {
///   "word_one": "bud",
///   "word_two": "pnq"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbigramInput {
    pub word_one: String,
    pub word_two: String,
}

impl FromFields for AmbigramInput {
    fn from_fields(fields: &FieldMap) -> CalcResult<Self> {
        Ok(Self {
            word_one: fields.text("word_one")?,
            word_two: fields.text("word_two")?,
        })
    }
}

fn check_word(field: &str, word: &str) -> CalcResult<()> {
    let len = word.chars().count();
    if len == 0 || len > MAX_WORD_LEN {
        return Err(CalcError::invalid_input(
            field,
            word,
            format!("Must be 1 to {} letters", MAX_WORD_LEN),
        ));
    }
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CalcError::invalid_input(field, word, "Letters only (a-z)"));
    }
    Ok(())
}

/// One rotational letter pairing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterPair {
    /// 1-based position in the upright word
    pub position: usize,
    pub letter_one: Option<char>,
    pub letter_two: Option<char>,
    pub score: u8,
    pub note: &'static str,
}

/// Ambigram compatibility results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmbigramResult {
    pub word_one: String,
    pub word_two: String,
    pub pairs: Vec<LetterPair>,
    /// Mean pair score, 0-10
    pub overall_score: f64,
    pub rating: &'static str,
    pub best_pair: LetterPair,
    pub worst_pair: LetterPair,
    pub length_mismatch: bool,
}

/// Score the letters that meet when `word_two` is rotated under `word_one`.
pub fn pair_letters(word_one: &str, word_two: &str) -> Vec<LetterPair> {
    let upright: Vec<char> = word_one.chars().map(|c| c.to_ascii_lowercase()).collect();
    let rotated: Vec<char> = word_two.chars().rev().map(|c| c.to_ascii_lowercase()).collect();

    (0..upright.len().max(rotated.len()))
        .map(|i| {
            let (a, b) = (upright.get(i).copied(), rotated.get(i).copied());
            let (score, note) = match (a, b) {
                (Some(a), Some(b)) => find_pair(a, b)
                    .map(|row| (row.score, row.note))
                    .unwrap_or((UNLISTED_SCORE, UNLISTED_NOTE)),
                _ => (0, NO_PARTNER_NOTE),
            };
            LetterPair {
                position: i + 1,
                letter_one: a,
                letter_two: b,
                score,
                note,
            }
        })
        .collect()
}

pub struct Ambigram;

impl Calculator for Ambigram {
    const KIND: CalculatorKind = CalculatorKind::Ambigram;
    type Input = AmbigramInput;
    type Output = AmbigramResult;

    fn validate(input: &AmbigramInput) -> CalcResult<()> {
        check_word("word_one", input.word_one.trim())?;
        check_word("word_two", input.word_two.trim())?;
        Ok(())
    }

    fn evaluate(input: &AmbigramInput) -> CalcResult<AmbigramResult> {
        let word_one = input.word_one.trim().to_ascii_lowercase();
        let word_two = input.word_two.trim().to_ascii_lowercase();
        let pairs = pair_letters(&word_one, &word_two);

        let total: u32 = pairs.iter().map(|p| u32::from(p.score)).sum();
        let overall_score = round_to(f64::from(total) / pairs.len() as f64, 1);

        // min_by_key keeps the first of equal scores
        let best_pair = pairs.iter().min_by_key(|p| Reverse(p.score)).cloned();
        let worst_pair = pairs.iter().min_by_key(|p| p.score).cloned();
        let (Some(best_pair), Some(worst_pair)) = (best_pair, worst_pair) else {
            return Err(CalcError::Internal {
                message: "no letter pairs to score".to_string(),
            });
        };

        Ok(AmbigramResult {
            length_mismatch: word_one.len() != word_two.len(),
            word_one,
            word_two,
            pairs,
            overall_score,
            rating: label_for(overall_score, &RATINGS, "Difficult"),
            best_pair,
            worst_pair,
        })
    }
}

fn letter(c: Option<char>) -> char {
    c.unwrap_or('-')
}

impl Summary for AmbigramResult {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        Some(("Compatibility", Quantity::new(self.overall_score, Unit::Points)))
    }

    fn details(&self) -> Vec<String> {
        let mut lines = vec![format!("Rating: {}", self.rating)];
        if self.length_mismatch {
            lines.push("Words differ in length; unpaired letters score 0".to_string());
        }
        for pair in &self.pairs {
            lines.push(format!(
                "  {}. {} / {}  {:>2}  {}",
                pair.position,
                letter(pair.letter_one),
                letter(pair.letter_two),
                pair.score,
                pair.note
            ));
        }
        lines
    }
}
