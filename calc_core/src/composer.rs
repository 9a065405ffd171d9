//! # Result Composition
//!
//! Building blocks every calculator result is assembled from: unit-annotated
//! [`Quantity`] values, low/high [`CostRange`] bands, table match outcomes
//! ([`RangeMatch`], [`Ranked`]) and threshold labels.
//!
//! Nothing here computes anything new. These types only shape numbers the
//! formulas and matchers already produced so a shell can render them without
//! knowing which calculator ran.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::equations::rounding::round_cents;
use crate::errors::{CalcError, CalcResult};

/// Display unit attached to a result value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Dollars,
    Percent,
    Inches,
    SquareFeet,
    CubicYards,
    Tons,
    Pins,
    Count,
    Points,
}

impl Unit {
    /// Short symbol for text output
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Dollars => "$",
            Unit::Percent => "%",
            Unit::Inches => "in",
            Unit::SquareFeet => "sq ft",
            Unit::CubicYards => "cu yd",
            Unit::Tons => "tons",
            Unit::Pins => "pins",
            Unit::Count => "",
            Unit::Points => "/10",
        }
    }
}

/// A number together with the unit it should be displayed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Dollar amount, rounded to cents
    pub fn dollars(value: f64) -> Self {
        Self::new(round_cents(value), Unit::Dollars)
    }

    /// Whole-item count
    pub fn count(value: u32) -> Self {
        Self::new(value as f64, Unit::Count)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Dollars => write!(f, "${:.2}", self.value),
            Unit::Percent => write!(f, "{}%", trim_float(self.value)),
            Unit::Points => write!(f, "{}/10", trim_float(self.value)),
            Unit::Count => write!(f, "{}", trim_float(self.value)),
            unit => write!(f, "{} {}", trim_float(self.value), unit.symbol()),
        }
    }
}

fn trim_float(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Low/high estimate band for a cost
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    /// Build a range, ordering the bounds if they were given reversed
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Quantity priced at a low/high unit-price band
    ///
    /// # Example
    /// ```rust
    /// use calc_core::composer::CostRange;
    ///
    /// let cost = CostRange::from_band(120.0, 2.0, 3.5);
    /// assert_eq!(cost, CostRange::new(240.0, 420.0));
    /// ```
    pub fn from_band(quantity: f64, low: f64, high: f64) -> Self {
        Self::new(quantity * low, quantity * high)
    }

    /// Multiply both ends by a factor
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Both ends rounded to cents
    pub fn rounded(self) -> Self {
        Self::new(round_cents(self.min), round_cents(self.max))
    }
}

impl Add for CostRange {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.min + rhs.min, self.max + rhs.max)
    }
}

impl std::iter::Sum for CostRange {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CostRange::default(), |acc, x| acc + x)
    }
}

impl fmt::Display for CostRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2} - ${:.2}", self.min, self.max)
    }
}

/// Outcome of a bracket lookup.
///
/// `Unsupported` is returned instead of clamping to the nearest bracket, so
/// callers always know when a value fell outside the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RangeMatch<T> {
    /// The unique row whose range contains the value
    Matched(T),
    /// The value lies outside every row
    Unsupported { value: f64, min: f64, max: f64 },
}

impl<T> RangeMatch<T> {
    pub fn is_supported(&self) -> bool {
        matches!(self, RangeMatch::Matched(_))
    }

    pub fn matched(&self) -> Option<&T> {
        match self {
            RangeMatch::Matched(row) => Some(row),
            RangeMatch::Unsupported { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RangeMatch<U> {
        match self {
            RangeMatch::Matched(row) => RangeMatch::Matched(f(row)),
            RangeMatch::Unsupported { value, min, max } => RangeMatch::Unsupported { value, min, max },
        }
    }

    /// Turn an unsupported match into a hard error for `field`
    pub fn into_result(self, field: &str) -> CalcResult<T> {
        match self {
            RangeMatch::Matched(row) => Ok(row),
            RangeMatch::Unsupported { value, min, max } => {
                Err(CalcError::unsupported_range(field, value, min, max))
            }
        }
    }
}

impl<T: Clone> RangeMatch<&T> {
    pub fn cloned(self) -> RangeMatch<T> {
        self.map(Clone::clone)
    }
}

/// One row of a nearest-neighbour ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    /// 1-based position in the ranking
    pub rank: usize,
    /// Distance from the target (lower is closer)
    pub distance: f64,
    pub row: T,
}

impl<T> Ranked<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Ranked<U> {
        Ranked {
            rank: self.rank,
            distance: self.distance,
            row: f(self.row),
        }
    }
}

/// Pick a label from descending `(threshold, label)` tiers.
///
/// Returns the label of the first tier whose threshold `value` reaches, or
/// `fallback` when it reaches none.
///
/// # Example
/// ```rust
/// use calc_core::composer::label_for;
///
/// let tiers = [(8.0, "Excellent"), (6.0, "Good")];
/// assert_eq!(label_for(8.0, &tiers, "Poor"), "Excellent");
/// assert_eq!(label_for(7.9, &tiers, "Poor"), "Good");
/// assert_eq!(label_for(1.0, &tiers, "Poor"), "Poor");
/// ```
pub fn label_for(value: f64, tiers: &[(f64, &'static str)], fallback: &'static str) -> &'static str {
    tiers
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, label)| *label)
        .unwrap_or(fallback)
}

/// Sign of a net amount (revenue minus spend, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetOutcome {
    Profit,
    Loss,
    BreakEven,
}

impl NetOutcome {
    /// Classify a net amount at cent precision
    pub fn of(net: f64) -> Self {
        let cents = round_cents(net);
        if cents > 0.0 {
            NetOutcome::Profit
        } else if cents < 0.0 {
            NetOutcome::Loss
        } else {
            NetOutcome::BreakEven
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NetOutcome::Profit => "Profit",
            NetOutcome::Loss => "Loss",
            NetOutcome::BreakEven => "Break-even",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::dollars(510.676).to_string(), "$510.68");
        assert_eq!(Quantity::new(62.2, Unit::Tons).to_string(), "62.2 tons");
        assert_eq!(Quantity::new(2.0, Unit::Percent).to_string(), "2%");
        assert_eq!(Quantity::count(57).to_string(), "57");
    }

    #[test]
    fn test_cost_range_ops() {
        let a = CostRange::new(10.0, 5.0);
        assert_eq!(a.min, 5.0);
        assert_eq!(a.max, 10.0);
        let total: CostRange = vec![a, CostRange::new(1.0, 2.0)].into_iter().sum();
        assert_eq!(total, CostRange::new(6.0, 12.0));
        assert_eq!(total.scale(2.0).midpoint(), 18.0);
        assert_eq!(CostRange::new(1.005, 2.675).rounded(), CostRange::new(1.01, 2.68));
    }

    #[test]
    fn test_range_match_into_result() {
        let hit: RangeMatch<u8> = RangeMatch::Matched(3);
        assert_eq!(hit.clone().into_result("height").unwrap(), 3);
        assert!(hit.is_supported());

        let miss: RangeMatch<u8> = RangeMatch::Unsupported { value: 90.0, min: 48.0, max: 84.0 };
        assert!(miss.matched().is_none());
        assert_eq!(miss.into_result("height").unwrap_err().error_code(), "UNSUPPORTED_RANGE");
    }

    #[test]
    fn test_range_match_serialization() {
        let miss: RangeMatch<u8> = RangeMatch::Unsupported { value: 90.0, min: 48.0, max: 84.0 };
        let json = serde_json::to_value(&miss).unwrap();
        assert_eq!(json["status"], "unsupported");
        assert_eq!(json["detail"]["max"], 84.0);
    }

    #[test]
    fn test_net_outcome() {
        assert_eq!(NetOutcome::of(0.001), NetOutcome::BreakEven);
        assert_eq!(NetOutcome::of(-3.0), NetOutcome::Loss);
        assert_eq!(NetOutcome::of(12.5).label(), "Profit");
    }
}
