//! # Calculators
//!
//! Every calculator follows the same pipeline:
//!
//! 1. `*Input` - typed inputs, built from a raw [`FieldMap`] or JSON
//! 2. `validate` - range and presence checks; nothing is computed on failure
//! 3. `evaluate` - formulas plus reference table lookups
//! 4. `*Result` - JSON-serializable result with one headline value
//!
//! [`run`] drives the pipeline for a single calculator type. The
//! [`CalculationRequest`] / [`CalculationOutcome`] enums wrap all ten so a
//! shell can dispatch on a calculator id without knowing the types.
//!
//! ## Available Calculators
//!
//! - [`bowling`] - League handicap from an average or game scores
//! - [`car_payment`] - Auto loan amortization and lease payments
//! - [`ad_metrics`] - CPC / CPM / CTR with platform benchmarks
//! - [`fence`] - Picket, post and rail counts
//! - [`joists`] - Floor joist size from the span tables
//! - [`golf`] - Club lengths fitted to height and wrist-to-floor
//! - [`gravel`] - Layered driveway volume and tonnage
//! - [`landscaping`] - Installed cost estimate by line item
//! - [`rug`] - Standard rug sizes that fit a room
//! - [`ambigram`] - Letter-pair compatibility of two words
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{CalculatorKind, CalculationOutcome};
//! use calc_core::validation::FieldMap;
//!
//! let fields = FieldMap::new()
//!     .with("basis_score", "220")
//!     .with("percentage", "90")
//!     .with("average", "156");
//!
//! let outcome = CalculatorKind::BowlingHandicap.run_fields(&fields).unwrap();
//! match outcome {
//!     CalculationOutcome::BowlingHandicap(result) => assert_eq!(result.handicap, 57),
//!     _ => unreachable!(),
//! }
//! ```

pub mod ad_metrics;
pub mod ambigram;
pub mod bowling;
pub mod car_payment;
pub mod fence;
pub mod golf;
pub mod gravel;
pub mod joists;
pub mod landscaping;
pub mod rug;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::composer::Quantity;
use crate::errors::{CalcError, CalcResult};
use crate::validation::{FieldMap, FromFields};

pub use ad_metrics::{AdMetrics, AdMetricsInput, AdMetricsResult};
pub use ambigram::{Ambigram, AmbigramInput, AmbigramResult};
pub use bowling::{BowlingHandicap, BowlingInput, BowlingResult};
pub use car_payment::{CarPayment, CarPaymentInput, CarPaymentResult};
pub use fence::{FenceInput, FencePickets, FenceResult};
pub use golf::{GolfClubLength, GolfInput, GolfResult};
pub use gravel::{GravelDriveway, GravelInput, GravelResult};
pub use joists::{FloorJoistInput, FloorJoistResult, FloorJoists};
pub use landscaping::{LandscapingCost, LandscapingInput, LandscapingResult};
pub use rug::{RugInput, RugResult, RugSize};

// ============================================================================
// Calculator trait
// ============================================================================

/// One calculator: its inputs, checks, formulas and result shape.
pub trait Calculator {
    const KIND: CalculatorKind;

    type Input: FromFields + Serialize + DeserializeOwned + fmt::Debug;
    type Output: Serialize + Summary;

    /// Reject inputs that are missing, malformed or out of range.
    fn validate(input: &Self::Input) -> CalcResult<()>;

    /// Compute the result. Only called on validated input.
    fn evaluate(input: &Self::Input) -> CalcResult<Self::Output>;
}

/// Text rendering hooks shared by every result.
pub trait Summary {
    /// Label and value of the primary figure, or `None` when the input fell
    /// outside the reference tables and there is nothing to recommend
    fn headline(&self) -> Option<(&'static str, Quantity)>;

    /// Secondary lines shown under the headline
    fn details(&self) -> Vec<String>;
}

/// Validate then evaluate.
pub fn run<C: Calculator>(input: &C::Input) -> CalcResult<C::Output> {
    let span = debug_span!("calculate", calculator = C::KIND.id());
    let _guard = span.enter();

    if let Err(err) = C::validate(input) {
        debug!(code = err.error_code(), error = %err, "input rejected");
        return Err(err);
    }
    let output = C::evaluate(input)?;
    debug!("calculation complete");
    Ok(output)
}

/// Parse a raw form snapshot and run.
pub fn run_fields<C: Calculator>(fields: &FieldMap) -> CalcResult<C::Output> {
    let input = C::Input::from_fields(fields).map_err(|err| {
        debug!(calculator = C::KIND.id(), code = err.error_code(), error = %err, "field parsing failed");
        err
    })?;
    run::<C>(&input)
}

// ============================================================================
// Calculator registry
// ============================================================================

/// Identifier for each calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    BowlingHandicap,
    CarPayment,
    AdMetrics,
    FencePickets,
    FloorJoists,
    GolfClubLength,
    GravelDriveway,
    LandscapingCost,
    RugSize,
    Ambigram,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 10] = [
        CalculatorKind::BowlingHandicap,
        CalculatorKind::CarPayment,
        CalculatorKind::AdMetrics,
        CalculatorKind::FencePickets,
        CalculatorKind::FloorJoists,
        CalculatorKind::GolfClubLength,
        CalculatorKind::GravelDriveway,
        CalculatorKind::LandscapingCost,
        CalculatorKind::RugSize,
        CalculatorKind::Ambigram,
    ];

    /// Stable kebab-case id used on the command line and in requests
    pub fn id(&self) -> &'static str {
        match self {
            CalculatorKind::BowlingHandicap => "bowling-handicap",
            CalculatorKind::CarPayment => "car-payment",
            CalculatorKind::AdMetrics => "ad-metrics",
            CalculatorKind::FencePickets => "fence-pickets",
            CalculatorKind::FloorJoists => "floor-joists",
            CalculatorKind::GolfClubLength => "golf-club-length",
            CalculatorKind::GravelDriveway => "gravel-driveway",
            CalculatorKind::LandscapingCost => "landscaping-cost",
            CalculatorKind::RugSize => "rug-size",
            CalculatorKind::Ambigram => "ambigram",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculatorKind::BowlingHandicap => "Bowling Handicap",
            CalculatorKind::CarPayment => "Car Loan & Lease Payment",
            CalculatorKind::AdMetrics => "Ad CPC / CPM Metrics",
            CalculatorKind::FencePickets => "Fence Picket Count",
            CalculatorKind::FloorJoists => "Floor Joist Sizing",
            CalculatorKind::GolfClubLength => "Golf Club Length",
            CalculatorKind::GravelDriveway => "Gravel Driveway",
            CalculatorKind::LandscapingCost => "Landscaping Cost",
            CalculatorKind::RugSize => "Rug Size",
            CalculatorKind::Ambigram => "Ambigram Preview",
        }
    }

    /// Fields that must be present (alternatives listed as `a|b`)
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            CalculatorKind::BowlingHandicap => &["basis_score", "percentage", "average|game_scores"],
            CalculatorKind::CarPayment => &["vehicle_price", "interest_rate|money_factor", "term_months"],
            CalculatorKind::AdMetrics => &["ad_spend + clicks | cpm + ctr"],
            CalculatorKind::FencePickets => &["fence_length", "picket_width"],
            CalculatorKind::FloorJoists => &["span_feet", "floor_width"],
            CalculatorKind::GolfClubLength => &["height"],
            CalculatorKind::GravelDriveway => &["length", "width"],
            CalculatorKind::LandscapingCost => &["area", "one line item"],
            CalculatorKind::RugSize => &["room_length", "room_width"],
            CalculatorKind::Ambigram => &["word_one", "word_two"],
        }
    }

    /// Parse raw fields, run, and wrap the result.
    pub fn run_fields(&self, fields: &FieldMap) -> CalcResult<CalculationOutcome> {
        Ok(match self {
            CalculatorKind::BowlingHandicap => {
                CalculationOutcome::BowlingHandicap(run_fields::<BowlingHandicap>(fields)?)
            }
            CalculatorKind::CarPayment => CalculationOutcome::CarPayment(run_fields::<CarPayment>(fields)?),
            CalculatorKind::AdMetrics => CalculationOutcome::AdMetrics(run_fields::<AdMetrics>(fields)?),
            CalculatorKind::FencePickets => CalculationOutcome::FencePickets(run_fields::<FencePickets>(fields)?),
            CalculatorKind::FloorJoists => CalculationOutcome::FloorJoists(run_fields::<FloorJoists>(fields)?),
            CalculatorKind::GolfClubLength => {
                CalculationOutcome::GolfClubLength(run_fields::<GolfClubLength>(fields)?)
            }
            CalculatorKind::GravelDriveway => {
                CalculationOutcome::GravelDriveway(run_fields::<GravelDriveway>(fields)?)
            }
            CalculatorKind::LandscapingCost => {
                CalculationOutcome::LandscapingCost(run_fields::<LandscapingCost>(fields)?)
            }
            CalculatorKind::RugSize => CalculationOutcome::RugSize(run_fields::<RugSize>(fields)?),
            CalculatorKind::Ambigram => CalculationOutcome::Ambigram(run_fields::<Ambigram>(fields)?),
        })
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        CalculatorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == normalized)
            .ok_or(CalcError::UnknownCalculator { name: s.trim().to_string() })
    }
}

// ============================================================================
// Typed requests and outcomes
// ============================================================================

/// A fully typed request for any calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "calculator": "bowling-handicap",
///   "basis_score": 220,
///   "percentage": 90,
///   "average": 156
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculationRequest {
    BowlingHandicap(BowlingInput),
    CarPayment(CarPaymentInput),
    AdMetrics(AdMetricsInput),
    FencePickets(FenceInput),
    FloorJoists(FloorJoistInput),
    GolfClubLength(GolfInput),
    GravelDriveway(GravelInput),
    LandscapingCost(LandscapingInput),
    RugSize(RugInput),
    Ambigram(AmbigramInput),
}

impl CalculationRequest {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationRequest::BowlingHandicap(_) => CalculatorKind::BowlingHandicap,
            CalculationRequest::CarPayment(_) => CalculatorKind::CarPayment,
            CalculationRequest::AdMetrics(_) => CalculatorKind::AdMetrics,
            CalculationRequest::FencePickets(_) => CalculatorKind::FencePickets,
            CalculationRequest::FloorJoists(_) => CalculatorKind::FloorJoists,
            CalculationRequest::GolfClubLength(_) => CalculatorKind::GolfClubLength,
            CalculationRequest::GravelDriveway(_) => CalculatorKind::GravelDriveway,
            CalculationRequest::LandscapingCost(_) => CalculatorKind::LandscapingCost,
            CalculationRequest::RugSize(_) => CalculatorKind::RugSize,
            CalculationRequest::Ambigram(_) => CalculatorKind::Ambigram,
        }
    }

    /// Build a typed request from a raw form snapshot
    pub fn from_fields(kind: CalculatorKind, fields: &FieldMap) -> CalcResult<Self> {
        Ok(match kind {
            CalculatorKind::BowlingHandicap => CalculationRequest::BowlingHandicap(FromFields::from_fields(fields)?),
            CalculatorKind::CarPayment => CalculationRequest::CarPayment(FromFields::from_fields(fields)?),
            CalculatorKind::AdMetrics => CalculationRequest::AdMetrics(FromFields::from_fields(fields)?),
            CalculatorKind::FencePickets => CalculationRequest::FencePickets(FromFields::from_fields(fields)?),
            CalculatorKind::FloorJoists => CalculationRequest::FloorJoists(FromFields::from_fields(fields)?),
            CalculatorKind::GolfClubLength => CalculationRequest::GolfClubLength(FromFields::from_fields(fields)?),
            CalculatorKind::GravelDriveway => CalculationRequest::GravelDriveway(FromFields::from_fields(fields)?),
            CalculatorKind::LandscapingCost => CalculationRequest::LandscapingCost(FromFields::from_fields(fields)?),
            CalculatorKind::RugSize => CalculationRequest::RugSize(FromFields::from_fields(fields)?),
            CalculatorKind::Ambigram => CalculationRequest::Ambigram(FromFields::from_fields(fields)?),
        })
    }

    /// Run whichever calculator this request targets
    pub fn run(&self) -> CalcResult<CalculationOutcome> {
        Ok(match self {
            CalculationRequest::BowlingHandicap(input) => {
                CalculationOutcome::BowlingHandicap(run::<BowlingHandicap>(input)?)
            }
            CalculationRequest::CarPayment(input) => CalculationOutcome::CarPayment(run::<CarPayment>(input)?),
            CalculationRequest::AdMetrics(input) => CalculationOutcome::AdMetrics(run::<AdMetrics>(input)?),
            CalculationRequest::FencePickets(input) => CalculationOutcome::FencePickets(run::<FencePickets>(input)?),
            CalculationRequest::FloorJoists(input) => CalculationOutcome::FloorJoists(run::<FloorJoists>(input)?),
            CalculationRequest::GolfClubLength(input) => {
                CalculationOutcome::GolfClubLength(run::<GolfClubLength>(input)?)
            }
            CalculationRequest::GravelDriveway(input) => {
                CalculationOutcome::GravelDriveway(run::<GravelDriveway>(input)?)
            }
            CalculationRequest::LandscapingCost(input) => {
                CalculationOutcome::LandscapingCost(run::<LandscapingCost>(input)?)
            }
            CalculationRequest::RugSize(input) => CalculationOutcome::RugSize(run::<RugSize>(input)?),
            CalculationRequest::Ambigram(input) => CalculationOutcome::Ambigram(run::<Ambigram>(input)?),
        })
    }
}

/// Run a typed request
pub fn run_request(request: &CalculationRequest) -> CalcResult<CalculationOutcome> {
    request.run()
}

/// Result of any calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "calculator", content = "result", rename_all = "kebab-case")]
pub enum CalculationOutcome {
    BowlingHandicap(BowlingResult),
    CarPayment(CarPaymentResult),
    AdMetrics(AdMetricsResult),
    FencePickets(FenceResult),
    FloorJoists(FloorJoistResult),
    GolfClubLength(GolfResult),
    GravelDriveway(GravelResult),
    LandscapingCost(LandscapingResult),
    RugSize(RugResult),
    Ambigram(AmbigramResult),
}

impl CalculationOutcome {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationOutcome::BowlingHandicap(_) => CalculatorKind::BowlingHandicap,
            CalculationOutcome::CarPayment(_) => CalculatorKind::CarPayment,
            CalculationOutcome::AdMetrics(_) => CalculatorKind::AdMetrics,
            CalculationOutcome::FencePickets(_) => CalculatorKind::FencePickets,
            CalculationOutcome::FloorJoists(_) => CalculatorKind::FloorJoists,
            CalculationOutcome::GolfClubLength(_) => CalculatorKind::GolfClubLength,
            CalculationOutcome::GravelDriveway(_) => CalculatorKind::GravelDriveway,
            CalculationOutcome::LandscapingCost(_) => CalculatorKind::LandscapingCost,
            CalculationOutcome::RugSize(_) => CalculatorKind::RugSize,
            CalculationOutcome::Ambigram(_) => CalculatorKind::Ambigram,
        }
    }

    fn summary(&self) -> &dyn Summary {
        match self {
            CalculationOutcome::BowlingHandicap(r) => r,
            CalculationOutcome::CarPayment(r) => r,
            CalculationOutcome::AdMetrics(r) => r,
            CalculationOutcome::FencePickets(r) => r,
            CalculationOutcome::FloorJoists(r) => r,
            CalculationOutcome::GolfClubLength(r) => r,
            CalculationOutcome::GravelDriveway(r) => r,
            CalculationOutcome::LandscapingCost(r) => r,
            CalculationOutcome::RugSize(r) => r,
            CalculationOutcome::Ambigram(r) => r,
        }
    }
}

impl Summary for CalculationOutcome {
    fn headline(&self) -> Option<(&'static str, Quantity)> {
        self.summary().headline()
    }

    fn details(&self) -> Vec<String> {
        self.summary().details()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kind_ids_round_trip() {
        for kind in CalculatorKind::ALL {
            assert_eq!(kind.id().parse::<CalculatorKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
        assert_eq!("Rug_Size".parse::<CalculatorKind>().unwrap(), CalculatorKind::RugSize);
    }

    #[test]
    fn test_unknown_calculator() {
        let err = "mortgage".parse::<CalculatorKind>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "calculator": "bowling-handicap",
            "basis_score": 220,
            "percentage": 90,
            "average": 156
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind(), CalculatorKind::BowlingHandicap);

        let outcome = run_request(&request).unwrap();
        assert_eq!(outcome.kind(), CalculatorKind::BowlingHandicap);
        let (label, value) = outcome.headline().unwrap();
        assert_eq!(label, "Handicap");
        assert_eq!(value.value, 57.0);
    }

    #[test]
    fn test_outcome_serializes_with_calculator_tag() {
        let fields = FieldMap::new().with("word_one", "bud").with("word_two", "pnq");
        let outcome = CalculatorKind::Ambigram.run_fields(&fields).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["calculator"], "ambigram");
        assert!(json["result"]["overall_score"].is_number());
    }

    #[test]
    fn test_validation_runs_before_evaluation() {
        let fields = FieldMap::new()
            .with("basis_score", "220")
            .with("percentage", "0")
            .with("average", "156");
        let err = CalculatorKind::BowlingHandicap.run_fields(&fields).unwrap_err();
        assert_eq!(err.field(), Some("percentage"));
    }

    #[test]
    fn test_from_fields_matches_run_fields() {
        let fields = FieldMap::new()
            .with("ad_spend", "500")
            .with("clicks", "250");
        let request = CalculationRequest::from_fields(CalculatorKind::AdMetrics, &fields).unwrap();
        assert_eq!(request.run().unwrap(), CalculatorKind::AdMetrics.run_fields(&fields).unwrap());
    }

    #[test]
    fn test_request_accepts_form_field_names() {
        let fields = FieldMap::new()
            .with("vehicle_price", "30000")
            .with("sales_tax", "6")
            .with("interest_rate", "5")
            .with("term_months", "60");
        let json = r#"{
            "calculator": "car-payment",
            "vehicle_price": 30000,
            "sales_tax": 6,
            "interest_rate": 5,
            "term_months": 60
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.run().unwrap(), CalculatorKind::CarPayment.run_fields(&fields).unwrap());

        let fields = FieldMap::new()
            .with("span_feet", "12")
            .with("span_inches", "6")
            .with("floor_width", "20");
        let json = r#"{"calculator": "floor-joists", "span_feet": 12, "span_inches": 6, "floor_width": 20}"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.run().unwrap(), CalculatorKind::FloorJoists.run_fields(&fields).unwrap());
    }

    #[test]
    fn test_request_accepts_field_names_with_units() {
        let json = r#"{"calculator": "rug-size", "room_length_ft": 15, "room_width_ft": 12}"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let fields = FieldMap::new().with("room_length", "15").with("room_width", "12");
        assert_eq!(request.run().unwrap(), CalculatorKind::RugSize.run_fields(&fields).unwrap());
    }
}
