//! # Unit Types
//!
//! Type-safe wrappers for the physical units the calculators work in. These
//! provide compile-time safety against unit confusion while remaining
//! lightweight (just f64 wrappers that serialize as bare numbers).
//!
//! ## Imperial (Primary)
//!
//! Formulas are evaluated in imperial units; metric input is converted at the
//! edge:
//! - Length: feet (ft), inches (in)
//! - Area: square feet (sq ft)
//! - Volume: cubic feet (cu ft), cubic yards (cu yd)
//! - Weight: short tons (2000 lb)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Centimeters, CubicFeet, CubicYards, Feet, Inches};
//!
//! let height = Centimeters(180.34);
//! let inches: Inches = height.into();
//! assert!((inches.0 - 71.0).abs() < 1e-9);
//!
//! let run = Feet(12.0);
//! let run_in: Inches = run.into();
//! assert_eq!(run_in.0, 144.0);
//!
//! let volume: CubicYards = CubicFeet(54.0).into();
//! assert_eq!(volume.0, 2.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::validation::Choice;

/// Centimeters per inch (exact by definition)
pub const CM_PER_INCH: f64 = 2.54;

/// Cubic feet per cubic yard
pub const CUBIC_FEET_PER_YARD: f64 = 27.0;

/// Cubic meters per cubic yard
pub const CUBIC_METERS_PER_YARD: f64 = 0.764_554_857_984;

/// Measurement system a user typed their values in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Feet and inches
    #[default]
    Imperial,
    /// Meters and centimeters
    Metric,
}

impl Choice for UnitSystem {
    const OPTIONS: &'static [&'static str] = &["imperial", "metric"];

    fn from_option(value: &str) -> Option<Self> {
        match value {
            "imperial" | "us" | "in" | "ft" => Some(UnitSystem::Imperial),
            "metric" | "si" | "cm" | "m" => Some(UnitSystem::Metric),
            _ => None,
        }
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_INCH)
    }
}

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_INCH)
    }
}

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 * 100.0 / CM_PER_INCH / 12.0)
    }
}

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * 12.0 * CM_PER_INCH / 100.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicFeet(pub f64);

/// Volume in cubic yards
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicYards(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl From<CubicFeet> for CubicYards {
    fn from(cf: CubicFeet) -> Self {
        CubicYards(cf.0 / CUBIC_FEET_PER_YARD)
    }
}

impl From<CubicYards> for CubicFeet {
    fn from(cy: CubicYards) -> Self {
        CubicFeet(cy.0 * CUBIC_FEET_PER_YARD)
    }
}

impl From<CubicYards> for CubicMeters {
    fn from(cy: CubicYards) -> Self {
        CubicMeters(cy.0 * CUBIC_METERS_PER_YARD)
    }
}

// ============================================================================
// Weight Units
// ============================================================================

/// Weight in short tons (2000 lb)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tons(pub f64);

impl CubicYards {
    /// Weight of this volume at a bulk density in tons per cubic yard
    pub fn to_tons(self, density_tons_per_yd3: f64) -> Tons {
        Tons(self.0 * density_tons_per_yd3)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self(0.0), |acc, x| acc + x)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SqFt);
impl_arithmetic!(CubicFeet);
impl_arithmetic!(CubicYards);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Tons);
