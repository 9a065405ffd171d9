//! # Calculation Formulas
//!
//! Closed-form expressions used by the calculators. Keeping them in one place
//! lets each formula be checked against its worked example independently of
//! the input parsing and table lookups around it.
//!
//! ## Modules
//!
//! - [`finance`] - Loan amortization and lease payments
//! - [`geometry`] - Plan areas, layer volumes, bulk weights
//! - [`rounding`] - Per-output rounding rules and guarded division
//!
//! ## Conventions
//!
//! - Percentages are whole numbers (90 means 90 %) divided by 100 where used
//! - Lengths in feet, layer depths in inches, volumes in cubic yards
//! - Functions never return `NaN` or infinity for finite, validated input

pub mod finance;
pub mod geometry;
pub mod rounding;

pub use finance::{annuity_payment, lease_payment, money_factor_from_apr, total_interest, LeasePayment};
pub use geometry::{cubic_yards, layer_volume, rectangle_area, tons_from_volume};
pub use rounding::{ceil_count, floor_whole, percent_of, round_cents, round_to, round_to_step, safe_div};
